// All LLM prompt constants for the Matching module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for field→action mapping — enforces JSON-only output.
pub const FIELD_MATCHING_SYSTEM: &str =
    "You are an expert at reading job-application forms and matching their \
    fields to an applicant's profile data. \
    You MUST respond with valid JSON only — a single flat JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Field-matching prompt template.
/// Replace `{profile_json}` and `{fields_json}` before sending.
pub const FIELD_MATCHING_PROMPT_TEMPLATE: &str = r#"Match each form field below to the applicant's profile data.

Return ONE flat JSON object mapping every field "id" to exactly one of:

1. A dotted profile path, e.g. "personal.first_name" or "employment.current_title".
2. "custom_answers.<question text>" when the profile's custom_answers map
   already holds an answer for that exact question. Use the question text
   verbatim as the key — do NOT shorten or rephrase it.
3. One of these action tags:
   - "RESUME_UPLOAD"     — the field expects the resume/CV file
   - "COVER_LETTER_FULL" — the field expects a complete cover letter
   - "COVER_LETTER_BODY" — the field expects the cover letter body text
   - "COVER_LETTER_WHY"  — the field asks why the applicant wants this company/role
   - "GENERATE_ANSWER"   — a freeform question answerable from the profile
   - "ACKNOWLEDGE_TRUE"  — a consent/confirmation box that should be affirmed
   - "NEEDS_HUMAN"       — sensitive or unanswerable; a human must decide
   - "SKIP"              — deliberately leave this field untouched

Rules:
- Every field id from the input MUST appear exactly once in the output object.
- Prefer a profile path over GENERATE_ANSWER whenever the profile holds the
  literal answer.
- Demographic self-identification fields (race, gender, veteran status,
  disability) are always "NEEDS_HUMAN".
- Hidden or honeypot-looking fields are "SKIP".

APPLICANT PROFILE:
{profile_json}

FORM FIELDS:
{fields_json}"#;

/// System prompt for batched answer generation — enforces JSON-only output.
pub const ANSWER_GENERATION_SYSTEM: &str =
    "You are writing short job-application answers on behalf of an applicant, \
    in the applicant's own first-person voice. \
    You MUST respond with valid JSON only — a single flat JSON object mapping \
    field ids to answer text. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Answer-generation prompt template.
/// Replace: {grounding_instruction}, {cover_letter_body}, {why_paragraph},
///          {profile_json}, {tasks_json}
pub const ANSWER_GENERATION_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

Write an answer for each form field task below. Return ONE flat JSON object:
{"<field id>": "<answer text>", ...}

Per-field rules by action:
- COVER_LETTER_FULL: the complete cover letter, assembled from the material below.
- COVER_LETTER_BODY: the cover letter body paragraphs only — no greeting, no signature.
- COVER_LETTER_WHY: the "why this company" paragraph, adapted to the field's label.
- GENERATE_ANSWER: a concise first-person answer grounded in the profile.
  Honor any instruction after the colon in the action (e.g. "tone=formal").
- Respect each field's label and hint; keep answers proportionate to the
  field (one or two sentences for small inputs, paragraphs only for textareas).
- If you cannot ground an answer, return the literal string "NEEDS_HUMAN"
  for that field id.

COVER LETTER BODY (may be empty):
{cover_letter_body}

WHY-COMPANY PARAGRAPH (may be empty):
{why_paragraph}

APPLICANT PROFILE:
{profile_json}

FIELD TASKS:
{tasks_json}"#;
