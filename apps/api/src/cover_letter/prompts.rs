// All LLM prompt constants for the Cover Letter module.

/// System prompt for company research — plain prose output.
pub const COMPANY_RESEARCH_SYSTEM: &str =
    "You are a career research assistant. Summarize what is publicly known \
    about a company so a candidate can write an informed cover letter. \
    Be factual and concise. Do not speculate about internal matters.";

/// Company research prompt template.
/// Replace `{company_name}`, `{role_title}`, `{job_description_section}`.
pub const COMPANY_RESEARCH_PROMPT_TEMPLATE: &str = r#"Research the company below for a job application.

Company: {company_name}
Role applied for: {role_title}
{job_description_section}

Summarize in a few short paragraphs:
- What the company does and who its customers are
- Recent direction: products, launches, funding, or public engineering work
- What the company appears to value in engineers for this kind of role

Write plain prose. No headers, no bullet lists, no JSON."#;

/// System prompt for the cover-letter draft — enforces JSON-only output.
pub const COVER_LETTER_SYSTEM: &str =
    "You are an experienced cover-letter writer drafting on behalf of an \
    applicant, in the applicant's own first-person voice. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent facts about the applicant or the company.";

/// Cover-letter draft prompt template.
/// Replace: {company_name}, {role_title}, {company_context},
///          {job_description_section}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Draft a cover letter for the application below.

Company: {company_name}
Role: {role_title}

COMPANY RESEARCH (may be empty):
{company_context}
{job_description_section}

Return a JSON object with this EXACT schema:
{
  "body": "The full letter body: opening paragraph, one or two middle paragraphs, closing paragraph. No date line, no address block, no signature.",
  "why_paragraph": "One paragraph: why the applicant wants to work at this company in this role. Specific to the company research — never generic."
}

Rules:
- First person, confident but plain language. No clichés ("I am thrilled",
  "perfect fit"), no buzzword chains.
- The why_paragraph must also appear inside the body, woven in naturally.
- Keep the body under 250 words."#;
