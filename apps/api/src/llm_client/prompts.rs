// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Common instruction appended to every prompt that answers on the
/// applicant's behalf.
pub const PROFILE_GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Answer only from the profile and cover-letter material provided. \
    Do NOT infer, interpolate, or invent facts about the applicant. \
    If the material does not support an answer for a field, return the literal \
    string NEEDS_HUMAN for that field instead of guessing.";
