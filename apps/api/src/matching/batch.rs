//! Content generation batcher — one LLM call for every field that needs
//! synthesized text, amortizing latency and cost across the batch.
//!
//! Invoked at most once per request. Skipped entirely when the batch is
//! empty or when there is no cover-letter material to ground the answers
//! in — in that case every field in the batch is left unresolved and
//! escalates.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::prompts::PROFILE_GROUNDING_INSTRUCTION;
use crate::llm_client::{decode_lenient, LlmClient};
use crate::matching::prompts::{ANSWER_GENERATION_PROMPT_TEMPLATE, ANSWER_GENERATION_SYSTEM};
use crate::models::field::{FieldDescriptor, FieldType};
use crate::models::profile::Profile;

/// The model's explicit non-answer marker. Matched by prefix: a reply that
/// equals or starts with this is treated as "no answer" and the field escalates.
pub const NEEDS_HUMAN_MARKER: &str = "NEEDS_HUMAN";

/// One field handed to the answer generator, with the raw action string so
/// the model sees any suffix instructions (`GENERATE_ANSWER:tone=formal`).
#[derive(Debug, Clone, Serialize)]
pub struct FieldTask {
    pub id: String,
    pub label: String,
    pub hint: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub action: String,
}

impl FieldTask {
    pub fn new(field: &FieldDescriptor, raw_action: &str) -> Self {
        Self {
            id: field.id.clone(),
            label: field.label.clone(),
            hint: field.hint.clone(),
            field_type: field.field_type.clone(),
            action: raw_action.to_string(),
        }
    }
}

/// Material the generated answers must be grounded in.
pub struct GenerationContext<'a> {
    pub cover_letter_body: Option<&'a str>,
    pub why_paragraph: Option<&'a str>,
    pub profile: &'a Profile,
}

impl GenerationContext<'_> {
    fn has_grounding(&self) -> bool {
        self.cover_letter_body.is_some() || self.why_paragraph.is_some()
    }
}

/// Generates text for the whole batch in one LLM call.
///
/// Returns field id → answer text. Fields absent from the result (batch
/// skipped, call failed, reply malformed, or the model answered
/// NEEDS_HUMAN) fall through to escalation in the classifier.
pub async fn generate_answers(
    llm: &LlmClient,
    tasks: &[FieldTask],
    ctx: &GenerationContext<'_>,
) -> HashMap<String, String> {
    if tasks.is_empty() {
        return HashMap::new();
    }

    if !ctx.has_grounding() {
        warn!(
            "answer_generation: no cover-letter material available; \
             {} field(s) will escalate",
            tasks.len()
        );
        return HashMap::new();
    }

    let prompt = build_generation_prompt(tasks, ctx);

    let response = match llm
        .call("answer_generation", &prompt, ANSWER_GENERATION_SYSTEM)
        .await
    {
        Ok(r) => r,
        Err(e) => {
            warn!(
                "answer_generation: LLM call failed ({e}); batch of {} escalates",
                tasks.len()
            );
            return HashMap::new();
        }
    };

    let Some(text) = response.text() else {
        warn!("answer_generation: LLM returned no text content; batch escalates");
        return HashMap::new();
    };

    let decoded: HashMap<String, String> = decode_lenient("answer_generation", text);
    let answers = accept_answers(tasks, decoded);
    info!(
        "answer_generation: {} of {} field(s) answered",
        answers.len(),
        tasks.len()
    );
    answers
}

/// Keeps only usable answers: the id must belong to the batch, and the text
/// must not be an explicit NEEDS_HUMAN non-answer.
fn accept_answers(
    tasks: &[FieldTask],
    decoded: HashMap<String, String>,
) -> HashMap<String, String> {
    decoded
        .into_iter()
        .filter(|(id, text)| {
            tasks.iter().any(|t| &t.id == id) && !text.trim_start().starts_with(NEEDS_HUMAN_MARKER)
        })
        .collect()
}

fn build_generation_prompt(tasks: &[FieldTask], ctx: &GenerationContext<'_>) -> String {
    let profile_json = serde_json::to_string_pretty(ctx.profile.as_value())
        .unwrap_or_else(|_| "{}".to_string());
    let tasks_json = serde_json::to_string_pretty(tasks).unwrap_or_else(|_| "[]".to_string());

    ANSWER_GENERATION_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", PROFILE_GROUNDING_INSTRUCTION)
        .replace("{cover_letter_body}", ctx.cover_letter_body.unwrap_or(""))
        .replace("{why_paragraph}", ctx.why_paragraph.unwrap_or(""))
        .replace("{profile_json}", &profile_json)
        .replace("{tasks_json}", &tasks_json)
}
