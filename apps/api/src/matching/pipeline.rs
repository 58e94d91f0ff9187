//! Pipeline orchestrator — sequences mapping, resolution, file lookup,
//! cover-letter generation, batch answering, and escalation into one
//! response.
//!
//! Failure policy: a collaborator failure (mapping call, cover letter,
//! answer batch, file lookup) never aborts the request — the affected
//! fields fall through to escalation and every input field still reaches a
//! terminal state. Only a missing profile or config is fatal.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::cover_letter::CoverLetter;
use crate::errors::AppError;
use crate::files::find_resume;
use crate::matching::actions::{Action, ActionTag};
use crate::matching::batch::{self, FieldTask, GenerationContext};
use crate::matching::coerce::coerce_bool;
use crate::matching::escalation::{classify_escalations, FieldOutcomes};
use crate::matching::mapper::{self, ActionMapping};
use crate::matching::resolver::{resolve_fill, ResolvedValue};
use crate::models::field::{FieldDescriptor, FieldType};
use crate::models::profile::Profile;
use crate::state::AppState;

/// Request body for POST /api/match-fields.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchFieldsRequest {
    pub fields: Vec<FieldDescriptor>,
    /// Job context scraped alongside the form, when the extension finds it.
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FileAttachments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchFieldsResponse {
    pub status: String,
    /// The raw mapping, echoed for the extension's debugging overlay.
    pub field_mappings: ActionMapping,
    pub fill_values: serde_json::Map<String, Value>,
    pub files: FileAttachments,
    pub needs_human: Vec<String>,
}

/// Runs the full pipeline for one request.
pub async fn run(
    state: &AppState,
    request: &MatchFieldsRequest,
) -> Result<MatchFieldsResponse, AppError> {
    // A missing or unreadable profile is fatal: nothing can be filled.
    let profile = Profile::load(&state.config.profile_path).map_err(AppError::Internal)?;

    // Step 1: field→action mapping (empty on failure; everything escalates).
    let mapping = mapper::match_fields(&state.llm, &request.fields, &profile).await;
    info!(
        "pipeline: mapping returned {} of {} field(s)",
        mapping.len(),
        request.fields.len()
    );

    let actions = parse_actions(&request.fields, &mapping);

    // Step 2: profile-backed fills (paths, custom answers, acknowledgments).
    let mut fill_values = resolve_profile_fills(&request.fields, &actions, &profile);

    // Step 3: resume lookup.
    let resume = find_resume(&state.config.resume_dir);

    // Step 4: cover letter, only with both company and role known.
    let cover_letter = maybe_generate_cover_letter(state, request, &actions).await;

    // Step 5: batched answer generation.
    let tasks = content_tasks(&request.fields, &actions, &mapping);
    let ctx = GenerationContext {
        cover_letter_body: cover_letter.as_ref().map(|c| c.body_text.as_str()),
        why_paragraph: cover_letter.as_ref().map(|c| c.why_paragraph.as_str()),
        profile: &profile,
    };
    let generated = batch::generate_answers(&state.llm, &tasks, &ctx).await;

    // Step 6: escalation.
    let needs_human = classify_escalations(
        &request.fields,
        &FieldOutcomes {
            actions: &actions,
            fill_values: &fill_values,
            generated: &generated,
            resume_found: resume.is_some(),
        },
    );

    // Step 7: merge. Generated text wins id collisions — it exists precisely
    // because the resolver could not satisfy those fields.
    for (id, text) in generated {
        fill_values.insert(id, ResolvedValue::generated(text));
    }

    info!(
        "pipeline: {} filled, {} escalated of {} field(s)",
        fill_values.len(),
        needs_human.len(),
        request.fields.len()
    );

    Ok(assemble_response(
        mapping,
        fill_values,
        needs_human,
        resume.map(|p| p.display().to_string()),
        cover_letter.and_then(|c| c.docx_path.map(|p| p.display().to_string())),
    ))
}

/// Parses present, non-null mapping entries. Fields absent here escalate.
fn parse_actions(
    fields: &[FieldDescriptor],
    mapping: &ActionMapping,
) -> HashMap<String, Action> {
    fields
        .iter()
        .filter_map(|field| {
            let raw = mapping.get(&field.id)?.as_deref()?;
            Some((field.id.clone(), Action::parse(raw)))
        })
        .collect()
}

/// Resolves every profile-backed action into a fill value.
fn resolve_profile_fills(
    fields: &[FieldDescriptor],
    actions: &HashMap<String, Action>,
    profile: &Profile,
) -> HashMap<String, ResolvedValue> {
    let mut fills = HashMap::new();

    for field in fields {
        let Some(action) = actions.get(&field.id) else {
            continue;
        };

        let resolved = match action {
            Action::ProfilePath(path) => resolve_fill(path, profile, &field.options),
            Action::CustomAnswer(key) => {
                resolve_fill(&format!("custom_answers.{key}"), profile, &field.options)
            }
            Action::Tag {
                tag: ActionTag::AcknowledgeTrue,
                ..
            } => Some(ResolvedValue::fixed(acknowledge_value(field))),
            _ => None,
        };

        if let Some(value) = resolved {
            fills.insert(field.id.clone(), value);
        }
    }

    fills
}

/// The fixed affirmative for ACKNOWLEDGE_TRUE: checkboxes take a literal
/// "true", enumerated fields take their closest yes-option.
fn acknowledge_value(field: &FieldDescriptor) -> String {
    if field.field_type == FieldType::Checkbox {
        "true".to_string()
    } else {
        coerce_bool(true, &field.options)
    }
}

/// Collects the batch for the answer generator, carrying the raw action
/// string so suffix instructions survive.
fn content_tasks(
    fields: &[FieldDescriptor],
    actions: &HashMap<String, Action>,
    mapping: &ActionMapping,
) -> Vec<FieldTask> {
    fields
        .iter()
        .filter(|field| {
            actions
                .get(&field.id)
                .is_some_and(Action::is_content_generation)
        })
        .filter_map(|field| {
            let raw = mapping.get(&field.id)?.as_deref()?;
            Some(FieldTask::new(field, raw))
        })
        .collect()
}

async fn maybe_generate_cover_letter(
    state: &AppState,
    request: &MatchFieldsRequest,
    actions: &HashMap<String, Action>,
) -> Option<CoverLetter> {
    let wants_letter = actions.values().any(|action| {
        matches!(
            action.tag(),
            Some(
                ActionTag::CoverLetterFull | ActionTag::CoverLetterBody | ActionTag::CoverLetterWhy
            )
        )
    });
    if !wants_letter {
        return None;
    }

    let company = request.company.as_deref().filter(|c| !c.trim().is_empty())?;
    let role = request.role.as_deref().filter(|r| !r.trim().is_empty())?;

    match state
        .cover_letters
        .generate(company, role, request.job_description.as_deref())
        .await
    {
        Ok(letter) => Some(letter),
        Err(e) => {
            warn!("pipeline: cover letter generation failed ({e}); letter fields escalate");
            None
        }
    }
}

fn assemble_response(
    mapping: ActionMapping,
    fill_values: HashMap<String, ResolvedValue>,
    needs_human: Vec<String>,
    resume: Option<String>,
    cover_letter: Option<String>,
) -> MatchFieldsResponse {
    let mut values = serde_json::Map::new();
    for (id, resolved) in fill_values {
        values.insert(id, resolved.value);
    }

    MatchFieldsResponse {
        status: "complete".to_string(),
        field_mappings: mapping,
        fill_values: values,
        files: FileAttachments {
            resume,
            cover_letter,
        },
        needs_human,
    }
}
