//! Field→action mapping — the first LLM call of the pipeline.
//!
//! The reply is untrusted: it may be fenced, truncated, or not JSON at all.
//! Any failure here degrades to an EMPTY mapping (every field escalates);
//! it never fails the request.

use std::collections::HashMap;

use tracing::warn;

use crate::llm_client::{decode_lenient, LlmClient};
use crate::matching::prompts::{FIELD_MATCHING_PROMPT_TEMPLATE, FIELD_MATCHING_SYSTEM};
use crate::models::field::FieldDescriptor;
use crate::models::profile::Profile;

/// Raw mapping of field id → action-or-path string, exactly as the model
/// returned it. `None` (JSON null) means the model declined to map the field.
pub type ActionMapping = HashMap<String, Option<String>>;

/// Asks the LLM to map every form field to a profile path or action tag.
///
/// Returns an empty mapping on any call or parse failure.
pub async fn match_fields(
    llm: &LlmClient,
    fields: &[FieldDescriptor],
    profile: &Profile,
) -> ActionMapping {
    let prompt = build_matching_prompt(fields, profile);

    let response = match llm.call("field_matching", &prompt, FIELD_MATCHING_SYSTEM).await {
        Ok(r) => r,
        Err(e) => {
            warn!("field_matching: LLM call failed ({e}); all fields will escalate");
            return ActionMapping::new();
        }
    };

    let Some(text) = response.text() else {
        warn!("field_matching: LLM returned no text content; all fields will escalate");
        return ActionMapping::new();
    };

    decode_lenient("field_matching", text)
}

fn build_matching_prompt(fields: &[FieldDescriptor], profile: &Profile) -> String {
    let profile_json = serde_json::to_string_pretty(profile.as_value())
        .unwrap_or_else(|_| "{}".to_string());
    let fields_json =
        serde_json::to_string_pretty(fields).unwrap_or_else(|_| "[]".to_string());

    FIELD_MATCHING_PROMPT_TEMPLATE
        .replace("{profile_json}", &profile_json)
        .replace("{fields_json}", &fields_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::decode_lenient;
    use serde_json::json;

    #[test]
    fn test_mapping_decodes_null_values_as_absent() {
        let text = r#"{"f1": "personal.email", "f2": null}"#;
        let mapping: ActionMapping = decode_lenient("test", text);
        assert_eq!(
            mapping.get("f1"),
            Some(&Some("personal.email".to_string()))
        );
        assert_eq!(mapping.get("f2"), Some(&None));
    }

    #[test]
    fn test_malformed_mapping_decodes_empty() {
        let mapping: ActionMapping = decode_lenient("test", "not json at all");
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_matching_prompt_includes_fields_and_profile() {
        let fields = vec![FieldDescriptor {
            id: "first-name".to_string(),
            name: "first_name".to_string(),
            label: "First name".to_string(),
            hint: String::new(),
            field_type: Default::default(),
            required: true,
            options: vec![],
        }];
        let profile = Profile::new(json!({"personal": {"first_name": "John"}}));

        let prompt = build_matching_prompt(&fields, &profile);
        assert!(prompt.contains("first-name"));
        assert!(prompt.contains("\"first_name\": \"John\""));
        assert!(!prompt.contains("{fields_json}"));
        assert!(!prompt.contains("{profile_json}"));
    }
}
