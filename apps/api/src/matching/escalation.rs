//! Escalation classifier — decides, per field, whether a human still has to
//! supply the value.
//!
//! Pure function over the four preceding pipeline outputs (actions, resolved
//! fill values, generated content, resume lookup). Every field ends in
//! exactly one terminal state: filled, escalated, or silently skipped.

use std::collections::HashMap;

use crate::matching::actions::{Action, ActionTag};
use crate::matching::resolver::ResolvedValue;
use crate::models::field::FieldDescriptor;

/// Everything the classifier looks at. All maps are keyed by field id.
pub struct FieldOutcomes<'a> {
    /// Parsed action per field. Fields absent here had no mapping entry
    /// (or a null one) and escalate.
    pub actions: &'a HashMap<String, Action>,
    pub fill_values: &'a HashMap<String, ResolvedValue>,
    pub generated: &'a HashMap<String, String>,
    pub resume_found: bool,
}

/// Returns the ids needing human attention, in input field order so repeated
/// runs over identical inputs produce identical responses.
pub fn classify_escalations(fields: &[FieldDescriptor], outcomes: &FieldOutcomes) -> Vec<String> {
    fields
        .iter()
        .filter(|field| needs_human(field, outcomes))
        .map(|field| field.id.clone())
        .collect()
}

fn needs_human(field: &FieldDescriptor, outcomes: &FieldOutcomes) -> bool {
    let Some(action) = outcomes.actions.get(&field.id) else {
        // No mapping entry at all: nothing can fill it.
        return true;
    };

    match action {
        Action::Unrecognized(_) => true,
        Action::Tag { tag, .. } => match tag {
            ActionTag::NeedsHuman => true,
            ActionTag::Skip => false,
            ActionTag::ResumeUpload => !outcomes.resume_found,
            ActionTag::AcknowledgeTrue => false,
            ActionTag::CoverLetterFull
            | ActionTag::CoverLetterBody
            | ActionTag::CoverLetterWhy
            | ActionTag::GenerateAnswer => !outcomes.generated.contains_key(&field.id),
        },
        Action::ProfilePath(_) | Action::CustomAnswer(_) => {
            !outcomes.fill_values.contains_key(&field.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::FieldType;
    use serde_json::json;

    fn field(id: &str) -> FieldDescriptor {
        FieldDescriptor {
            id: id.to_string(),
            name: id.to_string(),
            label: format!("Label {id}"),
            hint: String::new(),
            field_type: FieldType::Text,
            required: false,
            options: vec![],
        }
    }

    fn outcomes<'a>(
        actions: &'a HashMap<String, Action>,
        fill_values: &'a HashMap<String, ResolvedValue>,
        generated: &'a HashMap<String, String>,
        resume_found: bool,
    ) -> FieldOutcomes<'a> {
        FieldOutcomes {
            actions,
            fill_values,
            generated,
            resume_found,
        }
    }

    #[test]
    fn test_unmapped_field_escalates() {
        let fields = vec![field("f1")];
        let actions = HashMap::new();
        let fill = HashMap::new();
        let generated = HashMap::new();
        let escalated =
            classify_escalations(&fields, &outcomes(&actions, &fill, &generated, true));
        assert_eq!(escalated, vec!["f1"]);
    }

    #[test]
    fn test_needs_human_tag_escalates_even_with_fill_value() {
        let fields = vec![field("f1")];
        let actions = HashMap::from([("f1".to_string(), Action::parse("NEEDS_HUMAN"))]);
        // A fill value does not override an explicit human classification.
        let fill = HashMap::from([(
            "f1".to_string(),
            ResolvedValue::profile(json!("something")),
        )]);
        let generated = HashMap::new();
        let escalated =
            classify_escalations(&fields, &outcomes(&actions, &fill, &generated, true));
        assert_eq!(escalated, vec!["f1"]);
    }

    #[test]
    fn test_skip_is_neither_filled_nor_escalated() {
        let fields = vec![field("f1")];
        let actions = HashMap::from([("f1".to_string(), Action::parse("SKIP"))]);
        let fill = HashMap::new();
        let generated = HashMap::new();
        let escalated =
            classify_escalations(&fields, &outcomes(&actions, &fill, &generated, true));
        assert!(escalated.is_empty());
    }

    #[test]
    fn test_resume_upload_escalates_only_without_resume() {
        let fields = vec![field("f1")];
        let actions = HashMap::from([("f1".to_string(), Action::parse("RESUME_UPLOAD"))]);
        let fill = HashMap::new();
        let generated = HashMap::new();

        let without =
            classify_escalations(&fields, &outcomes(&actions, &fill, &generated, false));
        assert_eq!(without, vec!["f1"]);

        let with = classify_escalations(&fields, &outcomes(&actions, &fill, &generated, true));
        assert!(with.is_empty());
    }

    #[test]
    fn test_generation_tag_escalates_without_generated_entry() {
        let fields = vec![field("f1"), field("f2")];
        let actions = HashMap::from([
            ("f1".to_string(), Action::parse("GENERATE_ANSWER")),
            ("f2".to_string(), Action::parse("COVER_LETTER_WHY")),
        ]);
        let fill = HashMap::new();
        let generated = HashMap::from([("f2".to_string(), "Because...".to_string())]);
        let escalated =
            classify_escalations(&fields, &outcomes(&actions, &fill, &generated, true));
        assert_eq!(escalated, vec!["f1"]);
    }

    #[test]
    fn test_acknowledge_true_never_escalates() {
        let fields = vec![field("f1")];
        let actions = HashMap::from([("f1".to_string(), Action::parse("ACKNOWLEDGE_TRUE"))]);
        let fill = HashMap::new();
        let generated = HashMap::new();
        let escalated =
            classify_escalations(&fields, &outcomes(&actions, &fill, &generated, false));
        assert!(escalated.is_empty());
    }

    #[test]
    fn test_profile_path_escalates_only_on_resolution_miss() {
        let fields = vec![field("f1"), field("f2")];
        let actions = HashMap::from([
            ("f1".to_string(), Action::parse("personal.email")),
            ("f2".to_string(), Action::parse("personal.missing")),
        ]);
        let fill = HashMap::from([(
            "f1".to_string(),
            ResolvedValue::profile(json!("john@example.com")),
        )]);
        let generated = HashMap::new();
        let escalated =
            classify_escalations(&fields, &outcomes(&actions, &fill, &generated, true));
        assert_eq!(escalated, vec!["f2"]);
    }

    #[test]
    fn test_unrecognized_action_escalates() {
        let fields = vec![field("f1")];
        let actions = HashMap::from([("f1".to_string(), Action::parse("FILL_LATER"))]);
        let fill = HashMap::new();
        let generated = HashMap::new();
        let escalated =
            classify_escalations(&fields, &outcomes(&actions, &fill, &generated, true));
        assert_eq!(escalated, vec!["f1"]);
    }

    #[test]
    fn test_escalations_preserve_input_field_order() {
        let fields = vec![field("z"), field("a"), field("m")];
        let actions = HashMap::new();
        let fill = HashMap::new();
        let generated = HashMap::new();
        let escalated =
            classify_escalations(&fields, &outcomes(&actions, &fill, &generated, true));
        assert_eq!(escalated, vec!["z", "a", "m"]);
    }
}
