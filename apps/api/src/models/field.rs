use serde::{Deserialize, Serialize};

/// Input control type reported by the browser extension.
/// Open set — unknown types deserialize to `Other` rather than failing the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Select,
    Radio,
    Checkbox,
    File,
    #[serde(other)]
    Other,
}

/// One entry of an enumerated field (select / radio group).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub text: String,
}

/// A single form field as detected by the extension.
/// Immutable for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique within a request. The extension uses DOM ids or synthetic indexes.
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    /// Placeholder / aria hint text, when present.
    #[serde(default)]
    pub hint: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Ordered as they appear in the DOM. Empty for free-text inputs.
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_deserializes_with_defaults() {
        let json = r#"{"id": "f1", "type": "select"}"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.id, "f1");
        assert_eq!(field.field_type, FieldType::Select);
        assert!(field.label.is_empty());
        assert!(!field.required);
        assert!(field.options.is_empty());
    }

    #[test]
    fn test_unknown_field_type_maps_to_other() {
        let json = r#"{"id": "f1", "type": "datetime-local"}"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, FieldType::Other);
    }

    #[test]
    fn test_options_preserve_order() {
        let json = r#"{
            "id": "f2",
            "type": "radio",
            "options": [
                {"value": "y", "text": "Yes"},
                {"value": "n", "text": "No"}
            ]
        }"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.options.len(), 2);
        assert_eq!(field.options[0].value, "y");
        assert_eq!(field.options[1].text, "No");
    }
}
