//! Profile path resolver — turns a dotted path or custom-answer key into a
//! concrete fill value for one field.
//!
//! A path that resolves to `null` or an empty string is a miss: filling a
//! field with nothing is worse than escalating it. Numeric `0` and boolean
//! `false` are real answers and are never conflated with a miss.

use serde::Serialize;
use serde_json::Value;

use crate::matching::coerce::coerce_bool;
use crate::models::field::FieldOption;
use crate::models::profile::{Profile, CUSTOM_ANSWERS_KEY};

/// Where a fill value came from. Carried for log/debug output only — the
/// wire response flattens to the bare value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Profile,
    Generated,
    Fixed,
}

/// The final value to place into a field.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedValue {
    pub value: Value,
    pub provenance: Provenance,
}

impl ResolvedValue {
    pub fn profile(value: Value) -> Self {
        Self {
            value,
            provenance: Provenance::Profile,
        }
    }

    pub fn generated(text: String) -> Self {
        Self {
            value: Value::String(text),
            provenance: Provenance::Generated,
        }
    }

    pub fn fixed(text: String) -> Self {
        Self {
            value: Value::String(text),
            provenance: Provenance::Fixed,
        }
    }
}

/// Resolves a dotted path (or `custom_answers.<key>`) against the profile.
///
/// Returns `None` the moment a segment is missing or an intermediate value
/// is not traversable. Does NOT apply the empty-value or boolean rules —
/// that is `resolve_fill`'s job.
pub fn resolve(path: &str, profile: &Profile) -> Option<Value> {
    let custom_prefix = format!("{CUSTOM_ANSWERS_KEY}.");
    if let Some(key) = path.strip_prefix(&custom_prefix) {
        return profile.custom_answer(key).cloned();
    }
    profile.lookup(path).cloned()
}

/// Resolves a path into a fillable value for a specific field.
///
/// `None` means the field falls through to escalation: the path was missing,
/// or it resolved to `null`/empty-string. Booleans are coerced against the
/// field's options so the submitted value matches what the form expects.
pub fn resolve_fill(
    path: &str,
    profile: &Profile,
    options: &[FieldOption],
) -> Option<ResolvedValue> {
    match resolve(path, profile)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::Bool(b) => Some(ResolvedValue::profile(Value::String(coerce_bool(
            b, options,
        )))),
        value => Some(ResolvedValue::profile(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> Profile {
        Profile::new(json!({
            "personal": {
                "first_name": "John",
                "email": "john@example.com",
                "middle_name": "",
                "suffix": null,
                "years_experience": 0
            },
            "work_authorization": {
                "authorized": true,
                "requires_sponsorship": false
            },
            "custom_answers": {
                "How did you hear about us?": "LinkedIn"
            }
        }))
    }

    #[test]
    fn test_resolve_simple_path() {
        assert_eq!(
            resolve("personal.first_name", &profile()),
            Some(json!("John"))
        );
    }

    #[test]
    fn test_resolve_missing_path() {
        assert!(resolve("personal.missing", &profile()).is_none());
        assert!(resolve("nonexistent.path", &profile()).is_none());
    }

    #[test]
    fn test_resolve_custom_answer_as_single_key() {
        assert_eq!(
            resolve("custom_answers.How did you hear about us?", &profile()),
            Some(json!("LinkedIn"))
        );
    }

    #[test]
    fn test_resolve_custom_answer_missing_key() {
        assert!(resolve("custom_answers.Favorite color?", &profile()).is_none());
    }

    #[test]
    fn test_fill_null_and_empty_are_misses() {
        assert!(resolve_fill("personal.suffix", &profile(), &[]).is_none());
        assert!(resolve_fill("personal.middle_name", &profile(), &[]).is_none());
    }

    #[test]
    fn test_fill_zero_is_a_real_value() {
        let resolved = resolve_fill("personal.years_experience", &profile(), &[]).unwrap();
        assert_eq!(resolved.value, json!(0));
        assert_eq!(resolved.provenance, Provenance::Profile);
    }

    #[test]
    fn test_fill_false_coerces_against_options() {
        let options = vec![
            FieldOption {
                value: "no".to_string(),
                text: "No".to_string(),
            },
            FieldOption {
                value: "yes".to_string(),
                text: "Yes".to_string(),
            },
        ];
        let resolved =
            resolve_fill("work_authorization.requires_sponsorship", &profile(), &options).unwrap();
        assert_eq!(resolved.value, json!("no"));
    }

    #[test]
    fn test_fill_true_without_options_uses_literal() {
        let resolved = resolve_fill("work_authorization.authorized", &profile(), &[]).unwrap();
        assert_eq!(resolved.value, json!("Yes"));
    }

    #[test]
    fn test_fill_string_passes_through() {
        let resolved = resolve_fill("personal.email", &profile(), &[]).unwrap();
        assert_eq!(resolved.value, json!("john@example.com"));
    }
}
