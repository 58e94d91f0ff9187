//! Option coercion — maps a boolean profile fact onto the closest matching
//! enumerated option of a specific form field.
//!
//! Web forms encode yes/no with wildly inconsistent option text ("Yes",
//! "true", "Y - I am authorized"). Coercion keeps one boolean profile fact
//! usable across heterogeneous forms without per-form configuration.

use crate::models::field::FieldOption;

/// Returns the option `value` to submit for a boolean, or a literal
/// `"Yes"`/`"No"` fallback when the supplied options have no match.
///
/// Priority, compared case-insensitively against both `value` and `text`
/// of each option: true → "yes" then "true"; false → "no" then "false".
pub fn coerce_bool(value: bool, options: &[FieldOption]) -> String {
    let (preferred, fallback, literal) = if value {
        ("yes", "true", "Yes")
    } else {
        ("no", "false", "No")
    };

    for candidate in [preferred, fallback] {
        if let Some(option) = options.iter().find(|o| matches_literal(o, candidate)) {
            return option.value.clone();
        }
    }

    literal.to_string()
}

fn matches_literal(option: &FieldOption, literal: &str) -> bool {
    option.value.eq_ignore_ascii_case(literal) || option.text.eq_ignore_ascii_case(literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(value: &str, text: &str) -> FieldOption {
        FieldOption {
            value: value.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_true_prefers_yes_option() {
        let options = vec![opt("yes", "Yes"), opt("true", "True")];
        assert_eq!(coerce_bool(true, &options), "yes");
    }

    #[test]
    fn test_true_falls_back_to_true_option() {
        let options = vec![opt("true", "True"), opt("no", "No")];
        assert_eq!(coerce_bool(true, &options), "true");
    }

    #[test]
    fn test_false_prefers_no_option() {
        let options = vec![opt("0", "No"), opt("1", "Yes")];
        // Match on text returns the option's submit value, not its label.
        assert_eq!(coerce_bool(false, &options), "0");
    }

    #[test]
    fn test_empty_options_fall_back_to_literal() {
        assert_eq!(coerce_bool(false, &[]), "No");
        assert_eq!(coerce_bool(true, &[]), "Yes");
    }

    #[test]
    fn test_no_match_falls_back_to_literal() {
        let options = vec![opt("1", "Affirmative"), opt("2", "Negative")];
        assert_eq!(coerce_bool(true, &options), "Yes");
        assert_eq!(coerce_bool(false, &options), "No");
    }

    #[test]
    fn test_comparison_is_case_insensitive() {
        let options = vec![opt("YES", "Oui"), opt("NO", "Non")];
        assert_eq!(coerce_bool(true, &options), "YES");
        assert_eq!(coerce_bool(false, &options), "NO");
    }
}
