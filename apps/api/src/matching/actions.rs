//! Action taxonomy — classifies raw mapping values from the field-matching
//! LLM call into a closed set of typed actions.
//!
//! The mapping is untrusted input: values may carry suffixes
//! (`GENERATE_ANSWER:tone=formal`), use tags we have never seen, or be
//! malformed. Matching is prefix-based, never exact-equality, and anything
//! unclassifiable becomes `Unrecognized` so it escalates instead of failing
//! the request.

use crate::models::profile::CUSTOM_ANSWERS_KEY;

/// The fixed symbolic instructions the field-matching model may emit
/// instead of a profile path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionTag {
    ResumeUpload,
    CoverLetterFull,
    CoverLetterBody,
    CoverLetterWhy,
    GenerateAnswer,
    AcknowledgeTrue,
    NeedsHuman,
    Skip,
}

impl ActionTag {
    /// All tags with their wire spelling. Order matters only for parsing;
    /// no tag is a prefix of another.
    const ALL: [(ActionTag, &'static str); 8] = [
        (ActionTag::ResumeUpload, "RESUME_UPLOAD"),
        (ActionTag::CoverLetterFull, "COVER_LETTER_FULL"),
        (ActionTag::CoverLetterBody, "COVER_LETTER_BODY"),
        (ActionTag::CoverLetterWhy, "COVER_LETTER_WHY"),
        (ActionTag::GenerateAnswer, "GENERATE_ANSWER"),
        (ActionTag::AcknowledgeTrue, "ACKNOWLEDGE_TRUE"),
        (ActionTag::NeedsHuman, "NEEDS_HUMAN"),
        (ActionTag::Skip, "SKIP"),
    ];

    /// Tags whose value is produced by the batched content-generation call.
    pub fn is_content_generation(&self) -> bool {
        matches!(
            self,
            ActionTag::CoverLetterFull
                | ActionTag::CoverLetterBody
                | ActionTag::CoverLetterWhy
                | ActionTag::GenerateAnswer
        )
    }
}

/// A classified mapping value.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A known tag, with whatever suffix followed it (`GENERATE_ANSWER:tone=formal`).
    Tag {
        tag: ActionTag,
        suffix: Option<String>,
    },
    /// `custom_answers.<key>` — the key is one opaque literal, never path-split.
    CustomAnswer(String),
    /// A dotted path into the nested profile.
    ProfilePath(String),
    /// Not a known tag and not a dotted path. Escalates.
    Unrecognized(String),
}

impl Action {
    /// Classifies a raw mapping value.
    ///
    /// Tags match by prefix. The `custom_answers.` prefix is checked before
    /// dotted-path splitting because custom-answer keys may contain `.`,
    /// spaces, or punctuation.
    pub fn parse(raw: &str) -> Action {
        let raw = raw.trim();

        for (tag, spelling) in ActionTag::ALL {
            if let Some(rest) = raw.strip_prefix(spelling) {
                let suffix = rest.strip_prefix(':').unwrap_or(rest);
                let suffix = if suffix.is_empty() {
                    None
                } else {
                    Some(suffix.to_string())
                };
                return Action::Tag { tag, suffix };
            }
        }

        let custom_prefix = format!("{CUSTOM_ANSWERS_KEY}.");
        if let Some(key) = raw.strip_prefix(&custom_prefix) {
            return Action::CustomAnswer(key.to_string());
        }

        if raw.contains('.') {
            return Action::ProfilePath(raw.to_string());
        }

        Action::Unrecognized(raw.to_string())
    }

    pub fn tag(&self) -> Option<ActionTag> {
        match self {
            Action::Tag { tag, .. } => Some(*tag),
            _ => None,
        }
    }

    pub fn is_content_generation(&self) -> bool {
        self.tag().is_some_and(|t| t.is_content_generation())
    }
}
