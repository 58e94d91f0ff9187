//! User profile — an arbitrarily nested JSON snapshot loaded fresh per request.
//!
//! The `custom_answers` sub-map is special: its keys are free-form question
//! text ("How did you hear about us?") and may contain characters that are
//! illegal in a dotted path, so they are always addressed as one literal key.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Sub-map whose keys are looked up literally, never split on `.`.
pub const CUSTOM_ANSWERS_KEY: &str = "custom_answers";

/// Read-only profile snapshot for one request.
#[derive(Debug, Clone)]
pub struct Profile {
    root: Value,
}

impl Profile {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Loads the profile JSON from disk. A missing or malformed profile is a
    /// fatal request error — there is nothing sensible to fill without it.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Profile file not found: {}", path.display()))?;
        let root: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Profile file is not valid JSON: {}", path.display()))?;
        Ok(Self { root })
    }

    /// Walks a dotted path through nested maps. Returns `None` the moment a
    /// segment is missing or an intermediate value is not a map.
    pub fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in dotted_path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Looks up a custom answer by its full literal key.
    pub fn custom_answer(&self, key: &str) -> Option<&Value> {
        self.root
            .as_object()?
            .get(CUSTOM_ANSWERS_KEY)?
            .as_object()?
            .get(key)
    }

    /// The raw profile value, serialized into LLM prompts.
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}
