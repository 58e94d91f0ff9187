//! Research cache — file-based key-value store with age-based expiry.
//!
//! Company research is slow and costs tokens; results change rarely. One
//! JSON file per company, keyed by a sanitized name, expiring after
//! `max_age_days`.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    timestamp: DateTime<Utc>,
    key: String,
    content: Value,
}

pub struct ResearchCache {
    dir: PathBuf,
    max_age: Duration,
}

impl ResearchCache {
    pub fn new(dir: impl Into<PathBuf>, max_age_days: i64) -> Self {
        Self {
            dir: dir.into(),
            max_age: Duration::days(max_age_days),
        }
    }

    /// Returns the cached content unless the entry is missing, unreadable,
    /// or older than `max_age`.
    pub fn get(&self, key: &str) -> Option<Value> {
        let path = self.entry_path(key);
        let raw = std::fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(e) => e,
            Err(e) => {
                warn!("cache: ignoring unreadable entry {}: {e}", path.display());
                return None;
            }
        };

        if Utc::now() - entry.timestamp > self.max_age {
            debug!("cache: entry for '{key}' expired");
            return None;
        }

        Some(entry.content)
    }

    /// Stores content under the key with a fresh timestamp, overwriting any
    /// previous entry.
    pub fn set(&self, key: &str, content: Value) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry {
            timestamp: Utc::now(),
            key: key.to_string(),
            content,
        };
        let path = self.entry_path(key);
        std::fs::write(&path, serde_json::to_string_pretty(&entry)?)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

/// Lowercases and collapses anything non-alphanumeric to `_` so arbitrary
/// company names become safe filenames.
fn sanitize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
