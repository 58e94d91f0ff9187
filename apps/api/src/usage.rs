//! Usage tracker — per-call token and cost accounting for LLM calls.
//!
//! Injected into the pipeline via `AppState` rather than living as a
//! process-wide singleton, so tests get isolated trackers and concurrent
//! requests share one mutex-serialized append log.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::llm_client::Usage;

/// Pricing per 1M tokens, matched by substring of the model id.
/// Unknown models price as sonnet.
const PRICING: &[(&str, f64, f64)] = &[
    ("haiku", 1.00, 5.00),
    ("sonnet", 3.00, 15.00),
    ("opus", 15.00, 75.00),
];

const DEFAULT_PRICING: (f64, f64) = (3.00, 15.00);

fn price_for(model: &str) -> (f64, f64) {
    let model = model.to_ascii_lowercase();
    PRICING
        .iter()
        .find(|(family, _, _)| model.contains(family))
        .map(|(_, input, output)| (*input, *output))
        .unwrap_or(DEFAULT_PRICING)
}

/// One recorded LLM call.
#[derive(Debug, Clone, Serialize)]
pub struct UsageRecord {
    pub timestamp: DateTime<Utc>,
    pub task: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
    pub cost_estimate: f64,
}

/// Session totals across all recorded calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsageSummary {
    pub call_count: usize,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
}

/// Per task:model aggregation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskSummary {
    pub call_count: usize,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_estimate: f64,
}

/// Tracks token usage and estimated spend. Appends each record as one JSONL
/// line when a log path is configured; the in-memory vector backs the
/// `/api/usage` summary endpoint.
pub struct UsageTracker {
    records: Mutex<Vec<UsageRecord>>,
    log_path: Option<PathBuf>,
}

impl UsageTracker {
    pub fn new(log_path: Option<PathBuf>) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            log_path,
        }
    }

    /// Records one call. Log-file trouble is warned about and swallowed —
    /// accounting must never fail a request.
    pub fn record(&self, task: &str, model: &str, usage: Usage) {
        let (input_price, output_price) = price_for(model);
        let cost_estimate = (usage.input_tokens as f64 / 1_000_000.0) * input_price
            + (usage.output_tokens as f64 / 1_000_000.0) * output_price;

        let record = UsageRecord {
            timestamp: Utc::now(),
            task: task.to_string(),
            model: model.to_string(),
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            total_tokens: usage.input_tokens + usage.output_tokens,
            cost_estimate,
        };

        // Hold the lock across the file append so concurrent requests
        // cannot interleave partial lines.
        let mut records = self.records.lock().expect("usage tracker lock poisoned");
        if let Some(path) = &self.log_path {
            if let Err(e) = append_jsonl(path, &record) {
                warn!("usage: could not append to {}: {e}", path.display());
            }
        }
        records.push(record);
    }

    pub fn session_total(&self) -> UsageSummary {
        let records = self.records.lock().expect("usage tracker lock poisoned");
        let mut summary = UsageSummary::default();
        for record in records.iter() {
            summary.call_count += 1;
            summary.total_input_tokens += u64::from(record.input_tokens);
            summary.total_output_tokens += u64::from(record.output_tokens);
            summary.total_cost += record.cost_estimate;
        }
        summary.total_tokens = summary.total_input_tokens + summary.total_output_tokens;
        summary
    }

    /// Aggregates by `task:model`, sorted by key for stable output.
    pub fn by_task(&self) -> BTreeMap<String, TaskSummary> {
        let records = self.records.lock().expect("usage tracker lock poisoned");
        let mut out: BTreeMap<String, TaskSummary> = BTreeMap::new();
        for record in records.iter() {
            let entry = out
                .entry(format!("{}:{}", record.task, record.model))
                .or_default();
            entry.call_count += 1;
            entry.input_tokens += u64::from(record.input_tokens);
            entry.output_tokens += u64::from(record.output_tokens);
            entry.cost_estimate += record.cost_estimate;
        }
        out
    }
}

fn append_jsonl(path: &PathBuf, record: &UsageRecord) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let line = serde_json::to_string(record)?;
    writeln!(file, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(input: u32, output: u32) -> Usage {
        Usage {
            input_tokens: input,
            output_tokens: output,
        }
    }

    #[test]
    fn test_cost_uses_model_family_pricing() {
        let tracker = UsageTracker::new(None);
        tracker.record("field_matching", "claude-haiku-4-5", usage(1_000_000, 1_000_000));
        let total = tracker.session_total();
        assert_eq!(total.call_count, 1);
        // 1M input at $1 + 1M output at $5
        assert!((total.total_cost - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_model_prices_as_sonnet() {
        let tracker = UsageTracker::new(None);
        tracker.record("field_matching", "mystery-model", usage(1_000_000, 0));
        assert!((tracker.session_total().total_cost - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_session_total_sums_all_calls() {
        let tracker = UsageTracker::new(None);
        tracker.record("field_matching", "claude-sonnet-4-5", usage(100, 50));
        tracker.record("answer_generation", "claude-sonnet-4-5", usage(200, 80));
        let total = tracker.session_total();
        assert_eq!(total.call_count, 2);
        assert_eq!(total.total_input_tokens, 300);
        assert_eq!(total.total_output_tokens, 130);
        assert_eq!(total.total_tokens, 430);
    }

    #[test]
    fn test_by_task_groups_and_counts() {
        let tracker = UsageTracker::new(None);
        tracker.record("field_matching", "claude-sonnet-4-5", usage(100, 50));
        tracker.record("field_matching", "claude-sonnet-4-5", usage(100, 50));
        tracker.record("cover_letter", "claude-sonnet-4-5", usage(300, 100));

        let by_task = tracker.by_task();
        assert_eq!(by_task.len(), 2);
        let matching = &by_task["field_matching:claude-sonnet-4-5"];
        assert_eq!(matching.call_count, 2);
        assert_eq!(matching.input_tokens, 200);
    }

    #[test]
    fn test_jsonl_append_writes_one_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage.jsonl");
        let tracker = UsageTracker::new(Some(path.clone()));
        tracker.record("field_matching", "claude-sonnet-4-5", usage(10, 5));
        tracker.record("cover_letter", "claude-sonnet-4-5", usage(20, 8));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["task"], "field_matching");
        assert_eq!(first["total_tokens"], 15);
    }
}
