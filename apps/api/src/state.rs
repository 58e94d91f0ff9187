use std::sync::Arc;

use crate::config::Config;
use crate::cover_letter::CoverLetterGenerator;
use crate::llm_client::LlmClient;
use crate::usage::UsageTracker;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Requests share no mutable state beyond the usage tracker, which
/// serializes its own appends — pipeline invocations are otherwise
/// independent.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable cover-letter generator. Default: LlmCoverLetterGenerator.
    pub cover_letters: Arc<dyn CoverLetterGenerator>,
    pub usage: Arc<UsageTracker>,
}
