use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// User profile JSON, reloaded fresh on every request.
    pub profile_path: PathBuf,
    /// Directory scanned for the resume file.
    pub resume_dir: PathBuf,
    /// Cover letter template docx.
    pub cover_letter_template: PathBuf,
    /// Root under which rendered cover letters are written, per company.
    pub output_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub cache_max_age_days: i64,
    /// Token usage JSONL log. Empty to disable.
    pub usage_log: Option<PathBuf>,
    /// Applicant name used in output filenames, e.g. "Jane_Doe".
    pub applicant_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            profile_path: path_env("PROFILE_PATH", "user-data/profile.json"),
            resume_dir: path_env("RESUME_DIR", "user-data"),
            cover_letter_template: path_env(
                "COVER_LETTER_TEMPLATE",
                "template/cover_letter_template.docx",
            ),
            output_dir: path_env("OUTPUT_DIR", "output"),
            cache_dir: path_env("CACHE_DIR", "cache"),
            cache_max_age_days: std::env::var("CACHE_MAX_AGE_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse::<i64>()
                .context("CACHE_MAX_AGE_DAYS must be a number of days")?,
            usage_log: match std::env::var("USAGE_LOG") {
                Ok(v) if v.is_empty() => None,
                Ok(v) => Some(PathBuf::from(v)),
                Err(_) => Some(PathBuf::from("logs/token_usage.jsonl")),
            },
            applicant_name: std::env::var("APPLICANT_NAME")
                .unwrap_or_else(|_| "Applicant".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn path_env(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
