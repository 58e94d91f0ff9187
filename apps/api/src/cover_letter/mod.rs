//! Cover Letter — research-grounded letter drafting and docx packaging.
//!
//! Pluggable behind a trait (carried in `AppState` as
//! `Arc<dyn CoverLetterGenerator>`) so the pipeline and its tests never
//! depend on live LLM calls or the filesystem layout.
//! All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod docx;
pub mod prompts;
pub mod research;

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Local;
use serde::Deserialize;
use tracing::{info, warn};

use crate::cache::ResearchCache;
use crate::cover_letter::docx::{render_template, sanitize_component, LetterSubstitutions};
use crate::cover_letter::prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// A generated cover letter. `docx_path` is best-effort: text generation
/// can succeed while packaging fails, and the form fields only need text.
#[derive(Debug, Clone)]
pub struct CoverLetter {
    pub body_text: String,
    pub why_paragraph: String,
    pub docx_path: Option<PathBuf>,
}

/// The cover-letter seam consumed by the matching pipeline.
/// Only invoked when both company and role are known.
#[async_trait]
pub trait CoverLetterGenerator: Send + Sync {
    async fn generate(
        &self,
        company: &str,
        role: &str,
        job_description: Option<&str>,
    ) -> Result<CoverLetter, AppError>;
}

/// JSON shape the draft LLM call must return.
#[derive(Debug, Deserialize)]
struct CoverLetterDraft {
    body: String,
    why_paragraph: String,
}

/// Production implementation: cached company research → LLM draft →
/// docx render under `<output_root>/<Company>/`.
pub struct LlmCoverLetterGenerator {
    llm: LlmClient,
    cache: ResearchCache,
    template_path: PathBuf,
    output_root: PathBuf,
    applicant_name: String,
}

impl LlmCoverLetterGenerator {
    pub fn new(
        llm: LlmClient,
        cache: ResearchCache,
        template_path: PathBuf,
        output_root: PathBuf,
        applicant_name: String,
    ) -> Self {
        Self {
            llm,
            cache,
            template_path,
            output_root,
            applicant_name,
        }
    }

    async fn draft(
        &self,
        company: &str,
        role: &str,
        context: &str,
        job_description: Option<&str>,
    ) -> Result<CoverLetterDraft, AppError> {
        let prompt = build_letter_prompt(company, role, context, job_description);

        let draft: CoverLetterDraft = self
            .llm
            .call_json("cover_letter", &prompt, COVER_LETTER_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Cover letter draft failed: {e}")))?;

        if draft.body.trim().is_empty() || draft.why_paragraph.trim().is_empty() {
            return Err(AppError::Llm(
                "Cover letter draft came back empty".to_string(),
            ));
        }

        Ok(draft)
    }

    /// Renders the docx to `<output_root>/<Company>/<applicant>_<Company>_<date>_<Role>.docx`
    /// and refreshes a `_latest` copy beside it. Failures are logged, never fatal.
    fn package(&self, company: &str, role: &str, why_paragraph: &str) -> Option<PathBuf> {
        let today = Local::now();
        let safe_company = sanitize_component(company);
        let safe_role = sanitize_component(role);

        let file_name = format!(
            "{}_{safe_company}_{}_{safe_role}.docx",
            self.applicant_name,
            today.format("%Y-%m-%d"),
        );
        let output_path = self.output_root.join(&safe_company).join(file_name);

        let subs = LetterSubstitutions {
            date: &today.format("%B %d, %Y").to_string(),
            company_line: &format!("{company} hiring team"),
            role_line: &format!("{role} role at {company}"),
            why_paragraph,
        };

        if let Err(e) = render_template(&self.template_path, &output_path, &subs) {
            warn!("cover_letter: docx packaging failed ({e}); returning text only");
            return None;
        }

        // Latest active version for this company, overwritten on every run.
        let latest_path = self
            .output_root
            .join(&safe_company)
            .join(format!("{}_Cover_letter_{safe_company}.docx", self.applicant_name));
        if let Err(e) = std::fs::copy(&output_path, &latest_path) {
            warn!("cover_letter: could not update latest copy ({e})");
        }

        info!("cover_letter: wrote {}", output_path.display());
        Some(output_path)
    }
}

#[async_trait]
impl CoverLetterGenerator for LlmCoverLetterGenerator {
    async fn generate(
        &self,
        company: &str,
        role: &str,
        job_description: Option<&str>,
    ) -> Result<CoverLetter, AppError> {
        let context =
            research::company_context(&self.llm, &self.cache, company, role, job_description)
                .await
                .unwrap_or_default();

        let draft = self.draft(company, role, &context, job_description).await?;
        let docx_path = self.package(company, role, &draft.why_paragraph);

        Ok(CoverLetter {
            body_text: draft.body,
            why_paragraph: draft.why_paragraph,
            docx_path,
        })
    }
}

fn build_letter_prompt(
    company: &str,
    role: &str,
    context: &str,
    job_description: Option<&str>,
) -> String {
    let jd_section = match job_description {
        Some(jd) if !jd.trim().is_empty() => format!("\nJOB DESCRIPTION:\n{jd}\n"),
        _ => String::new(),
    };

    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{company_name}", company)
        .replace("{role_title}", role)
        .replace("{company_context}", context)
        .replace("{job_description_section}", &jd_section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_prompt_substitutes_placeholders() {
        let prompt = build_letter_prompt("Acme", "Platform Engineer", "Acme builds rockets.", None);
        assert!(prompt.contains("Company: Acme"));
        assert!(prompt.contains("Role: Platform Engineer"));
        assert!(prompt.contains("Acme builds rockets."));
        assert!(!prompt.contains("{company_context}"));
        assert!(!prompt.contains("{job_description_section}"));
    }

    #[test]
    fn test_draft_shape_deserializes() {
        let json = r#"{"body": "Dear team, ...", "why_paragraph": "Because rockets."}"#;
        let draft: CoverLetterDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.why_paragraph, "Because rockets.");
    }

    #[test]
    fn test_draft_missing_field_fails_strictly() {
        let json = r#"{"body": "Dear team, ..."}"#;
        let result: Result<CoverLetterDraft, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
