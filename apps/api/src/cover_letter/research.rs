//! Company research — one LLM call per company, cached on disk.
//!
//! Research is grounding material, not a hard dependency: any failure here
//! returns `None` and the cover letter is drafted without company context.

use serde_json::json;
use tracing::{info, warn};

use crate::cache::ResearchCache;
use crate::cover_letter::prompts::{COMPANY_RESEARCH_PROMPT_TEMPLATE, COMPANY_RESEARCH_SYSTEM};
use crate::llm_client::LlmClient;

const CONTEXT_KEY: &str = "company_context";

/// Returns researched context for the company, from cache when fresh.
pub async fn company_context(
    llm: &LlmClient,
    cache: &ResearchCache,
    company: &str,
    role: &str,
    job_description: Option<&str>,
) -> Option<String> {
    if let Some(cached) = cache.get(company) {
        if let Some(text) = cached.get(CONTEXT_KEY).and_then(|v| v.as_str()) {
            info!("research: cache hit for '{company}'");
            return Some(text.to_string());
        }
    }

    let prompt = build_research_prompt(company, role, job_description);

    let response = match llm
        .call("company_research", &prompt, COMPANY_RESEARCH_SYSTEM)
        .await
    {
        Ok(r) => r,
        Err(e) => {
            warn!("research: LLM call failed for '{company}' ({e}); continuing without context");
            return None;
        }
    };

    let text = response.text()?.trim().to_string();
    if text.is_empty() {
        return None;
    }

    if let Err(e) = cache.set(company, json!({ CONTEXT_KEY: text })) {
        warn!("research: could not cache context for '{company}': {e}");
    }

    Some(text)
}

fn build_research_prompt(company: &str, role: &str, job_description: Option<&str>) -> String {
    let jd_section = match job_description {
        Some(jd) if !jd.trim().is_empty() => format!("\nJob description:\n{jd}\n"),
        _ => String::new(),
    };

    COMPANY_RESEARCH_PROMPT_TEMPLATE
        .replace("{company_name}", company)
        .replace("{role_title}", role)
        .replace("{job_description_section}", &jd_section)
}
