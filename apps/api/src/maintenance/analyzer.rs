//! Analysis Orchestrator — prompt construction, one model call, field extraction.
//!
//! Flow: build_context → build_prompt → TextGenerator::generate → extract.
//!
//! Only model-call failures surface as errors. A completion that ignores the
//! requested format still yields a usable `AnalysisResult` via extractor fallbacks.

use std::time::Duration;

use tracing::{info, warn};

use crate::llm_client::{GenerateOptions, LlmError, TextGenerator};
use crate::maintenance::extractor::extract;
use crate::maintenance::models::{AnalysisResult, Category};
use crate::maintenance::prompts::{ISSUE_DESCRIPTION_PREFIX, MAINTENANCE_ANALYSIS_SYSTEM};

pub const ANALYSIS_TEMPERATURE: f32 = 0.7;
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(10);
pub const ANALYSIS_MAX_TOKENS: u32 = 1024;

pub fn analysis_options() -> GenerateOptions {
    GenerateOptions {
        temperature: ANALYSIS_TEMPERATURE,
        timeout: ANALYSIS_TIMEOUT,
        max_tokens: ANALYSIS_MAX_TOKENS,
    }
}

/// Context lines describing the property, or `None` when there is nothing to say.
pub fn build_context(property_address: Option<&str>, category: Option<Category>) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(address) = property_address.filter(|a| !a.is_empty()) {
        parts.push(format!("Property Address: {address}"));
    }
    if let Some(category) = category {
        parts.push(format!("Category: {category}"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

/// The user prompt sent to the model. An empty context counts as absent.
pub fn build_prompt(description: &str, context: Option<&str>) -> String {
    match context.filter(|c| !c.is_empty()) {
        Some(context) => format!("{context}\n\n{ISSUE_DESCRIPTION_PREFIX}{description}"),
        None => description.to_string(),
    }
}

/// Runs one analysis: a single model call, no retries.
pub async fn analyze(
    generator: &dyn TextGenerator,
    description: &str,
    context: Option<&str>,
) -> Result<AnalysisResult, LlmError> {
    let prompt = build_prompt(description, context);

    let completion = generator
        .generate(MAINTENANCE_ANALYSIS_SYSTEM, &prompt, &analysis_options())
        .await
        .inspect_err(|e| warn!("Maintenance analysis call failed: {e}"))?;

    let result = extract(&completion);
    info!(
        "Maintenance analysis complete: urgency={}, completion_chars={}",
        result.urgency,
        completion.chars().count()
    );
    Ok(result)
}
