//! Parsing of model output into an [`IntelReport`].

use crate::error::{Result, ScanError};
use numscope_core::IntelReport;
use once_cell::sync::Lazy;
use regex::Regex;

/// One Markdown code fence around the whole response, with optional language tag
static FENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$").expect("Fence regex is hardcoded and valid")
});

/// Parse raw model text as an intelligence report.
///
/// A single surrounding Markdown code fence is tolerated. Anything else that
/// does not match the report shape exactly is a malformed report.
pub fn parse_report(raw: &str) -> Result<IntelReport> {
    let body = strip_code_fence(raw.trim());

    if body.is_empty() {
        return Err(ScanError::MalformedReport("empty response".to_string()));
    }

    serde_json::from_str(body).map_err(|e| ScanError::MalformedReport(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    FENCE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str())
}
