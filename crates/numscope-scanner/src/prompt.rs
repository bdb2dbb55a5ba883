//! Prompt construction for intelligence reports.

use numscope_core::ParsedNumber;

/// Build the report prompt for a validated number.
///
/// The model is told to write narrative values in `language` and to answer
/// with a bare JSON object matching [`numscope_core::IntelReport`].
#[must_use]
pub fn build_report_prompt(parsed: &ParsedNumber, language: &str) -> String {
    let parts = [
        "You are a telecommunications intelligence analyst.".to_string(),
        "Produce an intelligence report for the following phone number.".to_string(),
        format!("Number: {} (E.164: {})", parsed.international, parsed.e164),
        format!(
            "Country: {} (calling code +{})",
            parsed.country_code, parsed.calling_code
        ),
        format!("Line type / carrier: {}", parsed.line_type),
        format!("Write every narrative value in {language}."),
        String::new(),
        "Respond with ONLY a JSON object, without Markdown or any text around it, \
         containing exactly these keys:"
            .to_string(),
        "- summary: string".to_string(),
        "- regionDetails: string".to_string(),
        "- carrierInfo: string".to_string(),
        "- securityRisk: one of \"Low\", \"Medium\", \"High\"".to_string(),
        "- recommendations: array of strings".to_string(),
    ];

    parts.join("\n")
}
