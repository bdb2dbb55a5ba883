//! Terminal output for scan results.

use numscope_core::{IntelReport, ParsedNumber};
use std::fmt::Write as _;

const BAR_WIDTH: usize = 30;

/// One-line progress bar, e.g. `[#########.....]  45%`.
pub fn progress_bar(progress: u8) -> String {
    let progress = progress.min(100);
    let filled = BAR_WIDTH * usize::from(progress) / 100;
    format!(
        "[{}{}] {progress:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    )
}

/// Short description of a validated number.
pub fn number_line(parsed: &ParsedNumber) -> String {
    format!(
        "{} ({}, +{}, {})",
        parsed.international, parsed.country_code, parsed.calling_code, parsed.line_type
    )
}

/// Human-readable report.
pub fn report_text(parsed: Option<&ParsedNumber>, report: &IntelReport) -> String {
    let mut out = String::new();

    if let Some(parsed) = parsed {
        let _ = writeln!(out, "Number:  {}", number_line(parsed));
    }
    let _ = writeln!(out, "Risk:    {}", report.security_risk);
    let _ = writeln!(out);

    for (title, body) in [
        ("Summary", &report.summary),
        ("Region", &report.region_details),
        ("Carrier", &report.carrier_info),
    ] {
        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "  {body}");
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Recommendations");
    for (i, item) in report.recommendations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {item}", i + 1);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use numscope_core::SecurityRisk;

    fn parsed() -> ParsedNumber {
        ParsedNumber {
            international: "+62 812-3456-7890".to_string(),
            e164: "+6281234567890".to_string(),
            country_code: "ID".to_string(),
            calling_code: 62,
            line_type: "Mobile".to_string(),
        }
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0), format!("[{}]   0%", ".".repeat(30)));
        assert_eq!(progress_bar(100), format!("[{}] 100%", "#".repeat(30)));
        assert_eq!(progress_bar(250), progress_bar(100));
        assert!(progress_bar(50).starts_with(&format!("[{}.", "#".repeat(15))));
    }

    #[test]
    fn test_report_text() {
        let report = IntelReport {
            summary: "x".to_string(),
            region_details: "y".to_string(),
            carrier_info: "z".to_string(),
            security_risk: SecurityRisk::High,
            recommendations: vec!["a".to_string(), "b".to_string()],
        };

        let text = report_text(Some(&parsed()), &report);

        assert!(text.starts_with("Number:  +62 812-3456-7890 (ID, +62, Mobile)\n"));
        assert!(text.contains("Risk:    High"));
        assert!(text.contains("Carrier\n  z\n"));
        assert!(text.ends_with("  1. a\n  2. b\n"));
    }
}
