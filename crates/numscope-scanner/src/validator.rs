//! Phone number validation and normalization.

use crate::error::{Result, ScanError};
use numscope_core::ParsedNumber;
use phonenumber::metadata::DATABASE;
use phonenumber::{country, Mode, Type};

/// Region code libphonenumber assigns to non-geographic calling codes such as
/// +800 (international freephone) and +979 (premium rate).
pub const NON_GEOGRAPHIC_REGION: &str = "001";

/// Parse and validate a raw phone number string.
///
/// The input must be in international format (leading `+` and a country
/// calling code). Numbers that parse but are not assignable for their
/// country, e.g. with the wrong digit count, are rejected.
pub fn validate(raw: &str) -> Result<ParsedNumber> {
    let input = raw.trim();

    if input.is_empty() {
        return Err(ScanError::Validation("input is empty".to_string()));
    }

    if !input.starts_with('+') {
        return Err(ScanError::Validation(format!(
            "'{input}' is not in international format (missing leading '+')"
        )));
    }

    let number = phonenumber::parse(None, input)
        .map_err(|e| ScanError::Validation(format!("could not parse '{input}': {e}")))?;

    if !phonenumber::is_valid(&number) {
        return Err(ScanError::Validation(format!(
            "'{input}' is not a valid number for its country"
        )));
    }

    let country_code = number
        .country()
        .id()
        .map_or_else(|| NON_GEOGRAPHIC_REGION.to_string(), region_code);
    let international = number.format().mode(Mode::International).to_string();

    Ok(ParsedNumber {
        international: without_empty_extension(international),
        e164: number.format().mode(Mode::E164).to_string(),
        country_code,
        calling_code: number.code().value(),
        line_type: line_type_label(number.number_type(&DATABASE)).to_string(),
    })
}

// Variant names of `country::Id` are the ISO alpha-2 codes.
fn region_code(id: country::Id) -> String {
    format!("{id:?}")
}

// An input ending in a bare "ext" formats as "... ext. " with nothing after it.
fn without_empty_extension(formatted: String) -> String {
    match formatted.trim_end().strip_suffix("ext.") {
        Some(head) => head.trim_end().to_string(),
        None => formatted,
    }
}

fn line_type_label(kind: Type) -> &'static str {
    match kind {
        Type::Mobile => "Mobile",
        Type::FixedLine => "Fixed line",
        Type::FixedLineOrMobile => "Fixed line or mobile",
        Type::TollFree => "Toll free",
        Type::PremiumRate => "Premium rate",
        Type::SharedCost => "Shared cost",
        Type::Voip => "VoIP",
        Type::PersonalNumber => "Personal number",
        Type::Pager => "Pager",
        Type::Uan => "UAN",
        Type::Voicemail => "Voicemail",
        _ => "Unknown",
    }
}
