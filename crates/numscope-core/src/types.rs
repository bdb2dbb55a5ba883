//! Shared types used across the Numscope application.
//!
//! This module defines the domain values that flow between the validator,
//! the report requester, and the scan controller.

use crate::error::NumscopeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generation token identifying one validate-then-scan session.
///
/// Tokens are issued in strictly increasing order by the scan controller.
/// An async completion carrying an older token than the current one belongs
/// to a superseded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SessionId(u64);

impl SessionId {
    /// Create a session id from a raw generation number.
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// The id issued after this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Get the raw generation number.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A validated, normalized phone number plus locale metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedNumber {
    /// Number in international format, e.g. `+62 812-3456-7890`
    pub international: String,
    /// Number in E.164 format, e.g. `+6281234567890`
    pub e164: String,
    /// ISO-3166 alpha-2 region code, e.g. `ID`, or `001` for non-geographic numbers
    pub country_code: String,
    /// Country calling code, e.g. `62`
    pub calling_code: u16,
    /// Inferred line type ("Mobile", "Fixed line", ...) or "Unknown"
    pub line_type: String,
}

/// Security risk rating assigned by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityRisk {
    /// Low risk
    Low,
    /// Medium risk
    Medium,
    /// High risk
    High,
}

impl SecurityRisk {
    /// Get the display label for this risk level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for SecurityRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityRisk {
    type Err = NumscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(NumscopeError::Validation(format!(
                "unknown security risk level '{other}', expected Low, Medium or High"
            ))),
        }
    }
}

/// Fixed-shape intelligence report produced by the language model.
///
/// The JSON form uses camelCase keys and rejects unknown fields, so a
/// response only deserializes when it matches this shape exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IntelReport {
    /// Narrative summary of the number
    pub summary: String,
    /// Description of the region the number is registered in
    pub region_details: String,
    /// Carrier / line information
    pub carrier_info: String,
    /// Overall risk rating
    pub security_risk: SecurityRisk,
    /// Ordered list of recommendations
    pub recommendations: Vec<String>,
}
