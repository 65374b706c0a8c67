//! Exchange classification: two target exchanges and one excluded exchange.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExchangeParseError {
    #[error("unknown exchange label '{0}'")]
    Unknown(String),
}

/// Market a listed security trades on.
///
/// HNX and UPCoM are reported on. HOSE codes are still recognized in text
/// (so an article about them can be rejected) but never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Exchange {
    #[serde(rename = "HNX")]
    Hnx,
    #[serde(rename = "UPCoM")]
    Upcom,
    #[serde(rename = "HOSE")]
    Hose,
}

impl Exchange {
    /// Exchanges whose securities the pipeline reports on.
    pub const TARGETS: [Exchange; 2] = [Exchange::Hnx, Exchange::Upcom];

    /// Normalize a free-form exchange label.
    ///
    /// Accepts the aliases seen in uploaded reference tables:
    /// `UPCOM`/`UPCoM`, and `HSX`/`HOSTC` for HOSE.
    pub fn parse(label: &str) -> Result<Self, ExchangeParseError> {
        match label.trim().to_uppercase().as_str() {
            "HNX" => Ok(Exchange::Hnx),
            "UPCOM" => Ok(Exchange::Upcom),
            "HOSE" | "HSX" | "HOSTC" => Ok(Exchange::Hose),
            _ => Err(ExchangeParseError::Unknown(label.trim().to_string())),
        }
    }

    pub fn is_target(self) -> bool {
        !self.is_excluded()
    }

    pub fn is_excluded(self) -> bool {
        matches!(self, Exchange::Hose)
    }

    /// Display label, as used in reference tables and exports.
    pub fn label(self) -> &'static str {
        match self {
            Exchange::Hnx => "HNX",
            Exchange::Upcom => "UPCoM",
            Exchange::Hose => "HOSE",
        }
    }

    /// Label as it appears in upper-cased article text.
    pub fn text_label(self) -> &'static str {
        match self {
            Exchange::Hnx => "HNX",
            Exchange::Upcom => "UPCOM",
            Exchange::Hose => "HOSE",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Exchange {
    type Err = ExchangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
