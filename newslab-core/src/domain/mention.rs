//! Mention candidates produced by the extractor.

use serde::{Deserialize, Serialize};

use super::exchange::Exchange;

/// Which extraction tier produced a mention.
///
/// Ordered from most to least reliable; pattern tiers short-circuit the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalStrength {
    /// `(HNX: ABC)`, `(ABC - UPCOM)` and friends.
    PatternExchange,
    /// Anchored on a ticker label (`mã ABC`) or the security noun (`cổ phiếu ABC`).
    PatternLabelled,
    /// Bare `(ABC)`.
    PatternParenthetical,
    /// Scored standalone scan.
    Scanned,
}

impl SignalStrength {
    pub fn is_pattern(self) -> bool {
        !matches!(self, SignalStrength::Scanned)
    }

    pub fn name(self) -> &'static str {
        match self {
            SignalStrength::PatternExchange => "pattern-exchange",
            SignalStrength::PatternLabelled => "pattern-labelled",
            SignalStrength::PatternParenthetical => "pattern-parenthetical",
            SignalStrength::Scanned => "scanned",
        }
    }
}

/// A resolved mention of a directory code in article text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionCandidate {
    pub code: String,
    /// Always a target exchange; excluded-exchange hits are never returned.
    pub exchange: Exchange,
    pub signal: SignalStrength,
    pub confidence: f64,
    /// Character offset of the code in the analyzed text.
    pub position: usize,
}
