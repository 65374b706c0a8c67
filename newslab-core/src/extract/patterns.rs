//! Pattern tiers: explicit ticker notations, most reliable first.
//!
//! Every pattern runs against upper-cased text and captures the code in
//! group 1. Codes are 3–4 upper-case ASCII letters.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{Exchange, SignalStrength};

/// A tier of patterns sharing one signal strength.
pub(crate) struct PatternTier {
    pub signal: SignalStrength,
    pub confidence: f64,
    pub patterns: &'static [Regex],
}

/// Confidence assigned to pattern hits; any pattern tier outranks a scan.
pub const EXCHANGE_CONFIDENCE: f64 = 300.0;
pub const LABELLED_CONFIDENCE: f64 = 200.0;
pub const PARENTHETICAL_CONFIDENCE: f64 = 150.0;

fn compile(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("built-in ticker pattern must compile"))
        .collect()
}

/// `(HNX: ABC)`, `(ABC - HNX)`, `(ABC, UPCOM)`, `(UPCOM - ABC)`.
static EXCHANGE_QUALIFIED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let exch = Exchange::TARGETS
        .iter()
        .map(|e| e.text_label())
        .collect::<Vec<_>>()
        .join("|");
    compile(&[
        format!(r"\((?:{exch})\s*:\s*([A-Z]{{3,4}})\)"),
        format!(r"\(([A-Z]{{3,4}})\s*[-–]\s*(?:{exch})\)"),
        format!(r"\(([A-Z]{{3,4}})\s*,\s*(?:{exch})\)"),
        format!(r"\((?:{exch})\s*[-–]\s*([A-Z]{{3,4}})\)"),
    ])
});

/// `mã ABC`, `mã CK: ABC`, `mã chứng khoán ABC`, `(mã: ABC)`.
static LABELLED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\bMÃ\s*(?:CK|CP|CHỨNG\s+KHOÁN)?\s*:?\s*([A-Z]{3,4})\b".to_string(),
        r"\(MÃ\s*(?:CK)?\s*:?\s*([A-Z]{3,4})\)".to_string(),
    ])
});

/// `cổ phiếu ABC`, `(cổ phiếu: ABC)`.
static SECURITY_NOUN: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\bCỔ\s+PHIẾU\s+([A-Z]{3,4})\b".to_string(),
        r"\(CỔ\s+PHIẾU\s*:?\s*([A-Z]{3,4})\)".to_string(),
    ])
});

/// Bare `(ABC)`.
static PARENTHETICAL: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"\(([A-Z]{3,4})\)".to_string()]));

/// The four pattern tiers in strict priority order.
pub(crate) fn tiers() -> [PatternTier; 4] {
    [
        PatternTier {
            signal: SignalStrength::PatternExchange,
            confidence: EXCHANGE_CONFIDENCE,
            patterns: EXCHANGE_QUALIFIED.as_slice(),
        },
        PatternTier {
            signal: SignalStrength::PatternLabelled,
            confidence: LABELLED_CONFIDENCE,
            patterns: LABELLED.as_slice(),
        },
        PatternTier {
            signal: SignalStrength::PatternLabelled,
            confidence: LABELLED_CONFIDENCE,
            patterns: SECURITY_NOUN.as_slice(),
        },
        PatternTier {
            signal: SignalStrength::PatternParenthetical,
            confidence: PARENTHETICAL_CONFIDENCE,
            patterns: PARENTHETICAL.as_slice(),
        },
    ]
}
