//! Lexical sentiment score, blended with the risk analysis.
//!
//! The tier clamp runs before the global `[0, 100]` clamp, so a severe
//! article can never be labelled positive however many positive words it
//! contains.

use serde::{Deserialize, Serialize};

use crate::domain::{RiskLevel, SentimentLabel, Severity};
use crate::lexicon::{NEGATIVE_WORDS, POSITIVE_WORDS};
use crate::risk::RiskAnalysis;

/// Neutral starting point.
pub const BASE_SCORE: f64 = 50.0;
/// Points per distinct positive or negative word present.
pub const WORD_WEIGHT: f64 = 5.0;

/// Tier caps and floors.
pub const SEVERE_CAP: f64 = 20.0;
pub const WARNING_CAP: f64 = 40.0;
pub const WARNING_DAMPING: f64 = 0.7;
pub const POSITIVE_FLOOR: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// In `[0, 100]`, one decimal.
    pub score: f64,
    pub label: SentimentLabel,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentScorer;

impl SentimentScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, title: &str, body: &str, risk: &RiskAnalysis) -> SentimentScore {
        let text = format!("{title} {body}").to_lowercase();
        let base = lexical_base(&text);
        let total = f64::from(risk.total_score);

        let blended = match risk.overall_severity {
            Severity::Severe => SEVERE_CAP.min(base + total),
            Severity::Warning => WARNING_CAP.min(base + total * WARNING_DAMPING),
            Severity::Positive => POSITIVE_FLOOR.max(base + total),
            Severity::Normal => base,
        };
        let score = round1(blended.clamp(0.0, 100.0));

        SentimentScore {
            score,
            label: SentimentLabel::from_score(score),
            risk_level: risk.overall_severity.risk_level(),
        }
    }
}

/// `50 + 5·positive − 5·negative`, counting each listed word once if present.
fn lexical_base(lower: &str) -> f64 {
    let count = |words: &[&str]| words.iter().filter(|w| lower.contains(*w)).count() as f64;
    BASE_SCORE + WORD_WEIGHT * count(POSITIVE_WORDS) - WORD_WEIGHT * count(NEGATIVE_WORDS)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
