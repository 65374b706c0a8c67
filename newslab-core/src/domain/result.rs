//! ArticleResult: one surviving article, ready for the presentation layer.

use serde::{Deserialize, Serialize};

use super::article::Article;
use super::exchange::Exchange;
use super::labels::{ResolutionMethod, RiskLevel, SentimentLabel};
use super::mention::SignalStrength;

/// Immutable result row for an article that passed every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleResult {
    pub article: Article,

    // ── Resolution ──
    pub resolved_code: String,
    pub resolved_exchange: Exchange,
    pub company_name: String,
    pub resolution_method: ResolutionMethod,
    /// Extraction tier; `None` when resolved by company name.
    pub signal: Option<SignalStrength>,
    /// Every directory code detected in the text, first appearance first.
    pub mentioned_codes: Vec<String>,

    // ── Scoring ──
    /// In `[0, 100]`, one decimal.
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub risk_level: RiskLevel,
    /// Leading matched keyword phrases, in keyword-table order.
    pub matched_keywords: Vec<String>,
    pub categories: Vec<String>,
    pub violation_codes: Vec<String>,

    pub summary: String,
}
