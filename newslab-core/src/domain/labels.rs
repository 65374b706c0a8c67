//! Classification labels shared by the scorers and the result row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tier of a keyword rule, and the overall tier of an article.
///
/// Precedence for aggregation: severe > warning > positive > normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Severe,
    Warning,
    Positive,
    #[default]
    Normal,
}

impl Severity {
    /// Aggregation rank; higher wins.
    fn rank(self) -> u8 {
        match self {
            Severity::Severe => 3,
            Severity::Warning => 2,
            Severity::Positive => 1,
            Severity::Normal => 0,
        }
    }

    /// The stronger of two tiers. Never downgrades.
    pub fn escalate(self, other: Severity) -> Severity {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    pub fn risk_level(self) -> RiskLevel {
        match self {
            Severity::Severe => RiskLevel::Critical,
            Severity::Warning => RiskLevel::Warning,
            Severity::Positive => RiskLevel::Positive,
            Severity::Normal => RiskLevel::Normal,
        }
    }
}

/// Reported risk level; a rename of the overall [`Severity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    Warning,
    Positive,
    Normal,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Critical,
        RiskLevel::Warning,
        RiskLevel::Positive,
        RiskLevel::Normal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RiskLevel::Critical => "critical",
            RiskLevel::Warning => "warning",
            RiskLevel::Positive => "positive",
            RiskLevel::Normal => "normal",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// `>= 60` positive, `>= 40` neutral, else negative.
    pub fn from_score(score: f64) -> Self {
        if score >= 60.0 {
            SentimentLabel::Positive
        } else if score >= 40.0 {
            SentimentLabel::Neutral
        } else {
            SentimentLabel::Negative
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the article's code was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    Ticker,
    CompanyName,
}

impl ResolutionMethod {
    pub fn name(self) -> &'static str {
        match self {
            ResolutionMethod::Ticker => "ticker",
            ResolutionMethod::CompanyName => "company_name",
        }
    }
}
