//! Keyword risk detector.
//!
//! Every phrase of the keyword table is checked against the lower-cased
//! text. There is no early exit: all matching phrases contribute to the
//! total score, and the overall severity only ever escalates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::Severity;
use crate::lexicon::{KeywordRule, RISK_KEYWORDS};

/// One matched keyword phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub keyword: String,
    pub category: String,
    pub severity: Severity,
    pub score: i32,
    pub violation_codes: Vec<String>,
}

/// Aggregate of all findings for one article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// In keyword-table order.
    pub findings: Vec<RiskFinding>,
    pub total_score: i32,
    pub overall_severity: Severity,
    pub categories: BTreeSet<String>,
    pub violation_codes: BTreeSet<String>,
}

impl RiskAnalysis {
    /// Matched phrases in keyword-table order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.findings.iter().map(|f| f.keyword.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Split a comma-separated violation string into codes.
fn violation_codes(violations: &str) -> Vec<String> {
    violations
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Scans text against a fixed keyword table.
#[derive(Debug, Clone)]
pub struct KeywordRiskDetector {
    rules: &'static [KeywordRule],
}

impl Default for KeywordRiskDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordRiskDetector {
    pub fn new() -> Self {
        Self::with_rules(RISK_KEYWORDS)
    }

    pub fn with_rules(rules: &'static [KeywordRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        self.rules
    }

    pub fn analyze(&self, text: &str) -> RiskAnalysis {
        let lower = text.to_lowercase();
        let mut analysis = RiskAnalysis::default();

        for rule in self.rules.iter().filter(|r| lower.contains(r.phrase)) {
            let codes = violation_codes(rule.violations);
            analysis.total_score += rule.score;
            analysis.overall_severity = analysis.overall_severity.escalate(rule.severity);
            analysis.categories.insert(rule.category.to_string());
            analysis.violation_codes.extend(codes.iter().cloned());
            analysis.findings.push(RiskFinding {
                keyword: rule.phrase.to_string(),
                category: rule.category.to_string(),
                severity: rule.severity,
                score: rule.score,
                violation_codes: codes,
            });
        }

        analysis
    }
}
