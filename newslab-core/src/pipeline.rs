//! Per-article pipeline: extraction, name fallback, exchange filter, risk,
//! sentiment and summary.
//!
//! The pipeline borrows one read-only [`TickerDirectory`] and holds no
//! mutable state, so a single instance can be shared across worker threads.
//! Rejections are ordinary outcomes, not errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::directory::TickerDirectory;
use crate::domain::{Article, ArticleResult, ResolutionMethod};
use crate::extract::{MentionExtractor, RiskyCodeTable};
use crate::filter::ExchangeFilter;
use crate::name_match::match_by_name;
use crate::risk::KeywordRiskDetector;
use crate::sentiment::SentimentScorer;
use crate::summarize::Summarizer;

/// Tunables of the per-article pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub max_sentences: usize,
    /// Matched keyword phrases kept on the result row.
    pub max_keywords: usize,
    pub risky_codes: RiskyCodeTable,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_sentences: 4,
            max_keywords: 3,
            risky_codes: RiskyCodeTable::builtin(),
        }
    }
}

/// Why an article produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Neither a ticker mention nor a company name was found.
    NoMention,
    /// No detected code is on a target exchange.
    ExchangeFilter,
    /// The resolved code itself is on the excluded exchange.
    ExcludedPrimary,
}

impl Rejection {
    pub fn name(self) -> &'static str {
        match self {
            Rejection::NoMention => "no_mention",
            Rejection::ExchangeFilter => "exchange_filter",
            Rejection::ExcludedPrimary => "excluded_primary",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Accepted(Box<ArticleResult>),
    Rejected(Rejection),
}

impl PipelineOutcome {
    pub fn accepted(self) -> Option<ArticleResult> {
        match self {
            PipelineOutcome::Accepted(result) => Some(*result),
            PipelineOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            PipelineOutcome::Accepted(_) => None,
            PipelineOutcome::Rejected(r) => Some(*r),
        }
    }
}

pub struct Pipeline<'d> {
    directory: &'d TickerDirectory,
    extractor: MentionExtractor<'d>,
    filter: ExchangeFilter<'d>,
    risk: KeywordRiskDetector,
    sentiment: SentimentScorer,
    summarizer: Summarizer<'d>,
    config: PipelineConfig,
}

impl<'d> Pipeline<'d> {
    pub fn new(directory: &'d TickerDirectory, config: PipelineConfig) -> Self {
        Self {
            directory,
            extractor: MentionExtractor::with_risky_codes(directory, config.risky_codes.clone()),
            filter: ExchangeFilter::new(directory),
            risk: KeywordRiskDetector::new(),
            sentiment: SentimentScorer::new(),
            summarizer: Summarizer::new(directory),
            config,
        }
    }

    pub fn directory(&self) -> &'d TickerDirectory {
        self.directory
    }

    pub fn extractor(&self) -> &MentionExtractor<'d> {
        &self.extractor
    }

    pub fn risk_detector(&self) -> &KeywordRiskDetector {
        &self.risk
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn process(&self, article: &Article) -> PipelineOutcome {
        let text = article.full_text();

        let (code, method, signal) = match self.extractor.extract(&text) {
            Some(m) => (m.code, ResolutionMethod::Ticker, Some(m.signal)),
            None => match match_by_name(&text, self.directory) {
                Some(code) => (code, ResolutionMethod::CompanyName, None),
                None => {
                    debug!(title = %article.title, "rejected: no mention");
                    return PipelineOutcome::Rejected(Rejection::NoMention);
                }
            },
        };

        let mut mentioned = self.extractor.detect_codes(&text);
        if !mentioned.contains(&code) {
            mentioned.push(code.clone());
        }
        if !self.filter.passes(&mentioned) {
            debug!(title = %article.title, codes = ?mentioned, "rejected: exchange filter");
            return PipelineOutcome::Rejected(Rejection::ExchangeFilter);
        }

        let exchange = match self.directory.exchange_of(&code) {
            Some(e) if e.is_target() => e,
            _ => {
                debug!(title = %article.title, %code, "rejected: primary code on excluded exchange");
                return PipelineOutcome::Rejected(Rejection::ExcludedPrimary);
            }
        };

        let risk = self.risk.analyze(&text);
        let sentiment = self.sentiment.score(&article.title, &article.body, &risk);
        let summary =
            self.summarizer
                .summarize(&article.body, &article.title, self.config.max_sentences);

        debug!(
            title = %article.title,
            %code,
            method = method.name(),
            score = sentiment.score,
            "accepted"
        );

        PipelineOutcome::Accepted(Box::new(ArticleResult {
            article: article.clone(),
            company_name: self.directory.name_of(&code).to_string(),
            resolved_code: code,
            resolved_exchange: exchange,
            resolution_method: method,
            signal,
            mentioned_codes: mentioned,
            sentiment_score: sentiment.score,
            sentiment_label: sentiment.label,
            risk_level: sentiment.risk_level,
            matched_keywords: risk
                .keywords()
                .take(self.config.max_keywords)
                .map(str::to_string)
                .collect(),
            categories: risk.categories.into_iter().collect(),
            violation_codes: risk.violation_codes.into_iter().collect(),
            summary,
        }))
    }
}
