//! NewsLab Core: per-article analysis of Vietnamese market news.
//!
//! This crate is pure computation with no I/O:
//! - Domain types (ticker entries, articles, mentions, labels, result rows)
//! - Ticker directory with a company-name token index
//! - Tiered mention extraction with a data-driven risky-code table
//! - Company-name fallback and the exchange filter
//! - Keyword risk detection and lexical sentiment scoring
//! - Extractive summarization
//! - The `Pipeline` tying the stages together

pub mod directory;
pub mod domain;
pub mod extract;
pub mod filter;
pub mod headline;
pub mod lexicon;
pub mod name_match;
pub mod pipeline;
pub mod risk;
pub mod sentiment;
pub mod summarize;
pub mod text;

pub use directory::TickerDirectory;
pub use extract::{MentionExtractor, RiskyCodeTable};
pub use filter::ExchangeFilter;
pub use headline::is_generic_headline;
pub use name_match::match_by_name;
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutcome, Rejection};
pub use risk::{KeywordRiskDetector, RiskAnalysis, RiskFinding};
pub use sentiment::{SentimentScore, SentimentScorer};
pub use summarize::Summarizer;
