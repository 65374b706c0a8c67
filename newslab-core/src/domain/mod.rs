//! Domain types for NewsLab

pub mod article;
pub mod exchange;
pub mod labels;
pub mod mention;
pub mod result;

pub use article::{Article, TickerEntry};
pub use exchange::{Exchange, ExchangeParseError};
pub use labels::{ResolutionMethod, RiskLevel, SentimentLabel, Severity};
pub use mention::{MentionCandidate, SignalStrength};
pub use result::ArticleResult;
