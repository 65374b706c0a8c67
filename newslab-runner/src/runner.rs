//! Batch runner: wires together reference loading, ingestion, the pipeline
//! and run statistics.
//!
//! Two entry points:
//! - `run_from_files()`: loads the directory and article feed, then runs. Used by CLI.
//! - `run_batch()`: takes ingested articles and a built directory. No I/O.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use newslab_core::domain::{ArticleResult, ResolutionMethod, RiskLevel};
use newslab_core::{Pipeline, PipelineOutcome, Rejection, TickerDirectory};

use crate::config::{ConfigError, RunConfig, RunId};
use crate::directory_loader::{default_rows, load_directory_file, DirectoryLoadError};
use crate::ingest::{ingest_file, IngestError, IngestStats, Ingested};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("reference table error: {0}")]
    Directory(#[from] DirectoryLoadError),
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Counters for one batch, from raw records to reported rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    #[serde(flatten)]
    pub ingest: IngestStats,

    // ── Pipeline rejections ──
    pub no_mention: usize,
    pub exchange_filter: usize,
    pub excluded_primary: usize,
    pub duplicate_titles: usize,

    // ── Reported rows ──
    pub accepted: usize,
    pub by_ticker: usize,
    pub by_company_name: usize,
    /// Accepted rows per exchange label.
    pub by_exchange: BTreeMap<String, usize>,
    pub critical: usize,
    pub warning: usize,
}

impl RunStats {
    fn record_rejection(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::NoMention => self.no_mention += 1,
            Rejection::ExchangeFilter => self.exchange_filter += 1,
            Rejection::ExcludedPrimary => self.excluded_primary += 1,
        }
    }

    fn record_accepted(&mut self, result: &ArticleResult) {
        self.accepted += 1;
        match result.resolution_method {
            ResolutionMethod::Ticker => self.by_ticker += 1,
            ResolutionMethod::CompanyName => self.by_company_name += 1,
        }
        *self
            .by_exchange
            .entry(result.resolved_exchange.label().to_string())
            .or_default() += 1;
        match result.risk_level {
            RiskLevel::Critical => self.critical += 1,
            RiskLevel::Warning => self.warning += 1,
            RiskLevel::Positive | RiskLevel::Normal => {}
        }
    }

    /// Articles that reached the pipeline.
    pub fn processed(&self) -> usize {
        self.accepted
            + self.no_mention
            + self.exchange_filter
            + self.excluded_primary
            + self.duplicate_titles
    }
}

/// A reported row, numbered from 1 in output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub no: usize,
    pub result: ArticleResult,
}

/// Complete output of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    /// Reference time the batch was screened against.
    pub generated_at: DateTime<FixedOffset>,
    pub directory_codes: usize,
    pub config: RunConfig,
    pub stats: RunStats,
    pub results: Vec<ResultRow>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl BatchReport {
    /// Rows at the given risk level, in output order.
    pub fn rows_at(&self, level: RiskLevel) -> impl Iterator<Item = &ResultRow> {
        self.results
            .iter()
            .filter(move |row| row.result.risk_level == level)
    }
}

/// Run a batch from files (the high-level entry point used by the CLI).
///
/// Without a reference table the built-in default directory is used.
pub fn run_from_files(
    articles: &Path,
    directory: Option<&Path>,
    config: &RunConfig,
    now: DateTime<FixedOffset>,
) -> Result<BatchReport, RunError> {
    config.validate()?;
    let directory = match directory {
        Some(path) => {
            let loaded = load_directory_file(path)?;
            info!(
                path = %path.display(),
                rows = loaded.rows.len(),
                dropped = loaded.dropped,
                "loaded reference table"
            );
            loaded.build()
        }
        None => TickerDirectory::build(default_rows()),
    };
    let ingested = ingest_file(articles, &config.ingest, now)?;
    Ok(run_batch(ingested, &directory, config, now))
}

/// Run ingested articles through the pipeline in parallel.
///
/// Results keep input order; repeated titles keep their first row.
pub fn run_batch(
    ingested: Ingested,
    directory: &TickerDirectory,
    config: &RunConfig,
    now: DateTime<FixedOffset>,
) -> BatchReport {
    let pipeline = Pipeline::new(directory, config.pipeline_config());
    info!(
        articles = ingested.articles.len(),
        codes = directory.len(),
        "processing batch"
    );

    let outcomes: Vec<PipelineOutcome> = ingested
        .articles
        .par_iter()
        .map(|article| pipeline.process(article))
        .collect();

    let mut stats = RunStats {
        ingest: ingested.stats,
        ..RunStats::default()
    };
    let mut titles = HashSet::new();
    let mut results = Vec::new();

    for outcome in outcomes {
        match outcome {
            PipelineOutcome::Rejected(rejection) => stats.record_rejection(rejection),
            PipelineOutcome::Accepted(result) => {
                if !titles.insert(result.article.title.clone()) {
                    stats.duplicate_titles += 1;
                    continue;
                }
                stats.record_accepted(&result);
                results.push(ResultRow {
                    no: results.len() + 1,
                    result: *result,
                });
            }
        }
    }

    info!(
        accepted = stats.accepted,
        no_mention = stats.no_mention,
        filtered = stats.exchange_filter + stats.excluded_primary,
        critical = stats.critical,
        "batch complete"
    );

    BatchReport {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        generated_at: now,
        directory_codes: directory.len(),
        config: config.clone(),
        stats,
        results,
    }
}
