//! Article ingestion from JSON Lines.
//!
//! One `{title, body?, published?, url?}` object per line. Records are
//! screened in a fixed order: parse, title length, generic headline, time
//! window, duplicate id. Each screen counts what it drops.

use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use newslab_core::domain::Article;
use newslab_core::is_generic_headline;

use crate::config::IngestConfig;
use crate::published::parse_published;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open article file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read article stream: {0}")]
    Io(#[from] std::io::Error),
}

/// One line of the article feed.
#[derive(Debug, Clone, Deserialize)]
struct RawArticle {
    title: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    published: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Counters for records dropped before the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub input_records: usize,
    pub malformed: usize,
    pub short_titles: usize,
    pub generic_headlines: usize,
    pub stale: usize,
    pub duplicate_ids: usize,
}

#[derive(Debug, Clone)]
pub struct Ingested {
    pub articles: Vec<Article>,
    pub stats: IngestStats,
}

/// Read and screen articles from a JSON Lines stream.
pub fn ingest_jsonl<R: BufRead>(
    reader: R,
    config: &IngestConfig,
    now: DateTime<FixedOffset>,
) -> Result<Ingested, IngestError> {
    // A window reaching past the calendar range screens nothing.
    let cutoff = now.checked_sub_signed(Duration::hours(i64::from(config.window_hours)));
    let mut stats = IngestStats::default();
    let mut seen = HashSet::new();
    let mut articles = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        stats.input_records += 1;
        let line_no = idx + 1;

        let raw: RawArticle = match serde_json::from_str(&line) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed article record");
                stats.malformed += 1;
                continue;
            }
        };
        let title = raw.title.trim().to_string();
        if title.is_empty() {
            warn!(line = line_no, "skipping article record with empty title");
            stats.malformed += 1;
            continue;
        }

        if title.chars().count() <= config.min_title_chars {
            debug!(line = line_no, %title, "title too short");
            stats.short_titles += 1;
            continue;
        }
        if config.skip_generic_headlines && is_generic_headline(&title) {
            debug!(line = line_no, %title, "generic headline");
            stats.generic_headlines += 1;
            continue;
        }

        let published_at = raw
            .published
            .as_deref()
            .and_then(|p| parse_published(p, now))
            .unwrap_or(now);
        if cutoff.is_some_and(|c| published_at < c) {
            debug!(line = line_no, %title, %published_at, "outside time window");
            stats.stale += 1;
            continue;
        }

        let article = Article {
            title,
            body: raw.body.unwrap_or_default().trim().to_string(),
            published_at,
            source_url: raw.url.unwrap_or_default().trim().to_string(),
        };
        if !seen.insert(article.id()) {
            debug!(line = line_no, url = %article.source_url, "duplicate article");
            stats.duplicate_ids += 1;
            continue;
        }
        articles.push(article);
    }

    Ok(Ingested { articles, stats })
}

/// Read and screen articles from a JSON Lines file.
pub fn ingest_file(
    path: &Path,
    config: &IngestConfig,
    now: DateTime<FixedOffset>,
) -> Result<Ingested, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    ingest_jsonl(std::io::BufReader::new(file), config, now)
}
