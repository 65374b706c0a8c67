//! Serializable run configuration, loaded from TOML.
//!
//! Every section has defaults, so an empty file is a valid configuration.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use newslab_core::{PipelineConfig, RiskyCodeTable};

/// Unique identifier for a run configuration (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete configuration of a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub ingest: IngestConfig,
    pub summary: SummaryConfig,
    pub output: OutputConfig,
    pub extraction: ExtractionConfig,
}

/// Screens applied while reading articles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    /// Articles older than this many hours are stale.
    pub window_hours: u32,
    /// Titles must be strictly longer than this many characters.
    pub min_title_chars: usize,
    pub skip_generic_headlines: bool,
    /// Offset of the newsroom clock, used for dates without an offset.
    pub timezone_offset_hours: i32,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            window_hours: 24,
            min_title_chars: 30,
            skip_generic_headlines: true,
            timezone_offset_hours: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummaryConfig {
    pub max_sentences: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { max_sentences: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Matched keyword phrases kept per result row.
    pub max_keywords: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { max_keywords: 3 }
    }
}

/// Extra colliding codes, merged into the built-in risky-code table.
///
/// ```toml
/// [extraction.risky_codes]
/// HAG = ["hàng", "hag gia lai"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    pub risky_codes: BTreeMap<String, Vec<String>>,
}

impl RunConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.summary.max_sentences == 0 {
            return Err(ConfigError::Invalid(
                "summary.max_sentences must be at least 1".into(),
            ));
        }
        if self.ingest.window_hours == 0 {
            return Err(ConfigError::Invalid(
                "ingest.window_hours must be positive".into(),
            ));
        }
        if !(-12..=14).contains(&self.ingest.timezone_offset_hours) {
            return Err(ConfigError::Invalid(format!(
                "ingest.timezone_offset_hours {} is out of range",
                self.ingest.timezone_offset_hours
            )));
        }
        Ok(())
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share a RunId.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.ingest.timezone_offset_hours * 3600).unwrap_or(Utc.fix())
    }

    /// Pipeline settings with the extra risky codes merged in.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let risky_codes = self
            .extraction
            .risky_codes
            .iter()
            .fold(RiskyCodeTable::builtin(), |table, (code, phrases)| {
                table.with_code(code, phrases.iter().map(String::as_str))
            });
        PipelineConfig {
            max_sentences: self.summary.max_sentences,
            max_keywords: self.output.max_keywords,
            risky_codes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = RunConfig::from_toml("").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.ingest.window_hours, 24);
        assert_eq!(config.ingest.min_title_chars, 30);
        assert_eq!(config.summary.max_sentences, 4);
        assert_eq!(config.output.max_keywords, 3);
        assert_eq!(config.timezone().local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = RunConfig::from_toml(
            r#"
            [ingest]
            window_hours = 48

            [extraction.risky_codes]
            HAG = ["hàng", "hag gia lai"]
            "#,
        )
        .unwrap();
        assert_eq!(config.ingest.window_hours, 48);
        assert!(config.ingest.skip_generic_headlines);
        assert_eq!(config.extraction.risky_codes["HAG"].len(), 2);

        let pipeline = config.pipeline_config();
        assert!(pipeline.risky_codes.is_risky("HAG"));
        assert!(pipeline.risky_codes.is_risky("THU"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = RunConfig::from_toml("[summary]\nmax_sentences = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = RunConfig::from_toml("[ingest]\nwindow_hours = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = RunConfig::from_toml("[ingest]\ntimezone_offset_hours = 20").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = RunConfig::from_toml("[ingest\nwindow_hours = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn run_id_is_deterministic_and_sensitive() {
        let a = RunConfig::default();
        let mut b = a.clone();
        assert_eq!(a.run_id(), b.run_id());
        b.summary.max_sentences = 5;
        assert_ne!(a.run_id(), b.run_id());
        assert_eq!(a.run_id().len(), 64);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RunConfig::from_file(Path::new("/nonexistent/newslab.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
