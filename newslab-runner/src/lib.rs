//! NewsLab Runner: batch orchestration around `newslab-core`.
//!
//! This crate provides:
//! - Run configuration loaded from TOML, with a content-addressed run id
//! - Reference-table loading from CSV, plus built-in default and sample tables
//! - JSON Lines article ingestion with publication-time parsing and screens
//! - Parallel batch processing with run statistics
//! - JSON, CSV and Markdown export

pub mod config;
pub mod directory_loader;
pub mod export;
pub mod ingest;
pub mod published;
pub mod runner;

pub use config::{ConfigError, RunConfig, RunId};
pub use directory_loader::{
    default_rows, directory_to_csv, load_directory_csv, load_directory_file, sample_rows,
    DirectoryLoadError, LoadedDirectory,
};
pub use export::{
    export_csv, export_json, generate_report, import_json, load_artifacts, save_artifacts,
};
pub use ingest::{ingest_file, ingest_jsonl, IngestError, IngestStats, Ingested};
pub use published::parse_published;
pub use runner::{run_batch, run_from_files, BatchReport, ResultRow, RunError, RunStats};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_is_send_sync() {
        assert_send::<RunConfig>();
        assert_sync::<RunConfig>();
    }

    #[test]
    fn batch_report_is_send_sync() {
        assert_send::<BatchReport>();
        assert_sync::<BatchReport>();
        assert_send::<RunStats>();
        assert_sync::<RunStats>();
    }

    #[test]
    fn ingested_is_send_sync() {
        assert_send::<Ingested>();
        assert_sync::<Ingested>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }
}
