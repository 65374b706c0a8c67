//! Reference-table loading: CSV uploads, the built-in default directory and
//! the sample table.
//!
//! The loader owns all row validation. The core directory trusts what it is
//! given, so codes are normalized, unknown exchanges dropped and duplicates
//! removed here.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, warn};

use newslab_core::domain::{Exchange, TickerEntry};
use newslab_core::TickerDirectory;

/// Errors from the reference-table loader.
#[derive(Debug, Error)]
pub enum DirectoryLoadError {
    #[error("failed to open reference table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("no valid rows in reference table")]
    Empty,
}

/// Rows that survived validation, plus how many were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDirectory {
    pub rows: Vec<TickerEntry>,
    pub dropped: usize,
}

impl LoadedDirectory {
    pub fn build(&self) -> TickerDirectory {
        TickerDirectory::build(self.rows.iter().cloned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Code,
    Exchange,
    Name,
}

/// Map a header cell to a column; headers are trimmed and case-folded.
fn column_for(header: &str) -> Option<Column> {
    match header.trim().trim_start_matches('\u{feff}').to_lowercase().as_str() {
        "mã ck" | "ma ck" | "mã" | "code" => Some(Column::Code),
        "sàn" | "san" | "exchange" => Some(Column::Exchange),
        "tên công ty" | "ten cong ty" | "name" => Some(Column::Name),
        _ => None,
    }
}

/// Read a reference table with a header row.
///
/// The name column is optional. Rows with an empty code or an unknown
/// exchange are dropped with a warning; duplicate codes keep the first row.
pub fn load_directory_csv<R: Read>(reader: R) -> Result<LoadedDirectory, DirectoryLoadError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let find = |col: Column| headers.iter().position(|h| column_for(h) == Some(col));
    let (code_idx, exchange_idx, name_idx) =
        (find(Column::Code), find(Column::Exchange), find(Column::Name));

    let (code_idx, exchange_idx) = match (code_idx, exchange_idx) {
        (Some(c), Some(e)) => (c, e),
        (c, e) => {
            let mut missing = Vec::new();
            if c.is_none() {
                missing.push("code".to_string());
            }
            if e.is_none() {
                missing.push("exchange".to_string());
            }
            return Err(DirectoryLoadError::MissingColumns(missing));
        }
    };

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    let mut dropped = 0;

    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let line = idx + 2;
        let code = record.get(code_idx).unwrap_or("").trim().to_uppercase();
        let exchange_label = record.get(exchange_idx).unwrap_or("");
        let name = name_idx
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string();

        if code.is_empty() {
            warn!(line, "skipping reference row with empty code");
            dropped += 1;
            continue;
        }
        let exchange = match Exchange::parse(exchange_label) {
            Ok(e) => e,
            Err(e) => {
                warn!(line, %code, error = %e, "skipping reference row");
                dropped += 1;
                continue;
            }
        };
        if !seen.insert(code.clone()) {
            debug!(line, %code, "duplicate code, keeping first row");
            dropped += 1;
            continue;
        }

        rows.push(TickerEntry::new(code, exchange, name));
    }

    if rows.is_empty() {
        return Err(DirectoryLoadError::Empty);
    }
    Ok(LoadedDirectory { rows, dropped })
}

/// Load a reference table from a CSV file.
pub fn load_directory_file(path: &Path) -> Result<LoadedDirectory, DirectoryLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DirectoryLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_directory_csv(file)
}

fn entries(rows: &[(&str, Exchange, &str)]) -> Vec<TickerEntry> {
    rows.iter()
        .map(|&(code, exchange, name)| TickerEntry::new(code, exchange, name))
        .collect()
}

/// Directory used when no reference table is supplied.
pub fn default_rows() -> Vec<TickerEntry> {
    use Exchange::{Hnx, Upcom};
    entries(&[
        ("SHS", Hnx, "Chứng khoán SHS"),
        ("PVS", Hnx, "Chứng khoán PVS"),
        ("NVB", Hnx, "Ngân hàng NVB"),
        ("VCS", Hnx, "Chứng khoán VCS"),
        ("BVS", Hnx, "Chứng khoán BVS"),
        ("CEO", Hnx, "Tập đoàn CEO"),
        ("VGC", Hnx, "Viglacera"),
        ("PVC", Hnx, "PVC"),
        ("LPB", Upcom, "Ngân hàng LPB"),
        ("EIB", Upcom, "Ngân hàng EIB"),
        ("BAB", Upcom, "Ngân hàng BAB"),
        ("OCB", Upcom, "Ngân hàng OCB"),
        ("HDG", Upcom, "Tập đoàn HDG"),
        ("PAN", Upcom, "PAN Group"),
    ])
}

/// Template table covering all three exchanges.
pub fn sample_rows() -> Vec<TickerEntry> {
    use Exchange::{Hnx, Hose, Upcom};
    entries(&[
        ("VCB", Hose, "Ngân hàng Vietcombank"),
        ("FPT", Hose, "FPT Corporation"),
        ("VNM", Hose, "Vinamilk"),
        ("SHS", Hnx, "Chứng khoán Sài Gòn - Hà Nội"),
        ("PVS", Hnx, "Chứng khoán Dầu khí"),
        ("NVB", Hnx, "Ngân hàng Quốc dân"),
        ("LPB", Upcom, "Ngân hàng Lộc Phát"),
        ("EIB", Upcom, "Ngân hàng Xuất nhập khẩu"),
        ("CEO", Hnx, "Tập đoàn CEO"),
    ])
}

/// Serialize rows as a reference table CSV.
pub fn directory_to_csv(rows: &[TickerEntry]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["Mã CK", "Sàn", "Tên công ty"])?;
    for row in rows {
        wtr.write_record([row.code.as_str(), row.exchange.label(), row.company_name.as_str()])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}
