//! Reporting and export: JSON, CSV, and Markdown artifact generation.
//!
//! Three formats for a batch:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: one spreadsheet row per reported article
//! - **Markdown**: human-readable report grouped by risk level
//!
//! Persisted JSON carries a `schema_version` field. Newer versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use newslab_core::domain::RiskLevel;

use crate::runner::{BatchReport, ResultRow, SCHEMA_VERSION};

pub const RESULTS_FILE: &str = "results.json";
pub const ARTICLES_FILE: &str = "articles.csv";
pub const REPORT_FILE: &str = "report.md";

const SUMMARY_PREVIEW_CHARS: usize = 200;

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `BatchReport` to pretty JSON.
pub fn export_json(report: &BatchReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize BatchReport to JSON")
}

/// Deserialize a `BatchReport` from JSON, rejecting newer schema versions.
pub fn import_json(json: &str) -> Result<BatchReport> {
    let report: BatchReport =
        serde_json::from_str(json).context("failed to deserialize BatchReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export reported rows as a spreadsheet.
///
/// Columns: no, title, url, published, code, company, exchange, sentiment,
/// score, risk, violations, keywords, summary, found_by
pub fn export_csv(rows: &[ResultRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "no",
        "title",
        "url",
        "published",
        "code",
        "company",
        "exchange",
        "sentiment",
        "score",
        "risk",
        "violations",
        "keywords",
        "summary",
        "found_by",
    ])?;

    for row in rows {
        let r = &row.result;
        wtr.write_record([
            &row.no.to_string(),
            &r.article.title,
            &r.article.source_url,
            &r.article.published_at.format("%d/%m/%Y %H:%M").to_string(),
            &r.resolved_code,
            &r.company_name,
            r.resolved_exchange.label(),
            r.sentiment_label.name(),
            &format!("{:.1}", r.sentiment_score),
            r.risk_level.name(),
            &r.violation_codes.join(", "),
            &r.matched_keywords.join("; "),
            &r.summary,
            r.resolution_method.name(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a batch.
///
/// Creates a directory named `{run_id prefix}_{timestamp}/` under
/// `output_dir` containing `results.json`, `articles.csv` and `report.md`.
/// Returns the path to the created directory.
pub fn save_artifacts(report: &BatchReport, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        report.run_id.get(..8).unwrap_or(&report.run_id),
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(report)?;
    std::fs::write(run_dir.join(RESULTS_FILE), &json)?;

    let csv = export_csv(&report.results)?;
    std::fs::write(run_dir.join(ARTICLES_FILE), &csv)?;

    std::fs::write(run_dir.join(REPORT_FILE), generate_report(report))?;

    Ok(run_dir)
}

/// Load a `BatchReport` from an artifact directory's results.json.
pub fn load_artifacts(dir: &Path) -> Result<BatchReport> {
    let path = dir.join(RESULTS_FILE);
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate the Markdown report for a batch.
pub fn generate_report(report: &BatchReport) -> String {
    let mut md = String::with_capacity(4096);

    md.push_str("# News Risk Report\n\n");

    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Run ID | {} |\n", report.run_id));
    md.push_str(&format!(
        "| Generated | {} |\n",
        report.generated_at.format("%d/%m/%Y %H:%M %:z")
    ));
    md.push_str(&format!("| Directory Codes | {} |\n", report.directory_codes));
    md.push_str(&format!(
        "| Window | {} hours |\n",
        report.config.ingest.window_hours
    ));
    md.push('\n');

    let s = &report.stats;
    md.push_str("## Run Statistics\n\n");
    md.push_str("| Stage | Count |\n");
    md.push_str("| --- | ---: |\n");
    md.push_str(&format!("| Input Records | {} |\n", s.ingest.input_records));
    md.push_str(&format!("| Malformed | {} |\n", s.ingest.malformed));
    md.push_str(&format!("| Short Titles | {} |\n", s.ingest.short_titles));
    md.push_str(&format!(
        "| Generic Headlines | {} |\n",
        s.ingest.generic_headlines
    ));
    md.push_str(&format!("| Outside Window | {} |\n", s.ingest.stale));
    md.push_str(&format!("| Duplicate Articles | {} |\n", s.ingest.duplicate_ids));
    md.push_str(&format!("| No Mention | {} |\n", s.no_mention));
    md.push_str(&format!(
        "| Exchange Filter | {} |\n",
        s.exchange_filter + s.excluded_primary
    ));
    md.push_str(&format!("| Duplicate Titles | {} |\n", s.duplicate_titles));
    md.push_str(&format!("| **Reported** | **{}** |\n", s.accepted));
    md.push_str(&format!("| Found by Ticker | {} |\n", s.by_ticker));
    md.push_str(&format!("| Found by Company Name | {} |\n", s.by_company_name));
    for (exchange, count) in &s.by_exchange {
        md.push_str(&format!("| {exchange} | {count} |\n"));
    }
    md.push('\n');

    for level in RiskLevel::ALL {
        let rows: Vec<&ResultRow> = report.rows_at(level).collect();
        md.push_str(&format!("## {} ({})\n\n", heading(level), rows.len()));
        if rows.is_empty() {
            md.push_str("_None._\n\n");
            continue;
        }
        md.push_str("| No | Code | Exchange | Title | Score | Keywords | Summary |\n");
        md.push_str("| ---: | --- | --- | --- | ---: | --- | --- |\n");
        for row in rows {
            let r = &row.result;
            md.push_str(&format!(
                "| {} | {} | {} | {} | {:.1} | {} | {} |\n",
                row.no,
                r.resolved_code,
                r.resolved_exchange,
                cell(&r.article.title),
                r.sentiment_score,
                cell(&r.matched_keywords.join("; ")),
                cell(&preview(&r.summary)),
            ));
        }
        md.push('\n');
    }

    md
}

// ─── Helpers ────────────────────────────────────────────────────────

fn heading(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => "Critical",
        RiskLevel::Warning => "Warning",
        RiskLevel::Positive => "Positive",
        RiskLevel::Normal => "Normal",
    }
}

/// Make text safe inside a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn preview(text: &str) -> String {
    if text.chars().count() <= SUMMARY_PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(SUMMARY_PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}
