//! NewsLab CLI: batch analysis, single-article inspection and reference tables.
//!
//! Commands:
//! - `analyze`: run a JSON Lines article feed through the pipeline and save artifacts
//! - `inspect`: run one article and show every stage
//! - `directory sample`: write the sample reference table
//! - `directory show`: print a reference table grouped by exchange

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use newslab_core::domain::{Article, Exchange, RiskLevel};
use newslab_core::{Pipeline, PipelineOutcome, TickerDirectory};
use newslab_runner::{
    default_rows, directory_to_csv, load_directory_file, run_from_files, sample_rows,
    save_artifacts, BatchReport, RunConfig,
};

const LOG_ENV: &str = "NEWSLAB_LOG";

#[derive(Parser)]
#[command(
    name = "newslab",
    about = "NewsLab CLI: ticker resolution, risk scoring and summaries for market news"
)]
struct Cli {
    /// Debug logging.
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON Lines article feed and save results.
    Analyze {
        /// Article feed, one {title, body, published, url} object per line.
        #[arg(long)]
        articles: PathBuf,

        /// Reference table CSV. Defaults to the built-in directory.
        #[arg(long)]
        directory: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Reference time (RFC 3339). Defaults to the current time.
        #[arg(long)]
        now: Option<String>,
    },
    /// Run a single article through the pipeline and show each stage.
    Inspect {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        body: String,

        /// Reference table CSV. Defaults to the built-in directory.
        #[arg(long)]
        directory: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Reference table commands.
    Directory {
        #[command(subcommand)]
        action: DirectoryAction,
    },
}

#[derive(Subcommand)]
enum DirectoryAction {
    /// Write the sample reference table as CSV.
    Sample {
        #[arg(long, default_value = "sample.csv")]
        out: PathBuf,
    },
    /// Print a reference table grouped by exchange.
    Show {
        #[arg(long)]
        directory: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Analyze {
            articles,
            directory,
            config,
            output_dir,
            now,
        } => run_analyze(&articles, directory.as_deref(), config.as_deref(), &output_dir, now),
        Commands::Inspect {
            title,
            body,
            directory,
            config,
        } => run_inspect(title, body, directory.as_deref(), config.as_deref()),
        Commands::Directory { action } => match action {
            DirectoryAction::Sample { out } => run_directory_sample(&out),
            DirectoryAction::Show { directory } => run_directory_show(directory.as_deref()),
        },
    }
}

/// `NEWSLAB_LOG` wins when set; otherwise the flags pick the level.
fn init_tracing(verbose: bool, quiet: bool) {
    let fallback = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_directory(path: Option<&Path>) -> Result<TickerDirectory> {
    match path {
        Some(path) => {
            let loaded = load_directory_file(path)?;
            if loaded.dropped > 0 {
                eprintln!("Skipped {} invalid reference row(s)", loaded.dropped);
            }
            Ok(loaded.build())
        }
        None => Ok(TickerDirectory::build(default_rows())),
    }
}

fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => Ok(RunConfig::from_file(path)?),
        None => Ok(RunConfig::default()),
    }
}

fn run_analyze(
    articles: &Path,
    directory: Option<&Path>,
    config_path: Option<&Path>,
    output_dir: &Path,
    now: Option<String>,
) -> Result<()> {
    let config = load_config(config_path)?;

    let now: DateTime<FixedOffset> = match now {
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .with_context(|| format!("invalid --now '{s}', expected RFC 3339"))?
            .with_timezone(&config.timezone()),
        None => chrono::Utc::now().with_timezone(&config.timezone()),
    };
    debug!(%now, run_id = %config.run_id(), "starting batch");

    let report = run_from_files(articles, directory, &config, now)?;
    print_summary(&report);

    let run_dir = save_artifacts(&report, output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn run_inspect(
    title: String,
    body: String,
    directory: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let directory = load_directory(directory)?;
    let pipeline = Pipeline::new(&directory, config.pipeline_config());
    let article = Article {
        title,
        body,
        published_at: chrono::Utc::now().with_timezone(&config.timezone()),
        source_url: String::new(),
    };
    let text = article.full_text();

    println!("=== Extraction ===");
    match pipeline.extractor().extract(&text) {
        Some(m) => println!(
            "{} ({}) via {}, confidence {:.0}, at char {}",
            m.code,
            m.exchange,
            m.signal.name(),
            m.confidence,
            m.position
        ),
        None => println!("(no ticker mention)"),
    }
    let codes = pipeline.extractor().detect_codes(&text);
    println!("Detected codes: {}", display_list(&codes));

    println!();
    println!("=== Risk Findings ===");
    let risk = pipeline.risk_detector().analyze(&text);
    if risk.is_empty() {
        println!("(none)");
    } else {
        println!("{:<32} {:<16} {:<10} {:>6}", "Keyword", "Category", "Level", "Score");
        println!("{}", "-".repeat(67));
        for f in &risk.findings {
            println!(
                "{:<32} {:<16} {:<10} {:>6}",
                f.keyword,
                f.category,
                f.severity.risk_level().name(),
                f.score
            );
        }
        println!("Total: {}", risk.total_score);
    }

    println!();
    println!("=== Outcome ===");
    match pipeline.process(&article) {
        PipelineOutcome::Accepted(r) => {
            println!(
                "Accepted: {} ({}) by {}",
                r.resolved_code,
                r.resolved_exchange,
                r.resolution_method.name()
            );
            println!("Company:   {}", r.company_name);
            println!(
                "Sentiment: {:.1} ({}), risk {}",
                r.sentiment_score, r.sentiment_label, r.risk_level
            );
            println!("Keywords:  {}", display_list(&r.matched_keywords));
            println!("Summary:   {}", r.summary);
        }
        PipelineOutcome::Rejected(reason) => println!("Rejected: {reason}"),
    }

    Ok(())
}

fn run_directory_sample(out: &Path) -> Result<()> {
    let csv = directory_to_csv(&sample_rows())?;
    std::fs::write(out, csv).with_context(|| format!("failed to write {}", out.display()))?;
    println!("Sample reference table written to: {}", out.display());
    Ok(())
}

fn run_directory_show(path: Option<&Path>) -> Result<()> {
    let directory = load_directory(path)?;
    println!("Codes: {}", directory.len());
    for exchange in [Exchange::Hnx, Exchange::Upcom, Exchange::Hose] {
        let entries: Vec<_> = directory
            .entries()
            .iter()
            .filter(|e| e.exchange == exchange)
            .collect();
        if entries.is_empty() {
            continue;
        }
        let note = if exchange.is_excluded() { " (excluded)" } else { "" };
        println!();
        println!("{exchange}{note}: {}", entries.len());
        for e in entries {
            println!("  {:<6} {}", e.code, e.company_name);
        }
    }
    Ok(())
}

fn print_summary(report: &BatchReport) {
    let s = &report.stats;
    println!();
    println!("=== Batch Result ===");
    println!("Run ID:          {}", report.run_id);
    println!("Input records:   {}", s.ingest.input_records);
    println!(
        "Screened out:    {} malformed, {} short, {} generic, {} stale, {} duplicate",
        s.ingest.malformed,
        s.ingest.short_titles,
        s.ingest.generic_headlines,
        s.ingest.stale,
        s.ingest.duplicate_ids
    );
    println!(
        "Rejected:        {} no mention, {} exchange filter, {} duplicate title",
        s.no_mention,
        s.exchange_filter + s.excluded_primary,
        s.duplicate_titles
    );
    println!(
        "Reported:        {} ({} by ticker, {} by company name)",
        s.accepted, s.by_ticker, s.by_company_name
    );
    println!("Critical:        {}", s.critical);
    println!("Warning:         {}", s.warning);

    if report.results.is_empty() {
        return;
    }
    println!();
    println!("{:>3} {:<5} {:<6} {:<9} {:>6}  {}", "No", "Code", "Exch", "Risk", "Score", "Title");
    println!("{}", "-".repeat(80));
    for level in RiskLevel::ALL {
        for row in report.rows_at(level) {
            let r = &row.result;
            println!(
                "{:>3} {:<5} {:<6} {:<9} {:>6.1}  {}",
                row.no,
                r.resolved_code,
                r.resolved_exchange.label(),
                r.risk_level.name(),
                r.sentiment_score,
                truncate(&r.article.title, 60)
            );
        }
    }
    println!();
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".into()
    } else {
        items.join(", ")
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars - 3).collect();
        format!("{cut}...")
    }
}
