//! sqlscope command-line interface
//!
//! Analyzes JSONL query logs for N+1 sequences, offset-heavy pagination,
//! and full scans, and prints remediation advice.

mod render;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use sqlscope_analyzer::{Analyzer, DetectorConfig};
use sqlscope_core::{IngestSession, StatementShape};
use sqlscope_ingest::Ingestor;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "sqlscope",
    version,
    about = "Query-log analysis: N+1 detection, pagination and full-scan advice"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a query log and print findings with remediation advice
    Analyze(AnalyzeArgs),
    /// Print statement-shape frequencies for a query log
    Shapes(ShapesArgs),
    /// Print the normalized shape of a single statement
    Normalize {
        /// Raw SQL text
        sql: String,
    },
}

#[derive(Debug, clap::Args)]
struct AnalyzeArgs {
    /// JSONL query log to analyze, or `-` for stdin
    file: PathBuf,

    /// TOML file with detector settings (flags below override it)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Literal OFFSET values above this are flagged
    #[arg(long, value_name = "ROWS")]
    offset_threshold: Option<u64>,

    /// Minimum consecutive same-shape queries for an N+1 run
    #[arg(long, value_name = "N")]
    min_run: Option<usize>,

    /// Unfiltered SELECTs returning at least this many rows are full scans
    #[arg(long, value_name = "ROWS")]
    full_scan_rows: Option<u64>,

    /// Disable the full-scan rule
    #[arg(long)]
    no_full_scans: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, clap::Args)]
struct ShapesArgs {
    /// JSONL query log, or `-` for stdin
    file: PathBuf,

    /// Show at most this many shapes
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Shapes(args) => run_shapes(args),
        Command::Normalize { sql } => {
            println!("{}", StatementShape::normalize(&sql));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_analyze(args: AnalyzeArgs) -> anyhow::Result<ExitCode> {
    let config = detector_config(&args)?;
    let session = ingest(&args.file)?;
    let report = Analyzer::with_config(config).analyze(&session);

    match args.format {
        Format::Text => render::print_report(&report),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    // Non-zero exit on critical findings, so CI jobs can gate on the log.
    Ok(if report.has_critical_issues() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn run_shapes(args: ShapesArgs) -> anyhow::Result<ExitCode> {
    let session = ingest(&args.file)?;
    render::print_shapes(&session, args.limit);
    Ok(ExitCode::SUCCESS)
}

/// Builds the detector config: file first, then explicit flag overrides.
fn detector_config(args: &AnalyzeArgs) -> anyhow::Result<DetectorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => DetectorConfig::default(),
    };
    if let Some(threshold) = args.offset_threshold {
        config = config.with_offset_threshold(threshold);
    }
    if let Some(min_run) = args.min_run {
        config = config.with_min_run_length(min_run);
    }
    if let Some(rows) = args.full_scan_rows {
        config = config.with_full_scan_row_threshold(rows);
    }
    if args.no_full_scans {
        config = config.with_detect_full_scans(false);
    }
    Ok(config)
}

fn ingest(path: &Path) -> anyhow::Result<IngestSession> {
    let ingestor = Ingestor::new();
    let session = if path.as_os_str() == "-" {
        ingestor.ingest_reader(io::stdin().lock())?
    } else {
        let file = File::open(path)
            .with_context(|| format!("opening query log {}", path.display()))?;
        ingestor.ingest_reader(BufReader::new(file))?
    };
    tracing::info!(
        log = %path.display(),
        records = session.len(),
        skipped = session.skipped(),
        "query log ingested"
    );
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "sqlscope",
            "analyze",
            "queries.jsonl",
            "--offset-threshold",
            "500",
            "--format",
            "json",
        ])
        .unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze subcommand");
        };
        assert_eq!(args.offset_threshold, Some(500));
        assert_eq!(args.format, Format::Json);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_flags_override_config_defaults() {
        let cli = Cli::try_parse_from([
            "sqlscope",
            "analyze",
            "q.jsonl",
            "--min-run",
            "4",
            "--no-full-scans",
        ])
        .unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze subcommand");
        };
        let config = detector_config(&args).unwrap();
        assert_eq!(config.min_run_length, 4);
        assert!(!config.detect_full_scans);
        // Untouched settings keep their defaults.
        assert_eq!(config.offset_threshold, 1000);
    }

    #[test]
    fn test_parses_normalize_subcommand() {
        let cli = Cli::try_parse_from(["sqlscope", "normalize", "SELECT 1"]).unwrap();
        assert!(matches!(cli.command, Command::Normalize { .. }));
    }
}
