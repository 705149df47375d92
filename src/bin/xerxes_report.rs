//! Post-processing CLI for Xerxes simulator outputs.
//!
//! Extracts the aggregate statistics the simulator prints to standard error
//! and checks per-request CSV traces for the columns plotting relies on.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, Context, Result};

use xerxes_cfg::analysis::{self, AggregateStats};

#[derive(Parser)]
#[command(name = "xerxes-report")]
#[command(about = "Summarize Xerxes simulator outputs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract aggregate statistics from captured simulator stderr
    Stats {
        /// Files holding the simulator's standard error
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check that a request trace CSV carries the expected columns
    Csv {
        /// Path to the CSV written to log_name
        file: PathBuf,
    },
}

/// Aggregate statistics of one stderr capture
#[derive(serde::Serialize)]
struct FileStats {
    file: String,
    aggregates: Vec<AggregateStats>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    match cli.command {
        Commands::Stats { files, json } => run_stats(&files, json),
        Commands::Csv { file } => run_csv(&file),
    }
}

fn run_stats(files: &[PathBuf], json: bool) -> Result<()> {
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let aggregates = analysis::parse_aggregates(&text);
        if aggregates.is_empty() {
            log::warn!("No aggregate statistics found in {}", path.display());
        }
        reports.push(FileStats {
            file: path.display().to_string(),
            aggregates,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!(
        "{:<32} {:<12} {:>12} {:>14} {:>12}",
        "file", "requester", "bw (GB/s)", "latency", "evictions"
    );
    for report in &reports {
        for stats in &report.aggregates {
            println!(
                "{:<32} {:<12} {:>12} {:>14} {:>12}",
                report.file,
                stats.requester.as_deref().unwrap_or("-"),
                format_opt(stats.bandwidth_gbps),
                match (&stats.avg_latency, &stats.time_unit) {
                    (Some(latency), Some(unit)) => format!("{:.2} {}", latency, unit),
                    (Some(latency), None) => format!("{:.2}", latency),
                    _ => "-".to_string(),
                },
                format_opt(stats.evict_count),
            );
        }
    }
    Ok(())
}

fn format_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

fn run_csv(path: &std::path::Path) -> Result<()> {
    let file = fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut header = String::new();
    BufReader::new(file)
        .read_line(&mut header)
        .with_context(|| format!("Failed to read header of {}", path.display()))?;

    match analysis::check_csv_header(&header) {
        Ok(()) => {
            log::info!("{} carries all {} expected columns", path.display(), analysis::CSV_FIELDS.len());
            Ok(())
        }
        Err(missing) => bail!("{} is missing columns: {}", path.display(), missing.join(", ")),
    }
}
