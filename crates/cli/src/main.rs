//! perftest-parse CLI - Print the data points found in ucc_perftest output
//!
//! Mostly useful to check the parser against output from new ucc_perftest
//! versions or collectives.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};

use perftest_core::{BenchmarkResults, ColumnLayout, PerftestParser};

/// perftest-parse: extract (size, value) pairs from ucc_perftest output
#[derive(Parser, Debug)]
#[command(name = "perftest-parse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Path to a file containing ucc_perftest output (repeatable)
    #[arg(long = "perftest-file", value_name = "FILE", required = true)]
    perftest_files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// 1-based token index of the message size in a data row
    #[arg(long, env = "PERFTEST_SIZE_COLUMN", default_value_t = 2)]
    size_column: usize,

    /// 1-based token index of the measured value in a data row
    #[arg(long, env = "PERFTEST_VALUE_COLUMN", default_value_t = 3)]
    value_column: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One `size<TAB><TAB>value` line per data point
    Text,
    /// Pretty-printed JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout only carries data
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let layout =
        ColumnLayout::new(cli.size_column, cli.value_column).context("Invalid column layout")?;
    debug!(
        "Using size column {} and value column {}",
        layout.size_column(),
        layout.value_column()
    );

    let parser = PerftestParser::with_layout(layout)?;
    let results = parser
        .parse_files(&cli.perftest_files)
        .context("Failed to parse perftest output")?;

    info!(
        "Parsed {} data points from {} file(s)",
        results.iter().map(|r| r.len()).sum::<usize>(),
        results.len()
    );

    print!("{}", render(&results, cli.format)?);

    Ok(())
}

/// Format parsed results for stdout
fn render(results: &BenchmarkResults, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(results.to_json()?),
        OutputFormat::Text if results.len() == 1 => Ok(results.results[0].to_tsv()),
        OutputFormat::Text => {
            let mut output = String::new();
            for result in results {
                let source = result.source.as_deref().unwrap_or("<unknown>");
                output.push_str(&format!("# {}\n", source));
                output.push_str(&result.to_tsv());
            }
            Ok(output)
        }
    }
}
