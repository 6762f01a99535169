use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tally_import::TallyConfig;

mod report;

use report::Report;

/// Reconcile externally reported transactions against a ledger export.
#[derive(Debug, Parser)]
#[command(name = "tally", version)]
struct Args {
    /// JSON array of source transactions.
    #[arg(long)]
    sources: PathBuf,

    /// Ledger CSV with date, description, reference and amount columns.
    #[arg(long)]
    ledger: PathBuf,

    /// TOML settings file.
    #[arg(long, env = "TALLY_CONFIG")]
    config: Option<PathBuf>,

    /// Write the results as CSV to this path.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print results and summary as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TallyConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TallyConfig::default(),
    };

    // RUST_LOG wins over the config file.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let sources = tally_import::load_sources(&args.sources)
        .with_context(|| format!("Failed to read sources {}", args.sources.display()))?;
    let ledger = tally_import::load_ledger(&args.ledger, &config.ledger)
        .with_context(|| format!("Failed to read ledger {}", args.ledger.display()))?;

    let results = tally_match::analyze_transactions(&sources, &ledger)?;

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        tally_import::export_results(BufWriter::new(file), &results)?;
        tracing::info!("Results exported: {}", path.display());
    }

    let report = Report::new(&results);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}
