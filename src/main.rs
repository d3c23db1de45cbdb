//! contact-sync - main entry point
//!
//! ```bash
//! contact-sync "Vainu Nummere.xlsx"                 # organizations and contacts
//! contact-sync --organizations-only scrape_data.xlsx
//! contact-sync --dry-run export.csv                 # validate only
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use contact_sync::{
    load_rows, BatchRunner, Config, RecordValidator, RunMode, RunOptions, SubmissionClient,
    TracingSink,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contact-sync")]
#[command(about = "Import organizations and contacts from a spreadsheet export", long_about = None)]
struct Cli {
    /// Input file (.xlsx, .xlsm, .xls, .xlsb, .ods, .csv or .txt)
    input: PathBuf,

    /// Worksheet name (default: first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Only submit organizations, each distinct organization number once
    #[arg(long)]
    organizations_only: bool,

    /// Validate and report without sending any request
    #[arg(long)]
    dry_run: bool,

    /// Backend base URL (overrides SYNC_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        Config::validate_base_url(&base_url, "--base-url")?;
        config.api_base_url = base_url;
    }

    // Initialize logging (stderr only; the summary goes to stdout)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Using API URL: {}", config.api_base_url);

    let rows = match load_rows(&cli.input, cli.sheet.as_deref()) {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to load {}: {}", cli.input.display(), e);
            return Err(e.into());
        }
    };

    let options = RunOptions {
        mode: if cli.organizations_only {
            RunMode::OrganizationsOnly
        } else {
            RunMode::Contacts
        },
        dry_run: cli.dry_run,
        progress_interval: config.progress_interval,
    };

    let validator = RecordValidator::new(config.columns.clone(), config.default_position.clone());
    let client = SubmissionClient::new(&config);
    let mut runner = BatchRunner::new(validator, client, TracingSink, options);

    let stats = runner.run(&rows);

    println!("\n{}", stats);
    info!("HTTP: {}", runner.client().metrics().summary());

    Ok(())
}
