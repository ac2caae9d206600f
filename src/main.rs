//! Job-Importer main entry point
//!
//! This is the command-line interface for the Job-Importer batch job.

use anyhow::Context;
use clap::Parser;
use job_importer::config::{load_config_with_hash, Config};
use job_importer::output::print_summary;
use job_importer::pipeline::run_import;
use job_importer::scrape::{ScrapeRequest, Site};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Job-Importer: scrape job boards and bulk-import the listings
///
/// Queries Indeed and Google Jobs for each configured search, normalizes
/// and deduplicates the listings, and uploads them in batches. Settings come
/// from the environment (CRON_API_KEY is required), optionally layered over
/// a TOML file.
#[derive(Parser, Debug)]
#[command(name = "job-importer")]
#[command(version)]
#[command(about = "Scrape job boards and bulk-import the listings", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without any network calls
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Fails before any network activity when CRON_API_KEY is missing
    let (config, config_hash) = load_config_with_hash(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        ),
        _ => tracing::info!("Configuration loaded from environment"),
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_import(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("job_importer=info,warn"),
            1 => EnvFilter::new("job_importer=debug,info"),
            2 => EnvFilter::new("job_importer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved settings and planned queries
fn handle_dry_run(config: &Config) {
    println!("=== Job-Importer Dry Run ===\n");

    println!("Upload:");
    println!("  Base URL: {}", config.backend.base_url);
    println!("  API key: {}", redact(&config.backend.api_key));
    println!("  Batch size: {}", config.backend.batch_size);

    println!("\nScraper:");
    println!("  Service URL: {}", config.scraper.api_url);
    println!(
        "  API key: {}",
        config
            .scraper
            .api_key
            .as_deref()
            .map(redact)
            .unwrap_or_else(|| "(none)".to_string())
    );

    let sites: Vec<&str> = Site::ALL.iter().map(Site::as_str).collect();
    println!("\nSearch:");
    println!("  Sites: {}", sites.join(", "));
    println!("  Location: {}", config.search.location);
    println!("  Results wanted: {}", config.search.results_wanted);
    println!("  Hours old: {}", config.search.hours_old);

    println!("\nQueries ({}):", config.search.queries.len());
    for query in &config.search.queries {
        let request = ScrapeRequest::for_query(query, &config.search);
        println!("  - {} ({})", request.search_term, request.sites_label());
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main import operation
async fn handle_import(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting import: {} queries, location '{}', batch size {}",
        config.search.queries.len(),
        config.search.location,
        config.backend.batch_size
    );

    let summary = run_import(config)
        .await
        .context("Failed to start import")?;

    if summary.jobs_collected == 0 {
        println!("No jobs scraped.");
    }

    print_summary(&summary);

    Ok(())
}

/// Shows only the last four characters of a secret
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
