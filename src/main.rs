//! Catalog-Crawl main entry point
//!
//! This is the command-line interface for the Catalog-Crawl harvester. Run
//! without arguments it crawls the default book catalog and writes
//! `booklist_sample.xlsx` in the working directory.

use anyhow::Context;
use catalog_crawl::config::{load_config, Config, SiteKind};
use catalog_crawl::crawl_and_persist;
use catalog_crawl::output::print_report;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Catalog-Crawl: a polite catalog harvester
///
/// Discovers a catalog's categories, walks every listing page of each one,
/// extracts one record per item and writes each category as one sheet of
/// an .xlsx workbook.
#[derive(Parser, Debug)]
#[command(name = "catalog-crawl")]
#[command(version)]
#[command(about = "A polite catalog harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the workbook here instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output.workbook_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(ExitCode::SUCCESS);
    }

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_crawl=info,warn"),
            1 => EnvFilter::new("catalog_crawl=debug,info"),
            2 => EnvFilter::new("catalog_crawl=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Crawl Dry Run ===\n");

    println!("Site:");
    println!(
        "  Layout: {}",
        match config.site.kind {
            SiteKind::Books => "books",
            SiteKind::Species => "species",
        }
    );
    println!("  Base URL: {}", config.site.base_url);
    println!("  Index page: {}", config.site.index_path);

    println!("\nHTTP:");
    println!("  Request timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);
    println!(
        "  Retries: {} (backoff factor {}, statuses {:?})",
        config.http.retries, config.http.backoff_factor, config.http.status_forcelist
    );
    println!("  Delay after each response: {}ms", config.http.pacing_ms);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Workbook: {}", config.output.workbook_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
///
/// Exits with failure if any sheet could not be written.
async fn handle_crawl(config: &Config) -> anyhow::Result<ExitCode> {
    tracing::info!(
        "Starting crawl of {}{}",
        config.site.base_url,
        config.site.index_path
    );

    let report = crawl_and_persist(config)
        .await
        .context("Crawl could not be started")?;

    print_report(&report, &config.output.workbook_path);

    if report.is_success() {
        tracing::info!("Crawl completed successfully");
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!("{} sheet(s) could not be saved", report.failed.len());
        Ok(ExitCode::FAILURE)
    }
}
