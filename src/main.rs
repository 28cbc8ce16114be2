//! Shopscout main entry point
//!
//! Command-line interface for the bounded product-page discovery crawler.

use clap::Parser;
use shopscout::config::load_config_with_hash;
use shopscout::crawler::crawl;
use shopscout::output::{write_report, REPORT_FILENAME};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shopscout: a bounded product-page discovery crawler
///
/// Crawls each enabled domain from its seed URL, following only in-domain
/// links, and reports the product page URLs it discovers.
#[derive(Parser, Debug)]
#[command(name = "shopscout")]
#[command(version = "1.0.0")]
#[command(about = "A bounded product-page discovery crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shopscout=info,warn"),
            1 => EnvFilter::new("shopscout=debug,info"),
            2 => EnvFilter::new("shopscout=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &shopscout::config::Config, config_hash: &str) {
    println!("=== Shopscout Dry Run ===\n");
    println!("Config hash: {}", config_hash);

    let enabled = config.enabled_domains();
    println!("\nEnabled domains ({}):", enabled.len());
    for policy in &enabled {
        println!("  - {} (seed: {})", policy.key, policy.base_url);
        println!("    product patterns: {:?}", policy.product_url_patterns);
        println!("    allowed hosts:    {:?}", policy.allowed_hosts);
        println!(
            "    visited budget:   {} pages (max-depth {})",
            policy.visited_budget(),
            policy.max_depth
        );
        println!(
            "    crawl delay:      {}ms, retry attempts: {}",
            policy.crawl_delay_ms, policy.retry_attempts
        );
    }

    let disabled = config.domains.len() - enabled.len();
    if disabled > 0 {
        println!("\nDisabled domains: {}", disabled);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} domains into {}", enabled.len(), REPORT_FILENAME);
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: &shopscout::config::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = match crawl(config).await {
        Ok(report) => report,
        Err(e) => {
            // Engine launch failure and other fatal errors: no report file.
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Crawl completed: {} product URLs across all domains",
        report.total_products()
    );

    println!("{}", report.to_pretty_json()?);
    write_report(&report, std::path::Path::new(REPORT_FILENAME))?;

    Ok(())
}
