//! Mailscout main entry point
//!
//! This is the command-line interface for the Mailscout contact email finder.

use anyhow::Context;
use clap::Parser;
use mailscout::config::{load_config_with_hash, validate, Config, RendererKind};
use mailscout::crawler::{run_batch, DomainTask};
use mailscout::input::load_domains;
use mailscout::output::{print_statistics, resolve_output_path, CsvSink};
use mailscout::render::build_renderer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mailscout: a contact email finder for business websites
///
/// Mailscout reads a CSV list of businesses, visits each website's home page
/// and a bounded number of its own pages (contact pages first), and writes
/// the first email address found per site to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "mailscout")]
#[command(version = "1.0.0")]
#[command(about = "Finds contact emails on business websites", long_about = None)]
struct Cli {
    /// Path to the CSV list of businesses
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the results (overrides the configuration)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// URL of the headless browser service (overrides the configuration)
    #[arg(long, value_name = "URL")]
    renderer_endpoint: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and input and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(&cli)?;

    let tasks = load_domains(&cli.input, &config)
        .with_context(|| format!("Failed to load businesses from {}", cli.input.display()))?;

    if cli.dry_run {
        handle_dry_run(&config, &tasks);
        return Ok(());
    }

    handle_crawl(&config, &tasks).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mailscout=info,warn"),
            1 => EnvFilter::new("mailscout=debug,info"),
            2 => EnvFilter::new("mailscout=trace,debug"),
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

/// Loads the configuration file, if any, and applies command-line overrides
fn load_configuration(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(endpoint) = &cli.renderer_endpoint {
        config.renderer.endpoint = endpoint.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the configuration and the domains to crawl
fn handle_dry_run(config: &Config, tasks: &[DomainTask]) {
    println!("=== Mailscout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Home page timeout: {}ms", config.crawler.home_timeout_ms);
    println!("  Page timeout: {}ms", config.crawler.page_timeout_ms);
    println!("  Max contact pages: {}", config.crawler.max_priority_pages);
    println!("  Max other pages: {}", config.crawler.max_ordinary_pages);

    println!("\nRenderer:");
    match config.renderer.kind {
        RendererKind::Browser => println!("  Browser service: {}", config.renderer.endpoint),
        RendererKind::Http => println!("  Plain HTTP"),
    }
    println!("  User agent: {}", config.renderer.user_agent);

    println!("\nHeuristics:");
    println!(
        "  Contact markers: {}",
        config.heuristics.contact_markers.join(", ")
    );
    println!(
        "  Social media hosts: {}",
        config.heuristics.social_media_hosts.join(", ")
    );

    println!("\nOutput:");
    println!(
        "  Results: {}",
        resolve_output_path(&config.output.path).display()
    );

    println!("\nDomains ({}):", tasks.len());
    for task in tasks {
        println!("  - {}", task.start_url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would look for emails on {} websites", tasks.len());
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, tasks: &[DomainTask]) -> anyhow::Result<()> {
    // The result file is truncated on creation, so it is opened only once the
    // renderer is ready
    let renderer = build_renderer(&config.renderer).context("Failed to set up renderer")?;

    let output_path = resolve_output_path(&config.output.path);
    let mut sink = CsvSink::create(&output_path, config.output.not_found_marker.clone())
        .with_context(|| format!("Failed to create {}", output_path.display()))?;

    tracing::info!(
        "Crawling {} domains, writing results to {}",
        tasks.len(),
        output_path.display()
    );

    match run_batch(renderer.as_ref(), config, tasks, &mut sink).await {
        Ok(stats) => {
            tracing::info!("Crawl completed successfully");
            print_statistics(&stats);
            println!("\n✓ Results written to: {}", output_path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e).with_context(|| {
                format!(
                    "{} results were written to {} before the failure",
                    sink.rows(),
                    output_path.display()
                )
            })
        }
    }
}
