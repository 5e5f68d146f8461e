//! Linkweave command-line entry point

use anyhow::Context;
use clap::Parser;
use linkweave::config::load_config_with_hash;
use linkweave::extract::LinkFilter;
use linkweave::{output, RunConfig, RunHandle};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Linkweave: a concurrent breadth-first link discovery crawler
#[derive(Parser, Debug)]
#[command(name = "linkweave")]
#[command(version)]
#[command(about = "Discover links reachable from a seed page", long_about = None)]
struct Cli {
    /// Seed URL to start from
    #[arg(value_name = "URL")]
    seed: String,

    /// Follow discovered links breadth-first
    #[arg(short, long)]
    recursive: bool,

    /// Maximum recursion depth (only with --recursive)
    #[arg(short = 'd', long, default_value_t = 2)]
    depth: u32,

    /// Number of worker threads
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// Regex filter; may be given multiple times, a link is kept when any
    /// pattern matches
    #[arg(short, long = "filter", value_name = "PATTERN")]
    filters: Vec<String>,

    /// Load the run configuration from a TOML file instead of flags
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["recursive", "depth", "workers", "filters"])]
    config: Option<PathBuf>,

    /// Write a markdown report of the results to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let handle = RunHandle::with_http().context("failed to build HTTP client")?;
    handle
        .start(&cli.seed, config)
        .with_context(|| format!("failed to start crawl of {}", cli.seed))?;

    // Poll progress once a second while the run is live
    let mut last_logged = 0u64;
    while handle.is_running() {
        std::thread::sleep(Duration::from_secs(1));
        let stats = handle.stats();
        if stats.processed != last_logged {
            last_logged = stats.processed;
            tracing::info!(
                "{} found, {} processed, {} queued",
                stats.found,
                stats.processed,
                stats.queue_size
            );
        }
    }

    if let Some(error) = handle.error() {
        anyhow::bail!("crawl failed: {}", error);
    }

    let results = handle.results();
    let stats = handle.stats();
    tracing::info!(
        "crawl complete: {} links from {} pages",
        results.len(),
        stats.processed
    );

    if let Some(path) = &cli.output {
        output::write_report(path, &results, &stats)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("Report written to {}", path.display());
    } else {
        for link in &results {
            println!("[{}] {}", link.depth, link.url);
        }
    }

    Ok(())
}

/// Builds the run configuration from a TOML file or from flags
fn build_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    if let Some(path) = &cli.config {
        let (config, hash) = load_config_with_hash(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;
        tracing::info!("loaded config {} (hash: {})", path.display(), hash);
        return Ok(config);
    }

    if cli.workers < 1 {
        anyhow::bail!("--workers must be at least 1");
    }

    if cli.recursive && cli.depth < 1 {
        anyhow::bail!("--depth must be at least 1 with --recursive");
    }

    let filter = LinkFilter::compile(&cli.filters).context("invalid filter pattern")?;
    Ok(RunConfig {
        recursive: cli.recursive,
        recursion_limit: cli.depth,
        worker_count: cli.workers,
        filter,
    })
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkweave=info,warn"),
            1 => EnvFilter::new("linkweave=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
