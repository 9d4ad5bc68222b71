//! revfeed - Paginated reviews feed, headless runner
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use revfeed::HeadlessOptions;

/// Load a reviews fixture page by page and print every row as NDJSON
#[derive(Parser, Debug)]
#[command(name = "revfeed")]
#[command(about = "Paginated reviews feed, headless runner", long_about = None)]
struct Args {
    /// Review fixture: a JSON array of reviews or a page envelope
    #[arg(long, value_name = "FILE")]
    fixture: PathBuf,

    /// Directory holding .revfeed/config.toml (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Write a default .revfeed/config.toml into the config directory first
    #[arg(long)]
    init_config: bool,

    /// Row width used for layout
    #[arg(long, default_value_t = 375.0)]
    width: f64,

    /// Viewport height used for the prefetch threshold
    #[arg(long, default_value_t = 667.0)]
    viewport_height: f64,

    /// Reviews per page (overrides the config file)
    #[arg(long)]
    page_size: Option<usize>,

    /// Expand every review before reporting rows
    #[arg(long)]
    expand_all: bool,

    /// Artificial latency of every page response, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    latency_ms: u64,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // Logs go to a file; stdout carries the NDJSON events
    let _log_guard = revfeed_core::logging::init()?;

    let config_dir = args
        .config_dir
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if args.init_config {
        revfeed_app::config::init_config_dir(&config_dir)?;
    }

    let options = HeadlessOptions {
        config_dir,
        width: args.width,
        viewport_height: args.viewport_height,
        page_size: args.page_size,
        expand_all: args.expand_all,
        latency: Duration::from_millis(args.latency_ms),
        ..HeadlessOptions::new(args.fixture)
    };

    revfeed::run_headless(&options).await?;
    Ok(())
}
