//! Headless runner - scroll a fixture to its end and report every row
//!
//! The runner plays the part of the rendering collaborator: it re-queries
//! row heights after every change and reports a scroll to the bottom of the
//! current content through `maybe_load_next_page` until the feed is
//! exhausted.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use revfeed_app::config::load_settings;
use revfeed_app::{FeedSnapshot, FeedState, ReviewsViewModel, Row, RowId};
use revfeed_core::prelude::*;
use revfeed_fetch::{FileImageSource, FixtureReviewsProvider, ImageLoader, RasterDecoder};

use super::HeadlessEvent;

type FixtureViewModel = ReviewsViewModel<FixtureReviewsProvider, FileImageSource>;

/// Options of a headless run
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    /// Review fixture: a JSON array or a page envelope
    pub fixture: PathBuf,
    /// Directory holding `.revfeed/config.toml`
    pub config_dir: PathBuf,
    /// Row width used for layout
    pub width: f64,
    pub viewport_height: f64,
    /// Overrides `feed.page_size` from the config file
    pub page_size: Option<usize>,
    /// Expand every review row before reporting rows
    pub expand_all: bool,
    /// Artificial latency of every page response
    pub latency: Duration,
    /// Upper bound on waiting for outstanding work after each page
    pub settle_timeout: Duration,
    /// Consecutive failed page loads tolerated before giving up
    pub max_retries: usize,
}

impl HeadlessOptions {
    pub fn new(fixture: impl Into<PathBuf>) -> Self {
        Self {
            fixture: fixture.into(),
            config_dir: PathBuf::from("."),
            width: 375.0,
            viewport_height: 667.0,
            page_size: None,
            expand_all: false,
            latency: Duration::ZERO,
            settle_timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

/// Run in headless mode, writing NDJSON events to stdout
pub async fn run_headless(options: &HeadlessOptions) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("revfeed starting in HEADLESS mode");
    info!("Fixture: {}", options.fixture.display());
    info!("═══════════════════════════════════════════════════════");

    let mut stdout = std::io::stdout();
    let result = run_headless_to(options, &mut stdout).await;

    if let Err(ref e) = result {
        error!("Headless run failed: {:?}", e);
    }
    result
}

/// Run in headless mode, writing NDJSON events to `out`
pub async fn run_headless_to(options: &HeadlessOptions, out: &mut impl Write) -> Result<()> {
    let mut settings = load_settings(&options.config_dir);
    if let Some(page_size) = options.page_size {
        settings.feed.page_size = page_size;
    }

    let provider =
        FixtureReviewsProvider::new(options.fixture.clone()).with_latency(options.latency);
    let images = Arc::new(ImageLoader::new(FileImageSource, RasterDecoder));
    let mut vm = ReviewsViewModel::new(provider, images, settings);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<FeedSnapshot>();
    vm.set_listener(forward_snapshots(event_tx));

    HeadlessEvent::started(
        &options.fixture.display().to_string(),
        vm.state().page_size(),
        options.width,
    )
    .write_to(out)?;

    vm.load();
    scroll_to_end(&mut vm, options, &mut event_rx, out).await?;

    if options.expand_all {
        let ids: Vec<RowId> = vm.state().rows().iter().filter_map(Row::id).collect();
        for id in ids {
            vm.expand_row(id);
        }
        flush_state_events(&mut event_rx, out)?;
    }

    for index in 0..vm.row_count() {
        let frames = vm.row_layout(index, options.width)?;
        HeadlessEvent::row(index, vm.row(index)?, frames).write_to(out)?;
    }

    HeadlessEvent::finished(vm.row_count(), vm.state().total_count()).write_to(out)?;
    info!("Headless run finished with {} rows", vm.row_count());
    Ok(())
}

/// Keep reporting a scroll to the bottom until every page is merged
async fn scroll_to_end(
    vm: &mut FixtureViewModel,
    options: &HeadlessOptions,
    event_rx: &mut mpsc::UnboundedReceiver<FeedSnapshot>,
    out: &mut impl Write,
) -> Result<()> {
    let mut failures = 0;

    loop {
        let offset = vm.state().offset();

        if tokio::time::timeout(options.settle_timeout, vm.settle())
            .await
            .is_err()
        {
            let message = format!(
                "page at offset {} did not settle within {:?}",
                offset, options.settle_timeout
            );
            HeadlessEvent::error(message.clone(), true).write_to(out)?;
            return Err(Error::network(message));
        }
        flush_state_events(event_rx, out)?;

        let state = vm.state();
        if !state.has_more() {
            return Ok(());
        }

        if state.offset() == offset {
            failures += 1;
            let fatal = failures > options.max_retries;
            HeadlessEvent::error(format!("page at offset {} failed to load", offset), fatal)
                .write_to(out)?;
            if fatal {
                warn!("Giving up after {} failed attempts", failures);
                return Ok(());
            }
        } else {
            failures = 0;
        }

        let content_height = (0..vm.row_count())
            .map(|index| vm.row_height(index, options.width))
            .sum::<Result<f64>>()?;
        let pending_offset = (content_height - options.viewport_height).max(0.0);

        if !vm.maybe_load_next_page(options.viewport_height, content_height, pending_offset) {
            debug!("Scroll did not cross the load threshold, stopping");
            return Ok(());
        }
    }
}

/// Listener that forwards every notified state as a snapshot
fn forward_snapshots(
    event_tx: mpsc::UnboundedSender<FeedSnapshot>,
) -> impl FnMut(&FeedState) + Send + 'static {
    move |state: &FeedState| {
        if event_tx.send(state.snapshot()).is_err() {
            trace!("State event receiver closed, dropping revision {}", state.revision());
        }
    }
}

fn flush_state_events(
    event_rx: &mut mpsc::UnboundedReceiver<FeedSnapshot>,
    out: &mut impl Write,
) -> Result<()> {
    while let Ok(snapshot) = event_rx.try_recv() {
        HeadlessEvent::state_changed(snapshot).write_to(out)?;
    }
    Ok(())
}
