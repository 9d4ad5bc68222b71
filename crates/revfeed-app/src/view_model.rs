//! ReviewsViewModel - the paginated list facade
//!
//! Owns the list state, the message channel and the listener slot. All state
//! mutation happens on the caller's context through [`process_message`];
//! background tasks only post messages.
//!
//! [`process_message`]: ReviewsViewModel::process_message

use std::sync::Arc;

use revfeed_core::prelude::*;
use revfeed_core::StyledText;
use revfeed_fetch::{ImageLoader, ImageSource, ReviewsProvider};
use tokio::sync::mpsc;

use crate::config::Settings;
use crate::formatter::Formatter;
use crate::handler::should_load_next_page;
use crate::layout::{self, LayoutContext, RowFrames};
use crate::message::Message;
use crate::notifier::Notifier;
use crate::process;
use crate::row::{Row, RowId};
use crate::state::FeedState;
use crate::text_metrics::{MonospaceMeasurer, TextMeasurer};

/// Capacity of the background result channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// View-model of the paginated reviews list.
///
/// Pull-based queries (`row_count`, `row`, `row_height`) serve the renderer;
/// the listener installed with [`set_listener`](Self::set_listener) tells it
/// when to re-query.
///
/// Operations that start background work must run inside a tokio runtime.
pub struct ReviewsViewModel<P, S> {
    state: FeedState,
    settings: Settings,
    formatter: Formatter,
    measurer: Box<dyn TextMeasurer>,
    show_more: StyledText,

    provider: Arc<P>,
    images: Arc<ImageLoader<S>>,

    /// Sender half of the result channel, cloned into background tasks
    msg_tx: mpsc::Sender<Message>,
    msg_rx: mpsc::Receiver<Message>,

    notifier: Notifier,
}

impl<P, S> ReviewsViewModel<P, S>
where
    P: ReviewsProvider + Send + Sync + 'static,
    S: ImageSource + Send + Sync + 'static,
{
    /// Create an empty, loadable list.
    ///
    /// The image loader is handed in so its cache can outlive or be shared
    /// across view-models.
    pub fn new(provider: P, images: Arc<ImageLoader<S>>, settings: Settings) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);
        let formatter = Formatter::new(settings.rating.clone(), settings.text.clone());
        let show_more = formatter.show_more();
        let state = FeedState::new(
            settings.feed.effective_page_size(),
            settings.feed.default_line_limit,
        );

        Self {
            state,
            settings,
            formatter,
            measurer: Box::new(MonospaceMeasurer::default()),
            show_more,
            provider: Arc::new(provider),
            images,
            msg_tx,
            msg_rx,
            notifier: Notifier::new(),
        }
    }

    /// Replace the text measurer used for layout
    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn image_loader(&self) -> &Arc<ImageLoader<S>> {
        &self.images
    }

    /// Install the state-change listener, replacing any previous one
    pub fn set_listener(&mut self, listener: impl FnMut(&FeedState) + Send + 'static) {
        self.notifier.set_listener(listener);
    }

    pub fn clear_listener(&mut self) {
        self.notifier.clear_listener();
    }

    // ─────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────

    /// Request the next page; no-op unless the list is loadable
    pub fn load(&mut self) {
        self.process_message(Message::Load);
    }

    /// Drop every row and load again from the first page
    pub fn refresh(&mut self) {
        self.process_message(Message::Refresh);
    }

    /// Lift the line limit of a review row; unknown ids are ignored
    pub fn expand_row(&mut self, id: RowId) {
        self.process_message(Message::ExpandRow { id });
    }

    /// Load the next page when the scroll target is near the bottom, using
    /// the configured threshold.
    ///
    /// Returns true when the threshold was crossed and a load was attempted.
    pub fn maybe_load_next_page(
        &mut self,
        viewport_height: f64,
        content_height: f64,
        pending_scroll_offset: f64,
    ) -> bool {
        let threshold = self.settings.feed.load_threshold_screens;
        self.maybe_load_next_page_with_threshold(
            viewport_height,
            content_height,
            pending_scroll_offset,
            threshold,
        )
    }

    pub fn maybe_load_next_page_with_threshold(
        &mut self,
        viewport_height: f64,
        content_height: f64,
        pending_scroll_offset: f64,
        threshold_screens: f64,
    ) -> bool {
        if !should_load_next_page(
            viewport_height,
            content_height,
            pending_scroll_offset,
            threshold_screens,
        ) {
            return false;
        }
        self.load();
        true
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn row_count(&self) -> usize {
        self.state.row_count()
    }

    /// Row at `index`; fails with `IndexOutOfRange` past the end
    pub fn row(&self, index: usize) -> Result<&Row> {
        self.state.row(index)
    }

    /// Height of the row at `index` laid out within `width`
    pub fn row_height(&self, index: usize, width: f64) -> Result<f64> {
        let row = self.state.row(index)?;
        Ok(layout::row_height(row, width, &self.layout_context()))
    }

    /// Every sub-element frame of the row at `index` within `width`
    pub fn row_layout(&self, index: usize, width: f64) -> Result<RowFrames> {
        let row = self.state.row(index)?;
        Ok(layout::layout_row(row, width, &self.layout_context()))
    }

    fn layout_context(&self) -> LayoutContext<'_> {
        LayoutContext {
            metrics: &self.settings.layout,
            measurer: self.measurer.as_ref(),
            show_more: &self.show_more,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Message loop
    // ─────────────────────────────────────────────────────────

    /// Process a single message through the TEA update cycle
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(
            &mut self.state,
            &self.formatter,
            msg,
            &self.msg_tx,
            &self.provider,
            &self.images,
            &mut self.notifier,
        );
    }

    /// Wait for the next background result and process it.
    ///
    /// Returns false if the channel closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Process background results until no page request or image batch is
    /// outstanding.
    pub async fn settle(&mut self) {
        while self.state.has_pending_work() {
            if !self.process_next().await {
                warn!("Result channel closed with work outstanding");
                break;
            }
        }
    }

    /// Process every queued result without waiting.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }
}

impl<P, S> std::fmt::Debug for ReviewsViewModel<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewsViewModel")
            .field("state", &self.state)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}
