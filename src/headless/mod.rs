//! Headless mode - NDJSON event output
//!
//! Drives a [`revfeed_app::ReviewsViewModel`] against a local fixture and
//! writes one JSON event per line, so scripts and tests can observe pagination
//! without a renderer.
//!
//! # Example Output
//!
//! ```json
//! {"event":"started","fixture":"reviews.json","page_size":20,"width":375.0,"timestamp":1704700001000}
//! {"event":"state_changed","phase":"loading","row_count":0,"offset":0,"has_more":true,"is_loading":true,"is_refreshing":false,"total_count":null,"revision":1,"timestamp":1704700001002}
//! {"event":"row","index":0,"kind":"review","id":0,"text":"Ada Lovelace","height":112.0,"frames":{...},"timestamp":1704700001050}
//! {"event":"finished","row_count":46,"total_count":45,"timestamp":1704700001060}
//! ```

pub mod runner;

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use revfeed_app::{FeedSnapshot, Row, RowFrames, RowKind};
use revfeed_core::prelude::*;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Runner configured and about to load the first page
    Started {
        fixture: String,
        page_size: usize,
        width: f64,
        timestamp: i64,
    },

    /// The view-model notified its listener
    StateChanged {
        #[serde(flatten)]
        snapshot: FeedSnapshot,
        timestamp: i64,
    },

    /// One row of the final list with its computed layout
    Row {
        index: usize,
        kind: RowKind,
        id: Option<u64>,
        /// Name for review rows, total-count text for the summary
        text: String,
        rating: Option<String>,
        line_limit: Option<usize>,
        photos: usize,
        height: f64,
        frames: RowFrames,
        timestamp: i64,
    },

    /// Something went wrong; non-fatal errors let the run continue
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },

    /// Run completed
    Finished {
        row_count: usize,
        total_count: Option<usize>,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Write this event as one NDJSON line
    pub fn write_to(&self, out: &mut impl Write) -> Result<()> {
        let json = serde_json::to_string(self)?;
        writeln!(out, "{}", json)?;
        out.flush()?;
        Ok(())
    }

    /// Emit this event to stdout, logging instead of failing
    pub fn emit(&self) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = self.write_to(&mut stdout) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn started(fixture: &str, page_size: usize, width: f64) -> Self {
        Self::Started {
            fixture: fixture.to_string(),
            page_size,
            width,
            timestamp: Self::now(),
        }
    }

    pub fn state_changed(snapshot: FeedSnapshot) -> Self {
        Self::StateChanged {
            snapshot,
            timestamp: Self::now(),
        }
    }

    pub fn row(index: usize, row: &Row, frames: RowFrames) -> Self {
        let (text, rating, line_limit, photos) = match row {
            Row::Review(review) => (
                review.user_name.to_string(),
                Some(review.rating.glyphs.to_string()),
                Some(review.line_limit),
                review.photos.len(),
            ),
            Row::Summary(summary) => (summary.total_text.to_string(), None, None, 0),
        };

        Self::Row {
            index,
            kind: row.kind(),
            id: row.id().map(|id| id.get()),
            text,
            rating,
            line_limit,
            photos,
            height: frames.height(),
            frames,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }

    pub fn finished(row_count: usize, total_count: Option<usize>) -> Self {
        Self::Finished {
            row_count,
            total_count,
            timestamp: Self::now(),
        }
    }
}
