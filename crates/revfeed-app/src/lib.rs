//! revfeed-app - List view-model, layout and orchestration for the reviews feed
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! paginated list: `FeedState` is the model, `handler::update` the pure update
//! function, and `ReviewsViewModel` the facade that owns the message channel,
//! dispatches background fetches and notifies its listener. Row layout, text
//! formatting and configuration loading live alongside.

pub mod actions;
pub mod config;
pub mod formatter;
pub mod handler;
pub mod layout;
pub mod message;
pub mod notifier;
pub mod process;
pub mod row;
pub mod state;
pub mod text_metrics;
pub mod view_model;

// Re-export primary types
pub use config::Settings;
pub use formatter::{Formatter, RatingGlyphs};
pub use handler::{ImageBatch, UpdateAction, UpdateResult};
pub use layout::{LayoutContext, ReviewFrames, RowFrames, SummaryFrames};
pub use message::Message;
pub use notifier::{Listener, Notifier};
pub use row::{Avatar, ReviewRow, Row, RowId, RowKind, SummaryRow};
pub use state::{FeedSnapshot, FeedState, LoadPhase};
pub use text_metrics::{MonospaceMeasurer, TextMeasurer};
pub use view_model::ReviewsViewModel;

// Re-export fetch collaborators for the binary
pub use revfeed_fetch::{
    FileImageSource, FixtureReviewsProvider, ImageLoader, RasterDecoder, ReviewsProvider,
};
