//! Message types for the list view-model (TEA pattern)

use revfeed_core::LoadedImage;

use crate::row::RowId;

/// Everything that can change list state.
///
/// Caller-initiated messages come from the view-model's public operations;
/// result messages are posted by background tasks through the message channel.
#[derive(Debug, Clone)]
pub enum Message {
    /// Request the next page if the state machine permits it
    Load,

    /// Drop every row and start over from offset 0
    Refresh,

    /// "Show more..." tapped on a review row
    ExpandRow { id: RowId },

    // ─────────────────────────────────────────────────────────
    // Background results
    // ─────────────────────────────────────────────────────────
    /// Raw page body returned by the feed provider
    PageFetched { generation: u64, bytes: Vec<u8> },

    /// The feed provider failed at the transport level
    PageFetchFailed { generation: u64, error: String },

    /// Image batch for one row settled; failed images are already dropped
    RowImagesLoaded { id: RowId, images: Vec<LoadedImage> },
}
