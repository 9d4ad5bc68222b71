//! Handler module - TEA update function and message handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `page`: Load, refresh and page-result merge
//! - `rows`: Row mutations (expand, image merge)
//! - `scroll`: Prefetch predicate

pub(crate) mod page;
pub(crate) mod rows;
pub mod scroll;
pub(crate) mod update;


use crate::message::Message;
use crate::row::RowId;

// Re-export main entry point
pub use scroll::should_load_next_page;
pub use update::update;

/// Photo URLs of one freshly merged row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBatch {
    pub id: RowId,
    pub urls: Vec<String>,
}

/// Actions that the view-model should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Request one page from the feed provider
    FetchPage {
        generation: u64,
        offset: usize,
        limit: usize,
    },

    /// Fetch every batch concurrently; each settles into one
    /// `Message::RowImagesLoaded`
    LoadRowImages { batches: Vec<ImageBatch> },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the view-model to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
