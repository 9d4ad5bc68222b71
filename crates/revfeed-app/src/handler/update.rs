//! Main update function - handles state transitions (TEA pattern)

use crate::formatter::Formatter;
use crate::message::Message;
use crate::state::FeedState;

use super::{page, rows, UpdateResult};

/// Process a message and update state.
/// Returns an optional follow-up message and an optional action.
pub fn update(state: &mut FeedState, formatter: &Formatter, message: Message) -> UpdateResult {
    match message {
        Message::Load => page::handle_load(state),

        Message::Refresh => page::handle_refresh(state),

        Message::ExpandRow { id } => rows::handle_expand_row(state, id),

        Message::PageFetched { generation, bytes } => {
            page::handle_page_fetched(state, formatter, generation, &bytes)
        }

        Message::PageFetchFailed { generation, error } => {
            page::handle_page_failed(state, generation, &error)
        }

        Message::RowImagesLoaded { id, images } => rows::handle_row_images(state, id, images),
    }
}
