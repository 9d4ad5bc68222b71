//! Row mutation handlers

use revfeed_core::prelude::*;
use revfeed_core::LoadedImage;

use crate::row::RowId;
use crate::state::FeedState;

use super::UpdateResult;

pub(crate) fn handle_expand_row(state: &mut FeedState, id: RowId) -> UpdateResult {
    match state.review_mut(id) {
        Some(row) => {
            row.line_limit = 0;
            state.touch();
        }
        None => debug!("Expand ignored: {} is not in the list", id),
    }
    UpdateResult::none()
}

pub(crate) fn handle_row_images(
    state: &mut FeedState,
    id: RowId,
    images: Vec<LoadedImage>,
) -> UpdateResult {
    state.pending_image_batches.remove(&id);

    match state.review_mut(id) {
        Some(row) => {
            trace!("Merging {} images into {}", images.len(), id);
            row.photos = images;
            state.touch();
        }
        None => debug!("Discarding images for {}: row no longer listed", id),
    }
    UpdateResult::none()
}
