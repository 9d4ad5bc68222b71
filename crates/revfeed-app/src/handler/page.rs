//! Pagination handlers: load, refresh and page-result merge

use revfeed_core::prelude::*;
use revfeed_core::ReviewsPage;

use crate::formatter::Formatter;
use crate::message::Message;
use crate::row::{ReviewRow, Row, SummaryRow};
use crate::state::{FeedState, PageRequest};

use super::{ImageBatch, UpdateAction, UpdateResult};

/// Outcome of matching a page result against the outstanding request
enum Settled {
    /// Result belongs to the current list generation
    Current(PageRequest),
    /// Result was issued before the latest refresh
    Stale,
    /// No matching request is outstanding
    Unexpected,
}

fn settle_request(state: &mut FeedState, generation: u64) -> Settled {
    match state.in_flight {
        Some(request) if request.generation == generation => {
            state.in_flight = None;
            if generation == state.generation {
                Settled::Current(request)
            } else {
                Settled::Stale
            }
        }
        _ => Settled::Unexpected,
    }
}

pub(crate) fn handle_load(state: &mut FeedState) -> UpdateResult {
    if let Some(request) = state.in_flight {
        debug!(
            "Load ignored: page at offset {} still in flight",
            request.offset
        );
        return UpdateResult::none();
    }

    if !state.has_more {
        trace!("Load ignored: all {} rows loaded", state.rows.len());
        return UpdateResult::none();
    }

    let request = PageRequest {
        generation: state.generation,
        offset: state.offset,
    };
    state.in_flight = Some(request);

    // First load surfaces the loading flag before any result arrives
    if state.rows.is_empty() && !state.is_refreshing {
        state.is_initial_loading = true;
        state.touch();
    }

    debug!(
        "Requesting page: offset={} limit={} generation={}",
        request.offset, state.page_size, request.generation
    );

    UpdateResult::action(UpdateAction::FetchPage {
        generation: request.generation,
        offset: request.offset,
        limit: state.page_size,
    })
}

pub(crate) fn handle_refresh(state: &mut FeedState) -> UpdateResult {
    state.generation += 1;
    state.rows.clear();
    state.offset = 0;
    state.has_more = true;
    state.total_count = None;
    state.is_initial_loading = false;
    state.is_refreshing = true;
    state.touch();

    info!("Refreshing feed (generation {})", state.generation);

    if state.in_flight.is_some() {
        debug!("Refresh waits for the in-flight request to settle");
    }

    UpdateResult::message(Message::Load)
}

pub(crate) fn handle_page_fetched(
    state: &mut FeedState,
    formatter: &Formatter,
    generation: u64,
    bytes: &[u8],
) -> UpdateResult {
    let request = match settle_request(state, generation) {
        Settled::Current(request) => request,
        Settled::Stale => return discard_stale(generation),
        Settled::Unexpected => {
            warn!("Dropping unexpected page for generation {}", generation);
            return UpdateResult::none();
        }
    };

    let page = match ReviewsPage::from_slice(bytes) {
        Ok(page) => page,
        Err(e) => {
            warn!("Page at offset {} failed to decode: {}", request.offset, e);
            return reopen_after_failure(state);
        }
    };

    let fetched = page.items.len();
    let mut batches = Vec::new();
    for review in &page.items {
        let id = state.issue_row_id();
        let row = ReviewRow::from_review(id, review, formatter, state.default_line_limit);
        if !row.photo_urls.is_empty() {
            state.pending_image_batches.insert(id);
            batches.push(ImageBatch {
                id,
                urls: row.photo_urls.clone(),
            });
        }
        state.rows.push(Row::Review(row));
    }

    state.offset = request
        .offset
        .saturating_add(state.page_size)
        .min(page.count);
    state.has_more = state.offset < page.count;
    state.total_count = Some(page.count);

    if !state.has_more && !state.has_summary() {
        state.rows.push(Row::Summary(SummaryRow {
            total_count: page.count,
            total_text: formatter.total_count(page.count),
        }));
    }

    state.is_initial_loading = false;
    state.is_refreshing = false;
    state.touch();

    info!(
        "Merged {} reviews: offset={} count={} more={}",
        fetched, state.offset, page.count, state.has_more
    );

    if batches.is_empty() {
        UpdateResult::none()
    } else {
        UpdateResult::action(UpdateAction::LoadRowImages { batches })
    }
}

pub(crate) fn handle_page_failed(
    state: &mut FeedState,
    generation: u64,
    error: &str,
) -> UpdateResult {
    match settle_request(state, generation) {
        Settled::Current(request) => {
            warn!("Page at offset {} failed: {}", request.offset, error);
            reopen_after_failure(state)
        }
        Settled::Stale => discard_stale(generation),
        Settled::Unexpected => {
            warn!("Dropping unexpected failure for generation {}", generation);
            UpdateResult::none()
        }
    }
}

/// Leave rows and offset as they are so the next trigger retries the same page
fn reopen_after_failure(state: &mut FeedState) -> UpdateResult {
    state.is_initial_loading = false;
    state.is_refreshing = false;
    state.touch();
    UpdateResult::none()
}

/// A refresh superseded the request; issue the refresh's own request now
fn discard_stale(generation: u64) -> UpdateResult {
    debug!("Discarding page result of stale generation {}", generation);
    UpdateResult::message(Message::Load)
}
