//! List state (the TEA Model)

use std::collections::HashSet;

use revfeed_core::prelude::*;
use serde::Serialize;

use crate::row::{ReviewRow, Row, RowId};

/// Pagination phase, derived from the list state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    /// Every page has been merged; `load` is a no-op until a refresh
    Idle,
    /// A page request may be started
    Loadable,
    /// A page request is in flight
    Loading,
    /// A page request started by a refresh is in flight
    Refreshing,
}

/// The single outstanding page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// List generation the request was issued for
    pub generation: u64,
    pub offset: usize,
}

/// State of one paginated list.
///
/// Mutated only by [`crate::handler::update`]. Rows are in display order; a
/// summary row, when present, is the last element.
#[derive(Debug)]
pub struct FeedState {
    pub(crate) rows: Vec<Row>,
    pub(crate) offset: usize,
    pub(crate) page_size: usize,
    pub(crate) default_line_limit: usize,
    pub(crate) has_more: bool,
    /// First page of an empty list requested outside a refresh
    pub(crate) is_initial_loading: bool,
    pub(crate) is_refreshing: bool,
    pub(crate) total_count: Option<usize>,

    pub(crate) in_flight: Option<PageRequest>,
    /// Bumped by every refresh; responses for older generations are stale
    pub(crate) generation: u64,
    next_row_id: u64,
    /// Rows whose image batch has been dispatched but not yet merged
    pub(crate) pending_image_batches: HashSet<RowId>,

    /// Bumped on every visible change; drives the state-change notifier
    revision: u64,
}

impl FeedState {
    pub fn new(page_size: usize, default_line_limit: usize) -> Self {
        Self {
            rows: Vec::new(),
            offset: 0,
            page_size: page_size.max(1),
            default_line_limit,
            has_more: true,
            is_initial_loading: false,
            is_refreshing: false,
            total_count: None,
            in_flight: None,
            generation: 0,
            next_row_id: 0,
            pending_image_batches: HashSet::new(),
            revision: 0,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        match (self.in_flight, self.is_refreshing) {
            (Some(_), true) => LoadPhase::Refreshing,
            (Some(_), false) => LoadPhase::Loading,
            (None, _) if self.has_more => LoadPhase::Loadable,
            (None, _) => LoadPhase::Idle,
        }
    }

    /// True while the initial load of an empty list is in progress.
    ///
    /// Later pages and refreshes leave this false; see [`Self::phase`] for
    /// any outstanding request.
    pub fn is_loading(&self) -> bool {
        self.is_initial_loading
    }

    pub fn has_page_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_refreshing(&self) -> bool {
        self.is_refreshing
    }

    pub fn can_load(&self) -> bool {
        self.phase() == LoadPhase::Loadable
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total reviews reported by the most recent page, if any has arrived
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Result<&Row> {
        self.rows
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.rows.len()))
    }

    /// Review row by identifier, wherever it currently sits
    pub fn review(&self, id: RowId) -> Option<&ReviewRow> {
        self.rows
            .iter()
            .filter_map(Row::as_review)
            .find(|row| row.id == id)
    }

    pub(crate) fn review_mut(&mut self, id: RowId) -> Option<&mut ReviewRow> {
        self.rows.iter_mut().find_map(|row| match row {
            Row::Review(review) if review.id == id => Some(review),
            _ => None,
        })
    }

    pub fn has_summary(&self) -> bool {
        matches!(self.rows.last(), Some(Row::Summary(_)))
    }

    /// True while a page request or any image batch is outstanding
    pub fn has_pending_work(&self) -> bool {
        self.in_flight.is_some() || !self.pending_image_batches.is_empty()
    }

    pub fn pending_image_batches(&self) -> usize {
        self.pending_image_batches.len()
    }

    pub(crate) fn issue_row_id(&mut self) -> RowId {
        let id = RowId::new(self.next_row_id);
        self.next_row_id += 1;
        id
    }

    /// Record a visible change
    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            phase: self.phase(),
            row_count: self.rows.len(),
            offset: self.offset,
            has_more: self.has_more,
            is_loading: self.is_loading(),
            is_refreshing: self.is_refreshing,
            total_count: self.total_count,
            revision: self.revision,
        }
    }
}

/// Flat, serializable summary of [`FeedState`] handed to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSnapshot {
    pub phase: LoadPhase,
    pub row_count: usize,
    pub offset: usize,
    pub has_more: bool,
    /// Initial load of an empty list in progress
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub total_count: Option<usize>,
    pub revision: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_loadable_and_empty() {
        let state = FeedState::new(20, 3);

        assert_eq!(state.phase(), LoadPhase::Loadable);
        assert_eq!(state.offset(), 0);
        assert_eq!(state.row_count(), 0);
        assert!(state.has_more());
        assert!(!state.is_loading());
        assert!(!state.has_pending_work());
    }

    #[test]
    fn test_phase_follows_request_and_flags() {
        let mut state = FeedState::new(20, 3);

        state.in_flight = Some(PageRequest {
            generation: 0,
            offset: 0,
        });
        assert_eq!(state.phase(), LoadPhase::Loading);

        state.is_refreshing = true;
        assert_eq!(state.phase(), LoadPhase::Refreshing);

        state.in_flight = None;
        state.is_refreshing = false;
        state.has_more = false;
        assert_eq!(state.phase(), LoadPhase::Idle);
        assert!(!state.can_load());
    }

    #[test]
    fn test_row_ids_are_never_reused() {
        let mut state = FeedState::new(20, 3);
        let a = state.issue_row_id();
        let b = state.issue_row_id();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_row_out_of_range_is_programming_error() {
        let state = FeedState::new(20, 3);
        let err = state.row(0).unwrap_err();
        assert!(err.is_programming_error());
    }

    #[test]
    fn test_zero_page_size_is_bumped_to_one() {
        assert_eq!(FeedState::new(0, 3).page_size(), 1);
    }
}
