//! Prefetch predicate for infinite scrolling

/// Whether the next page should be requested.
///
/// `remaining` is the content left below the viewport once the pending
/// scroll lands; a load is due when it fits within `threshold_screens`
/// viewport heights.
pub fn should_load_next_page(
    viewport_height: f64,
    content_height: f64,
    pending_scroll_offset: f64,
    threshold_screens: f64,
) -> bool {
    let remaining = content_height - viewport_height - pending_scroll_offset;
    remaining <= viewport_height * threshold_screens
}
