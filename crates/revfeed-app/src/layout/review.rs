//! Review row layout

use revfeed_core::Rect;
use serde::Serialize;

use super::LayoutContext;
use crate::row::ReviewRow;

/// Frames of a review row, relative to the row's origin.
///
/// Optional frames are `None` when the element is absent; an absent element
/// contributes neither height nor the spacing that would follow it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewFrames {
    pub avatar: Rect,
    pub user_name: Rect,
    pub rating: Rect,
    /// Horizontal strip holding every loaded photo
    pub photos: Option<Rect>,
    pub body: Option<Rect>,
    pub show_more: Option<Rect>,
    pub created: Rect,
    pub height: f64,
}

impl ReviewFrames {
    pub fn shows_more(&self) -> bool {
        self.show_more.is_some()
    }
}

/// Lay out a review row within `max_width`.
pub fn layout_review(row: &ReviewRow, max_width: f64, ctx: &LayoutContext<'_>) -> ReviewFrames {
    let m = ctx.metrics;
    let measurer = ctx.measurer;

    let avatar = Rect::from_origin_size(m.insets.left, m.insets.top, m.avatar_size);
    let x = avatar.max_x() + m.avatar_to_username;
    let content_width =
        (max_width - m.insets.horizontal() - m.avatar_size.width - m.avatar_to_username).max(0.0);

    let user_name = Rect::from_origin_size(
        x,
        m.insets.top,
        measurer.measure(&row.user_name, content_width, None),
    );

    let rating = Rect::from_origin_size(x, user_name.max_y() + m.username_to_rating, row.rating.size);

    let mut y = rating.max_y() + m.rating_to_text;
    let photos = if row.photos.is_empty() {
        None
    } else {
        let strip = Rect::new(
            x,
            y,
            m.photo_size.width * row.photos.len() as f64,
            m.photo_size.height,
        );
        y = strip.max_y() + m.photos_to_text;
        Some(strip)
    };

    let mut show_more_visible = false;
    let body = if row.body.is_empty() {
        None
    } else {
        let full = measurer.measure(&row.body, content_width, None);
        let size = if row.line_limit == 0 {
            full
        } else {
            let clipped = measurer.measure(&row.body, content_width, Some(row.line_limit));
            show_more_visible = full.height > clipped.height;
            clipped
        };
        let frame = Rect::from_origin_size(x, y, size);
        y = frame.max_y() + m.text_to_created;
        Some(frame)
    };

    let show_more = if show_more_visible {
        let frame = Rect::from_origin_size(x, y, measurer.measure(ctx.show_more, content_width, None));
        y = frame.max_y() + m.show_more_to_created;
        Some(frame)
    } else {
        None
    };

    let created = Rect::from_origin_size(x, y, measurer.measure(&row.created, content_width, None));
    let height = created.max_y() + m.insets.bottom;

    ReviewFrames {
        avatar,
        user_name,
        rating,
        photos,
        body,
        show_more,
        created,
        height,
    }
}
