//! Summary row layout

use revfeed_core::Rect;
use serde::Serialize;

use super::LayoutContext;
use crate::row::SummaryRow;

/// Frames of the summary row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryFrames {
    /// Total-count label, centered horizontally
    pub total: Rect,
    pub height: f64,
}

/// Lay out the summary row within `max_width`.
pub fn layout_summary(row: &SummaryRow, max_width: f64, ctx: &LayoutContext<'_>) -> SummaryFrames {
    let insets = ctx.metrics.insets;
    let available = (max_width - insets.horizontal()).max(0.0);
    let size = ctx.measurer.measure(&row.total_text, available, None);

    let x = ((max_width - size.width) / 2.0).max(insets.left);
    let total = Rect::from_origin_size(x, insets.top, size);

    SummaryFrames {
        total,
        height: total.max_y() + insets.bottom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;
    use crate::formatter::Formatter;
    use crate::text_metrics::MonospaceMeasurer;

    #[test]
    fn test_summary_is_centered() {
        let formatter = Formatter::default();
        let row = SummaryRow {
            total_count: 45,
            total_text: formatter.total_count(45),
        };
        let metrics = LayoutSettings::default();
        let measurer = MonospaceMeasurer::uniform(10.0, 20.0);
        let show_more = formatter.show_more();
        let ctx = LayoutContext {
            metrics: &metrics,
            measurer: &measurer,
            show_more: &show_more,
        };

        let frames = layout_summary(&row, 400.0, &ctx);
        assert_eq!(frames.total, Rect::new(150.0, 9.0, 100.0, 20.0));
        assert_eq!(frames.height, 38.0);
    }
}
