//! Terminal UI components.
//!
//! - [`style`]: Theming and colors
//! - [`render`]: Frame rendering for both panes and overlays
//! - [`status`]: Status, toast and prompt bars
//!
//! This module also owns the split-pane geometry: where the divider sits
//! and how pointer columns map back to split percentages.

pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{line_number_width, render};

use ratatui::layout::Rect;

/// Smallest editor pane width, as a percentage of the frame.
pub const MIN_SPLIT_PERCENT: u16 = 20;
/// Largest editor pane width, as a percentage of the frame.
pub const MAX_SPLIT_PERCENT: u16 = 80;
pub const DEFAULT_SPLIT_PERCENT: u16 = 50;

/// Horizontal padding inside each pane.
pub const PANE_PADDING: u16 = 2;

/// Clamp a split percentage to the allowed range.
pub const fn clamp_split(percent: u16) -> u16 {
    if percent < MIN_SPLIT_PERCENT {
        MIN_SPLIT_PERCENT
    } else if percent > MAX_SPLIT_PERCENT {
        MAX_SPLIT_PERCENT
    } else {
        percent
    }
}

/// Split an area into editor pane, one-column divider, and preview pane.
pub fn split_panes(area: Rect, split_percent: u16) -> (Rect, Rect, Rect) {
    let percent = clamp_split(split_percent);
    // width * percent / 100 always fits back in u16
    #[allow(clippy::cast_possible_truncation)]
    let editor_width = (u32::from(area.width) * u32::from(percent) / 100) as u16;
    let editor_width = editor_width.min(area.width.saturating_sub(1));
    let divider_width = u16::from(area.width > editor_width);
    let editor = Rect {
        width: editor_width,
        ..area
    };
    let divider = Rect {
        x: area.x + editor_width,
        width: divider_width,
        ..area
    };
    let preview = Rect {
        x: area.x + editor_width + divider_width,
        width: area
            .width
            .saturating_sub(editor_width)
            .saturating_sub(divider_width),
        ..area
    };
    (editor, divider, preview)
}

/// Split percentage implied by a pointer at `column`, clamped.
///
/// Pointers outside the frame still produce a valid split at the nearest
/// bound.
pub fn split_percent_for_column(area: Rect, column: u16) -> u16 {
    if area.width == 0 {
        return DEFAULT_SPLIT_PERCENT;
    }
    let offset = u32::from(column.saturating_sub(area.x).min(area.width));
    // offset <= width, so the ratio is at most 100
    #[allow(clippy::cast_possible_truncation)]
    let percent = (offset * 100 / u32::from(area.width)) as u16;
    clamp_split(percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_split_bounds() {
        assert_eq!(clamp_split(0), MIN_SPLIT_PERCENT);
        assert_eq!(clamp_split(19), MIN_SPLIT_PERCENT);
        assert_eq!(clamp_split(20), 20);
        assert_eq!(clamp_split(80), 80);
        assert_eq!(clamp_split(81), MAX_SPLIT_PERCENT);
        assert_eq!(clamp_split(u16::MAX), MAX_SPLIT_PERCENT);
    }

    #[test]
    fn test_split_panes_partitions_area() {
        let area = Rect::new(0, 0, 100, 24);
        let (editor, divider, preview) = split_panes(area, 50);
        assert_eq!(editor.width, 50);
        assert_eq!(divider.width, 1);
        assert_eq!(preview.width, 49);
        assert_eq!(divider.x, 50);
        assert_eq!(preview.x, 51);
    }

    #[test]
    fn test_split_panes_uneven() {
        let area = Rect::new(0, 0, 120, 24);
        let (editor, _, preview) = split_panes(area, 20);
        assert_eq!(editor.width, 24);
        assert_eq!(preview.width, 95);
    }

    #[test]
    fn test_pointer_column_maps_to_percent() {
        let area = Rect::new(0, 0, 100, 24);
        assert_eq!(split_percent_for_column(area, 50), 50);
        assert_eq!(split_percent_for_column(area, 30), 30);
    }

    #[test]
    fn test_pointer_outside_frame_clamps() {
        let area = Rect::new(0, 0, 100, 24);
        assert_eq!(split_percent_for_column(area, 0), MIN_SPLIT_PERCENT);
        assert_eq!(split_percent_for_column(area, 5), MIN_SPLIT_PERCENT);
        assert_eq!(split_percent_for_column(area, 99), MAX_SPLIT_PERCENT);
        assert_eq!(split_percent_for_column(area, u16::MAX), MAX_SPLIT_PERCENT);
    }

    proptest! {
        #[test]
        fn prop_clamp_always_in_range(percent in 0_u16..=u16::MAX) {
            let clamped = clamp_split(percent);
            prop_assert!((MIN_SPLIT_PERCENT..=MAX_SPLIT_PERCENT).contains(&clamped));
        }

        #[test]
        fn prop_panes_cover_area(width in 2_u16..500, percent in 0_u16..200) {
            let area = Rect::new(0, 0, width, 24);
            let (editor, divider, preview) = split_panes(area, percent);
            prop_assert_eq!(editor.width + divider.width + preview.width, width);
        }

        #[test]
        fn prop_pointer_percent_in_range(width in 1_u16..500, col in 0_u16..1000) {
            let area = Rect::new(0, 0, width, 24);
            let percent = split_percent_for_column(area, col);
            prop_assert!((MIN_SPLIT_PERCENT..=MAX_SPLIT_PERCENT).contains(&percent));
        }
    }
}
