use ratatui::layout::Rect;
use std::ops::Range;

pub(crate) const CELL_HEIGHT: u16 = 3;
pub(crate) const TOOLBAR_HEIGHT: u16 = 3;
pub(crate) const SORT_BUTTON_WIDTH: u16 = 11;
const GALLERY_MIN_WIDTH: u16 = 24;
const GRID_MIN_WIDTH: u16 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FrameAreas {
    pub taskbar: Rect,
    pub body: Rect,
    pub status: Rect,
}

pub(crate) fn split_frame(area: Rect) -> FrameAreas {
    let taskbar = Rect { height: area.height.min(1), ..area };
    let status = Rect {
        y: area.bottom().saturating_sub(1).max(taskbar.bottom()),
        height: area.height.saturating_sub(1).min(1),
        ..area
    };
    let body = Rect {
        y: taskbar.bottom(),
        height: status.y.saturating_sub(taskbar.bottom()),
        ..area
    };
    FrameAreas { taskbar, body, status }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PanelAreas {
    pub sort_button: Rect,
    pub filter: Rect,
    pub grid: Rect,
    pub gallery: Option<Rect>,
    pub nav: Option<Rect>,
}

/// Splits a panel's inner area into toolbar, grid, optional gallery column
/// and optional navigation row.
pub(crate) fn split_panel(inner: Rect, with_gallery: bool, with_nav: bool) -> PanelAreas {
    let toolbar_height = TOOLBAR_HEIGHT.min(inner.height);
    let sort_width = SORT_BUTTON_WIDTH.min(inner.width);
    let sort_button = Rect {
        width: sort_width,
        height: toolbar_height,
        ..inner
    };
    let filter = Rect {
        x: inner.x + sort_width + u16::from(sort_width < inner.width),
        width: inner.width.saturating_sub(sort_width + 1),
        height: toolbar_height,
        ..inner
    };

    let mut content = Rect {
        y: inner.y + toolbar_height,
        height: inner.height - toolbar_height,
        ..inner
    };
    let nav = (with_nav && content.height > 0).then(|| {
        content.height -= 1;
        Rect {
            y: content.bottom(),
            height: 1,
            ..content
        }
    });

    let gallery_width = (content.width / 5 * 2).max(GALLERY_MIN_WIDTH);
    let gallery = (with_gallery && content.width >= gallery_width + GRID_MIN_WIDTH).then(|| {
        content.width -= gallery_width;
        Rect {
            x: content.right(),
            width: gallery_width,
            ..content
        }
    });

    PanelAreas {
        sort_button,
        filter,
        grid: content,
        gallery,
        nav,
    }
}

/// Picks which slice of `len` rows to draw when only `capacity` fit, keeping
/// the row at `focus` on screen.
pub(crate) fn row_window(len: usize, focus: Option<usize>, capacity: usize) -> Range<usize> {
    if len <= capacity {
        return 0..len;
    }
    if capacity == 0 {
        return 0..0;
    }
    let start = match focus {
        Some(focus) if focus >= capacity => (focus + 1 - capacity).min(len - capacity),
        _ => 0,
    };
    start..start + capacity
}

pub(crate) fn cell_area(row_area: Rect, col: usize) -> Rect {
    let left = row_area.width / 2;
    if col == 0 {
        Rect { width: left, ..row_area }
    } else {
        Rect {
            x: row_area.x + left,
            width: row_area.width - left,
            ..row_area
        }
    }
}

/// Divides `area` into `count` stacked slots of near-equal height.
pub(crate) fn stack(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let count_u16 = u16::try_from(count).unwrap_or(u16::MAX);
    let base = area.height / count_u16;
    let extra = area.height % count_u16;
    let mut y = area.y;
    (0..count_u16)
        .map(|index| {
            let height = base + u16::from(index < extra);
            let slot = Rect { y, height, ..area };
            y += height;
            slot
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{cell_area, row_window, split_frame, split_panel, stack};
    use pretty_assertions::assert_eq;
    use ratatui::layout::Rect;

    #[test]
    fn frame_reserves_taskbar_and_status() {
        let areas = split_frame(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.taskbar, Rect::new(0, 0, 80, 1));
        assert_eq!(areas.body, Rect::new(0, 1, 80, 22));
        assert_eq!(areas.status, Rect::new(0, 23, 80, 1));

        let tiny = split_frame(Rect::new(0, 0, 10, 1));
        assert_eq!(tiny.taskbar.height, 1);
        assert_eq!(tiny.body.height, 0);
        assert_eq!(tiny.status.height, 0);
    }

    #[test]
    fn panel_split_without_extras() {
        let areas = split_panel(Rect::new(1, 2, 60, 20), false, false);
        assert_eq!(areas.sort_button, Rect::new(1, 2, 11, 3));
        assert_eq!(areas.filter, Rect::new(13, 2, 48, 3));
        assert_eq!(areas.grid, Rect::new(1, 5, 60, 17));
        assert_eq!(areas.gallery, None);
        assert_eq!(areas.nav, None);
    }

    #[test]
    fn panel_split_with_gallery_and_nav() {
        let areas = split_panel(Rect::new(0, 0, 100, 20), true, true);
        assert_eq!(areas.nav, Some(Rect::new(0, 19, 100, 1)));
        assert_eq!(areas.grid, Rect::new(0, 3, 60, 16));
        assert_eq!(areas.gallery, Some(Rect::new(60, 3, 40, 16)));

        let narrow = split_panel(Rect::new(0, 0, 40, 20), true, false);
        assert_eq!(narrow.gallery, None);
        assert_eq!(narrow.grid.width, 40);
    }

    #[test]
    fn row_window_follows_focus() {
        assert_eq!(row_window(3, Some(2), 5), 0..3);
        assert_eq!(row_window(6, None, 2), 0..2);
        assert_eq!(row_window(6, Some(1), 2), 0..2);
        assert_eq!(row_window(6, Some(4), 2), 3..5);
        assert_eq!(row_window(6, Some(5), 2), 4..6);
        assert_eq!(row_window(6, Some(9), 2), 4..6);
        assert_eq!(row_window(4, Some(1), 0), 0..0);
    }

    #[test]
    fn cells_split_row_in_half() {
        let row = Rect::new(0, 5, 41, 3);
        assert_eq!(cell_area(row, 0), Rect::new(0, 5, 20, 3));
        assert_eq!(cell_area(row, 1), Rect::new(20, 5, 21, 3));
    }

    #[test]
    fn stack_spreads_remainder_from_top() {
        let slots = stack(Rect::new(0, 0, 10, 11), 2);
        assert_eq!(slots, vec![Rect::new(0, 0, 10, 6), Rect::new(0, 6, 10, 5)]);
        assert!(stack(Rect::new(0, 0, 10, 11), 0).is_empty());
    }
}
