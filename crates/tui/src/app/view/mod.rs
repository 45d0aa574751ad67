mod illustration;
mod layout;
mod text;
mod theme;

pub use illustration::IllustrationCache;

use crate::app::state::{
    grid_cell, CategoryEntry, CategoryPanel, HitMap, HitTarget, PanelFocus, StatusKind,
    StatusMessage, WindowManager, GRID_COLUMNS,
};
use crate::app::AppState;
use illustration::HalfBlockImage;
use layout::{PanelAreas, CELL_HEIGHT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

const MIN_WIDTH: u16 = 24;
const MIN_HEIGHT: u16 = 8;
const SEARCH_PLACEHOLDER: &str = "Search...";
const NAV_PREVIOUS: &str = "\u{25c0} Previous";
const NAV_NEXT: &str = "Next \u{25b6}";
const HINTS: &str = "Enter open  \u{2022}  type to search  \u{2022}  Ctrl+S sort  \u{2022}  Ctrl+Y copy link  \u{2022}  Tab switch  \u{2022}  Ctrl+\u{2190}/\u{2192} browse  \u{2022}  Esc close";

pub(crate) fn draw_ui(f: &mut Frame, app: &mut AppState) {
    let area = f.area();
    app.hit_map.clear();
    f.render_widget(Block::default().style(theme::base()), area);
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        f.render_widget(
            Paragraph::new("Terminal too small")
                .style(theme::muted())
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let areas = layout::split_frame(area);
    render_taskbar(f, &app.windows, &mut app.hit_map, areas.taskbar);
    render_panel(
        f,
        app.windows.focused(),
        &mut app.illustrations,
        &mut app.hit_map,
        areas.body,
    );
    render_status(f, app.status.as_ref(), areas.status);
}

fn render_taskbar(f: &mut Frame, windows: &WindowManager, hits: &mut HitMap, area: Rect) {
    let focused = windows.focused_id();
    let mut spans = Vec::new();
    let mut x = area.x;
    for (id, panel) in windows.windows() {
        let remaining = area.right().saturating_sub(x);
        if remaining == 0 {
            break;
        }
        let label = text::truncate_to_width(&format!(" {} ", panel.title()), remaining as usize);
        let width = text::visual_width(&label) as u16;
        hits.push(Rect::new(x, area.y, width, 1), HitTarget::Window(id));
        spans.push(Span::styled(label, theme::tab(panel.style.accent, id == focused)));
        x += width;
        if x < area.right() {
            spans.push(Span::styled(" ", theme::base()));
            x += 1;
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)).style(theme::base()), area);
}

fn render_panel(
    f: &mut Frame,
    panel: &CategoryPanel,
    illustrations: &mut IllustrationCache,
    hits: &mut HitMap,
    area: Rect,
) {
    let title = Span::styled(
        format!(" {} ", panel.title()),
        theme::base().add_modifier(Modifier::BOLD),
    );
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme::base().fg(theme::color(panel.style.accent)))
        .title(Line::from(title).centered())
        .style(theme::base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let areas = layout::split_panel(inner, !panel.illustrations.is_empty(), panel.nav.is_some());
    render_toolbar(f, panel, hits, &areas);
    render_grid(f, panel, hits, areas.grid);
    if let Some(gallery) = areas.gallery {
        render_gallery(f, panel, illustrations, gallery);
    }
    if let Some(nav) = areas.nav {
        render_nav(f, panel, hits, nav);
    }
}

fn render_toolbar(f: &mut Frame, panel: &CategoryPanel, hits: &mut HitMap, areas: &PanelAreas) {
    let accent = panel.style.accent;
    let sort = Paragraph::new(panel.sort_label())
        .alignment(Alignment::Center)
        .style(theme::cell(accent, false))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(theme::cell_border(accent, false)),
        );
    f.render_widget(sort, areas.sort_button);
    hits.push(areas.sort_button, HitTarget::SortToggle);

    let focused = panel.focus() == PanelFocus::Filter;
    let border = if focused {
        theme::base()
    } else {
        theme::muted()
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(theme::base());
    let inner = block.inner(areas.filter);
    f.render_widget(block, areas.filter);
    hits.push(areas.filter, HitTarget::Filter);

    let input = panel.filter();
    if input.is_empty() && !focused {
        f.render_widget(
            Paragraph::new(SEARCH_PLACEHOLDER).style(theme::muted()),
            inner,
        );
        return;
    }
    let (shown, cursor_col) =
        text::scroll_to_cursor(&input.buffer, input.cursor, inner.width as usize);
    f.render_widget(Paragraph::new(shown).style(theme::base()), inner);
    if focused && inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x + cursor_col as u16, inner.y));
    }
}

fn row_has_visible(panel: &CategoryPanel, row: usize) -> bool {
    (0..GRID_COLUMNS).any(|col| panel.is_visible(row * GRID_COLUMNS + col))
}

fn render_grid(f: &mut Frame, panel: &CategoryPanel, hits: &mut HitMap, area: Rect) {
    if area.width == 0 || area.height == 0 || panel.entries().is_empty() {
        return;
    }
    // Rows whose entries are all filtered out collapse; hidden cells in a
    // partly visible row stay blank so the other column keeps its place.
    let rows: Vec<usize> = (0..panel.row_count())
        .filter(|row| row_has_visible(panel, *row))
        .collect();
    if rows.is_empty() {
        f.render_widget(
            Paragraph::new("No matches")
                .style(theme::muted())
                .alignment(Alignment::Center),
            Rect { height: 1, ..area },
        );
        return;
    }

    let capacity = (area.height / CELL_HEIGHT) as usize;
    let focus_row = panel
        .selected()
        .and_then(|index| rows.iter().position(|row| *row == grid_cell(index).row));
    let window = layout::row_window(rows.len(), focus_row, capacity);
    for (slot, row) in rows[window].iter().enumerate() {
        let row_area = Rect {
            y: area.y + slot as u16 * CELL_HEIGHT,
            height: CELL_HEIGHT,
            ..area
        };
        for col in 0..GRID_COLUMNS {
            let index = row * GRID_COLUMNS + col;
            let Some(entry) = panel.entries().get(index) else {
                continue;
            };
            if !panel.is_visible(index) {
                continue;
            }
            let cell = layout::cell_area(row_area, col);
            render_cell(f, entry, panel.selected() == Some(index), cell);
            hits.push(cell, HitTarget::Entry(index));
        }
    }
}

fn render_cell(f: &mut Frame, entry: &CategoryEntry, selected: bool, area: Rect) {
    let border_type = if selected {
        BorderType::Thick
    } else {
        BorderType::Rounded
    };
    let block = Block::bordered()
        .border_type(border_type)
        .border_style(theme::cell_border(entry.accent, selected))
        .style(theme::cell(entry.accent, selected));
    let label = text::truncate_to_width(&entry.label, block.inner(area).width as usize);
    f.render_widget(
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_gallery(
    f: &mut Frame,
    panel: &CategoryPanel,
    illustrations: &mut IllustrationCache,
    area: Rect,
) {
    let slots = layout::stack(area, panel.illustrations.len());
    for (illustration, slot) in panel.illustrations.iter().zip(slots) {
        let caption = if illustration.caption.is_empty() {
            illustration.path.display().to_string()
        } else {
            illustration.caption.clone()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme::muted())
            .title(Line::from(format!(" {caption} ")).centered())
            .style(theme::base());
        let inner = block.inner(slot);
        f.render_widget(block, slot);
        let fitted = illustrations.fitted(
            &illustration.path,
            u32::from(inner.width),
            u32::from(inner.height) * 2,
        );
        match fitted {
            Some(image) => f.render_widget(
                HalfBlockImage {
                    image,
                    background: theme::BACKGROUND,
                },
                inner,
            ),
            None => f.render_widget(
                Paragraph::new("image unavailable")
                    .style(theme::muted())
                    .alignment(Alignment::Center),
                Rect {
                    y: inner.y + inner.height / 2,
                    height: inner.height.min(1),
                    ..inner
                },
            ),
        }
    }
}

fn render_nav(f: &mut Frame, panel: &CategoryPanel, hits: &mut HitMap, area: Rect) {
    let style = theme::base()
        .fg(theme::color(panel.style.accent))
        .add_modifier(Modifier::BOLD);
    let previous_width = (text::visual_width(NAV_PREVIOUS) as u16).min(area.width);
    let previous = Rect {
        width: previous_width,
        ..area
    };
    let next_width =
        (text::visual_width(NAV_NEXT) as u16).min(area.width.saturating_sub(previous_width));
    let next = Rect {
        x: area.right() - next_width,
        width: next_width,
        ..area
    };
    f.render_widget(Paragraph::new(NAV_PREVIOUS).style(style), previous);
    f.render_widget(Paragraph::new(NAV_NEXT).style(style), next);
    hits.push(previous, HitTarget::NavPrevious);
    hits.push(next, HitTarget::NavNext);
}

fn render_status(f: &mut Frame, status: Option<&StatusMessage>, area: Rect) {
    let (message, style) = match status {
        Some(StatusMessage {
            kind: StatusKind::Error,
            text,
        }) => (text.as_str(), theme::base().fg(theme::ERROR)),
        Some(StatusMessage { text, .. }) => (text.as_str(), theme::base()),
        None => (HINTS, theme::muted()),
    };
    let line = text::truncate_to_width(message, area.width as usize);
    f.render_widget(Paragraph::new(line).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::draw_ui;
    use crate::app::handlers::{handle_key, handle_mouse};
    use crate::app::state::{HitTarget, StatusKind};
    use crate::app::test_support::builtin_app;
    use crate::app::AppState;
    use crate::catalog::PanelId;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &mut AppState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|f| draw_ui(f, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|cells| cells.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    fn screen_contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|line| line.contains(needle))
    }

    fn click_target(app: &mut AppState, target: HitTarget) {
        let area = app.hit_map.area_of(target).expect("target drawn");
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + area.width / 2,
            row: area.y + area.height / 2,
            modifiers: KeyModifiers::NONE,
        };
        assert!(handle_mouse(app, click));
    }

    #[test]
    fn root_panel_draws_toolbar_grid_and_taskbar() {
        let (mut app, _, _) = builtin_app();
        let lines = render(&mut app, 80, 24);
        assert!(lines[0].contains(" Main Menu "));
        for label in [
            "Study Guides",
            "School Resources",
            "Miscellaneous Info",
            "Health Check-Up",
            "A - Z",
            "Search...",
        ] {
            assert!(screen_contains(&lines, label), "missing {label}");
        }
        assert!(lines[23].contains("Enter open"));
        assert!(app.hit_map.area_of(HitTarget::NavNext).is_none());
    }

    #[test]
    fn filtered_rows_collapse() {
        let (mut app, _, _) = builtin_app();
        for ch in "health".chars() {
            handle_key(&mut app, KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        let lines = render(&mut app, 80, 24);
        assert!(screen_contains(&lines, "Health Check-Up"));
        assert!(!screen_contains(&lines, "Study Guides"));
        assert!(screen_contains(&lines, "health"));
        // The remaining entry moves up into the first grid row.
        let first = app.hit_map.area_of(HitTarget::Entry(3)).expect("drawn");
        let toolbar = app.hit_map.area_of(HitTarget::SortToggle).expect("drawn");
        assert_eq!(first.y, toolbar.bottom());
        assert!(app.hit_map.area_of(HitTarget::Entry(0)).is_none());
    }

    #[test]
    fn no_matches_message() {
        let (mut app, _, _) = builtin_app();
        app.focused_panel_mut().on_filter_changed("zzz");
        let lines = render(&mut app, 80, 24);
        assert!(screen_contains(&lines, "No matches"));
    }

    #[test]
    fn clicking_drawn_cell_opens_panel() {
        let (mut app, _, _) = builtin_app();
        render(&mut app, 80, 24);
        click_target(&mut app, HitTarget::Entry(3));
        assert_eq!(app.focused_panel().title(), "Health Check-Up");

        let lines = render(&mut app, 80, 24);
        assert!(lines[0].contains(" Main Menu "));
        assert!(lines[0].contains(" Health Check-Up "));
        assert!(screen_contains(&lines, "Previous"));
        assert!(screen_contains(&lines, "Next"));
    }

    #[test]
    fn clicking_sort_button_relabels_it() {
        let (mut app, _, _) = builtin_app();
        render(&mut app, 80, 24);
        click_target(&mut app, HitTarget::SortToggle);
        let lines = render(&mut app, 80, 24);
        assert!(screen_contains(&lines, "Z - A"));
    }

    #[test]
    fn nav_buttons_move_around_the_ring() {
        let (mut app, _, _) = builtin_app();
        app.open_panel(&PanelId::new("school-resources"));
        render(&mut app, 80, 24);
        click_target(&mut app, HitTarget::NavPrevious);
        assert_eq!(app.focused_panel().title(), "Study Guides");
        assert_eq!(app.windows.open_count(), 1);
    }

    #[test]
    fn missing_illustrations_draw_placeholders() {
        let (mut app, _, _) = builtin_app();
        app.open_panel(&PanelId::new("revision-techniques"));
        let lines = render(&mut app, 100, 30);
        assert!(screen_contains(&lines, "Stressed student"));
        assert!(screen_contains(&lines, "Happy student"));
        assert!(screen_contains(&lines, "image unavailable"));
        assert!(screen_contains(&lines, "UK nidirect"));
    }

    #[test]
    fn status_message_replaces_hints() {
        let (mut app, _, _) = builtin_app();
        app.set_status(StatusKind::Error, "clipboard unavailable: no display");
        let lines = render(&mut app, 80, 24);
        assert!(lines[23].starts_with("clipboard unavailable"));
    }

    #[test]
    fn tiny_terminal_shows_notice() {
        let (mut app, _, _) = builtin_app();
        let lines = render(&mut app, 20, 5);
        assert!(screen_contains(&lines, "Terminal too small"));
        assert!(app.hit_map.hit(0, 0).is_none());
    }
}
