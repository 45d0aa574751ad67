use crate::app::state::HitTarget;
use crate::app::{AppState, NavDirection};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Routes a left click through the regions recorded by the last draw.
pub(crate) fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> bool {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return false;
    }
    let Some(target) = app.hit_map.hit(mouse.column, mouse.row) else {
        return false;
    };
    match target {
        HitTarget::Entry(index) => {
            let window = app.windows.focused_id();
            let panel = app.focused_panel_mut();
            panel.focus_grid();
            panel.select(index);
            app.activate_entry(window, index);
        }
        HitTarget::SortToggle => app.focused_panel_mut().on_sort_toggle(),
        HitTarget::Filter => app.focused_panel_mut().focus_filter(),
        HitTarget::NavPrevious => app.navigate(NavDirection::Previous),
        HitTarget::NavNext => app.navigate(NavDirection::Next),
        HitTarget::Window(id) => {
            app.windows.focus(id);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::handle_mouse;
    use crate::app::state::{HitTarget, PanelFocus, ROOT_WINDOW};
    use crate::app::test_support::builtin_app;
    use crate::catalog::PanelId;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use pretty_assertions::assert_eq;
    use ratatui::layout::Rect;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn clicking_entry_activates_it() {
        let (mut app, _, _) = builtin_app();
        app.hit_map.push(Rect::new(0, 0, 10, 3), HitTarget::Entry(1));
        assert!(handle_mouse(&mut app, click(4, 1)));
        assert_eq!(app.focused_panel().title(), "School Resources");
        assert_eq!(app.windows.get(ROOT_WINDOW).and_then(|p| p.selected()), Some(1));
    }

    #[test]
    fn clicking_toolbar_targets() {
        let (mut app, _, _) = builtin_app();
        app.hit_map.push(Rect::new(0, 0, 8, 1), HitTarget::SortToggle);
        app.hit_map.push(Rect::new(10, 0, 20, 1), HitTarget::Filter);

        handle_mouse(&mut app, click(1, 0));
        assert!(!app.focused_panel().sort_ascending());
        handle_mouse(&mut app, click(12, 0));
        assert_eq!(app.focused_panel().focus(), PanelFocus::Filter);
    }

    #[test]
    fn clicking_nav_and_taskbar() {
        let (mut app, _, _) = builtin_app();
        app.open_panel(&PanelId::new("misc-info"));
        app.hit_map.push(Rect::new(0, 0, 3, 1), HitTarget::NavNext);
        app.hit_map.push(Rect::new(0, 5, 6, 1), HitTarget::Window(ROOT_WINDOW));

        handle_mouse(&mut app, click(1, 0));
        assert_eq!(app.focused_panel().title(), "Health Check-Up");
        handle_mouse(&mut app, click(2, 5));
        assert_eq!(app.windows.focused_id(), ROOT_WINDOW);
    }

    #[test]
    fn ignores_misses_and_other_buttons() {
        let (mut app, _, _) = builtin_app();
        app.hit_map.push(Rect::new(0, 0, 8, 1), HitTarget::SortToggle);
        assert!(!handle_mouse(&mut app, click(30, 30)));
        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..click(1, 0)
        };
        assert!(!handle_mouse(&mut app, right));
        assert!(app.focused_panel().sort_ascending());
    }
}
