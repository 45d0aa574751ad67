use crate::app::state::{MoveDirection, PanelFocus};
use crate::app::{AppState, NavDirection};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies one key press. Returns whether the screen needs a redraw.
pub(crate) fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if let Some(needs_redraw) = handle_global_key(app, key) {
        return needs_redraw;
    }
    match app.focused_panel().focus() {
        PanelFocus::Filter => handle_filter_key(app, key),
        PanelFocus::Grid => handle_grid_key(app, key),
    }
}

fn handle_global_key(app: &mut AppState, key: KeyEvent) -> Option<bool> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => app.shutdown(),
        KeyCode::Char('s') if ctrl => app.focused_panel_mut().on_sort_toggle(),
        KeyCode::F(2) => app.focused_panel_mut().on_sort_toggle(),
        KeyCode::Char('y') if ctrl => app.copy_selected_link(),
        KeyCode::Left if ctrl => app.navigate(NavDirection::Previous),
        KeyCode::Right if ctrl => app.navigate(NavDirection::Next),
        KeyCode::Tab => app.windows.cycle_focus(true),
        KeyCode::BackTab => app.windows.cycle_focus(false),
        _ => return None,
    }
    Some(true)
}

fn handle_filter_key(app: &mut AppState, key: KeyEvent) -> bool {
    let panel = app.focused_panel_mut();
    match key.code {
        KeyCode::Esc => {
            panel.clear_filter();
            panel.focus_grid();
        }
        KeyCode::Enter => {
            panel.focus_grid();
            app.activate_selected();
        }
        KeyCode::Up | KeyCode::Down => panel.focus_grid(),
        KeyCode::Backspace => panel.edit_filter(|input| input.backspace()),
        KeyCode::Delete => panel.edit_filter(|input| input.delete()),
        KeyCode::Left => panel.edit_filter(|input| input.move_left()),
        KeyCode::Right => panel.edit_filter(|input| input.move_right()),
        KeyCode::Home => panel.edit_filter(|input| input.move_home()),
        KeyCode::End => panel.edit_filter(|input| input.move_end()),
        KeyCode::Char(ch) if !has_command_modifier(key.modifiers) => {
            panel.edit_filter(|input| input.insert_char(ch));
        }
        _ => return false,
    }
    true
}

fn handle_grid_key(app: &mut AppState, key: KeyEvent) -> bool {
    let panel = app.focused_panel_mut();
    match key.code {
        KeyCode::Up => panel.move_selection(MoveDirection::Up),
        KeyCode::Down => panel.move_selection(MoveDirection::Down),
        KeyCode::Left => panel.move_selection(MoveDirection::Left),
        KeyCode::Right => panel.move_selection(MoveDirection::Right),
        KeyCode::Enter => app.activate_selected(),
        KeyCode::Esc if !panel.filter().is_empty() => panel.clear_filter(),
        KeyCode::Esc => app.close_focused(),
        KeyCode::Char(ch) if !has_command_modifier(key.modifiers) => {
            return panel.on_any_key(ch);
        }
        _ => return false,
    }
    true
}

/// Pasted text always lands in the search field, minus any control characters.
pub(crate) fn handle_paste(app: &mut AppState, text: &str) -> bool {
    let panel = app.focused_panel_mut();
    panel.focus_filter();
    panel.edit_filter(|input| {
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            input.insert_char(ch);
        }
    });
    true
}

// AltGr arrives as Ctrl+Alt on Windows, so only one of the two on its own marks a shortcut.
fn has_command_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) != modifiers.contains(KeyModifiers::ALT)
}
