use crate::catalog::Rgb;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BACKGROUND: Color = Color::Rgb(0x12, 0x12, 0x12);
pub(crate) const FOREGROUND: Color = Color::Rgb(0xf8, 0xf9, 0xfa);
pub(crate) const MUTED: Color = Color::Rgb(0x8d, 0x93, 0x9a);
pub(crate) const ERROR: Color = Color::Rgb(0xf2, 0x5c, 0x54);

pub(crate) fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

pub(crate) fn base() -> Style {
    Style::default().fg(FOREGROUND).bg(BACKGROUND)
}

pub(crate) fn muted() -> Style {
    base().fg(MUTED)
}

pub(crate) fn cell(accent: Rgb, selected: bool) -> Style {
    let style = Style::default().fg(FOREGROUND).bg(color(accent));
    if selected {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub(crate) fn cell_border(accent: Rgb, selected: bool) -> Style {
    if selected {
        cell(accent, true).fg(FOREGROUND)
    } else {
        cell(accent, false).fg(color(accent))
    }
}

pub(crate) fn tab(accent: Rgb, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(FOREGROUND)
            .bg(color(accent))
            .add_modifier(Modifier::BOLD)
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::{cell_border, color, FOREGROUND};
    use crate::catalog::Rgb;
    use ratatui::style::Color;

    #[test]
    fn accent_maps_to_truecolor() {
        assert_eq!(color(Rgb::new(0x48, 0x95, 0xEF)), Color::Rgb(0x48, 0x95, 0xEF));
    }

    #[test]
    fn selected_border_stands_out_from_accent() {
        let accent = Rgb::new(0x48, 0x0C, 0xA8);
        assert_eq!(cell_border(accent, true).fg, Some(FOREGROUND));
        assert_eq!(cell_border(accent, false).fg, Some(color(accent)));
    }
}
