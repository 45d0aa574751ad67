use unicode_width::UnicodeWidthChar;

pub(crate) fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0).max(1)
}

pub(crate) fn visual_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

pub(crate) fn truncate_to_width(text: &str, width: usize) -> String {
    if visual_width(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return ".".repeat(width);
    }

    let target = width - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = char_width(ch);
        if used + w > target {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Returns the characters of `chars` to show in a field `width` columns wide
/// so that `cursor` stays on screen, and the cursor's column within them.
pub(crate) fn scroll_to_cursor(chars: &[char], cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let cursor = cursor.min(chars.len());
    let mut start = 0;
    let mut before: usize = chars[..cursor].iter().copied().map(char_width).sum();
    // Keep one column free for the cursor itself.
    while before >= width && start < cursor {
        before -= char_width(chars[start]);
        start += 1;
    }
    let mut shown = String::new();
    let mut used = 0;
    for ch in &chars[start..] {
        let w = char_width(*ch);
        if used + w > width {
            break;
        }
        shown.push(*ch);
        used += w;
    }
    (shown, before)
}
