//! Layout helpers shared by the overlay components.

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

/// A rect of fixed size centered in `outer`, shrunk to fit.
pub fn centered_fixed(width: u16, height: u16, outer: Rect) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect::new(
        outer.x + (outer.width - width) / 2,
        outer.y + (outer.height - height) / 2,
        width,
        height,
    )
}

/// Truncate to `max_width` display columns, ending with "..." when cut.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_strings() {
        assert_eq!(truncate_str("lease.pdf", 20), "lease.pdf");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_str("a-very-long-name.pdf", 10), "a-very-...");
    }

    #[test]
    fn truncate_counts_display_width() {
        // Each CJK char is two columns wide
        assert_eq!(truncate_str("契約書類一覧.pdf", 9), "契約書...");
    }

    #[test]
    fn truncate_tiny_width() {
        assert_eq!(truncate_str("abcdef", 2), "..");
    }

    #[test]
    fn centered_rect_is_inside_outer() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 20);
    }

    #[test]
    fn centered_fixed_shrinks_to_fit() {
        let outer = Rect::new(0, 0, 30, 10);
        let inner = centered_fixed(50, 5, outer);
        assert_eq!(inner, Rect::new(0, 2, 30, 5));
    }
}
