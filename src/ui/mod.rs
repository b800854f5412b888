pub mod dropdown;
pub mod header_bar;
pub mod help_panel;
pub mod input;
pub mod recent_panel;
pub mod search_bar;
pub mod status_bar;
pub mod theme;
pub mod toast;
pub mod user_card;

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::UnicodeWidthStr;

pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    if max <= 1 {
        return "\u{2026}".to_string();
    }
    let mut result = String::new();
    let mut w = 0;
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if w + cw > max - 1 {
            break;
        }
        result.push(ch);
        w += cw;
    }
    result.push('\u{2026}');
    result
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vert = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Min(0),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Min(0),
    ])
    .split(vert[1])[1]
}

/// Paints `style` across a full row of `area`.
pub fn fill_row(buf: &mut ratatui::buffer::Buffer, area: Rect, y: u16, style: ratatui::style::Style) {
    for x in area.x..area.right() {
        buf[(x, y)].set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_with_ellipsis("octocat", 10), "octocat");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_with_ellipsis("octocat", 4), "oct\u{2026}");
        assert_eq!(truncate_with_ellipsis("octocat", 1), "\u{2026}");
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(50, 60, area);
        assert!(r.x >= area.x && r.right() <= area.right());
        assert!(r.y >= area.y && r.bottom() <= area.bottom());
        assert_eq!(r.width, 50);
    }
}
