use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

pub struct Dropdown<'a> {
    pub suggestions: &'a [String],
    pub highlighted: Option<usize>,
}

impl<'a> Dropdown<'a> {
    /// Area directly under `anchor`, sized to the suggestions and clipped to
    /// `bounds`.
    pub fn area(&self, anchor: Rect, bounds: Rect) -> Rect {
        let wanted = self.suggestions.len() as u16 + 2;
        let y = anchor.bottom();
        let height = wanted.min(bounds.bottom().saturating_sub(y));
        Rect::new(anchor.x, y, anchor.width, height)
    }
}

impl<'a> Widget for Dropdown<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        if area.height < 3 || area.width < 4 {
            return;
        }
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACTIVE_BORDER));
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, login) in self.suggestions.iter().take(inner.height as usize).enumerate() {
            let y = inner.y + i as u16;
            let selected = self.highlighted == Some(i);
            let style = if selected {
                Style::default()
                    .fg(theme::FILTER_COLOR)
                    .bg(theme::SELECTED_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let label = super::truncate_with_ellipsis(login, inner.width.saturating_sub(1) as usize);
            buf.set_line(inner.x, y, &Line::from(Span::styled(format!(" {label}"), style)), inner.width);
            if selected {
                super::fill_row(buf, inner, y, Style::default().bg(theme::SELECTED_BG));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_sits_under_anchor_and_clips() {
        let suggestions: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let dropdown = Dropdown {
            suggestions: &suggestions,
            highlighted: None,
        };
        let anchor = Rect::new(0, 1, 40, 3);

        let area = dropdown.area(anchor, Rect::new(0, 0, 40, 30));
        assert_eq!(area, Rect::new(0, 4, 40, 5));

        let clipped = dropdown.area(anchor, Rect::new(0, 0, 40, 6));
        assert_eq!(clipped.height, 2);
    }
}
