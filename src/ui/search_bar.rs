use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

const PLACEHOLDER: &str = "enter github username";

pub struct SearchBar<'a> {
    pub draft: &'a str,
    pub focused: bool,
    /// Settled text a suggestion query is currently running for.
    pub pending_query: Option<&'a str>,
}

impl<'a> Widget for SearchBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let title = match self.pending_query {
            Some(q) => format!(" Search \u{00b7} {q}\u{2026} "),
            None => " Search ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::border_color(self.focused)));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 2 || inner.height == 0 {
            return;
        }

        let width = inner.width as usize - 1;
        let line = if self.draft.is_empty() && !self.focused {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(theme::DIM_TEXT).add_modifier(Modifier::ITALIC),
            ))
        } else {
            // keep the tail visible when the draft outgrows the box
            let mut shown = self.draft;
            while UnicodeWidthStr::width(shown) > width {
                let mut chars = shown.chars();
                chars.next();
                shown = chars.as_str();
            }
            let mut spans = vec![Span::raw(shown.to_string())];
            if self.focused {
                spans.push(Span::styled("\u{258c}", Style::default().fg(theme::FILTER_COLOR)));
            }
            Line::from(spans)
        };
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}
