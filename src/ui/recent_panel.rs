use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

pub struct RecentPanel<'a> {
    pub entries: &'a [String],
    pub selected: usize,
    pub focused: bool,
    pub submitted: &'a str,
}

impl<'a> Widget for RecentPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let block = Block::default()
            .title(" Recent ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::border_color(self.focused)));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.entries.is_empty() {
            let line = Line::from(Span::styled(
                " no searches yet",
                Style::default().fg(theme::DIM_TEXT),
            ));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        }

        for (i, login) in self.entries.iter().take(inner.height as usize).enumerate() {
            let y = inner.y + i as u16;
            let is_selected = self.focused && i == self.selected;
            let is_current = login == self.submitted;

            let marker = if is_current { "\u{25b8} " } else { "  " };
            let mut style = if is_current {
                Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if is_selected {
                style = style.bg(theme::SELECTED_BG);
            }

            let label = super::truncate_with_ellipsis(login, inner.width.saturating_sub(2) as usize);
            buf.set_line(inner.x, y, &Line::from(Span::styled(format!("{marker}{label}"), style)), inner.width);
            if is_selected {
                super::fill_row(buf, inner, y, Style::default().bg(theme::SELECTED_BG));
            }
        }
    }
}
