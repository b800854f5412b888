use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

pub struct HeaderBar {
    pub authenticated: bool,
}

impl Widget for HeaderBar {
    fn render(self, area: Rect, buf: &mut Buf) {
        super::fill_row(buf, area, area.y, Style::default().bg(theme::HEADER_BG));

        let auth = if self.authenticated {
            Span::styled("token", Style::default().fg(theme::FOLLOW_COLOR).bg(theme::HEADER_BG))
        } else {
            Span::styled(
                "anonymous (follow disabled)",
                Style::default().fg(theme::DIM_TEXT).bg(theme::HEADER_BG),
            )
        };

        let left = Line::from(vec![
            Span::styled(
                " ghseek",
                Style::default()
                    .fg(theme::ACCENT)
                    .bg(theme::HEADER_BG)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " \u{2503} ",
                Style::default().fg(theme::SEPARATOR).bg(theme::HEADER_BG),
            ),
            auth,
        ]);
        buf.set_line(area.x, area.y, &left, area.width);

        let right = "? help ";
        let right_w = UnicodeWidthStr::width(right);
        let area_w = area.width as usize;
        let left_w = left.width();
        if area_w > right_w + left_w {
            let right_x = area.x + (area_w - right_w) as u16;
            let span = Span::styled(right, Style::default().fg(theme::DIM_TEXT).bg(theme::HEADER_BG));
            buf.set_line(right_x, area.y, &Line::from(span), right_w as u16);
        }
    }
}
