use crate::ui::input::Focus;
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileStatus<'a> {
    Empty,
    Loading(&'a str),
    Failed(&'a str),
    Shown(&'a str),
}

pub struct StatusBar<'a> {
    pub profile: ProfileStatus<'a>,
    pub focus: Focus,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::STATUS_BG);
        super::fill_row(buf, area, area.y, bg);

        let sep = Span::styled(
            "\u{2502}",
            Style::default().fg(theme::BORDER_COLOR).bg(theme::STATUS_BG),
        );

        let mut spans = vec![Span::styled(" ", bg)];
        match self.profile {
            ProfileStatus::Empty => {
                spans.push(Span::styled("type a login and press Enter ", bg.fg(theme::DIM_TEXT)));
            }
            ProfileStatus::Loading(login) => {
                spans.push(Span::styled(format!("Loading {login}\u{2026} "), bg));
            }
            ProfileStatus::Failed(msg) => {
                spans.push(Span::styled(format!("{msg} "), bg.fg(theme::ERROR_FG)));
            }
            ProfileStatus::Shown(login) => {
                spans.push(Span::styled(format!("@{login} "), bg.fg(theme::ACCENT)));
            }
        }

        spans.push(sep);
        let hints = match self.focus {
            Focus::Search => " Enter search  \u{2191}/\u{2193} suggestions  Tab focus  Esc close",
            Focus::Recent => " Enter open  j/k move  / search  q quit",
            Focus::Card => " f follow  o open  r refresh  / search  q quit",
        };
        spans.push(Span::styled(hints, bg.fg(theme::DIM_TEXT)));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
