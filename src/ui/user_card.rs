use crate::follow::FollowToggle;
use crate::github::types::GithubUser;
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

const BIO_MAX_LINES: u16 = 4;

pub struct UserCard<'a> {
    pub user: &'a GithubUser,
    pub toggle: Option<&'a FollowToggle>,
    pub refreshing: bool,
    pub focused: bool,
}

impl<'a> Widget for UserCard<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let title = if self.refreshing { " Profile \u{2026} " } else { " Profile " };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::border_color(self.focused)));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 || inner.width < 10 {
            return;
        }

        let x = inner.x + 1;
        let w = inner.width.saturating_sub(2);
        let bottom = inner.bottom();
        let label_style = Style::default().fg(theme::ACCENT);
        let mut y = inner.y;

        let heading = Line::from(vec![
            Span::styled(
                self.user.display_name().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  @{}", self.user.login),
                Style::default().fg(theme::DIM_TEXT),
            ),
        ]);
        buf.set_line(x, y, &heading, w);
        y += 1;

        if let Some(bio) = self.user.bio.as_deref().filter(|b| !b.trim().is_empty()) {
            y += 1;
            let h = BIO_MAX_LINES.min(bottom.saturating_sub(y));
            if h > 0 {
                Paragraph::new(bio.trim())
                    .wrap(Wrap { trim: true })
                    .render(Rect::new(x, y, w, h), buf);
                y += h;
            }
        }

        if y < bottom {
            y += 1;
        }
        let mut stats = Vec::new();
        if let Some(n) = self.user.public_repos {
            stats.push(Span::styled("repos ", label_style));
            stats.push(Span::raw(format!("{n}  ")));
        }
        if let Some(n) = self.user.followers {
            stats.push(Span::styled("followers ", label_style));
            stats.push(Span::raw(format!("{n}  ")));
        }
        if let Some(n) = self.user.following {
            stats.push(Span::styled("following ", label_style));
            stats.push(Span::raw(format!("{n}")));
        }
        if !stats.is_empty() && y < bottom {
            buf.set_line(x, y, &Line::from(stats), w);
            y += 1;
        }

        if let Some(joined) = self.user.created_at {
            if y < bottom {
                let line = Line::from(vec![
                    Span::styled("joined ", label_style),
                    Span::raw(joined.format("%b %Y").to_string()),
                ]);
                buf.set_line(x, y, &line, w);
                y += 1;
            }
        }

        if y < bottom {
            y += 1;
        }
        if y < bottom {
            buf.set_line(x, y, &self.follow_line(), w);
            y += 1;
        }
        if y < bottom {
            let link = Line::from(vec![
                Span::styled("[o] ", Style::default().fg(theme::DIM_TEXT)),
                Span::styled(
                    self.user.html_url.clone(),
                    Style::default()
                        .fg(theme::LINK_COLOR)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]);
            buf.set_line(x, y, &link, w);
        }
    }
}

impl<'a> UserCard<'a> {
    fn follow_line(&self) -> Line<'static> {
        let Some(toggle) = self.toggle else {
            return Line::from(Span::styled(
                "[f] Follow User",
                Style::default().fg(theme::DIM_TEXT),
            ));
        };

        let following = toggle.is_following();
        let (icon, color) = if following {
            ("\u{2212}", theme::FOLLOWING_COLOR)
        } else {
            ("+", theme::FOLLOW_COLOR)
        };
        let button = format!("[f] {icon} {}", toggle.label());

        let mut spans = Vec::new();
        if toggle.state().is_pending() {
            spans.push(Span::styled(
                button,
                Style::default().fg(theme::DIM_TEXT).add_modifier(Modifier::DIM),
            ));
            spans.push(Span::styled("  working\u{2026}", Style::default().fg(theme::DIM_TEXT)));
        } else {
            spans.push(Span::styled(
                button,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(err) = toggle.status_error() {
            spans.push(Span::styled(
                format!("  ({err})"),
                Style::default().fg(theme::ERROR_FG),
            ));
        }
        Line::from(spans)
    }
}
