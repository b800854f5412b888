use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Error,
    Warn,
    Info,
}

impl NotifyLevel {
    pub fn ttl(&self) -> Duration {
        match self {
            NotifyLevel::Error => Duration::from_secs(8),
            NotifyLevel::Warn => Duration::from_secs(6),
            NotifyLevel::Info => Duration::from_secs(4),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            NotifyLevel::Error => theme::ERROR_FG,
            NotifyLevel::Warn => theme::WARN_FG,
            NotifyLevel::Info => theme::INFO_FG,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
    pub created: Instant,
}

impl Notification {
    pub fn new(level: NotifyLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= self.level.ttl()
    }
}

pub struct Toast<'a> {
    pub notification: &'a Notification,
    /// Rows from the bottom edge, so several toasts stack upward.
    pub offset: u16,
}

impl<'a> Widget for Toast<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let first_line = self.notification.message.lines().next().unwrap_or("");
        let text_w = UnicodeWidthStr::width(first_line);
        let box_w = text_w.saturating_add(4).min(area.width as usize) as u16;
        let box_h: u16 = 3;

        let needed_h = box_h.saturating_add(1).saturating_add(self.offset);
        if area.width < box_w || area.height < needed_h {
            return;
        }

        let x = area.right().saturating_sub(box_w.saturating_add(1));
        let y = area.bottom().saturating_sub(needed_h);
        let toast_area = Rect::new(x, y, box_w, box_h);

        Clear.render(toast_area, buf);

        let color = self.notification.level.color();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let inner = block.inner(toast_area);
        block.render(toast_area, buf);

        if inner.width == 0 {
            return;
        }

        let truncated = super::truncate_with_ellipsis(first_line, inner.width as usize);
        let line = Line::from(Span::styled(truncated, Style::default().fg(color)));
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}
