//! Toast stack for dispatcher notices, drawn in the top-right corner.

use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::notify::NoticeLevel;
use crate::core::state::PostedNotice;
use crate::tui::component::Component;

const TOAST_WIDTH: u16 = 44;
const MAX_VISIBLE: usize = 3;

pub struct Toasts<'a> {
    pub notices: &'a VecDeque<PostedNotice>,
}

fn level_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}

/// Truncate to `max_width` display columns, adding "..." if needed.
fn truncate_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + c.to_string().width() + 3 > max_width {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}

impl Component for Toasts<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let inner_width = width.saturating_sub(2) as usize;
        let mut y = area.y;

        // Newest first
        for posted in self.notices.iter().rev().take(MAX_VISIBLE) {
            let notice = &posted.notice;
            let mut lines = vec![Line::from(truncate_width(&notice.title, inner_width))];
            if let Some(message) = &notice.message {
                lines.push(Line::from(truncate_width(message, inner_width)));
            }
            let height = lines.len() as u16 + 2;
            if y + height > area.y + area.height {
                break;
            }

            let toast_area = Rect::new(area.x + area.width - width, y, width, height);
            let color = level_color(notice.level);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", notice.level.label()));

            frame.render_widget(Clear, toast_area);
            frame.render_widget(Paragraph::new(lines).block(block), toast_area);
            y += height;
        }
    }
}
