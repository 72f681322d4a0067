//! # TitleBar Component
//!
//! Top status bar. Stateless: it receives everything as props.
//!
//! ## Conditional Formatting
//!
//! 1. **Jobs running**: `"Postpilot (post: p1) | 2 running | Summarize Thread requested"`
//! 2. **Status only**: `"Postpilot (post: p1) | Viewing chan-7"`
//! 3. **Default**: `"Postpilot (post: p1)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar<'a> {
    pub target: &'a str,
    pub status_message: &'a str,
    pub in_flight: usize,
}

impl TitleBar<'_> {
    fn text(&self) -> String {
        let mut text = format!("Postpilot (post: {})", self.target);
        if self.in_flight > 0 {
            text.push_str(&format!(" | {} running", self.in_flight));
        }
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(self.status_message);
        }
        text
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_text() {
        let bar = TitleBar {
            target: "p1",
            status_message: "",
            in_flight: 0,
        };
        assert_eq!(bar.text(), "Postpilot (post: p1)");
    }

    #[test]
    fn test_running_count_precedes_status() {
        let bar = TitleBar {
            target: "p1",
            status_message: "Summarize Thread requested",
            in_flight: 2,
        };
        assert_eq!(
            bar.text(),
            "Postpilot (post: p1) | 2 running | Summarize Thread requested"
        );
    }
}
