//! # Navigation Panel
//!
//! Shows where the user has been taken: the channel in the viewport, the
//! current selection record, and the jobs started from the menu.

use chrono::{DateTime, Local, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::core::navigation::SelectionRecord;
use crate::core::state::{ActivityEntry, ActivityStatus};
use crate::tui::component::Component;

pub struct NavigationPanel<'a> {
    pub active_channel: Option<&'a str>,
    pub selection: Option<SelectionRecord>,
    pub activity: &'a [ActivityEntry],
}

fn format_selection_time(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn status_span(status: &ActivityStatus) -> Span<'static> {
    match status {
        ActivityStatus::Sent => Span::styled("sent", Style::default().fg(Color::DarkGray)),
        ActivityStatus::Running => Span::styled("running", Style::default().fg(Color::Yellow)),
        ActivityStatus::Done => Span::styled("done", Style::default().fg(Color::Green)),
        ActivityStatus::Failed(reason) => {
            Span::styled(format!("failed: {reason}"), Style::default().fg(Color::Red))
        }
    }
}

impl NavigationPanel<'_> {
    fn viewport_lines(&self) -> Vec<Line<'static>> {
        let label = Style::default().add_modifier(Modifier::BOLD);
        let channel = self.active_channel.unwrap_or("(none)").to_string();
        let mut lines = vec![Line::from(vec![
            Span::styled("Channel   ", label),
            Span::raw(channel),
        ])];
        match &self.selection {
            Some(sel) => {
                lines.push(Line::from(vec![
                    Span::styled("Selected  ", label),
                    Span::raw(format!("{} in {}", sel.message_id, sel.channel_id)),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("At        ", label),
                    Span::raw(format_selection_time(sel.timestamp)),
                ]));
            }
            None => lines.push(Line::from(vec![
                Span::styled("Selected  ", label),
                Span::raw("(nothing)"),
            ])),
        }
        lines
    }
}

impl Component for NavigationPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [viewport_area, activity_area] =
            Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(area);

        let viewport = Paragraph::new(self.viewport_lines())
            .block(Block::default().borders(Borders::ALL).title(" Viewport "));
        frame.render_widget(viewport, viewport_area);

        // Newest first
        let items: Vec<ListItem> = self
            .activity
            .iter()
            .rev()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        entry.started_at.format("%H:%M:%S  ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!("{:<26}", entry.action.label())),
                    status_span(&entry.status),
                ]))
            })
            .collect();
        let activity = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Activity "));
        frame.render_widget(activity, activity_area);
    }
}
