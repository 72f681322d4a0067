//! # Post Menu Component
//!
//! The "AI Actions" overlay attached to the target post. Opened with `.` or
//! Enter, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PostMenuState` lives in `TuiState` while the menu is open
//! - `PostMenu` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::core::model::PostAction;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

const MENU_WIDTH: u16 = 40;

/// Persistent state for the post menu overlay.
pub struct PostMenuState {
    pub entries: Vec<PostAction>,
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for PostMenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl PostMenuState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            entries: PostAction::ALL.to_vec(),
            selected: 0,
            list_state,
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }
}

/// Events emitted by the post menu.
#[derive(Debug, PartialEq, Eq)]
pub enum MenuEvent {
    Invoke(PostAction),
    Dismiss,
}

impl EventHandler for PostMenuState {
    type Event = MenuEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<MenuEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::OpenMenu => Some(MenuEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                let last = self.entries.len().saturating_sub(1);
                self.select((self.selected + 1).min(last));
                None
            }
            TuiEvent::Submit => self.entries.get(self.selected).copied().map(MenuEvent::Invoke),
            TuiEvent::InputChar(c) => PostAction::from_shortcut(*c)
                .filter(|action| self.entries.contains(action))
                .map(MenuEvent::Invoke),
            _ => None,
        }
    }
}

/// Transient render wrapper for the post menu overlay.
pub struct PostMenu<'a> {
    state: &'a mut PostMenuState,
    target: &'a str,
}

impl<'a> PostMenu<'a> {
    pub fn new(state: &'a mut PostMenuState, target: &'a str) -> Self {
        Self { state, target }
    }
}

impl Component for PostMenu<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // borders + one row per entry
        let height = self.state.entries.len() as u16 + 2;
        let overlay = centered_rect(MENU_WIDTH, height, area);

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" AI Actions ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(format!(" {} ", self.target)).right_aligned())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", action.shortcut()),
                        if i == self.state.selected {
                            style
                        } else {
                            Style::default().fg(Color::Yellow)
                        },
                    ),
                    Span::styled(action.label(), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}
