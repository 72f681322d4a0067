use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    ForceQuit,

    // TUI-local events (handled directly in TUI)
    OpenMenu,
    CursorUp,
    CursorDown,
    Submit,
    Escape,
    DismissNotice,
    InputChar(char),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            map_key(key_event.modifiers, key_event.code)
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Char('.')) => Some(TuiEvent::OpenMenu),
        (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
        (_, KeyCode::Char('x')) => Some(TuiEvent::DismissNotice),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_force_quits() {
        assert_eq!(
            map_key(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(TuiEvent::ForceQuit)
        );
    }

    #[test]
    fn test_period_opens_menu() {
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::Char('.')), Some(TuiEvent::OpenMenu));
    }

    #[test]
    fn test_shortcut_letters_pass_through() {
        assert_eq!(
            map_key(KeyModifiers::NONE, KeyCode::Char('s')),
            Some(TuiEvent::InputChar('s'))
        );
    }

    #[test]
    fn test_vim_and_arrow_navigation() {
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::Up), Some(TuiEvent::CursorUp));
        assert_eq!(map_key(KeyModifiers::NONE, KeyCode::Char('j')), Some(TuiEvent::CursorDown));
    }
}
