//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the post menu
//! screen, and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Threading
//!
//! The loop below owns `App` and is the only writer to it. Menu actions run
//! on tokio tasks; their results come back as `Action`s over an mpsc
//! channel and are applied by `update()` between frames. The navigation
//! store is the one piece of state written from tasks directly, and it is
//! updated as a single record.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (jobs in flight or toasts showing): polls every ~100ms so
//!   toasts expire on time.
//! - **Idle**: sleeps up to 500ms, only redraws on events.

mod bridge;
mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crate::client::ActionClient;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::dispatcher::ActionDispatcher;
use crate::core::model::{PostAction, TargetMessage};
use crate::core::navigation::NavigationStore;
use crate::core::state::{ActivityId, App};
use crate::tui::bridge::{LoopNotifier, LoopViewport};
use crate::tui::component::EventHandler;
use crate::tui::components::{MenuEvent, PostMenuState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    // Post menu overlay (None = hidden)
    pub menu: Option<PostMenuState>,
}

/// Translates one terminal event into at most one core action.
fn route_event(tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    // Ctrl+C always quits regardless of overlay
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if matches!(event, TuiEvent::Resize) {
        return None;
    }

    // When the menu is open, route all events to it
    if let Some(menu) = tui.menu.as_mut() {
        return match menu.handle_event(&event) {
            Some(MenuEvent::Invoke(post_action)) => {
                tui.menu = None;
                Some(Action::Invoke(post_action))
            }
            Some(MenuEvent::Dismiss) => {
                tui.menu = None;
                None
            }
            None => None,
        };
    }

    match event {
        TuiEvent::OpenMenu | TuiEvent::Submit => {
            tui.menu = Some(PostMenuState::new());
            None
        }
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::DismissNotice => Some(Action::DismissNotice),
        TuiEvent::InputChar(c) => PostAction::from_shortcut(c).map(Action::Invoke),
        _ => None,
    }
}

pub fn run(
    config: &ResolvedConfig,
    target: TargetMessage,
    client: Arc<dyn ActionClient>,
) -> std::io::Result<()> {
    let navigation = Arc::new(NavigationStore::new());

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let dispatcher = ActionDispatcher::new(
        target.clone(),
        client,
        navigation.clone(),
        Arc::new(LoopViewport::new(tx.clone())),
        Arc::new(LoopNotifier::new(tx.clone())),
    )
    .with_in_flight_guard(config.guard_in_flight_summaries);

    let mut app = App::new(target, navigation, config.notice_duration);
    let mut tui = TuiState::default();

    let mut terminal = ratatui::init();
    info!("Post menu opened for {}", app.target);

    let mut needs_redraw = true; // Force first frame

    loop {
        if app.expire_notices(Instant::now()) {
            needs_redraw = true;
        }

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                ratatui::restore();
                return Err(e);
            }
            needs_redraw = false;
        }

        let busy = app.in_flight > 0 || !app.notices.is_empty();
        let timeout = if busy {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&mut tui, event) else {
                continue;
            };
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::Dispatch { id, action } => {
                    spawn_action(&dispatcher, id, action, tx.clone());
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (focus, notices, completions)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Hands the action to the dispatcher. Awaited actions report completion
/// back to the loop; fire-and-forget handles are dropped.
fn spawn_action(
    dispatcher: &ActionDispatcher,
    id: ActivityId,
    action: PostAction,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning {:?} for post {}", action, dispatcher.target());
    let handle = dispatcher.dispatch(action);
    if !action.is_awaited() {
        return;
    }

    tokio::spawn(async move {
        let outcome = match handle.await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(e) => Err(format!("task failed: {e}")),
        };
        let finished = Action::ActionFinished {
            id,
            action,
            outcome,
        };
        if tx.send(finished).is_err() {
            warn!("Failed to report {:?} completion: receiver dropped", action);
        }
    });
}
