//! # Actions
//!
//! Everything that can happen on the post-menu screen becomes an `Action`.
//! User picks "Summarize Thread"? That's `Action::Invoke(PostAction::Summarize)`.
//! A background job reports back? That's `Action::ActionFinished { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller must do.
//! No side effects here. Dispatching happens in the event loop.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Instant;

use log::debug;

use crate::core::model::PostAction;
use crate::core::navigation::NavigationState;
use crate::core::notify::Notice;
use crate::core::state::{ActivityId, ActivityStatus, App, MAX_NOTICES, PostedNotice};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user chose a menu entry.
    Invoke(PostAction),
    /// An awaited job completed. `Err` carries the user-facing reason.
    ActionFinished {
        id: ActivityId,
        action: PostAction,
        outcome: Result<(), String>,
    },
    /// The viewport was asked to show a channel.
    FocusChannel(String),
    Notify(Notice),
    DismissNotice,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Run the action; report completion under `id`.
    Dispatch { id: ActivityId, action: PostAction },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Invoke(post_action) => {
            let status = if post_action.is_awaited() {
                app.in_flight += 1;
                ActivityStatus::Running
            } else {
                let notice = Notice::info(format!("{} requested", post_action.label()));
                push_notice(app, notice);
                ActivityStatus::Sent
            };
            let id = app.record_activity(post_action, status);
            app.status_message = format!("{} requested", post_action.label());
            Effect::Dispatch {
                id,
                action: post_action,
            }
        }
        Action::ActionFinished {
            id,
            action,
            outcome,
        } => {
            app.in_flight = app.in_flight.saturating_sub(1);
            // Entry may already have been trimmed from the log.
            if let Some(entry) = app.activity_mut(id) {
                entry.status = match &outcome {
                    Ok(()) => ActivityStatus::Done,
                    Err(reason) => ActivityStatus::Failed(reason.clone()),
                };
            }
            if let Err(reason) = outcome {
                app.status_message = format!("{} failed: {}", action.label(), reason);
            }
            Effect::None
        }
        Action::FocusChannel(channel_id) => {
            app.status_message = match app.navigation.current() {
                Some(selection) if selection.channel_id == channel_id => {
                    format!("Viewing post {} in {}", selection.message_id, channel_id)
                }
                _ => format!("Viewing {}", channel_id),
            };
            app.active_channel = Some(channel_id);
            Effect::None
        }
        Action::Notify(notice) => {
            push_notice(app, notice);
            Effect::None
        }
        Action::DismissNotice => {
            app.notices.pop_front();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn push_notice(app: &mut App, notice: Notice) {
    app.notices.push_back(PostedNotice {
        notice,
        posted_at: Instant::now(),
    });
    while app.notices.len() > MAX_NOTICES {
        app.notices.pop_front();
    }
}
