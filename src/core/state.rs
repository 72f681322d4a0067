//! # Application State
//!
//! Core state for the post-menu screen. This module contains domain logic
//! only - no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── target: TargetMessage             // post the menu is attached to
//! ├── navigation: Arc<NavigationStore>  // shared selection record
//! ├── active_channel: Option<String>    // channel the viewport shows
//! ├── status_message: String            // status bar text
//! ├── activity: Vec<ActivityEntry>      // jobs started from the menu, newest last
//! ├── next_activity_id: u64             // id handed to the next job
//! ├── in_flight: usize                  // summaries awaiting a result
//! └── notices: VecDeque<PostedNotice>   // toasts, oldest first
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::core::model::{PostAction, TargetMessage};
use crate::core::navigation::NavigationStore;
use crate::core::notify::Notice;

/// Older notices are dropped once this many are queued.
pub const MAX_NOTICES: usize = 10;

/// Activity entries kept for the panel; older ones fall off the front.
pub const MAX_ACTIVITY: usize = 50;

/// Identifies one menu invocation so its completion lands on the right entry.
pub type ActivityId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityStatus {
    /// Fire-and-forget request handed to the client.
    Sent,
    /// Awaiting a result.
    Running,
    Done,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub id: ActivityId,
    pub action: PostAction,
    pub status: ActivityStatus,
    pub started_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct PostedNotice {
    pub notice: Notice,
    pub posted_at: Instant,
}

pub struct App {
    pub target: TargetMessage,
    pub navigation: Arc<NavigationStore>,
    pub active_channel: Option<String>,
    pub status_message: String,
    pub activity: Vec<ActivityEntry>,
    pub next_activity_id: ActivityId,
    pub in_flight: usize,
    pub notices: VecDeque<PostedNotice>,
    pub notice_duration: Duration,
}

impl App {
    pub fn new(target: TargetMessage, navigation: Arc<NavigationStore>, notice_duration: Duration) -> Self {
        Self {
            target,
            navigation,
            active_channel: None,
            status_message: String::from("Press . for AI actions"),
            activity: Vec::new(),
            next_activity_id: 0,
            in_flight: 0,
            notices: VecDeque::new(),
            notice_duration,
        }
    }

    /// Appends a job to the activity log and returns its id.
    pub fn record_activity(&mut self, action: PostAction, status: ActivityStatus) -> ActivityId {
        let id = self.next_activity_id;
        self.next_activity_id += 1;
        self.activity.push(ActivityEntry {
            id,
            action,
            status,
            started_at: Local::now(),
        });
        if self.activity.len() > MAX_ACTIVITY {
            let excess = self.activity.len() - MAX_ACTIVITY;
            self.activity.drain(..excess);
        }
        id
    }

    pub fn activity_mut(&mut self, id: ActivityId) -> Option<&mut ActivityEntry> {
        self.activity.iter_mut().find(|e| e.id == id)
    }

    /// Drops notices older than `notice_duration`. Returns true if any were removed.
    pub fn expire_notices(&mut self, now: Instant) -> bool {
        let before = self.notices.len();
        let ttl = self.notice_duration;
        self.notices
            .retain(|n| now.saturating_duration_since(n.posted_at) < ttl);
        self.notices.len() != before
    }
}
