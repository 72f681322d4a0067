//! # Navigation State
//!
//! Process-wide "which post is selected" state. There is exactly one way to
//! change it: `select_message`, which replaces the whole record at once.
//!
//! ```text
//! SelectionRecord
//! ├── message_id: String
//! ├── channel_id: String
//! └── timestamp: i64     // epoch ms, strictly increasing per store
//! ```
//!
//! Consumers compare timestamps to find the most recent selection, so the
//! store never hands out the same timestamp twice even when the wall clock
//! stalls or steps backwards.

use std::sync::Mutex;

use chrono::Utc;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRecord {
    pub message_id: String,
    pub channel_id: String,
    pub timestamp: i64,
}

pub trait NavigationState: Send + Sync {
    /// Atomically replaces the current selection and returns the new record.
    fn select_message(&self, message_id: &str, channel_id: &str) -> SelectionRecord;

    /// The latest selection, if anything has been selected yet.
    fn current(&self) -> Option<SelectionRecord>;
}

#[derive(Default)]
struct Inner {
    selection: Option<SelectionRecord>,
    last_timestamp: i64,
}

/// Mutex-backed `NavigationState`. Last writer wins.
#[derive(Default)]
pub struct NavigationStore {
    inner: Mutex<Inner>,
}

impl NavigationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NavigationState for NavigationStore {
    fn select_message(&self, message_id: &str, channel_id: &str) -> SelectionRecord {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let now = Utc::now().timestamp_millis();
        let timestamp = now.max(inner.last_timestamp + 1);
        inner.last_timestamp = timestamp;

        let record = SelectionRecord {
            message_id: message_id.to_string(),
            channel_id: channel_id.to_string(),
            timestamp,
        };
        debug!(
            "Selected post {} in channel {} (ts={})",
            record.message_id, record.channel_id, record.timestamp
        );
        inner.selection = Some(record.clone());
        record
    }

    fn current(&self) -> Option<SelectionRecord> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .selection
            .clone()
    }
}
