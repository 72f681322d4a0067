//! # Post Model
//!
//! The handful of values that flow through a menu invocation:
//!
//! ```text
//! TargetMessage ──(action)──▶ SummaryResult ──(select)──▶ SelectionRecord
//! ```
//!
//! `PostAction` is the menu's vocabulary. The labels match what users see in
//! the "AI Actions" overlay.

use std::fmt;

use crate::core::dispatcher::DispatchError;

/// The post a menu is attached to. Never mutated by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMessage {
    message_id: String,
}

impl TargetMessage {
    /// Returns `None` for an empty or whitespace-only id.
    pub fn new(message_id: impl Into<String>) -> Option<Self> {
        let message_id = message_id.into();
        if message_id.trim().is_empty() {
            return None;
        }
        Some(Self { message_id })
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }
}

impl fmt::Display for TargetMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message_id)
    }
}

/// Descriptor returned by a summarize job: the post holding the summary and
/// the channel it was created in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub new_message_id: String,
    pub channel_id: String,
}

impl SummaryResult {
    pub fn new(new_message_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            new_message_id: new_message_id.into(),
            channel_id: channel_id.into(),
        }
    }

    /// Both ids must be present before the result may drive navigation.
    pub fn validate(self) -> Result<Self, DispatchError> {
        if self.new_message_id.trim().is_empty() {
            return Err(DispatchError::MalformedResult("missing new message id".into()));
        }
        if self.channel_id.trim().is_empty() {
            return Err(DispatchError::MalformedResult("missing channel id".into()));
        }
        Ok(self)
    }
}

/// Everything the post menu can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostAction {
    Summarize,
    Transcribe,
    ReactForMe,
}

impl PostAction {
    /// Menu order.
    pub const ALL: [PostAction; 3] = [
        PostAction::Summarize,
        PostAction::Transcribe,
        PostAction::ReactForMe,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PostAction::Summarize => "Summarize Thread",
            PostAction::Transcribe => "Summarize Meeting Audio",
            PostAction::ReactForMe => "React for me",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            PostAction::Summarize => 's',
            PostAction::Transcribe => 't',
            PostAction::ReactForMe => 'r',
        }
    }

    pub fn from_shortcut(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.shortcut() == c.to_ascii_lowercase())
    }

    /// Only summarize has a continuation; the others are fire-and-forget.
    pub fn is_awaited(&self) -> bool {
        matches!(self, PostAction::Summarize)
    }
}

impl fmt::Display for PostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
