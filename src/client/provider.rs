use std::fmt;

use async_trait::async_trait;

use crate::core::model::SummaryResult;

/// Errors that can occur while talking to the AI plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Client misconfigured (missing server URL, bad token). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Server answered with a non-success status.
    Api { status: u16, message: String },
    /// Response body could not be decoded.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Config(msg) => write!(f, "config error: {msg}"),
            ClientError::Network(msg) => write!(f, "network error: {msg}"),
            ClientError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ClientError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// The remote jobs a post menu can start.
///
/// Timeouts and retries are the implementation's business; callers only
/// see success or a `ClientError`.
#[async_trait]
pub trait ActionClient: Send + Sync {
    /// Returns the name of the client.
    fn name(&self) -> &str;

    /// Starts a transcription of the post's audio. The transcript shows up
    /// later as a new post.
    async fn transcribe(&self, message_id: &str) -> Result<(), ClientError>;

    /// Asks the bot to react to the post on the user's behalf.
    async fn react_for_user(&self, message_id: &str) -> Result<(), ClientError>;

    /// Summarizes the post's thread and returns where the summary landed.
    async fn summarize(&self, message_id: &str) -> Result<SummaryResult, ClientError>;
}
