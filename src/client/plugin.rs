//! AI plugin client over HTTP.
//!
//! Every job is a POST against the plugin's per-post routes:
//!
//! ```text
//! POST {server}/plugins/{plugin_id}/post/{post_id}/summarize_thread  → {"postid", "channelid"}
//! POST {server}/plugins/{plugin_id}/post/{post_id}/transcribe
//! POST {server}/plugins/{plugin_id}/post/{post_id}/react
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::client::{ActionClient, ClientError};
use crate::core::model::SummaryResult;

pub const DEFAULT_PLUGIN_ID: &str = "mattermost-ai";

// ============================================================================
// Wire Types
// ============================================================================

/// Body of a successful summarize call. Missing fields decode as empty so
/// that validation, not parsing, decides whether the descriptor is usable.
#[derive(Deserialize, Debug)]
struct SummarizeResponse {
    #[serde(default)]
    postid: String,
    #[serde(default)]
    channelid: String,
}

impl From<SummarizeResponse> for SummaryResult {
    fn from(response: SummarizeResponse) -> Self {
        SummaryResult::new(response.postid, response.channelid)
    }
}

// ============================================================================
// Client Implementation
// ============================================================================

pub struct PluginClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl PluginClient {
    pub fn new(
        server_url: &str,
        plugin_id: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let server_url = server_url.trim_end_matches('/');
        if server_url.is_empty() {
            return Err(ClientError::Config("server URL is empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            base_url: format!("{server_url}/plugins/{plugin_id}"),
            token,
            client,
        })
    }

    fn post_url(&self, message_id: &str, route: &str) -> String {
        format!("{}/post/{}/{}", self.base_url, message_id, route)
    }

    /// Sends the POST and returns the response only if it succeeded.
    async fn post(&self, message_id: &str, route: &str) -> Result<reqwest::Response, ClientError> {
        let url = self.post_url(message_id, route);
        debug!("POST {}", url);

        let mut request = self.client.post(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Plugin API error on {}: {} - {}", route, status, message);
            return Err(ClientError::Api { status, message });
        }

        Ok(response)
    }
}

#[async_trait]
impl ActionClient for PluginClient {
    fn name(&self) -> &str {
        "plugin"
    }

    async fn transcribe(&self, message_id: &str) -> Result<(), ClientError> {
        self.post(message_id, "transcribe").await?;
        info!("Transcription started for post {}", message_id);
        Ok(())
    }

    async fn react_for_user(&self, message_id: &str) -> Result<(), ClientError> {
        self.post(message_id, "react").await?;
        info!("Reaction requested for post {}", message_id);
        Ok(())
    }

    async fn summarize(&self, message_id: &str) -> Result<SummaryResult, ClientError> {
        let response = self.post(message_id, "summarize_thread").await?;
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let decoded: SummarizeResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))?;
        info!(
            "Summary for post {} created as post {} in channel {}",
            message_id, decoded.postid, decoded.channelid
        );
        Ok(decoded.into())
    }
}
