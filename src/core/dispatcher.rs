//! # Action Dispatcher
//!
//! Binds the three post-menu actions to one target post.
//!
//! ```text
//! transcribe_action()  ──▶ client.transcribe(id)        (fire-and-forget)
//! react_for_me_action()──▶ client.react_for_user(id)    (fire-and-forget)
//! summarize_action()   ──▶ client.summarize(id).await
//!                              │ ok {m, c}
//!                              ├─▶ navigation.select_message(m, c)
//!                              └─▶ viewport.focus_channel(c)
//! ```
//!
//! The selection is applied before the channel is focused, so anything that
//! reacts to the focus already sees the new selection. On any failure the
//! navigation and viewport are left alone and the user gets an error notice.
//!
//! Every invocation is an independent remote call. The optional in-flight
//! guard turns a second summarize into a no-op while the first is running.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::client::{ActionClient, ClientError};
use crate::core::model::{PostAction, SummaryResult, TargetMessage};
use crate::core::navigation::NavigationState;
use crate::core::notify::{Notice, Notifier};
use crate::core::viewport::ViewportController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The client rejected the call.
    Remote(ClientError),
    /// Summarize succeeded but the descriptor is incomplete.
    MalformedResult(String),
    /// A summarize for this post is already running and the guard is on.
    AlreadyInFlight,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Remote(e) => write!(f, "{e}"),
            DispatchError::MalformedResult(msg) => write!(f, "malformed summary result: {msg}"),
            DispatchError::AlreadyInFlight => write!(f, "a summary is already in progress"),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<ClientError> for DispatchError {
    fn from(e: ClientError) -> Self {
        DispatchError::Remote(e)
    }
}

/// Clears the in-flight flag when the summarize call finishes, however it ends.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct ActionDispatcher {
    target: TargetMessage,
    client: Arc<dyn ActionClient>,
    navigation: Arc<dyn NavigationState>,
    viewport: Arc<dyn ViewportController>,
    notifier: Arc<dyn Notifier>,
    summarize_guard: Option<Arc<AtomicBool>>,
}

impl ActionDispatcher {
    pub fn new(
        target: TargetMessage,
        client: Arc<dyn ActionClient>,
        navigation: Arc<dyn NavigationState>,
        viewport: Arc<dyn ViewportController>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            target,
            client,
            navigation,
            viewport,
            notifier,
            summarize_guard: None,
        }
    }

    /// Reject overlapping summarize calls for this post. Clones share the flag.
    pub fn with_in_flight_guard(mut self, enabled: bool) -> Self {
        self.summarize_guard = enabled.then(|| Arc::new(AtomicBool::new(false)));
        self
    }

    pub fn target(&self) -> &TargetMessage {
        &self.target
    }

    /// Starts a transcription and returns immediately.
    pub fn transcribe_action(&self) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let id = this.target.message_id();
            let result = this.client.transcribe(id).await;
            log_fire_and_forget(PostAction::Transcribe, id, result);
        })
    }

    /// Asks for a reaction on the user's behalf and returns immediately.
    pub fn react_for_me_action(&self) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let id = this.target.message_id();
            let result = this.client.react_for_user(id).await;
            log_fire_and_forget(PostAction::ReactForMe, id, result);
        })
    }

    /// Summarizes the thread, then selects the summary post and focuses its channel.
    pub async fn summarize_action(&self) -> Result<SummaryResult, DispatchError> {
        let id = self.target.message_id();

        let _in_flight = match self.claim_summarize() {
            Ok(claim) => claim,
            Err(e) => {
                info!("Ignoring summarize for post {}: {}", id, e);
                self.notifier.notify(Notice::warning("Summary already in progress"));
                return Err(e);
            }
        };

        info!("Summarizing thread for post {} via {}", id, self.client.name());
        let outcome = self
            .client
            .summarize(id)
            .await
            .map_err(DispatchError::from)
            .and_then(SummaryResult::validate);

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!("Summarize failed for post {}: {}", id, e);
                self.notifier
                    .notify(Notice::error("Could not summarize thread").with_message(e.to_string()));
                return Err(e);
            }
        };

        let record = self
            .navigation
            .select_message(&result.new_message_id, &result.channel_id);
        debug!("Selection applied at ts={}", record.timestamp);
        self.viewport.focus_channel(&result.channel_id);

        self.notifier.notify(Notice::success("Thread summarized"));
        Ok(result)
    }

    /// Runs any menu action on a background task without blocking the caller.
    ///
    /// Fire-and-forget actions always resolve to `Ok(())`; their failures are
    /// only logged.
    pub fn dispatch(&self, action: PostAction) -> JoinHandle<Result<(), DispatchError>> {
        debug!("Dispatching {:?} for post {}", action, self.target);
        match action {
            PostAction::Summarize => {
                let this = self.clone();
                tokio::spawn(async move { this.summarize_action().await.map(|_| ()) })
            }
            PostAction::Transcribe => {
                settle_fire_and_forget(action, self.target.clone(), self.transcribe_action())
            }
            PostAction::ReactForMe => {
                settle_fire_and_forget(action, self.target.clone(), self.react_for_me_action())
            }
        }
    }

    fn claim_summarize(&self) -> Result<Option<InFlight>, DispatchError> {
        match &self.summarize_guard {
            None => Ok(None),
            Some(flag) => {
                if flag.swap(true, Ordering::AcqRel) {
                    Err(DispatchError::AlreadyInFlight)
                } else {
                    Ok(Some(InFlight(flag.clone())))
                }
            }
        }
    }
}

/// Fire-and-forget jobs resolve to `Ok(())` even if their task panicked.
fn settle_fire_and_forget(
    action: PostAction,
    target: TargetMessage,
    handle: JoinHandle<()>,
) -> JoinHandle<Result<(), DispatchError>> {
    tokio::spawn(async move {
        if let Err(e) = handle.await {
            warn!("{} task for post {} ended abnormally: {}", action, target, e);
        }
        Ok(())
    })
}

fn log_fire_and_forget(action: PostAction, message_id: &str, result: Result<(), ClientError>) {
    match result {
        Ok(()) => info!("{} requested for post {}", action, message_id),
        Err(e) => warn!("{} failed for post {}: {}", action, message_id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::NoticeLevel;
    use crate::test_support::{Call, FakeClient, Harness};

    fn network_error() -> ClientError {
        ClientError::Network("connection refused".into())
    }

    #[tokio::test]
    async fn test_summarize_selects_then_focuses() {
        let h = Harness::new(
            "post-42",
            FakeClient::default().with_summary(SummaryResult::new("post-99", "chan-7")),
        );

        let result = h.dispatcher.summarize_action().await.unwrap();
        assert_eq!(result, SummaryResult::new("post-99", "chan-7"));

        let calls = h.log.calls();
        assert_eq!(calls[0], Call::Summarize("post-42".into()));
        assert_eq!(calls[1], Call::Select("post-99".into(), "chan-7".into()));
        match &calls[2] {
            Call::Focus { channel_id, selection_seen } => {
                assert_eq!(channel_id, "chan-7");
                let seen = selection_seen.as_ref().expect("selection applied before focus");
                assert_eq!(seen.message_id, "post-99");
                assert_eq!(seen.channel_id, "chan-7");
            }
            other => panic!("expected focus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_summarize_timestamp_after_previous_selection() {
        let h = Harness::new(
            "post-42",
            FakeClient::default().with_summary(SummaryResult::new("post-99", "chan-7")),
        );
        let before = h.navigation.select_message("post-1", "chan-1");

        h.dispatcher.summarize_action().await.unwrap();

        let after = h.navigation.current().unwrap();
        assert!(after.timestamp > before.timestamp);
        assert_eq!(after.message_id, "post-99");
    }

    #[tokio::test]
    async fn test_summarize_failure_leaves_navigation_untouched() {
        let h = Harness::new(
            "post-42",
            FakeClient::default().with_summary_error(network_error()),
        );
        let before = h.navigation.select_message("post-1", "chan-1");
        h.log.clear();

        let err = h.dispatcher.summarize_action().await.unwrap_err();
        assert_eq!(err, DispatchError::Remote(network_error()));

        assert_eq!(h.navigation.current(), Some(before));
        let calls = h.log.calls();
        assert!(!calls.iter().any(|c| matches!(c, Call::Select(..) | Call::Focus { .. })));
        assert!(calls.iter().any(
            |c| matches!(c, Call::Notify(n) if n.level == NoticeLevel::Error)
        ));
    }

    #[tokio::test]
    async fn test_malformed_result_fails_closed() {
        let h = Harness::new(
            "post-42",
            FakeClient::default().with_summary(SummaryResult::new("post-99", "")),
        );

        let err = h.dispatcher.summarize_action().await.unwrap_err();
        assert!(matches!(err, DispatchError::MalformedResult(_)));

        assert!(h.navigation.current().is_none());
        let calls = h.log.calls();
        assert!(!calls.iter().any(|c| matches!(c, Call::Select(..) | Call::Focus { .. })));
        assert!(calls.iter().any(
            |c| matches!(c, Call::Notify(n) if n.level == NoticeLevel::Error)
        ));
    }

    #[tokio::test]
    async fn test_react_for_me_touches_only_the_client() {
        let h = Harness::new("post-1", FakeClient::default());

        h.dispatcher.react_for_me_action().await.unwrap();

        assert_eq!(h.log.calls(), vec![Call::React("post-1".into())]);
    }

    #[tokio::test]
    async fn test_fire_and_forget_failures_stay_silent() {
        let h = Harness::new("post-1", FakeClient::default().failing_fire_and_forget());

        h.dispatcher.transcribe_action().await.unwrap();
        h.dispatcher.react_for_me_action().await.unwrap();

        assert_eq!(
            h.log.calls(),
            vec![Call::Transcribe("post-1".into()), Call::React("post-1".into())]
        );
        assert!(h.navigation.current().is_none());
    }

    #[tokio::test]
    async fn test_repeated_invocations_are_not_deduplicated() {
        let h = Harness::new("post-1", FakeClient::default());

        for _ in 0..3 {
            h.dispatcher.transcribe_action().await.unwrap();
        }

        assert_eq!(h.log.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_summaries_apply_in_completion_order() {
        let mut client = FakeClient::default();
        let first = client.gated_summary();
        let second = client.gated_summary();
        let h = Harness::new("post-42", client);

        let a = h.dispatcher.dispatch(PostAction::Summarize);
        h.wait_for_summarize_calls(1).await;
        let b = h.dispatcher.dispatch(PostAction::Summarize);
        h.wait_for_summarize_calls(2).await;

        first.send(Ok(SummaryResult::new("m1", "c1"))).unwrap();
        a.await.unwrap().unwrap();
        second.send(Ok(SummaryResult::new("m2", "c2"))).unwrap();
        b.await.unwrap().unwrap();

        let current = h.navigation.current().unwrap();
        assert_eq!(current.message_id, "m2");
        assert_eq!(current.channel_id, "c2");
    }

    #[tokio::test]
    async fn test_later_completion_wins_even_if_invoked_first() {
        let mut client = FakeClient::default();
        let first = client.gated_summary();
        let second = client.gated_summary();
        let h = Harness::new("post-42", client);

        let a = h.dispatcher.dispatch(PostAction::Summarize);
        h.wait_for_summarize_calls(1).await;
        let b = h.dispatcher.dispatch(PostAction::Summarize);
        h.wait_for_summarize_calls(2).await;

        second.send(Ok(SummaryResult::new("m2", "c2"))).unwrap();
        b.await.unwrap().unwrap();
        first.send(Ok(SummaryResult::new("m1", "c1"))).unwrap();
        a.await.unwrap().unwrap();

        assert_eq!(h.navigation.current().unwrap().message_id, "m1");
    }

    #[tokio::test]
    async fn test_in_flight_guard_rejects_overlapping_summary() {
        let mut client = FakeClient::default();
        let gate = client.gated_summary();
        let h = Harness::with_guard("post-42", client);

        let running = h.dispatcher.dispatch(PostAction::Summarize);
        h.wait_for_summarize_calls(1).await;

        let err = h.dispatcher.summarize_action().await.unwrap_err();
        assert_eq!(err, DispatchError::AlreadyInFlight);
        assert_eq!(h.log.summarize_count(), 1);
        assert!(h.log.calls().iter().any(|c| matches!(
            c,
            Call::Notify(n) if n.level == NoticeLevel::Warning
        )));

        gate.send(Ok(SummaryResult::new("m1", "c1"))).unwrap();
        running.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_in_flight_guard_releases_after_failure() {
        let h = Harness::with_guard(
            "post-42",
            FakeClient::default()
                .with_summary_error(network_error())
                .with_summary(SummaryResult::new("m1", "c1")),
        );

        assert!(h.dispatcher.summarize_action().await.is_err());
        assert!(h.dispatcher.summarize_action().await.is_ok());
        assert_eq!(h.log.summarize_count(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_fire_and_forget_resolves_ok_on_failure() {
        let h = Harness::new("post-1", FakeClient::default().failing_fire_and_forget());

        let outcome = h.dispatcher.dispatch(PostAction::Transcribe).await.unwrap();
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_panicked_fire_and_forget_task_still_settles() {
        let task = tokio::spawn(async { panic!("client blew up") });
        let target = TargetMessage::new("post-1").unwrap();

        let outcome = settle_fire_and_forget(PostAction::ReactForMe, target, task)
            .await
            .unwrap();
        assert_eq!(outcome, Ok(()));
    }
}
