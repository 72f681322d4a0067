//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::client::{ActionClient, ClientError};
use crate::core::dispatcher::ActionDispatcher;
use crate::core::model::{SummaryResult, TargetMessage};
use crate::core::navigation::{NavigationState, NavigationStore, SelectionRecord};
use crate::core::notify::{Notice, Notifier};
use crate::core::viewport::ViewportController;

type SummaryReply = Result<SummaryResult, ClientError>;

/// One observed collaborator call, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Transcribe(String),
    React(String),
    Summarize(String),
    Select(String, String),
    Focus {
        channel_id: String,
        selection_seen: Option<SelectionRecord>,
    },
    Notify(Notice),
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn summarize_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Summarize(_)))
            .count()
    }
}

enum ScriptedSummary {
    Ready(SummaryReply),
    Gated(oneshot::Receiver<SummaryReply>),
}

/// Scripted client. Summarize replies are consumed in order.
#[derive(Default)]
pub struct FakeClient {
    log: CallLog,
    summaries: Mutex<VecDeque<ScriptedSummary>>,
    fail_fire_and_forget: bool,
}

impl FakeClient {
    pub fn with_summary(self, result: SummaryResult) -> Self {
        self.push_summary(ScriptedSummary::Ready(Ok(result)))
    }

    pub fn with_summary_error(self, error: ClientError) -> Self {
        self.push_summary(ScriptedSummary::Ready(Err(error)))
    }

    pub fn failing_fire_and_forget(mut self) -> Self {
        self.fail_fire_and_forget = true;
        self
    }

    /// Queues a summarize reply that resolves when the returned sender fires.
    pub fn gated_summary(&mut self) -> oneshot::Sender<SummaryReply> {
        let (tx, rx) = oneshot::channel();
        self.summaries
            .get_mut()
            .unwrap()
            .push_back(ScriptedSummary::Gated(rx));
        tx
    }

    fn push_summary(self, reply: ScriptedSummary) -> Self {
        self.summaries.lock().unwrap().push_back(reply);
        self
    }

    fn fire_and_forget_result(&self) -> Result<(), ClientError> {
        if self.fail_fire_and_forget {
            Err(ClientError::Api {
                status: 500,
                message: "boom".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ActionClient for FakeClient {
    fn name(&self) -> &str {
        "fake"
    }

    async fn transcribe(&self, message_id: &str) -> Result<(), ClientError> {
        self.log.push(Call::Transcribe(message_id.to_string()));
        self.fire_and_forget_result()
    }

    async fn react_for_user(&self, message_id: &str) -> Result<(), ClientError> {
        self.log.push(Call::React(message_id.to_string()));
        self.fire_and_forget_result()
    }

    async fn summarize(&self, message_id: &str) -> Result<SummaryResult, ClientError> {
        self.log.push(Call::Summarize(message_id.to_string()));
        let next = self.summaries.lock().unwrap().pop_front();
        match next {
            Some(ScriptedSummary::Ready(reply)) => reply,
            Some(ScriptedSummary::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ClientError::Network("gate dropped".into()))),
            None => Err(ClientError::Network("no scripted reply".into())),
        }
    }
}

/// Real store that also records each selection in the call log.
pub struct RecordingNavigation {
    store: NavigationStore,
    log: CallLog,
}

impl NavigationState for RecordingNavigation {
    fn select_message(&self, message_id: &str, channel_id: &str) -> SelectionRecord {
        self.log
            .push(Call::Select(message_id.to_string(), channel_id.to_string()));
        self.store.select_message(message_id, channel_id)
    }

    fn current(&self) -> Option<SelectionRecord> {
        self.store.current()
    }
}

/// Records focus calls along with the selection visible at that moment.
pub struct RecordingViewport {
    navigation: Arc<RecordingNavigation>,
    log: CallLog,
}

impl ViewportController for RecordingViewport {
    fn focus_channel(&self, channel_id: &str) {
        self.log.push(Call::Focus {
            channel_id: channel_id.to_string(),
            selection_seen: self.navigation.current(),
        });
    }
}

pub struct RecordingNotifier {
    log: CallLog,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.log.push(Call::Notify(notice));
    }
}

/// A dispatcher wired to recording collaborators that share one call log.
pub struct Harness {
    pub dispatcher: ActionDispatcher,
    pub navigation: Arc<RecordingNavigation>,
    pub log: CallLog,
}

impl Harness {
    pub fn new(target: &str, client: FakeClient) -> Self {
        Self::build(target, client, false)
    }

    pub fn with_guard(target: &str, client: FakeClient) -> Self {
        Self::build(target, client, true)
    }

    fn build(target: &str, mut client: FakeClient, guard: bool) -> Self {
        let log = CallLog::default();
        client.log = log.clone();
        let navigation = Arc::new(RecordingNavigation {
            store: NavigationStore::new(),
            log: log.clone(),
        });
        let viewport = Arc::new(RecordingViewport {
            navigation: navigation.clone(),
            log: log.clone(),
        });
        let notifier = Arc::new(RecordingNotifier { log: log.clone() });

        let dispatcher = ActionDispatcher::new(
            TargetMessage::new(target).unwrap(),
            Arc::new(client),
            navigation.clone(),
            viewport,
            notifier,
        )
        .with_in_flight_guard(guard);

        Self {
            dispatcher,
            navigation,
            log,
        }
    }

    /// Yields to spawned tasks until the client has seen `n` summarize calls.
    pub async fn wait_for_summarize_calls(&self, n: usize) {
        while self.log.summarize_count() < n {
            tokio::task::yield_now().await;
        }
    }
}
