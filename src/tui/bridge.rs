//! Collaborators that hand dispatcher callbacks to the event loop.
//!
//! Background tasks never touch `App` directly. They send `Action`s over the
//! loop's channel, which keeps them in send order, so a focus request queued
//! after a selection is always applied after it.

use std::sync::mpsc::Sender;

use log::warn;

use crate::core::action::Action;
use crate::core::notify::{Notice, Notifier};
use crate::core::viewport::ViewportController;

pub struct LoopViewport {
    tx: Sender<Action>,
}

impl LoopViewport {
    pub fn new(tx: Sender<Action>) -> Self {
        Self { tx }
    }
}

impl ViewportController for LoopViewport {
    fn focus_channel(&self, channel_id: &str) {
        if self
            .tx
            .send(Action::FocusChannel(channel_id.to_string()))
            .is_err()
        {
            warn!("Failed to focus channel {}: receiver dropped", channel_id);
        }
    }
}

pub struct LoopNotifier {
    tx: Sender<Action>,
}

impl LoopNotifier {
    pub fn new(tx: Sender<Action>) -> Self {
        Self { tx }
    }
}

impl Notifier for LoopNotifier {
    fn notify(&self, notice: Notice) {
        if self.tx.send(Action::Notify(notice)).is_err() {
            warn!("Failed to post notice: receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_bridge_preserves_send_order() {
        let (tx, rx) = mpsc::channel();
        let viewport = LoopViewport::new(tx.clone());
        let notifier = LoopNotifier::new(tx);

        viewport.focus_channel("chan-7");
        notifier.notify(Notice::success("Thread summarized"));

        assert_eq!(rx.recv().unwrap(), Action::FocusChannel("chan-7".into()));
        assert_eq!(
            rx.recv().unwrap(),
            Action::Notify(Notice::success("Thread summarized"))
        );
    }

    #[test]
    fn test_dropped_receiver_is_not_fatal() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        LoopViewport::new(tx).focus_channel("chan-7");
    }
}
