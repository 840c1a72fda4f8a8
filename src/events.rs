//! Signals between the contact form, the store watcher and the dashboard.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::inbox::Message;

#[derive(Debug, Clone, PartialEq)]
pub enum InboxEvent {
    /// The contact form stored a new message
    MessageCreated(Message),
    /// A status changed or a message was deleted
    MessageUpdated,
    /// Another process rewrote the store file
    StorageChanged,
}

/// Sending half of the dashboard's event channel
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Sender<InboxEvent>,
}

impl Notifier {
    pub fn notify(&self, event: InboxEvent) {
        // The dashboard may already be gone on shutdown
        if self.tx.send(event).is_err() {
            log::debug!("Dropped inbox event: no listener");
        }
    }
}

pub fn channel() -> (Notifier, Receiver<InboxEvent>) {
    let (tx, rx) = mpsc::channel();
    (Notifier { tx }, rx)
}

/// Pull every queued event without blocking
pub fn drain(rx: &Receiver<InboxEvent>) -> Vec<InboxEvent> {
    rx.try_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_arrive_in_order() {
        let (notifier, rx) = channel();
        notifier.notify(InboxEvent::MessageUpdated);
        notifier.notify(InboxEvent::StorageChanged);
        assert_eq!(
            drain(&rx),
            vec![InboxEvent::MessageUpdated, InboxEvent::StorageChanged]
        );
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn notifying_without_listener_is_harmless() {
        let (notifier, rx) = channel();
        drop(rx);
        notifier.notify(InboxEvent::MessageUpdated);
    }
}
