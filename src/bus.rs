//! Page-wide signal bus
//!
//! Unrelated page elements (service cards) use it to inject a question
//! into the chat responder. Delivery is best-effort and at most once per
//! listener: a signal emitted while nobody is subscribed is dropped.
//! A [`TriggerSubscription`] releases its slot when dropped, so a responder
//! that unmounts cannot leave a handler behind.

use crate::config::MAX_CAPACITY;
use serde::Serialize;
use tokio::sync::broadcast;

/// Payload of the cross-component signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTrigger {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SignalBus {
    tx: broadcast::Sender<ChatTrigger>,
}

impl SignalBus {
    /// `capacity` is clamped to `1..=MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.clamp(1, MAX_CAPACITY));
        Self { tx }
    }

    /// Broadcast `message` to every current listener.
    ///
    /// The payload is trimmed and blank payloads are dropped. Returns how
    /// many listeners received it.
    pub fn emit(&self, message: &str) -> usize {
        let message = message.trim();
        if message.is_empty() {
            tracing::debug!("Dropping blank chat trigger");
            return 0;
        }

        match self.tx.send(ChatTrigger {
            message: message.to_string(),
        }) {
            Ok(listeners) => {
                tracing::debug!(listeners, "Chat trigger emitted");
                listeners
            }
            Err(_) => {
                tracing::debug!("No chat listener mounted, trigger dropped");
                0
            }
        }
    }

    pub fn subscribe(&self) -> TriggerSubscription {
        TriggerSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Live subscriptions
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BUS_CAPACITY)
    }
}

/// A listener slot on the bus. Dropping it unsubscribes.
#[derive(Debug)]
pub struct TriggerSubscription {
    rx: broadcast::Receiver<ChatTrigger>,
}

impl TriggerSubscription {
    /// Next signal, or `None` once every bus handle is gone.
    pub async fn recv(&mut self) -> Option<ChatTrigger> {
        loop {
            match self.rx.recv().await {
                Ok(trigger) => return Some(trigger),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Chat listener lagged, skipping triggers");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
