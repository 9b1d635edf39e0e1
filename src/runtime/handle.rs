//! Handles to a mounted responder

use super::{ChatUpdate, Command};
use crate::rules::Preset;
use crate::state_machine::Origin;
use crate::transcript::ConversationSnapshot;
use futures::Stream;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

/// Cheap, cloneable access to one responder.
///
/// Operations never fail. Blank text is ignored here, and commands sent
/// after the responder unmounted are dropped.
#[derive(Debug, Clone)]
pub struct ChatHandle {
    session_id: String,
    command_tx: mpsc::Sender<Command>,
    updates_tx: broadcast::Sender<ChatUpdate>,
    snapshot_rx: watch::Receiver<ConversationSnapshot>,
}

impl ChatHandle {
    pub(super) fn new(
        session_id: String,
        command_tx: mpsc::Sender<Command>,
        updates_tx: broadcast::Sender<ChatUpdate>,
        snapshot_rx: watch::Receiver<ConversationSnapshot>,
    ) -> Self {
        Self {
            session_id,
            command_tx,
            updates_tx,
            snapshot_rx,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Text typed into the chat box
    pub async fn submit_user_text(&self, text: &str) {
        self.submit(text, Origin::ChatInput).await;
    }

    /// Phrase from a quick-action button
    pub async fn submit_preset(&self, phrase: &str) {
        self.submit(phrase, Origin::Preset).await;
    }

    pub async fn press(&self, preset: Preset) {
        self.submit_preset(preset.phrase()).await;
    }

    /// Question injected from elsewhere on the page
    pub async fn receive_external_trigger(&self, text: &str) {
        self.submit(text, Origin::ServiceCard).await;
    }

    pub async fn edit_draft(&self, text: impl Into<String>) {
        self.send(Command::EditDraft { text: text.into() }).await;
    }

    /// Submit the chat box buffer as if typed
    pub async fn submit_draft(&self) {
        self.send(Command::SubmitDraft).await;
    }

    /// Back to a lone greeting; pending replies are dropped
    pub async fn reset(&self) {
        self.send(Command::Reset).await;
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<ConversationSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatUpdate> {
        self.updates_tx.subscribe()
    }

    /// Updates from now on. Lagged updates are skipped; the snapshot stays
    /// authoritative.
    pub fn updates(&self) -> impl Stream<Item = ChatUpdate> {
        BroadcastStream::new(self.updates_tx.subscribe()).filter_map(Result::ok)
    }

    async fn submit(&self, text: &str, origin: Origin) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.send(Command::Submit {
            text: text.to_string(),
            origin,
        })
        .await;
    }

    async fn send(&self, command: Command) {
        if self.command_tx.send(command).await.is_err() {
            tracing::debug!(session_id = %self.session_id, "Chat responder unmounted, command dropped");
        }
    }
}

/// A running responder. Dropping it stops the task, cancels reply timers
/// and releases the bus subscription.
#[derive(Debug)]
pub struct MountedChat {
    handle: ChatHandle,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl MountedChat {
    pub(super) fn new(handle: ChatHandle, shutdown: CancellationToken, task: JoinHandle<()>) -> Self {
        Self {
            handle,
            shutdown,
            task: Some(task),
        }
    }

    pub fn handle(&self) -> &ChatHandle {
        &self.handle
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the responder and wait for its task to finish
    pub async fn unmount(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Chat runtime task failed");
            }
        }
    }
}

impl Drop for MountedChat {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
