//! Page session: one signal bus and the chat responder listening on it

use crate::bus::SignalBus;
use crate::config::ChatConfig;
use crate::runtime::{ChatHandle, ChatRuntime, MountedChat};
use crate::services::{ServiceCard, SERVICE_CARDS};

pub struct PageSession {
    bus: SignalBus,
    chat: MountedChat,
}

impl PageSession {
    /// Create the bus and mount the responder on it. Must be called from
    /// within a tokio runtime.
    pub fn open(config: &ChatConfig) -> Self {
        let bus = SignalBus::new(config.bus_capacity);
        let chat = ChatRuntime::mount(config, Some(&bus));
        tracing::info!(session_id = chat.handle().session_id(), "Page session opened");
        Self { bus, chat }
    }

    pub fn chat(&self) -> &ChatHandle {
        self.chat.handle()
    }

    pub fn bus(&self) -> &SignalBus {
        &self.bus
    }

    pub fn cards(&self) -> &'static [ServiceCard] {
        &SERVICE_CARDS
    }

    /// Click a service card. Returns false for an unknown id.
    pub fn ask_service(&self, card_id: &str) -> bool {
        match ServiceCard::find(card_id) {
            Some(card) => {
                card.ask(&self.bus);
                true
            }
            None => {
                tracing::debug!(card_id, "Unknown service card");
                false
            }
        }
    }

    /// Unmount the responder and wait for it to stop
    pub async fn close(self) {
        let session_id = self.chat.handle().session_id().to_string();
        self.chat.unmount().await;
        tracing::info!(
            session_id = %session_id,
            listeners = self.bus.listener_count(),
            "Page session closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Topic;
    use crate::transcript::ConversationSnapshot;
    use std::time::Duration;

    async fn wait_idle_with(session: &PageSession, turns: usize) -> ConversationSnapshot {
        let mut rx = session.chat().subscribe_snapshots();
        let snapshot = tokio::time::timeout(
            Duration::from_secs(60),
            rx.wait_for(|s| s.turns.len() == turns && !s.is_composing),
        )
        .await
        .expect("timed out waiting for reply")
        .expect("runtime stopped")
        .clone();
        snapshot
    }

    #[tokio::test(start_paused = true)]
    async fn test_service_card_reaches_chat() {
        let session = PageSession::open(&ChatConfig::default());
        assert_eq!(session.bus().listener_count(), 1);

        assert!(session.ask_service("technical"));
        let snapshot = wait_idle_with(&session, 3).await;
        assert_eq!(snapshot.turns[1].text, "Tell me about technical SEO");
        assert_eq!(snapshot.turns[2].topic, Some(Topic::TechnicalSeo));

        session.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_card_is_rejected() {
        let session = PageSession::open(&ChatConfig::default());
        assert!(!session.ask_service("design"));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.chat().snapshot().turns.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_card_gets_its_reply() {
        let session = PageSession::open(&ChatConfig::default());
        for card in session.cards() {
            assert!(session.ask_service(card.id));
        }

        let snapshot = wait_idle_with(&session, 7).await;
        let topics: Vec<Topic> = snapshot.turns.iter().filter_map(|t| t.topic).collect();
        assert_eq!(
            topics,
            vec![Topic::SeoExpertise, Topic::TechnicalSeo, Topic::LinkBuilding]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_releases_listener() {
        let session = PageSession::open(&ChatConfig::default());
        let bus = session.bus().clone();
        assert_eq!(bus.listener_count(), 1);

        session.close().await;
        assert_eq!(bus.listener_count(), 0);
    }
}
