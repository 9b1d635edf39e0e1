//! Events that can occur in a conversation

use serde::Serialize;

/// Where a user turn came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Typed into the chat box
    ChatInput,
    /// A quick-action button
    Preset,
    /// Cross-component signal from a service card
    ServiceCard,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::ChatInput => "chat_input",
            Origin::Preset => "preset",
            Origin::ServiceCard => "service_card",
        }
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    UserMessage {
        text: String,
        origin: Origin,
        /// Identifies the reply this message will get
        reply_id: String,
    },

    /// Reply timer elapsed
    ReplyDue { reply_id: String },

    Reset,
}

impl Event {
    pub fn user_message(text: impl Into<String>, origin: Origin) -> Self {
        Event::UserMessage {
            text: text.into(),
            origin,
            reply_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}
