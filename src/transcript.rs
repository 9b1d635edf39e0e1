//! Conversation transcript types

use crate::markup::{self, MarkupError};
use crate::rules::Topic;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in the transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    pub id: String,
    pub speaker: Speaker,
    pub text: String,
    /// Rule topic an assistant reply answered; `None` for user turns and
    /// the greeting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>, topic: Option<Topic>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            speaker,
            text: text.into(),
            topic,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text, None)
    }

    pub fn assistant(text: impl Into<String>, topic: Option<Topic>) -> Self {
        Self::new(Speaker::Assistant, text, topic)
    }

    /// Render for display. Assistant text is markup; user text is shown
    /// verbatim.
    pub fn render_html(&self) -> Result<String, MarkupError> {
        match self.speaker {
            Speaker::Assistant => markup::render_html(&self.text),
            Speaker::User => Ok(markup::render_plain_html(&self.text)),
        }
    }
}

/// Append-only list of turns. Only [`Transcript::reset`] removes anything.
#[derive(Debug, Clone)]
pub struct Transcript {
    greeting: String,
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        let turns = vec![Turn::assistant(greeting.clone(), None)];
        Self { greeting, turns }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Drop all history, leaving only a fresh greeting turn
    pub fn reset(&mut self) -> &Turn {
        self.turns.clear();
        self.turns.push(Turn::assistant(self.greeting.clone(), None));
        &self.turns[0]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

/// Point-in-time view of a conversation for a rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSnapshot {
    pub turns: Vec<Turn>,
    /// Drives the typing indicator
    pub is_composing: bool,
    /// Pending chat box input
    pub draft: String,
}

impl ConversationSnapshot {
    pub fn texts(&self) -> Vec<&str> {
        self.turns.iter().map(|turn| turn.text.as_str()).collect()
    }
}
