//! Effects produced by state transitions

use crate::rules::{Reply, Topic};
use crate::transcript::Speaker;
use std::time::Duration;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendTurn {
        speaker: Speaker,
        text: String,
        topic: Option<Topic>,
    },

    /// Start the timer for a pending reply
    ScheduleReply { reply_id: String, delay: Duration },

    /// Cancel every outstanding reply timer
    CancelReplies,

    /// Replace the transcript with a fresh greeting
    ResetTranscript,

    /// Empty the chat box buffer
    ClearDraft,

    /// Typing indicator changed
    NotifyComposing { composing: bool },
}

impl Effect {
    pub fn user_turn(text: impl Into<String>) -> Self {
        Effect::AppendTurn {
            speaker: Speaker::User,
            text: text.into(),
            topic: None,
        }
    }

    pub fn reply_turn(reply: Reply) -> Self {
        Effect::AppendTurn {
            speaker: Speaker::Assistant,
            text: reply.text.to_string(),
            topic: Some(reply.topic),
        }
    }
}
