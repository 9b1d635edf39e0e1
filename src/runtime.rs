//! Runtime for mounted chat responders
//!
//! A mounted responder is one tokio task that owns its state machine,
//! transcript and reply timers. Handles talk to it over a command channel;
//! rendering layers watch snapshots or stream incremental updates.

mod executor;
mod handle;


pub use executor::ChatRuntime;
pub use handle::{ChatHandle, MountedChat};

use crate::state_machine::Origin;
use crate::transcript::Turn;
use serde_json::json;

/// Requests from handles to the runtime task
#[derive(Debug, Clone)]
pub enum Command {
    Submit { text: String, origin: Origin },
    EditDraft { text: String },
    SubmitDraft,
    Reset,
}

/// Incremental transcript updates for a rendering layer
#[derive(Debug, Clone, PartialEq)]
pub enum ChatUpdate {
    TurnAppended { turn: Turn },
    ComposingChanged { composing: bool },
    TranscriptReset { greeting: Turn },
    DraftChanged { draft: String },
}

impl ChatUpdate {
    pub fn event_type(&self) -> &'static str {
        match self {
            ChatUpdate::TurnAppended { .. } => "turn_appended",
            ChatUpdate::ComposingChanged { .. } => "composing_changed",
            ChatUpdate::TranscriptReset { .. } => "transcript_reset",
            ChatUpdate::DraftChanged { .. } => "draft_changed",
        }
    }

    /// JSON form, tagged by `type`
    pub fn to_json(&self) -> serde_json::Value {
        let event_type = self.event_type();
        match self {
            ChatUpdate::TurnAppended { turn } => json!({
                "type": event_type,
                "turn": turn
            }),
            ChatUpdate::ComposingChanged { composing } => json!({
                "type": event_type,
                "composing": composing
            }),
            ChatUpdate::TranscriptReset { greeting } => json!({
                "type": event_type,
                "greeting": greeting
            }),
            ChatUpdate::DraftChanged { draft } => json!({
                "type": event_type,
                "draft": draft
            }),
        }
    }
}
