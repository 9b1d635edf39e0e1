//! Responder state types

use super::event::Origin;
use crate::config::ChatConfig;
use crate::rules::{Reply, RuleTable, CHAT_RULES, TRIGGER_RULES};
use std::collections::VecDeque;
use std::time::Duration;

/// A reply whose timer has been scheduled but which is not yet in the
/// transcript
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReply {
    pub reply_id: String,
    pub reply: Reply,
    /// Timer fired, but an earlier reply is still pending
    pub due: bool,
}

/// Responder state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChatState {
    /// No reply pending
    #[default]
    Idle,

    /// At least one reply pending, in submission order
    Composing { pending: VecDeque<PendingReply> },
}

impl ChatState {
    pub fn is_composing(&self) -> bool {
        matches!(self, ChatState::Composing { .. })
    }

    pub fn pending_count(&self) -> usize {
        match self {
            ChatState::Idle => 0,
            ChatState::Composing { pending } => pending.len(),
        }
    }
}

/// Context for a responder (immutable configuration)
#[derive(Debug, Clone)]
pub struct ChatContext {
    pub session_id: String,
    /// Simulated thinking time before a reply is appended
    pub reply_delay: Duration,
    pub greeting: String,
    pub chat_rules: &'static RuleTable,
    pub trigger_rules: &'static RuleTable,
}

impl ChatContext {
    pub fn new(session_id: impl Into<String>, config: &ChatConfig) -> Self {
        Self {
            session_id: session_id.into(),
            reply_delay: config.reply_delay,
            greeting: config.greeting.clone(),
            chat_rules: &CHAT_RULES,
            trigger_rules: &TRIGGER_RULES,
        }
    }

    /// Table used for turns arriving from `origin`
    pub fn rules_for(&self, origin: Origin) -> &'static RuleTable {
        match origin {
            Origin::ChatInput | Origin::Preset => self.chat_rules,
            Origin::ServiceCard => self.trigger_rules,
        }
    }
}
