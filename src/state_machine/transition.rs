//! Pure state transition function

use super::state::PendingReply;
use super::{ChatContext, ChatState, Effect, Event};
use crate::state_machine::event::Origin;
use std::collections::VecDeque;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
/// Every event is accepted: blank messages and stale timers are no-ops.
pub fn transition(state: &ChatState, context: &ChatContext, event: Event) -> TransitionResult {
    match (state, event) {
        // Blank input never reaches the transcript
        (_, Event::UserMessage { text, .. }) if text.trim().is_empty() => {
            TransitionResult::new(state.clone())
        }

        // Idle + UserMessage -> Composing
        (
            ChatState::Idle,
            Event::UserMessage {
                text,
                origin,
                reply_id,
            },
        ) => {
            let (entry, effects) = accept_message(context, &text, origin, reply_id);
            TransitionResult::new(ChatState::Composing {
                pending: VecDeque::from([entry]),
            })
            .with_effects(effects)
            .with_effect(Effect::NotifyComposing { composing: true })
        }

        // Composing + UserMessage -> Composing, reply queued behind the others
        (
            ChatState::Composing { pending },
            Event::UserMessage {
                text,
                origin,
                reply_id,
            },
        ) => {
            let (entry, effects) = accept_message(context, &text, origin, reply_id);
            let mut pending = pending.clone();
            pending.push_back(entry);
            TransitionResult::new(ChatState::Composing { pending }).with_effects(effects)
        }

        // Composing + ReplyDue -> append every due reply at the head of the queue
        (ChatState::Composing { pending }, Event::ReplyDue { reply_id }) => {
            let mut pending = pending.clone();
            let Some(entry) = pending.iter_mut().find(|p| p.reply_id == reply_id) else {
                // Timer from before a reset
                return TransitionResult::new(state.clone());
            };
            entry.due = true;

            let mut effects = Vec::new();
            while let Some(head) = pending.pop_front() {
                if !head.due {
                    pending.push_front(head);
                    break;
                }
                effects.push(Effect::reply_turn(head.reply));
            }

            if pending.is_empty() {
                TransitionResult::new(ChatState::Idle)
                    .with_effects(effects)
                    .with_effect(Effect::NotifyComposing { composing: false })
            } else {
                TransitionResult::new(ChatState::Composing { pending }).with_effects(effects)
            }
        }

        (ChatState::Idle, Event::ReplyDue { .. }) => TransitionResult::new(ChatState::Idle),

        // Reset from any state -> Idle with a fresh transcript
        (_, Event::Reset) => {
            let result = TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::CancelReplies)
                .with_effect(Effect::ResetTranscript);
            if state.is_composing() {
                result.with_effect(Effect::NotifyComposing { composing: false })
            } else {
                result
            }
        }
    }
}

/// Resolve the reply for a user message and build the effects that record
/// it.
fn accept_message(
    context: &ChatContext,
    text: &str,
    origin: Origin,
    reply_id: String,
) -> (PendingReply, Vec<Effect>) {
    let text = text.trim();
    let reply = context.rules_for(origin).resolve(text);

    let mut effects = Vec::with_capacity(3);
    if origin == Origin::ChatInput {
        effects.push(Effect::ClearDraft);
    }
    effects.push(Effect::user_turn(text));
    effects.push(Effect::ScheduleReply {
        reply_id: reply_id.clone(),
        delay: context.reply_delay,
    });

    (
        PendingReply {
            reply_id,
            reply,
            due: false,
        },
        effects,
    )
}
