//! Chat runtime executor

use super::handle::{ChatHandle, MountedChat};
use super::{ChatUpdate, Command};
use crate::bus::{ChatTrigger, SignalBus, TriggerSubscription};
use crate::config::{ChatConfig, MAX_CAPACITY};
use crate::state_machine::{transition, ChatContext, ChatState, Effect, Event, Origin};
use crate::transcript::{ConversationSnapshot, Speaker, Transcript, Turn};
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 32;

/// Owns one conversation and runs the effects its state machine produces
pub struct ChatRuntime {
    context: ChatContext,
    state: ChatState,
    transcript: Transcript,
    /// Chat box input buffer
    draft: String,
    command_rx: mpsc::Receiver<Command>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    /// Cross-component signals, if mounted on a page bus
    triggers: Option<TriggerSubscription>,
    updates_tx: broadcast::Sender<ChatUpdate>,
    snapshot_tx: watch::Sender<ConversationSnapshot>,
    /// Parent of every outstanding reply timer; replaced on reset
    reply_timers: CancellationToken,
    shutdown: CancellationToken,
}

impl ChatRuntime {
    /// Start a responder task. When `bus` is given the responder listens
    /// for cross-component signals until it is unmounted.
    pub fn mount(config: &ChatConfig, bus: Option<&SignalBus>) -> MountedChat {
        let session_id = uuid::Uuid::new_v4().to_string();
        let context = ChatContext::new(session_id.clone(), config);

        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (updates_tx, _) = broadcast::channel(config.update_capacity.clamp(1, MAX_CAPACITY));

        let transcript = Transcript::new(context.greeting.clone());
        let (snapshot_tx, snapshot_rx) = watch::channel(ConversationSnapshot {
            turns: transcript.turns().to_vec(),
            is_composing: false,
            draft: String::new(),
        });

        let shutdown = CancellationToken::new();
        let runtime = Self {
            context,
            state: ChatState::Idle,
            transcript,
            draft: String::new(),
            command_rx,
            event_rx,
            event_tx,
            // Subscribe before spawning so signals emitted right after
            // mount are not lost
            triggers: bus.map(SignalBus::subscribe),
            updates_tx: updates_tx.clone(),
            snapshot_tx,
            reply_timers: shutdown.child_token(),
            shutdown: shutdown.clone(),
        };

        let task = tokio::spawn(runtime.run());
        let handle = ChatHandle::new(session_id, command_tx, updates_tx, snapshot_rx);
        MountedChat::new(handle, shutdown, task)
    }

    async fn run(mut self) {
        tracing::info!(
            session_id = %self.context.session_id,
            listening = self.triggers.is_some(),
            "Starting chat runtime"
        );

        loop {
            tokio::select! {
                () = self.shutdown.cancelled() => break,
                Some(command) = self.command_rx.recv() => {
                    self.handle_command(command);
                }
                Some(event) = self.event_rx.recv() => {
                    self.process_event(event);
                }
                trigger = next_trigger(self.triggers.as_mut()) => match trigger {
                    Some(ChatTrigger { message }) => {
                        self.process_event(Event::user_message(message, Origin::ServiceCard));
                    }
                    None => {
                        tracing::debug!(session_id = %self.context.session_id, "Signal bus closed");
                        self.triggers = None;
                    }
                },
            }
        }

        self.reply_timers.cancel();
        self.triggers = None;
        tracing::info!(session_id = %self.context.session_id, "Chat runtime stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Submit { text, origin } => {
                self.process_event(Event::user_message(text, origin));
            }
            Command::EditDraft { text } => {
                if self.draft != text {
                    self.draft = text;
                    let _ = self.updates_tx.send(ChatUpdate::DraftChanged {
                        draft: self.draft.clone(),
                    });
                    self.publish_snapshot();
                }
            }
            Command::SubmitDraft => {
                let text = self.draft.clone();
                self.process_event(Event::user_message(text, Origin::ChatInput));
            }
            Command::Reset => self.process_event(Event::Reset),
        }
    }

    fn process_event(&mut self, event: Event) {
        if let Event::UserMessage {
            origin, reply_id, ..
        } = &event
        {
            tracing::debug!(
                session_id = %self.context.session_id,
                origin = origin.as_str(),
                table = self.context.rules_for(*origin).name,
                reply_id = %reply_id,
                "User message received"
            );
        }

        // Pure state transition
        let result = transition(&self.state, &self.context, event);
        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }

        self.publish_snapshot();
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendTurn {
                speaker,
                text,
                topic,
            } => {
                let turn = Turn::new(speaker, text, topic);
                if let (Speaker::Assistant, Some(topic)) = (speaker, topic) {
                    tracing::info!(
                        session_id = %self.context.session_id,
                        topic = %topic,
                        "Canned reply appended"
                    );
                }
                self.transcript.push(turn.clone());
                let _ = self.updates_tx.send(ChatUpdate::TurnAppended { turn });
            }

            Effect::ScheduleReply { reply_id, delay } => {
                let cancel = self.reply_timers.child_token();
                let event_tx = self.event_tx.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        () = cancel.cancelled() => {
                            tracing::debug!(reply_id = %reply_id, "Reply timer cancelled");
                        }
                        () = tokio::time::sleep(delay) => {
                            let _ = event_tx.send(Event::ReplyDue { reply_id }).await;
                        }
                    }
                });
            }

            Effect::CancelReplies => {
                self.reply_timers.cancel();
                self.reply_timers = self.shutdown.child_token();
            }

            Effect::ResetTranscript => {
                let greeting = self.transcript.reset().clone();
                tracing::info!(session_id = %self.context.session_id, "Transcript reset");
                let _ = self
                    .updates_tx
                    .send(ChatUpdate::TranscriptReset { greeting });
            }

            Effect::ClearDraft => {
                if !self.draft.is_empty() {
                    self.draft.clear();
                    let _ = self.updates_tx.send(ChatUpdate::DraftChanged {
                        draft: String::new(),
                    });
                }
            }

            Effect::NotifyComposing { composing } => {
                let _ = self
                    .updates_tx
                    .send(ChatUpdate::ComposingChanged { composing });
            }
        }
    }

    fn publish_snapshot(&self) {
        self.snapshot_tx.send_replace(ConversationSnapshot {
            turns: self.transcript.turns().to_vec(),
            is_composing: self.state.is_composing(),
            draft: self.draft.clone(),
        });
    }
}

async fn next_trigger(subscription: Option<&mut TriggerSubscription>) -> Option<ChatTrigger> {
    match subscription {
        Some(subscription) => subscription.recv().await,
        None => std::future::pending().await,
    }
}
