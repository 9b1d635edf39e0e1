//! Portfolio chat - keyword-matched canned replies with a simulated typing delay
//!
//! A responder is mounted as a tokio task that owns its conversation. Input
//! arrives from the chat box, quick-action presets or service cards via the
//! page [`bus`]; a pure state machine decides what happens and the runtime
//! executes the resulting effects.

pub mod bus;
pub mod config;
pub mod markup;
pub mod page;
pub mod rules;
pub mod runtime;
pub mod services;
pub mod state_machine;
pub mod transcript;

pub use bus::SignalBus;
pub use config::ChatConfig;
pub use page::PageSession;
pub use runtime::{ChatHandle, ChatRuntime, ChatUpdate, MountedChat};
