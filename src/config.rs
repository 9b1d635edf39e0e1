//! Responder configuration
//!
//! Read from the environment with fallbacks to the reference values, so
//! the demo host runs with no configuration at all.

use crate::rules::replies;
use std::time::Duration;

/// Simulated thinking time before a canned reply appears
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_BUS_CAPACITY: usize = 16;
pub const DEFAULT_UPDATE_CAPACITY: usize = 128;
/// Upper bound for either channel capacity; broadcast channels allocate
/// every slot up front
pub const MAX_CAPACITY: usize = 4096;

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub reply_delay: Duration,
    /// First turn of every transcript, restored on reset
    pub greeting: String,
    /// Buffered cross-component signals per listener
    pub bus_capacity: usize,
    /// Buffered transcript updates per subscriber
    pub update_capacity: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            greeting: replies::GREETING.to_string(),
            bus_capacity: DEFAULT_BUS_CAPACITY,
            update_capacity: DEFAULT_UPDATE_CAPACITY,
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or unparseable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let capacity = |key: &str| {
            parsed(key)
                .and_then(|n| usize::try_from(n).ok())
                .filter(|n| (1..=MAX_CAPACITY).contains(n))
        };

        Self {
            reply_delay: parsed("PORTFOLIO_CHAT_REPLY_DELAY_MS")
                .map_or(defaults.reply_delay, Duration::from_millis),
            greeting: lookup("PORTFOLIO_CHAT_GREETING")
                .filter(|g| !g.trim().is_empty())
                .unwrap_or(defaults.greeting),
            bus_capacity: capacity("PORTFOLIO_CHAT_BUS_CAPACITY")
                .unwrap_or(defaults.bus_capacity),
            update_capacity: capacity("PORTFOLIO_CHAT_UPDATE_CAPACITY")
                .unwrap_or(defaults.update_capacity),
        }
    }

    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }
}
