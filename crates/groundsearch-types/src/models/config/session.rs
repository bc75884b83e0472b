//! Conversation session retention.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Bounds on the in-memory session store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct SessionConfig {
    /// Idle time after which a session is dropped
    #[validate(range(min = 1_u64))]
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
    /// Maximum live sessions; least recently used are evicted first
    #[validate(range(min = 1_usize))]
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// How often the background sweeper removes expired sessions
    #[validate(range(min = 1_u64))]
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            max_sessions: default_max_sessions(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_ttl() -> u64 {
    60 * 60
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_sweep_interval() -> u64 {
    60
}
