//! Chat session configuration.

use serde::{Deserialize, Serialize};

/// Chat session controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Seconds before the "agent is typing" flag auto-clears.
    #[serde(default = "default_typing_clear")]
    pub typing_clear_seconds: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_clear_seconds: default_typing_clear(),
        }
    }
}

fn default_typing_clear() -> u64 {
    3
}
