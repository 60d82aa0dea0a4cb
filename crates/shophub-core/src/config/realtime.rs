//! Real-time transport configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// WebSocket endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Delay between reconnection attempts in seconds.
    ///
    /// The retry policy is fixed-delay with unbounded attempts.
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_seconds: u64,
    /// Internal buffer size for the inbound event broadcast channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer_size: usize,
    /// Internal buffer size for the outbound command channel.
    #[serde(default = "default_command_buffer")]
    pub command_buffer_size: usize,
    /// Maximum accepted inbound frame size in bytes.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            reconnect_delay_seconds: default_reconnect_delay(),
            event_buffer_size: default_event_buffer(),
            command_buffer_size: default_command_buffer(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

fn default_endpoint() -> String {
    "ws://127.0.0.1:4100/realtime".to_string()
}

fn default_reconnect_delay() -> u64 {
    5
}

fn default_event_buffer() -> usize {
    256
}

fn default_command_buffer() -> usize {
    64
}

fn default_max_frame_bytes() -> usize {
    65_536
}
