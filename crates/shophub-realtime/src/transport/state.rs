//! Connection state machine.

use std::fmt;

/// State of the transport connection.
///
/// The lifecycle is `Disconnected → Connecting → Connected →
/// Disconnected`, driven by the reconnect loop. Observable through the
/// transport's watch channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected; a reconnect attempt may be scheduled.
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// The connection is open.
    Connected,
}

impl ConnectionState {
    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
