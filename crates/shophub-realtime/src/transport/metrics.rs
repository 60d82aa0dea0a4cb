//! Transport metrics counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Transport-level metrics counters.
#[derive(Debug, Default)]
pub struct TransportMetrics {
    /// Total connections established.
    pub connections_opened: AtomicU64,
    /// Total connections lost (closed or errored).
    pub connections_lost: AtomicU64,
    /// Total events received and parsed.
    pub events_received: AtomicU64,
    /// Total inbound frames dropped as malformed.
    pub frames_dropped: AtomicU64,
    /// Total commands sent.
    pub commands_sent: AtomicU64,
}

impl TransportMetrics {
    /// Create new zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an established connection.
    pub fn connection_opened(&self) {
        self.connections_opened.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lost connection.
    pub fn connection_lost(&self) {
        self.connections_lost.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a parsed inbound event.
    pub fn event_received(&self) {
        self.events_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a dropped malformed frame.
    pub fn frame_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a sent command.
    pub fn command_sent(&self) {
        self.commands_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_opened: self.connections_opened.load(Ordering::Relaxed),
            connections_lost: self.connections_lost.load(Ordering::Relaxed),
            events_received: self.events_received.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            commands_sent: self.commands_sent.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total connections established.
    pub connections_opened: u64,
    /// Total connections lost.
    pub connections_lost: u64,
    /// Total events received and parsed.
    pub events_received: u64,
    /// Total frames dropped as malformed.
    pub frames_dropped: u64,
    /// Total commands sent.
    pub commands_sent: u64,
}
