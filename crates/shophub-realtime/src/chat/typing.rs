//! Transient "agent is typing" indicator.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared indicator state.
#[derive(Debug, Default)]
struct TypingState {
    /// Whether the remote party is currently typing.
    active: AtomicBool,
    /// Bumped on every typing event so a stale clear timer can tell it
    /// has been superseded.
    generation: AtomicU64,
}

/// A flag that sets on every typing event and clears itself after a
/// fixed window unless refreshed.
#[derive(Debug, Clone)]
pub struct TypingIndicator {
    /// Shared state.
    state: Arc<TypingState>,
    /// Auto-clear window.
    clear_after: Duration,
}

impl TypingIndicator {
    /// Create an indicator with the given auto-clear window.
    pub fn new(clear_after: Duration) -> Self {
        Self {
            state: Arc::new(TypingState::default()),
            clear_after,
        }
    }

    /// Whether the remote party is typing right now.
    pub fn is_typing(&self) -> bool {
        self.state.active.load(Ordering::SeqCst)
    }

    /// Record a typing event: raise the flag and restart the clear
    /// window.
    pub fn touch(&self) {
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.active.store(true, Ordering::SeqCst);

        let state = Arc::clone(&self.state);
        let clear_after = self.clear_after;
        tokio::spawn(async move {
            tokio::time::sleep(clear_after).await;
            // Only clear if no further typing event superseded this timer.
            if state.generation.load(Ordering::SeqCst) == generation {
                state.active.store(false, Ordering::SeqCst);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_clears_after_window() {
        let typing = TypingIndicator::new(Duration::from_secs(3));
        typing.touch();
        assert!(typing.is_typing());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(!typing.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_extends_window() {
        let typing = TypingIndicator::new(Duration::from_secs(3));
        typing.touch();

        tokio::time::sleep(Duration::from_secs(2)).await;
        typing.touch();

        // The first timer has expired, but the refresh superseded it.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(typing.is_typing());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!typing.is_typing());
    }
}
