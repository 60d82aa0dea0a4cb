//! Subscriber registry for notification list fan-out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use shophub_entity::notification::Notification;

/// Handle identifying a registered subscriber. Returned by `subscribe`
/// and consumed by `unsubscribe`, making registration and teardown
/// symmetric.
pub type SubscriberId = u64;

/// A registered callback receiving list snapshots.
type Callback = Arc<dyn Fn(&[Notification]) + Send + Sync>;

/// Registry of subscriber callbacks, invoked in registration order.
pub struct SubscriberRegistry {
    /// Registered callbacks, oldest first.
    subscribers: Mutex<Vec<(SubscriberId, Callback)>>,
    /// Next handle value.
    next_id: AtomicU64,
}

impl SubscriberRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a callback. Returns its unsubscribe handle.
    pub fn add(&self, callback: impl Fn(&[Notification]) + Send + Sync + 'static) -> SubscriberId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subscribers.push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback by handle. Returns whether it was registered.
    pub fn remove(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() < before
    }

    /// Invoke every callback with the snapshot, in registration order.
    ///
    /// Callbacks run synchronously within the dispatch. The lock is not
    /// held during invocation so a callback may subscribe or unsubscribe;
    /// such changes take effect from the next fan-out.
    pub fn notify(&self, snapshot: &[Notification]) {
        let callbacks: Vec<Callback> = {
            let subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
            subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };

        for callback in callbacks {
            callback(snapshot);
        }
    }

    /// Number of registered subscribers.
    pub fn count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_notify_in_registration_order() {
        let registry = SubscriberRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            registry.add(move |_| order.lock().unwrap().push(label));
        }

        registry.notify(&[]);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe_is_symmetric() {
        let registry = SubscriberRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = Arc::clone(&calls);
        let id = registry.add(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.notify(&[]);
        assert!(registry.remove(id));
        registry.notify(&[]);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!registry.remove(id));
    }
}
