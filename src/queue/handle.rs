use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use crate::{
    models::{
        history::DismissalRecord,
        notification::{NewNotification, NotificationId},
        queue::QueueConfig,
        snapshot::QueueSnapshot,
        status::{DismissReason, EnqueueOutcome},
    },
    queue::dispatcher::Dispatcher,
};

/// Cloneable, thread-safe front for a [`Dispatcher`].
///
/// Each call holds the dispatcher lock for exactly one transition and
/// publishes the resulting snapshot to subscribers before releasing it.
#[derive(Clone)]
pub struct NotificationHandle {
    dispatcher: Arc<Mutex<Dispatcher>>,
    updates: watch::Sender<QueueSnapshot>,
}

impl NotificationHandle {
    pub fn new(config: QueueConfig) -> Self {
        let dispatcher = Dispatcher::new(config);
        let (updates, _) = watch::channel(dispatcher.snapshot());

        Self {
            dispatcher: Arc::new(Mutex::new(dispatcher)),
            updates,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<QueueSnapshot> {
        self.updates.subscribe()
    }

    pub fn config(&self) -> QueueConfig {
        self.lock().config().clone()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.lock().snapshot()
    }

    pub fn pending_len(&self) -> usize {
        self.lock().store().pending_len()
    }

    pub fn history(&self) -> Vec<DismissalRecord> {
        self.lock().history().cloned().collect()
    }

    pub fn enqueue(&self, notification: NewNotification) -> EnqueueOutcome {
        self.mutate(|dispatcher| dispatcher.enqueue(notification))
    }

    pub fn advance(&self) -> Option<NotificationId> {
        self.mutate(Dispatcher::advance)
    }

    pub fn dismiss(&self) -> Option<NotificationId> {
        self.mutate(Dispatcher::dismiss)
    }

    pub fn dismiss_if_current(&self, id: &NotificationId, reason: DismissReason) -> bool {
        self.mutate(|dispatcher| dispatcher.dismiss_if_current(id, reason))
    }

    pub fn dismiss_occupancy(&self, occupancy: u64, reason: DismissReason) -> bool {
        self.mutate(|dispatcher| dispatcher.dismiss_occupancy(occupancy, reason))
    }

    /// Runs the action of the current notification, at most once.
    ///
    /// The callback runs after the lock is released so it may enqueue.
    pub fn trigger_action(&self, id: &NotificationId) -> bool {
        let callback = self.mutate(|dispatcher| dispatcher.take_action(id));

        match callback {
            Some(callback) => {
                debug!(notification_id = %id, "Invoking notification action");
                callback.invoke();
                true
            }
            None => false,
        }
    }

    /// Whether the dispatcher lock was poisoned by a panicking caller.
    pub fn is_poisoned(&self) -> bool {
        self.dispatcher.is_poisoned()
    }

    fn mutate<T>(&self, transition: impl FnOnce(&mut Dispatcher) -> T) -> T {
        let mut dispatcher = self.lock();
        let result = transition(&mut *dispatcher);
        self.updates.send_replace(dispatcher.snapshot());
        result
    }

    fn lock(&self) -> MutexGuard<'_, Dispatcher> {
        // Transitions never leave the store half-updated, so a poisoned lock
        // still guards a consistent dispatcher.
        self.dispatcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NotificationHandle {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{
        models::health::HealthStatus,
        queue::{health::HealthChecker, presenter::DriverStatus},
    };

    #[test]
    fn poisoned_lock_is_recovered_and_reported_degraded() {
        let handle = NotificationHandle::default();
        handle.enqueue(NewNotification::new("Saved").with_id("saved"));

        let poisoner = handle.clone();
        let panicked = thread::spawn(move || {
            let _guard = poisoner.dispatcher.lock();
            panic!("caller panicked while holding the dispatcher");
        })
        .join()
        .is_err();

        assert!(panicked);
        assert!(handle.is_poisoned());

        assert_eq!(handle.dismiss(), Some(NotificationId::from("saved")));
        assert!(handle.snapshot().current.is_none());

        let health = HealthChecker::new(handle, DriverStatus::default()).check_all();
        let dispatcher = &health.checks["dispatcher"];

        assert_eq!(dispatcher.status, HealthStatus::Degraded);
        assert_eq!(dispatcher.pending, Some(0));
        assert_eq!(health.status, HealthStatus::Unhealthy);
    }
}
