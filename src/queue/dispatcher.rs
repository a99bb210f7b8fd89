use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::{
    models::{
        history::DismissalRecord,
        notification::{ActionCallback, NewNotification, NotificationId},
        queue::QueueConfig,
        snapshot::QueueSnapshot,
        status::{DismissReason, EnqueueOutcome},
    },
    queue::store::NotificationStore,
};

/// The mutation surface of the notification queue.
///
/// Every operation is a single total transition: none of them fail, and
/// calling one in a state where it does not apply is a no-op.
#[derive(Debug, Default)]
pub struct Dispatcher {
    store: NotificationStore,
    history: VecDeque<DismissalRecord>,
    config: QueueConfig,
}

impl Dispatcher {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            store: NotificationStore::new(),
            history: VecDeque::new(),
            config,
        }
    }

    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.store.snapshot()
    }

    /// Most recent dismissals, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &DismissalRecord> {
        self.history.iter()
    }

    pub fn enqueue(&mut self, notification: NewNotification) -> EnqueueOutcome {
        let notification = notification.resolve(self.config.default_duration_ms);
        let id = notification.id().clone();

        if self.store.contains(&id) || self.was_dismissed(&id) {
            warn!(notification_id = %id, "Duplicate notification id, ignoring");
            return EnqueueOutcome::Duplicate(id);
        }

        // Behind an occupied slot, or behind older entries awaiting advance.
        if self.store.current().is_some() || self.store.has_pending() {
            self.store.push_pending(notification);
            debug!(
                notification_id = %id,
                pending = self.store.pending_len(),
                "Notification queued"
            );
            EnqueueOutcome::Queued(id)
        } else {
            info!(
                notification_id = %id,
                kind = %notification.kind(),
                "Showing notification"
            );
            self.store.show(notification);
            EnqueueOutcome::Shown(id)
        }
    }

    /// Moves the oldest pending notification into an empty slot.
    pub fn advance(&mut self) -> Option<NotificationId> {
        if self.store.current().is_some() {
            return None;
        }

        let next = self.store.pop_pending()?;
        let id = next.id().clone();

        info!(
            notification_id = %id,
            pending = self.store.pending_len(),
            "Advanced to next notification"
        );

        self.store.show(next);
        Some(id)
    }

    pub fn dismiss(&mut self) -> Option<NotificationId> {
        self.dismiss_with(DismissReason::User)
    }

    pub fn dismiss_with(&mut self, reason: DismissReason) -> Option<NotificationId> {
        let dismissed = self.store.clear_current()?;
        let id = dismissed.id().clone();
        self.record(id.clone(), reason);
        Some(id)
    }

    /// Dismisses only while `id` still occupies the slot, so a timer armed for
    /// an earlier occupant cannot clear a newer one.
    pub fn dismiss_if_current(&mut self, id: &NotificationId, reason: DismissReason) -> bool {
        let Some(current_id) = self.store.current().map(|n| n.id().clone()) else {
            return false;
        };

        if &current_id != id {
            debug!(
                notification_id = %id,
                current_id = %current_id,
                "Stale dismissal ignored"
            );
            return false;
        }

        self.dismiss_with(reason).is_some()
    }

    /// Dismisses only while the slot still holds the given occupancy. Unlike
    /// [`Self::dismiss_if_current`] this tells apart two occupancies that
    /// share an id.
    pub fn dismiss_occupancy(&mut self, occupancy: u64, reason: DismissReason) -> bool {
        if self.store.current().is_none() || self.store.occupancy() != occupancy {
            debug!(
                occupancy,
                current_occupancy = self.store.occupancy(),
                "Stale dismissal ignored"
            );
            return false;
        }

        self.dismiss_with(reason).is_some()
    }

    /// Dismisses the current notification and hands back its action callback.
    ///
    /// Returns `None` (and leaves the slot alone) unless `id` is current and
    /// carries an action.
    pub fn take_action(&mut self, id: &NotificationId) -> Option<ActionCallback> {
        let current = self.store.current()?;
        if current.id() != id || !current.has_action() {
            return None;
        }

        let notification = self.store.clear_current()?;
        self.record(id.clone(), DismissReason::Action);
        notification.into_action()
    }

    fn was_dismissed(&self, id: &NotificationId) -> bool {
        self.history.iter().any(|record| &record.id == id)
    }

    fn record(&mut self, id: NotificationId, reason: DismissReason) {
        info!(notification_id = %id, reason = %reason, "Notification dismissed");

        if self.config.dismissed_history_limit == 0 {
            return;
        }

        while self.history.len() >= self.config.dismissed_history_limit {
            self.history.pop_front();
        }
        self.history.push_back(DismissalRecord::new(id, reason));
    }
}
