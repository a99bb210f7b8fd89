use std::collections::VecDeque;

use crate::models::{
    notification::{Notification, NotificationId},
    snapshot::QueueSnapshot,
    status::QueueState,
};

/// Pending notifications plus the single "current" slot.
///
/// Read access is public; every mutation goes through
/// [`Dispatcher`](crate::queue::dispatcher::Dispatcher) so that the slot and
/// the `visible` flag always change together.
#[derive(Debug, Default)]
pub struct NotificationStore {
    pending: VecDeque<Notification>,
    current: Option<Notification>,
    visible: bool,
    occupancy: u64,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> QueueState {
        if self.current.is_some() {
            QueueState::Showing
        } else {
            QueueState::Empty
        }
    }

    /// Number of times the slot has been filled. Each occupancy gets its own
    /// value even when an id comes back.
    pub fn occupancy(&self) -> u64 {
        self.occupancy
    }

    /// Whether `id` is current or waiting.
    pub fn contains(&self, id: &NotificationId) -> bool {
        self.current.as_ref().is_some_and(|n| n.id() == id)
            || self.pending.iter().any(|n| n.id() == id)
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            state: self.state(),
            current: self.current.clone(),
            pending: self.pending.iter().map(|n| n.id().clone()).collect(),
            visible: self.visible,
            occupancy: self.occupancy,
        }
    }

    pub(crate) fn push_pending(&mut self, notification: Notification) {
        self.pending.push_back(notification);
    }

    pub(crate) fn pop_pending(&mut self) -> Option<Notification> {
        self.pending.pop_front()
    }

    pub(crate) fn show(&mut self, notification: Notification) {
        self.current = Some(notification);
        self.visible = true;
        self.occupancy += 1;
    }

    pub(crate) fn clear_current(&mut self) -> Option<Notification> {
        self.visible = false;
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::NewNotification;

    fn notification(id: &str) -> Notification {
        NewNotification::new(format!("message {id}"))
            .with_id(id)
            .resolve(3000)
    }

    #[test]
    fn new_store_is_empty() {
        let store = NotificationStore::new();

        assert_eq!(store.state(), QueueState::Empty);
        assert!(store.current().is_none());
        assert!(!store.has_pending());
        assert!(!store.is_visible());
    }

    #[test]
    fn show_sets_current_and_visible_together() {
        let mut store = NotificationStore::new();
        store.show(notification("1"));

        assert_eq!(store.state(), QueueState::Showing);
        assert!(store.is_visible());
        assert_eq!(store.current().map(|n| n.id().as_str()), Some("1"));
    }

    #[test]
    fn clear_current_resets_visible() {
        let mut store = NotificationStore::new();
        store.show(notification("1"));

        let cleared = store.clear_current();

        assert_eq!(cleared.map(|n| n.id().clone()), Some(NotificationId::from("1")));
        assert!(!store.is_visible());
        assert!(store.clear_current().is_none());
    }

    #[test]
    fn each_show_is_a_new_occupancy() {
        let mut store = NotificationStore::new();
        assert_eq!(store.occupancy(), 0);

        store.show(notification("1"));
        store.clear_current();
        store.show(notification("1"));

        assert_eq!(store.occupancy(), 2);
        assert_eq!(store.snapshot().occupant(), Some(2));
        store.clear_current();
        assert_eq!(store.snapshot().occupant(), None);
    }

    #[test]
    fn pending_is_fifo() {
        let mut store = NotificationStore::new();
        store.push_pending(notification("a"));
        store.push_pending(notification("b"));

        assert_eq!(store.pending_len(), 2);
        assert_eq!(store.pop_pending().map(|n| n.id().clone()), Some("a".into()));
        assert_eq!(store.pop_pending().map(|n| n.id().clone()), Some("b".into()));
        assert!(store.pop_pending().is_none());
    }

    #[test]
    fn contains_checks_current_and_pending() {
        let mut store = NotificationStore::new();
        store.show(notification("1"));
        store.push_pending(notification("2"));

        assert!(store.contains(&"1".into()));
        assert!(store.contains(&"2".into()));
        assert!(!store.contains(&"3".into()));
    }

    #[test]
    fn snapshot_lists_pending_ids_in_order() {
        let mut store = NotificationStore::new();
        store.show(notification("1"));
        store.push_pending(notification("2"));
        store.push_pending(notification("3"));

        let snapshot = store.snapshot();

        assert_eq!(snapshot.state, QueueState::Showing);
        assert_eq!(snapshot.current_id().map(|id| id.as_str()), Some("1"));
        assert_eq!(
            snapshot.pending,
            vec![NotificationId::from("2"), NotificationId::from("3")]
        );
        assert!(snapshot.visible);
    }
}
