use serde::Serialize;

use crate::models::{
    notification::{Notification, NotificationId},
    status::QueueState,
};

/// Read-only copy of the queue published after every mutation.
#[derive(Debug, Clone, Serialize)]
pub struct QueueSnapshot {
    pub state: QueueState,
    pub current: Option<Notification>,
    pub pending: Vec<NotificationId>,
    pub visible: bool,
    pub occupancy: u64,
}

impl QueueSnapshot {
    pub fn current_id(&self) -> Option<&NotificationId> {
        self.current.as_ref().map(Notification::id)
    }

    /// Occupancy number of the filled slot, `None` when the slot is empty.
    pub fn occupant(&self) -> Option<u64> {
        self.current.as_ref().map(|_| self.occupancy)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl Default for QueueSnapshot {
    fn default() -> Self {
        Self {
            state: QueueState::Empty,
            current: None,
            pending: Vec::new(),
            visible: false,
            occupancy: 0,
        }
    }
}
