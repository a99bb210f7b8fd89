use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{notification::NotificationId, status::DismissReason};

/// Record of a notification leaving the current slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DismissalRecord {
    pub id: NotificationId,
    pub reason: DismissReason,
    pub dismissed_at: DateTime<Utc>,
}

impl DismissalRecord {
    pub fn new(id: NotificationId, reason: DismissReason) -> Self {
        Self {
            id,
            reason,
            dismissed_at: Utc::now(),
        }
    }
}
