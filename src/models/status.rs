use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

use crate::models::notification::NotificationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueState {
    Empty,
    Showing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "id", rename_all = "lowercase")]
pub enum EnqueueOutcome {
    Shown(NotificationId),
    Queued(NotificationId),
    Duplicate(NotificationId),
}

impl EnqueueOutcome {
    pub fn id(&self) -> &NotificationId {
        match self {
            EnqueueOutcome::Shown(id)
            | EnqueueOutcome::Queued(id)
            | EnqueueOutcome::Duplicate(id) => id,
        }
    }

    pub fn is_accepted(&self) -> bool {
        !matches!(self, EnqueueOutcome::Duplicate(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DismissReason {
    Timeout,
    User,
    Action,
}

impl Display for QueueState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            QueueState::Empty => write!(f, "empty"),
            QueueState::Showing => write!(f, "showing"),
        }
    }
}

impl Display for DismissReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DismissReason::Timeout => write!(f, "timeout"),
            DismissReason::User => write!(f, "user"),
            DismissReason::Action => write!(f, "action"),
        }
    }
}
