use serde::{Deserialize, Serialize};

use crate::models::notification::{NewNotification, NotificationId, NotificationKind, SNACKBAR_CHANNEL};

/// Body of `POST /notifications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub message: String,

    #[serde(default)]
    pub kind: NotificationKind,

    #[serde(default)]
    pub duration_ms: Option<u64>,

    #[serde(default)]
    pub action_label: Option<String>,

    #[serde(default = "default_modal_type")]
    pub modal_type: String,
}

fn default_modal_type() -> String {
    SNACKBAR_CHANNEL.to_string()
}

impl From<EnqueueRequest> for NewNotification {
    fn from(request: EnqueueRequest) -> Self {
        NewNotification {
            id: request.id.map(NotificationId::from),
            message: request.message,
            kind: request.kind,
            duration_ms: request.duration_ms,
            action_label: request.action_label,
            on_action: None,
            modal_type: request.modal_type,
        }
    }
}
