use std::{
    fmt::{self, Debug, Display, Formatter},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SNACKBAR_CHANNEL: &str = "snackbar";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NotificationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

/// Callback attached to a notification's single action affordance.
#[derive(Clone)]
pub struct ActionCallback(Arc<dyn Fn() + Send + Sync>);

impl ActionCallback {
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub fn invoke(&self) {
        (self.0)()
    }
}

impl Debug for ActionCallback {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("ActionCallback")
    }
}

/// A notification as submitted by a producer, before the dispatcher has
/// resolved its id and duration.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub id: Option<NotificationId>,
    pub message: String,
    pub kind: NotificationKind,
    pub duration_ms: Option<u64>,
    pub action_label: Option<String>,
    pub on_action: Option<ActionCallback>,
    pub modal_type: String,
}

impl NewNotification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: None,
            message: message.into(),
            kind: NotificationKind::default(),
            duration_ms: None,
            action_label: None,
            on_action: None,
            modal_type: SNACKBAR_CHANNEL.to_string(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message).with_kind(NotificationKind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message).with_kind(NotificationKind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message).with_kind(NotificationKind::Error)
    }

    pub fn with_id(mut self, id: impl Into<NotificationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_action(
        mut self,
        label: impl Into<String>,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.action_label = Some(label.into());
        self.on_action = Some(ActionCallback::new(callback));
        self
    }

    pub fn with_modal_type(mut self, modal_type: impl Into<String>) -> Self {
        self.modal_type = modal_type.into();
        self
    }

    pub(crate) fn resolve(self, default_duration_ms: u64) -> Notification {
        Notification {
            id: self.id.unwrap_or_else(NotificationId::generate),
            message: self.message,
            kind: self.kind,
            duration_ms: self.duration_ms.unwrap_or(default_duration_ms),
            action_label: self.action_label,
            on_action: self.on_action,
            modal_type: self.modal_type,
        }
    }
}

/// An enqueued notification. Immutable once it has entered the queue.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    id: NotificationId,
    message: String,
    kind: NotificationKind,
    duration_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    action_label: Option<String>,

    #[serde(skip)]
    on_action: Option<ActionCallback>,

    modal_type: String,
}

impl Notification {
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn action_label(&self) -> Option<&str> {
        self.action_label.as_deref()
    }

    pub fn has_action(&self) -> bool {
        self.on_action.is_some()
    }

    pub fn modal_type(&self) -> &str {
        &self.modal_type
    }

    pub(crate) fn into_action(self) -> Option<ActionCallback> {
        self.on_action
    }
}
