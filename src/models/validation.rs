use anyhow::{Result, anyhow};

use crate::models::notification::Notification;

pub fn validate_presentable(notification: &Notification, channel: &str) -> Result<()> {
    if notification.message().trim().is_empty() {
        return Err(anyhow!("Notification message cannot be empty"));
    }

    if notification.modal_type() != channel {
        return Err(anyhow!(
            "Notification targets channel '{}', presenter serves '{}'",
            notification.modal_type(),
            channel
        ));
    }

    Ok(())
}

/// Rendering guard: true only for a current notification this channel can show.
pub fn should_render(current: Option<&Notification>, channel: &str) -> bool {
    current.is_some_and(|notification| validate_presentable(notification, channel).is_ok())
}
