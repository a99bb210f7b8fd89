use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::time::{Duration, Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::{
    models::{
        notification::{Notification, NotificationId},
        snapshot::QueueSnapshot,
        status::DismissReason,
        validation::validate_presentable,
    },
    queue::handle::NotificationHandle,
};

/// A UI surface that renders the current notification of one channel.
pub trait Presenter: Send + 'static {
    fn channel(&self) -> &str;

    fn show(&mut self, notification: &Notification);

    fn hide(&mut self, id: &NotificationId);
}

/// Presenter for headless hosts: every transition becomes a log line.
pub struct LogPresenter {
    channel: String,
}

impl LogPresenter {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }
}

impl Presenter for LogPresenter {
    fn channel(&self) -> &str {
        &self.channel
    }

    fn show(&mut self, notification: &Notification) {
        info!(
            notification_id = %notification.id(),
            kind = %notification.kind(),
            message = notification.message(),
            action = notification.action_label(),
            "Presenting notification"
        );
    }

    fn hide(&mut self, id: &NotificationId) {
        info!(notification_id = %id, "Hiding notification");
    }
}

/// Shared flag reporting whether a driver loop is running.
#[derive(Debug, Clone, Default)]
pub struct DriverStatus(Arc<AtomicBool>);

impl DriverStatus {
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set_running(&self, running: bool) {
        self.0.store(running, Ordering::SeqCst);
    }
}

struct Deadline {
    occupancy: u64,
    id: NotificationId,
    at: Instant,
}

/// Owns the presenter side of the queue contract: rendering the current
/// occupant, its auto-dismiss timer, and the advance that follows a dismissal.
pub struct PresenterDriver<P> {
    handle: NotificationHandle,
    presenter: P,
    status: DriverStatus,
    occupant: Option<u64>,
    shown: Option<NotificationId>,
    deadline: Option<Deadline>,
}

impl<P: Presenter> PresenterDriver<P> {
    pub fn new(handle: NotificationHandle, presenter: P) -> Self {
        Self {
            handle,
            presenter,
            status: DriverStatus::default(),
            occupant: None,
            shown: None,
            deadline: None,
        }
    }

    pub fn status(&self) -> DriverStatus {
        self.status.clone()
    }

    /// Drives the queue until `shutdown` resolves.
    pub async fn run_until<F>(mut self, shutdown: F) -> P
    where
        F: Future<Output = ()>,
    {
        let mut updates = self.handle.subscribe();
        tokio::pin!(shutdown);

        self.status.set_running(true);
        info!(channel = self.presenter.channel(), "Presenter driver started");

        loop {
            let snapshot = updates.borrow_and_update().clone();

            if self.sync(&snapshot) {
                continue;
            }

            match self.deadline.as_ref().map(|d| (d.occupancy, d.id.clone(), d.at)) {
                Some((occupancy, id, at)) => {
                    tokio::select! {
                        _ = sleep_until(at) => {
                            self.deadline = None;
                            if self.handle.dismiss_occupancy(occupancy, DismissReason::Timeout) {
                                debug!(notification_id = %id, "Notification timed out");
                            }
                            self.handle.advance();
                        }
                        changed = updates.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
                        _ = &mut shutdown => break,
                    }
                }
                None => {
                    tokio::select! {
                        changed = updates.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
                        _ = &mut shutdown => break,
                    }
                }
            }
        }

        if let Some(id) = self.shown.take() {
            self.presenter.hide(&id);
        }
        self.status.set_running(false);
        info!("Presenter driver stopped");

        self.presenter
    }

    /// Reconciles the presenter and timer with a snapshot. Returns `true` when
    /// it advanced the queue and the caller should re-read state.
    fn sync(&mut self, snapshot: &QueueSnapshot) -> bool {
        if self.occupant == snapshot.occupant() {
            return snapshot.current.is_none()
                && snapshot.has_pending()
                && self.handle.advance().is_some();
        }

        // The occupant changed: drop the old timer and the old surface.
        self.occupant = snapshot.occupant();
        self.deadline = None;
        if let Some(id) = self.shown.take() {
            self.presenter.hide(&id);
        }

        let Some(current) = snapshot.current.as_ref() else {
            return snapshot.has_pending() && self.handle.advance().is_some();
        };

        let channel = self.presenter.channel().to_string();
        match validate_presentable(current, &channel) {
            Ok(()) => {
                self.presenter.show(current);
                self.shown = Some(current.id().clone());
                self.arm(current, snapshot.occupancy);
            }
            Err(e) if current.modal_type() != channel => {
                // Another presenter owns this entry; it keeps the slot until
                // dismissed explicitly.
                debug!(notification_id = %current.id(), reason = %e, "Not rendering notification");
            }
            Err(e) => {
                warn!(notification_id = %current.id(), reason = %e, "Not rendering notification");
                self.arm(current, snapshot.occupancy);
            }
        }

        false
    }

    fn arm(&mut self, notification: &Notification, occupancy: u64) {
        self.deadline = Some(Deadline {
            occupancy,
            id: notification.id().clone(),
            at: Instant::now() + Duration::from_millis(notification.duration_ms()),
        });
    }
}
