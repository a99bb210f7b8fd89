use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, warn};

use crate::{
    models::health::{ComponentHealth, HealthCheckResponse, HealthStatus},
    queue::{handle::NotificationHandle, presenter::DriverStatus},
};

pub struct HealthChecker {
    handle: NotificationHandle,
    driver: DriverStatus,
    backlog_warn_threshold: usize,
}

impl HealthChecker {
    pub fn new(handle: NotificationHandle, driver: DriverStatus) -> Self {
        let backlog_warn_threshold = handle.config().backlog_warn_threshold;

        Self {
            handle,
            driver,
            backlog_warn_threshold,
        }
    }

    pub fn check_all(&self) -> HealthCheckResponse {
        let mut checks = HashMap::new();

        checks.insert("dispatcher".to_string(), self.check_dispatcher());
        checks.insert("presenter".to_string(), self.check_presenter());

        let overall_status = self.determine_overall_status(&checks);

        HealthCheckResponse {
            status: overall_status,
            timestamp: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            checks,
        }
    }

    fn check_dispatcher(&self) -> ComponentHealth {
        let pending = self.handle.pending_len();

        if self.handle.is_poisoned() {
            warn!(pending, "Dispatcher lock was poisoned by a panicking caller");
            return ComponentHealth::degraded(
                "Dispatcher lock was poisoned by a panicking caller".to_string(),
            )
            .with_pending(pending);
        }

        if pending >= self.backlog_warn_threshold {
            warn!(
                pending,
                threshold = self.backlog_warn_threshold,
                "Notification backlog above threshold"
            );
            return ComponentHealth::degraded(format!(
                "{} notifications pending (threshold {})",
                pending, self.backlog_warn_threshold
            ))
            .with_pending(pending);
        }

        debug!(pending, "Dispatcher health check passed");
        ComponentHealth::healthy().with_pending(pending)
    }

    fn check_presenter(&self) -> ComponentHealth {
        if self.driver.is_running() {
            ComponentHealth::healthy()
        } else {
            warn!("Presenter driver is not running");
            ComponentHealth::unhealthy("Presenter driver is not running".to_string())
        }
    }

    fn determine_overall_status(&self, checks: &HashMap<String, ComponentHealth>) -> HealthStatus {
        let has_unhealthy = checks
            .values()
            .any(|health| health.status == HealthStatus::Unhealthy);

        let has_degraded = checks
            .values()
            .any(|health| health.status == HealthStatus::Degraded);

        if has_unhealthy {
            HealthStatus::Unhealthy
        } else if has_degraded {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }
}
