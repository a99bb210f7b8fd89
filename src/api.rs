use std::sync::Arc;

use anyhow::{Error, Result};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    models::{
        health::HealthStatus, request::EnqueueRequest, response::ApiResponse,
        status::EnqueueOutcome,
    },
    queue::{handle::NotificationHandle, health::HealthChecker, presenter::DriverStatus},
    utils::retry_with_backoff,
};

pub struct AppState {
    pub handle: NotificationHandle,
    pub health_checker: HealthChecker,
}

impl AppState {
    pub fn new(handle: NotificationHandle, driver: DriverStatus) -> Self {
        Self {
            health_checker: HealthChecker::new(handle.clone(), driver),
            handle,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/queue", get(queue_snapshot))
        .route("/notifications", post(enqueue_notification))
        .route("/notifications/dismiss", post(dismiss_notification))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(config: &Config, state: Arc<AppState>) -> Result<(), Error> {
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = retry_with_backoff(&config.retry_config(), || TcpListener::bind(&addr)).await?;

    info!(address = %addr, "Notification API server started");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_checker.check_all();

    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

pub async fn queue_snapshot(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.handle.snapshot();

    Json(ApiResponse::success(snapshot, "Queue snapshot".to_string()))
}

pub async fn enqueue_notification(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EnqueueRequest>,
) -> impl IntoResponse {
    let outcome = state.handle.enqueue(request.into());

    match outcome {
        EnqueueOutcome::Duplicate(ref id) => {
            let error = format!("Notification '{}' was already submitted", id);
            (
                StatusCode::CONFLICT,
                Json(ApiResponse::rejected(
                    outcome.clone(),
                    error,
                    "Duplicate notification ignored".to_string(),
                )),
            )
        }
        _ => (
            StatusCode::CREATED,
            Json(ApiResponse::success(outcome, "Notification accepted".to_string())),
        ),
    }
}

/// The user dismissal gesture: clear the slot, then advance.
pub async fn dismiss_notification(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dismissed = state.handle.dismiss();
    state.handle.advance();

    let message = match dismissed {
        Some(id) => format!("Notification '{}' dismissed", id),
        None => "Nothing to dismiss".to_string(),
    };

    Json(ApiResponse::success(state.handle.snapshot(), message))
}
