use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use toast_queue::{
    api::{AppState, dismiss_notification, enqueue_notification, health_check, queue_snapshot},
    models::{
        notification::NewNotification,
        queue::QueueConfig,
        request::EnqueueRequest,
    },
    queue::{
        handle::NotificationHandle,
        presenter::{LogPresenter, PresenterDriver},
    },
};

async fn body_json(response: axum::response::Response) -> Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn app_state(handle: NotificationHandle) -> Arc<AppState> {
    let driver = PresenterDriver::new(handle.clone(), LogPresenter::new("snackbar"));
    Arc::new(AppState::new(handle, driver.status()))
}

fn request(body: serde_json::Value) -> Result<EnqueueRequest> {
    Ok(serde_json::from_value(body)?)
}

/// Test: Posting a notification shows it and reports the outcome
#[tokio::test]
async fn test_enqueue_endpoint_accepts_notification() -> Result<()> {
    let handle = NotificationHandle::default();
    let state = app_state(handle.clone());

    let body = request(serde_json::json!({ "id": "1", "message": "Saved", "kind": "success" }))?;
    let response = enqueue_notification(State(state), Json(body)).await.into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await?;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["outcome"], "shown");
    assert_eq!(json["data"]["id"], "1");

    let snapshot = handle.snapshot();
    let current = snapshot.current.expect("notification should be current");
    assert_eq!(current.message(), "Saved");
    assert_eq!(current.duration_ms(), 3000);
    assert_eq!(current.modal_type(), "snackbar");

    Ok(())
}

/// Test: Duplicate ids are answered with a conflict
#[tokio::test]
async fn test_enqueue_endpoint_rejects_duplicate() -> Result<()> {
    let handle = NotificationHandle::default();
    let state = app_state(handle.clone());

    handle.enqueue(NewNotification::new("Saved").with_id("1"));

    let body = request(serde_json::json!({ "id": "1", "message": "Saved again" }))?;
    let response = enqueue_notification(State(state), Json(body)).await.into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await?;
    assert_eq!(json["success"], false);
    assert_eq!(json["data"]["outcome"], "duplicate");
    assert_eq!(handle.pending_len(), 0);

    Ok(())
}

/// Test: The dismiss endpoint clears the slot and advances
#[tokio::test]
async fn test_dismiss_endpoint_advances_queue() -> Result<()> {
    let handle = NotificationHandle::default();
    let state = app_state(handle.clone());

    handle.enqueue(NewNotification::new("Saved").with_id("1"));
    handle.enqueue(NewNotification::new("Error").with_id("2"));

    let response = dismiss_notification(State(Arc::clone(&state))).await.into_response();
    let json = body_json(response).await?;

    assert_eq!(json["message"], "Notification '1' dismissed");
    assert_eq!(json["data"]["current"]["id"], "2");
    assert_eq!(json["data"]["state"], "showing");

    let response = queue_snapshot(State(state)).await.into_response();
    let json = body_json(response).await?;
    assert_eq!(json["data"]["pending"], serde_json::json!([]));

    Ok(())
}

/// Test: Health reports unhealthy while no presenter driver runs
#[tokio::test]
async fn test_health_unhealthy_without_driver() -> Result<()> {
    let state = app_state(NotificationHandle::default());

    let response = health_check(State(state)).await.into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await?;
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["checks"]["presenter"]["status"], "unhealthy");
    assert_eq!(json["checks"]["dispatcher"]["status"], "healthy");

    Ok(())
}

/// Test: Health degrades once the backlog reaches its threshold
#[tokio::test]
async fn test_health_degraded_on_backlog() -> Result<()> {
    let handle = NotificationHandle::new(QueueConfig {
        backlog_warn_threshold: 2,
        ..QueueConfig::default()
    });

    let driver = PresenterDriver::new(handle.clone(), LogPresenter::new("snackbar"));
    let state = Arc::new(AppState::new(handle.clone(), driver.status()));
    let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
    let task = tokio::spawn(driver.run_until(async {
        let _ = stopped.await;
    }));
    tokio::task::yield_now().await;

    for id in ["1", "2", "3"] {
        handle.enqueue(NewNotification::new("hi").with_id(id).with_duration_ms(60_000));
    }

    let response = health_check(State(state)).await.into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await?;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["dispatcher"]["pending"], 2);
    assert_eq!(json["checks"]["presenter"]["status"], "healthy");

    stop.send(()).ok();
    task.await?;

    Ok(())
}
