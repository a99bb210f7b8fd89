use std::sync::Arc;

use anyhow::{Error, Result};
use toast_queue::{
    api::{AppState, run_api_server},
    config::Config,
    logging::init_tracing,
    queue::{
        handle::NotificationHandle,
        presenter::{LogPresenter, PresenterDriver},
    },
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::load()?;
    init_tracing(config.log_format)?;

    let handle = NotificationHandle::new(config.queue_config());
    let driver = PresenterDriver::new(handle.clone(), LogPresenter::new(&config.presenter_channel));
    let state = Arc::new(AppState::new(handle, driver.status()));

    let driver_task = tokio::spawn(driver.run_until(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
        }
    }));

    info!(channel = %config.presenter_channel, "Notification queue ready");

    tokio::select! {
        result = run_api_server(&config, state) => result?,
        _ = driver_task => info!("Presenter driver finished, shutting down"),
    }

    Ok(())
}
