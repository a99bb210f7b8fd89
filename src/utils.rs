use std::future::Future;

use tokio::{
    task::JoinHandle,
    time::{Duration, sleep},
};
use tracing::{debug, info, warn};

use crate::models::retry::RetryConfig;

/// Runs `operation` until it succeeds or `config.max_attempts` attempts have
/// failed, sleeping a jittered backoff between attempts. At least one attempt
/// is always made.
pub async fn retry_with_backoff<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(attempt, "Operation succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if attempt >= max_attempts {
            warn!(attempt, error = %error, "Giving up after final attempt");
            return Err(error);
        }

        let delay_ms = jittered(config.delay_after(attempt));
        debug!(attempt, max_attempts, delay_ms, error = %error, "Attempt failed, retrying");

        sleep(Duration::from_millis(delay_ms)).await;
        attempt += 1;
    }
}

fn jittered(delay_ms: u64) -> u64 {
    let jitter = rand::random_range(-0.1..=0.1);
    (delay_ms as f64 * (1.0 + jitter)) as u64
}

/// Runs only the last job submitted within a quiet period.
///
/// Cancelling only drops a job that is still waiting; once the quiet period
/// ends the job runs on its own task and is left to finish.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    timer: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, timer: None }
    }

    /// Schedules `job` after the quiet period, replacing any job still waiting.
    pub fn call<Fut>(&mut self, job: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        self.timer = Some(tokio::spawn(async move {
            sleep(delay).await;
            tokio::spawn(job);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Whether a job is still waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
