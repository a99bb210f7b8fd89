use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::models::{notification::SNACKBAR_CHANNEL, queue::QueueConfig, retry::RetryConfig};

#[derive(Clone, Copy, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,
    #[serde(default = "default_presenter_channel")]
    pub presenter_channel: String,
    #[serde(default = "default_dismissed_history_limit")]
    pub dismissed_history_limit: usize,
    #[serde(default = "default_backlog_warn_threshold")]
    pub backlog_warn_threshold: usize,

    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,
    #[serde(default = "default_initial_retry_delay_ms")]
    pub initial_retry_delay_ms: u64,
    #[serde(default = "default_max_retry_delay_ms")]
    pub max_retry_delay_ms: u64,
    #[serde(default = "default_retry_backoff_multiplier")]
    pub retry_backoff_multiplier: u64,

    #[serde(default = "default_server_port")]
    pub server_port: u16,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_duration_ms() -> u64 {
    3000
}

fn default_presenter_channel() -> String {
    SNACKBAR_CHANNEL.to_string()
}

fn default_dismissed_history_limit() -> usize {
    64
}

fn default_backlog_warn_threshold() -> usize {
    50
}

fn default_max_retry_attempts() -> u32 {
    3
}

fn default_initial_retry_delay_ms() -> u64 {
    100
}

fn default_max_retry_delay_ms() -> u64 {
    2000
}

fn default_retry_backoff_multiplier() -> u64 {
    2
}

fn default_server_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|e| anyhow!("Invalid or missing environmental variable: {}", e))?;
        Ok(config)
    }

    /// Loads from explicit `(KEY, value)` pairs instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Self>(vars).map_err(|e| anyhow!("Invalid configuration: {}", e))
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_retry_attempts,
            initial_delay_ms: self.initial_retry_delay_ms,
            max_delay_ms: self.max_retry_delay_ms,
            backoff_multiplier: self.retry_backoff_multiplier,
        }
    }

    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            default_duration_ms: self.default_duration_ms,
            dismissed_history_limit: self.dismissed_history_limit,
            backlog_warn_threshold: self.backlog_warn_threshold,
        }
    }
}
