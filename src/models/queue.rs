#[derive(Debug, Clone)]
pub struct QueueConfig {
    pub default_duration_ms: u64,
    pub dismissed_history_limit: usize,
    pub backlog_warn_threshold: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 3000,
            dismissed_history_limit: 64,
            backlog_warn_threshold: 50,
        }
    }
}
