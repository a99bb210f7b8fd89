#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: u64,
}

impl RetryConfig {
    /// Base delay that follows the given failed attempt (1-based), before jitter.
    ///
    /// Delays never shrink: a multiplier of 0 behaves like 1.
    pub fn delay_after(&self, attempt: u32) -> u64 {
        let multiplier = self.backoff_multiplier.max(1);
        let mut delay_ms = self.initial_delay_ms;
        for _ in 1..attempt {
            delay_ms = delay_ms.saturating_mul(multiplier);
            if delay_ms >= self.max_delay_ms {
                break;
            }
        }
        delay_ms.min(self.max_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_grows_by_multiplier() {
        let config = RetryConfig {
            max_attempts: 5,
            initial_delay_ms: 100,
            max_delay_ms: 10_000,
            backoff_multiplier: 2,
        };

        assert_eq!(config.delay_after(1), 100);
        assert_eq!(config.delay_after(2), 200);
        assert_eq!(config.delay_after(3), 400);
    }

    #[test]
    fn delay_is_capped() {
        let config = RetryConfig {
            max_attempts: 10,
            initial_delay_ms: 100,
            max_delay_ms: 300,
            backoff_multiplier: 2,
        };

        assert_eq!(config.delay_after(3), 300);
        assert_eq!(config.delay_after(9), 300);
    }

    #[test]
    fn zero_and_unit_multipliers_keep_delay_flat() {
        for backoff_multiplier in [0, 1] {
            let config = RetryConfig {
                max_attempts: 5,
                initial_delay_ms: 250,
                max_delay_ms: 1000,
                backoff_multiplier,
            };

            assert_eq!(config.delay_after(1), 250);
            assert_eq!(config.delay_after(4), 250);
        }
    }

    #[test]
    fn initial_delay_above_cap_is_clamped() {
        let config = RetryConfig {
            max_attempts: 3,
            initial_delay_ms: 5000,
            max_delay_ms: 2000,
            backoff_multiplier: 2,
        };

        assert_eq!(config.delay_after(1), 2000);
        assert_eq!(config.delay_after(u32::MAX), 2000);
    }
}
