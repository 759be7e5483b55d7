//! Timeout configuration for outbound requests.

use std::time::Duration;

/// Timeout configuration applied to every request a client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Create from a single total timeout. Connecting gets a quarter of it.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(2),
            total: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total_splits_connect() {
        let config = TimeoutConfig::from_total(Duration::from_millis(800));
        assert_eq!(config.connect, Duration::from_millis(200));
        assert_eq!(config.total, Duration::from_millis(800));
    }

    #[test]
    fn test_from_total_keeps_sub_millisecond_precision() {
        let config = TimeoutConfig::from_total(Duration::from_micros(1_002));
        assert_eq!(config.connect, Duration::from_micros(250) + Duration::from_nanos(500));

        let long = TimeoutConfig::from_total(Duration::from_secs(4_000_000_000_000));
        assert_eq!(long.connect, Duration::from_secs(1_000_000_000_000));
    }
}
