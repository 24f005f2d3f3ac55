//! Timeout configuration for fetch operations.

use std::time::Duration;

/// Timeout configuration for a fetch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout, from send to fully-read body.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Build from millisecond values, as they appear in config files.
    pub fn from_millis(connect_ms: u64, total_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(connect_ms),
            Duration::from_millis(total_ms),
        )
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(3),
            total: Duration::from_secs(10),
        }
    }
}

/// Error when a timeout is exceeded.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TimeoutError {
    #[error("Connection timeout after {0:?}")]
    Connect(Duration),

    #[error("Total timeout after {0:?}")]
    Total(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_millis() {
        let config = TimeoutConfig::from_millis(250, 5000);
        assert_eq!(config.connect, Duration::from_millis(250));
        assert_eq!(config.total, Duration::from_secs(5));
    }
}
