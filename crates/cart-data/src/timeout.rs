//! Timeout configuration for lookups.

use std::time::Duration;

/// Timeout configuration for a lookup.
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

    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self::new(total / 4, total)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total_splits_connect() {
        let timeout = TimeoutConfig::from_total(Duration::from_millis(800));
        assert_eq!(timeout.connect, Duration::from_millis(200));
        assert_eq!(timeout.total, Duration::from_millis(800));
    }
}
