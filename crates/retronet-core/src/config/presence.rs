//! Presence evaluation and ping cadence configuration.

use serde::{Deserialize, Serialize};

/// Settings controlling the presence engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// A user is online while their last heartbeat is strictly younger
    /// than this many seconds.
    #[serde(default = "default_online_window")]
    pub online_window_seconds: u64,
    /// Token bucket size for the ping endpoint, per caller.
    #[serde(default = "default_ping_burst")]
    pub ping_burst: u32,
    /// Token refill rate per second for the ping endpoint.
    #[serde(default = "default_ping_refill")]
    pub ping_refill_per_second: f64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            online_window_seconds: default_online_window(),
            ping_burst: default_ping_burst(),
            ping_refill_per_second: default_ping_refill(),
        }
    }
}

fn default_online_window() -> u64 {
    30
}

fn default_ping_burst() -> u32 {
    10
}

fn default_ping_refill() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PresenceConfig::default();
        assert_eq!(config.online_window_seconds, 30);
        assert_eq!(config.ping_burst, 10);
        assert!(config.ping_refill_per_second > 0.0);
    }
}
