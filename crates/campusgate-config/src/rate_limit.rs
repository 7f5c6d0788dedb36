//! Per-client rate limiting.
//!
//! Uses a token bucket keyed by client IP. The client IP is taken from
//! `X-Forwarded-For`, `X-Real-IP` or `Forwarded` when present and from the
//! peer address otherwise, so the limiter keeps working behind a proxy.
//!
//! # Configuration
//!
//! - `RATE_LIMIT_ENABLED`: `false` or `0` turns the limiter off (default: on)
//! - `RATE_LIMIT_PER_SECOND`: seconds between token replenishments (default: 1)
//! - `RATE_LIMIT_BURST_SIZE`: bucket capacity (default: 50)

use governor::middleware::NoOpMiddleware;
use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

pub type ClientGovernorConfig = GovernorConfig<SmartIpKeyExtractor, NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Interval, in seconds, after which one token is returned to the bucket.
    pub per_second: u64,

    /// Maximum number of tokens a client can accumulate.
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_second: 1,
            burst_size: 50,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            per_second: std::env::var("RATE_LIMIT_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.per_second),
            burst_size: std::env::var("RATE_LIMIT_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.burst_size),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Builds the governor config, or `None` when limiting is disabled or the
    /// configured values are rejected (a zero period or burst).
    #[must_use]
    pub fn governor_config(&self) -> Option<ClientGovernorConfig> {
        if !self.enabled {
            return None;
        }
        GovernorConfigBuilder::default()
            .per_second(self.per_second)
            .burst_size(self.burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.per_second, 1);
        assert_eq!(config.burst_size, 50);
    }

    #[test]
    fn test_disabled_has_no_governor() {
        assert!(RateLimitConfig::disabled().governor_config().is_none());
    }

    #[test]
    fn test_zero_burst_is_rejected() {
        let config = RateLimitConfig {
            enabled: true,
            per_second: 1,
            burst_size: 0,
        };
        assert!(config.governor_config().is_none());
    }

    #[test]
    fn test_valid_config_builds() {
        assert!(RateLimitConfig::default().governor_config().is_some());
    }
}
