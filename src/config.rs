//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Store-wide fallback TTL in seconds for keys without a prefix default
    pub default_ttl: u64,
    /// Background expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// Rate limit sliding window length in seconds
    pub rate_limit_window: u64,
    /// Maximum requests per client within one window
    pub rate_limit_max: usize,
    /// True when running outside production (error responses carry detail)
    pub dev_mode: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_TTL` - Fallback TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Expiry sweep frequency in seconds (default: 30)
    /// - `RATE_LIMIT_WINDOW` - Rate limit window in seconds (default: 60)
    /// - `RATE_LIMIT_MAX` - Requests allowed per window (default: 100)
    /// - `APP_ENV` - "production" disables error detail (default: development)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            rate_limit_window: env::var("RATE_LIMIT_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            rate_limit_max: env::var("RATE_LIMIT_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            dev_mode: env::var("APP_ENV")
                .map(|v| v != "production")
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_ttl: 300,
            sweep_interval: 30,
            rate_limit_window: 60,
            rate_limit_max: 100,
            dev_mode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.sweep_interval, 30);
        assert_eq!(config.rate_limit_window, 60);
        assert_eq!(config.rate_limit_max, 100);
        assert!(config.dev_mode);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("DEFAULT_TTL");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("RATE_LIMIT_WINDOW");
        env::remove_var("RATE_LIMIT_MAX");
        env::remove_var("APP_ENV");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.sweep_interval, 30);
        assert_eq!(config.rate_limit_max, 100);
        assert!(config.dev_mode);
    }
}
