//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::{CacheStrategy, DEFAULT_LRU_CAPACITY};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Caching strategy for catalog queries
    pub cache_strategy: CacheStrategy,
    /// Per-query-kind capacity of the LRU strategy
    pub lru_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_STRATEGY` - `none`, `lru` or `memo` (default: lru)
    /// - `LRU_CAPACITY` - LRU entries per query kind (default: 20000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            cache_strategy: env::var("CACHE_STRATEGY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            lru_capacity: env::var("LRU_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LRU_CAPACITY),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_strategy: CacheStrategy::default(),
            lru_capacity: DEFAULT_LRU_CAPACITY,
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_strategy, CacheStrategy::Lru);
        assert_eq!(config.lru_capacity, 20_000);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the env vars so parallel tests cannot race
        env::remove_var("CACHE_STRATEGY");
        env::remove_var("LRU_CAPACITY");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.cache_strategy, CacheStrategy::Lru);
        assert_eq!(config.lru_capacity, 20_000);
        assert_eq!(config.server_port, 3000);

        env::set_var("CACHE_STRATEGY", "memo");
        env::set_var("LRU_CAPACITY", "not-a-number");
        let config = Config::from_env();
        assert_eq!(config.cache_strategy, CacheStrategy::Memo);
        assert_eq!(config.lru_capacity, 20_000);

        env::remove_var("CACHE_STRATEGY");
        env::remove_var("LRU_CAPACITY");
    }
}
