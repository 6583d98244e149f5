//! Configuration Module
//!
//! Loads the cache byte budget from environment variables.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CacheError, Result};

/// Environment variable holding the byte budget.
pub const CACHE_BYTES_VAR: &str = "CACHE_BYTES";

/// Default byte budget (64 MiB).
pub const DEFAULT_CACHE_BYTES: u64 = 64 * 1024 * 1024;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Upper bound on `len(key) + value.size()` summed over all entries, 0 = unbounded
    pub cache_bytes: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BYTES` - Byte budget, 0 for unbounded (default: 64 MiB)
    ///
    /// Unparsable values fall back to the default and are logged.
    pub fn from_env() -> Self {
        let cache_bytes = match env::var(CACHE_BYTES_VAR) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(
                    "Ignoring invalid {}={:?}, using default of {} bytes",
                    CACHE_BYTES_VAR, raw, DEFAULT_CACHE_BYTES
                );
                DEFAULT_CACHE_BYTES
            }),
            Err(_) => DEFAULT_CACHE_BYTES,
        };

        Self { cache_bytes }
    }

    /// Like [`Config::from_env`], but rejects unparsable values.
    pub fn try_from_env() -> Result<Self> {
        let cache_bytes = match env::var(CACHE_BYTES_VAR) {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                CacheError::InvalidConfig(format!("{}={:?}", CACHE_BYTES_VAR, raw))
            })?,
            Err(_) => DEFAULT_CACHE_BYTES,
        };

        Ok(Self { cache_bytes })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_bytes: DEFAULT_CACHE_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // All env mutations live in one test so parallel tests never race on CACHE_BYTES.
    #[test]
    fn test_config_from_env() {
        env::remove_var(CACHE_BYTES_VAR);
        assert_eq!(Config::from_env().cache_bytes, DEFAULT_CACHE_BYTES);
        assert_eq!(Config::try_from_env().unwrap().cache_bytes, DEFAULT_CACHE_BYTES);

        env::set_var(CACHE_BYTES_VAR, "4096");
        assert_eq!(Config::from_env().cache_bytes, 4096);
        assert_eq!(Config::try_from_env().unwrap().cache_bytes, 4096);

        env::set_var(CACHE_BYTES_VAR, "0");
        assert_eq!(Config::from_env().cache_bytes, 0);

        env::set_var(CACHE_BYTES_VAR, "lots");
        assert_eq!(Config::from_env().cache_bytes, DEFAULT_CACHE_BYTES);
        assert!(matches!(
            Config::try_from_env(),
            Err(CacheError::InvalidConfig(_))
        ));

        env::remove_var(CACHE_BYTES_VAR);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_bytes, 64 * 1024 * 1024);
    }
}
