//! Configuration management for the address book.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file. Nothing here writes to stdout, which the stdio transport owns.

use crate::error::{ConfigError, ConfigResult};
use crate::index::EngineKind;
use std::env;

/// Environment variable selecting the index engine.
pub const ENGINE_VAR: &str = "ADDRESS_BOOK_ENGINE";

/// Configuration for the address book server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Index engine backing the directory (default: k_gram_plus_inverted_index)
    pub engine: EngineKind,

    /// Longest accepted search query in chars (default: 500)
    pub max_query_length: usize,

    /// Log level used when RUST_LOG is unset (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ADDRESS_BOOK_ENGINE`: `full_tokenization`, `k_gram_plus_inverted_index`
    ///   or `k_gram_plus_partial_tokenization`; unknown values fall back to the default
    /// - `MAX_QUERY_LENGTH`: Longest accepted query (default: 500)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() doesn't print to stdout
        let _ = dotenvy::dotenv();

        let engine = env::var(ENGINE_VAR)
            .map(|value| EngineKind::from_config(&value))
            .unwrap_or_default();

        let max_query_length = Self::parse_env_usize("MAX_QUERY_LENGTH", 500)?;
        if max_query_length == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_QUERY_LENGTH".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            engine,
            max_query_length,
            log_level,
        })
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            engine: EngineKind::default(),
            max_query_length: 500,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.engine, EngineKind::BoundedKGram);
        assert_eq!(config.max_query_length, 500);
        assert_eq!(config.log_level, "error");
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set(ENGINE_VAR, "k_gram_plus_partial_tokenization");
        guard.set("MAX_QUERY_LENGTH", "64");
        guard.set("LOG_LEVEL", "debug");

        let config = Config::from_env().unwrap();
        assert_eq!(config.engine, EngineKind::Hybrid);
        assert_eq!(config.max_query_length, 64);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_config_unknown_engine_falls_back() {
        let mut guard = EnvGuard::new();
        guard.set(ENGINE_VAR, "suffix_tree");

        let config = Config::from_env().unwrap();
        assert_eq!(config.engine, EngineKind::BoundedKGram);
    }

    #[test]
    #[serial]
    fn test_config_zero_query_length_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("MAX_QUERY_LENGTH", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "MAX_QUERY_LENGTH"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_usize() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_USIZE", "42");
        guard.set("TEST_USIZE_INVALID", "not-a-number");

        assert_eq!(Config::parse_env_usize("TEST_USIZE", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_usize("NONEXISTENT_USIZE", 10).unwrap(), 10);
        assert!(Config::parse_env_usize("TEST_USIZE_INVALID", 10).is_err());
    }
}
