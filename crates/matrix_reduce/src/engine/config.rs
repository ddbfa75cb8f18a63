//! src/engine/config.rs
//!
//! Configuration for ReduceEngine behaviour
//!
//! The `EngineConfig` struct stores the parameters that control how a
//! reduction is split across threads and how long the coordinator is willing
//! to wait for them.
//!
//! Example:
//! ```ignore
//! let config = EngineConfig::builder()
//!     .workers(4)
//!     .join_timeout(Duration::from_secs(5))
//!     .thread_name_prefix("sum-worker")
//!     .build();
//! ```
//!
//! Configs can also be read from JSON; missing fields take their defaults:
//! ```json
//! { "workers": 8, "join_timeout_ms": 2000 }
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for ReduceEngine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of worker threads, one per partition (must be > 0).
    /// Defaults to the available parallelism of the host.
    pub workers: usize,
    /// Upper bound on the whole join barrier, in milliseconds.
    /// `None` waits for as long as the workers take.
    pub join_timeout_ms: Option<u64>,
    /// Worker threads are named `{thread_name_prefix}-{id}`.
    pub thread_name_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            join_timeout_ms: None,
            thread_name_prefix: "reduce-worker".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    pub fn join_timeout(&self) -> Option<Duration> {
        self.join_timeout_ms.map(Duration::from_millis)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// Builder for EngineConfig with method chaining
#[derive(Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the number of workers
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set the timeout for the join barrier.
    ///
    /// - Too low: may abort reductions that are merely slow.
    /// - Too high: delays detection of stuck workers.
    pub fn join_timeout(mut self, timeout: Duration) -> Self {
        self.config.join_timeout_ms = Some(timeout.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    /// Set the prefix used to name worker threads.
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = EngineConfig::builder()
            .workers(3)
            .join_timeout(Duration::from_millis(250))
            .thread_name_prefix("sum")
            .build();

        assert_eq!(config.workers, 3);
        assert_eq!(config.join_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.thread_name_prefix, "sum");
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.workers >= 1);
        assert_eq!(config.join_timeout(), None);
        assert_eq!(config.thread_name_prefix, "reduce-worker");
    }

    #[test]
    fn test_json_partial_config() {
        let config = EngineConfig::from_json_str(r#"{ "workers": 8, "join_timeout_ms": 2000 }"#)
            .unwrap();
        assert_eq!(config.workers, 8);
        assert_eq!(config.join_timeout(), Some(Duration::from_secs(2)));
        assert_eq!(config.thread_name_prefix, "reduce-worker");
    }

    #[test]
    fn test_json_rejects_unknown_fields() {
        let err = EngineConfig::from_json_str(r#"{ "threads": 8 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
