//! `[watch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [watch]
//! debounce_ms = 300           # Quiet window before a rebuild fires
//! ```
//!
//! Editors that write atomically (save to temp file, then rename) can emit
//! several events per save; the debounce window folds them into one rebuild.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Watch loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Milliseconds of quiet after the last event before rebuilding.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl WatchConfig {
    /// Debounce window as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_watch_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.watch.debounce_ms, 300);
    }

    #[test]
    fn test_watch_config_override() {
        let config = test_parse_config("[watch]\ndebounce_ms = 50");
        assert_eq!(config.watch.debounce(), Duration::from_millis(50));
    }
}
