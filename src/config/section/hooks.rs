//! Build hooks configuration.
//!
//! # Example
//!
//! ```toml
//! # Pre hooks (run before the compiler passes)
//! [[hooks.pre]]
//! command = ["./scripts/gen-publications.sh"]
//!
//! # Post hooks (run after a successful build)
//! [[hooks.post]]
//! command = ["cp", "$CVBUILD_OUTPUT", "$HOME/exports/"]
//! ```

use serde::{Deserialize, Serialize};

/// Hooks configuration containing pre and post build hooks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Pre-build hooks (run before the compiler passes).
    pub pre: Vec<HookConfig>,
    /// Post-build hooks (run after a successful build).
    pub post: Vec<HookConfig>,
}

/// Configuration for a single build hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Whether this hook is enabled (default: true).
    pub enable: bool,

    /// Display name for logging (defaults to command[0]).
    pub name: Option<String>,

    /// Command and arguments to execute.
    /// Supports `$CVBUILD_*` variable substitution.
    pub command: Vec<String>,

    /// Suppress output (default: true).
    pub quiet: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            enable: true,
            name: None,
            command: Vec::new(),
            quiet: true,
        }
    }
}

impl HookConfig {
    /// Get the display name for this hook.
    ///
    /// Returns `name` if set, otherwise falls back to `command[0]`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.command.first().map(String::as_str).unwrap_or("hook"))
    }
}
