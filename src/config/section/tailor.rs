//! `[tailor]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [tailor]
//! interpreter = "python3"     # Interpreter for the tailor script
//! script = "tailor.py"        # Script path, relative to the project root
//! ```
//!
//! The tailor script is an external collaborator: cvbuild resolves it,
//! hands it the offer identifier and forwards its exit status. What the
//! script does with the offer is its own business.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tailoring dispatch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TailorConfig {
    /// Interpreter used to run the script.
    pub interpreter: String,

    /// Tailor script path, relative to the project root.
    /// A leading `~` expands to the home directory.
    pub script: PathBuf,
}

impl Default for TailorConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".into(),
            script: PathBuf::from("tailor.py"),
        }
    }
}

impl TailorConfig {
    /// Validate tailoring settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.interpreter.trim().is_empty() {
            return Err("tailor.interpreter must not be empty".into());
        }
        if self.script.as_os_str().is_empty() {
            return Err("tailor.script must not be empty".into());
        }
        Ok(())
    }
}
