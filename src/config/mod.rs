//! Project configuration management for `cvbuild.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── watch      # [watch]
//! │   ├── tailor     # [tailor]
//! │   └── hooks      # [[hooks.pre]] / [[hooks.post]]
//! ├── util           # Config file discovery
//! └── mod.rs         # Config (this file)
//! ```
//!
//! The config file is optional: every field has a default matching the
//! plain `resume.tex` / `pdflatex` workflow, so a project with no
//! `cvbuild.toml` behaves exactly like the defaults spell out. When the
//! file exists, the project root is its parent directory; otherwise the
//! current directory is the root.

pub mod section;
mod util;

use util::find_config_file;

pub use section::{BuildConfig, HookConfig, HooksConfig, TailorConfig, WatchConfig};

use crate::{cli::Cli, log};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing cvbuild.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Watch loop settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Tailoring dispatch settings
    #[serde(default)]
    pub tailor: TailorConfig,

    /// Pre/post build hooks
    #[serde(default)]
    pub hooks: HooksConfig,
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory, or cwd when no file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config_path, exists) = match find_config_file(&cli.config) {
            Some(path) => (path, true),
            None => {
                let cwd = std::env::current_dir()
                    .map_err(|e| ConfigError::Io(cli.config.clone(), e))?;
                (cwd.join(&cli.config), false)
            }
        };

        let mut config = if exists {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.config_path = config_path;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Cross-section validation, run once after load.
    fn validate(&self) -> Result<()> {
        for result in [self.build.validate(), self.tailor.validate()] {
            result.map_err(ConfigError::Validation)?;
        }
        Ok(())
    }

    // ========================================================================
    // paths
    // ========================================================================

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Absolute path to the tracked source file.
    pub fn source_path(&self) -> PathBuf {
        self.root_join(&self.build.source)
    }

    /// Absolute path to the output document.
    pub fn output_path(&self) -> PathBuf {
        self.root_join(self.build.output())
    }

    /// Absolute path to the tailor script, with `~` expanded.
    pub fn tailor_script(&self) -> PathBuf {
        let raw = self.tailor.script.to_string_lossy();
        let expanded = shellexpand::tilde(raw.as_ref());
        let path = Path::new(expanded.as_ref());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_join(path)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

/// Parse a TOML snippet into a `Config` for section tests.
#[cfg(test)]
pub(crate) fn test_parse_config(content: &str) -> Config {
    Config::from_str(content).expect("config parses")
}
