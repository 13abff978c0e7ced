//! Clean command: remove intermediate typesetting artifacts.

use anyhow::{Context, Result};
use std::fs;

use crate::config::Config;
use crate::{debug, log};

/// Run the clean command.
pub fn run(config: &Config) -> Result<()> {
    let removed = clean_artifacts(config)?;
    if removed == 0 {
        log!("clean"; "nothing to remove");
    } else {
        log!("clean"; "removed {} file{}", removed, if removed == 1 { "" } else { "s" });
    }
    Ok(())
}

/// Delete artifact files in the project root, returning how many went.
///
/// A file disappearing between listing and deletion is not an error;
/// the goal state ("no artifacts") is already met.
pub fn clean_artifacts(config: &Config) -> Result<usize> {
    let entries = fs::read_dir(config.get_root())
        .with_context(|| format!("Failed to read {}", config.get_root().display()))?;

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type().is_ok_and(|t| t.is_file()) {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !config.build.is_artifact(name) {
            continue;
        }

        match fs::remove_file(entry.path()) {
            Ok(()) => {
                debug!("clean"; "removed {name}");
                removed += 1;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).with_context(|| format!("Failed to remove {name}")),
        }
    }
    Ok(removed)
}

// ============================================================================
// Tests
// ============================================================================
