//! Hook execution utilities.
//!
//! Provides environment variable building and command execution for build hooks.

use crate::config::{Config, HookConfig};
use crate::log;
use anyhow::Result;
use rustc_hash::FxHashMap;

// ============================================================================
// Environment Variables
// ============================================================================

/// Build `$CVBUILD_*` environment variables for hook execution
pub fn build_vars(config: &Config) -> FxHashMap<String, String> {
    let mut vars = FxHashMap::default();

    vars.insert(
        "CVBUILD_ROOT".into(),
        config.get_root().display().to_string(),
    );
    vars.insert(
        "CVBUILD_SOURCE".into(),
        config.source_path().display().to_string(),
    );
    vars.insert(
        "CVBUILD_OUTPUT".into(),
        config.output_path().display().to_string(),
    );

    vars
}

// ============================================================================
// Command Argument Resolution
// ============================================================================

/// Resolve `$CVBUILD_*` variables in command arguments
///
/// Replaces occurrences of `$CVBUILD_XXX` with actual values from the vars map
pub fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in vars {
                let pattern = format!("${}", key);
                result = result.replace(&pattern, value);
            }
            result
        })
        .collect()
}

// ============================================================================
// Hook Execution
// ============================================================================

/// Execute a single hook
///
/// The `phase` parameter is used for logging (e.g., "pre" or "post")
pub fn run_hook(hook: &HookConfig, config: &Config, phase: &str) -> Result<()> {
    use crate::utils::exec::{Cmd, SILENT_FILTER};

    if !hook.enable || hook.command.is_empty() {
        return Ok(());
    }

    let vars = build_vars(config);
    let resolved = resolve_args(&hook.command, &vars);

    if !hook.quiet {
        log!(phase; "`{}` running", hook.display_name());
    }

    let output = Cmd::from_slice(&resolved)
        .cwd(config.get_root())
        .envs(&vars)
        .filter(&SILENT_FILTER)
        .run()?;

    // Print output directly without prefix (unless quiet)
    if !hook.quiet {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if !stdout.is_empty() {
            println!("{stdout}");
        }
    }

    Ok(())
}

/// Execute all pre hooks
pub fn run_pre_hooks(config: &Config) -> Result<()> {
    for hook in &config.hooks.pre {
        run_hook(hook, config, "pre")?;
    }
    Ok(())
}

/// Execute all post hooks
pub fn run_post_hooks(config: &Config) -> Result<()> {
    for hook in &config.hooks.post {
        run_hook(hook, config, "post")?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
