//! Tailor command: delegate offer-specific resume generation to the
//! external tailor script.
//!
//! The script is an external collaborator. cvbuild resolves it, hands it
//! the offer identifier as the sole argument and forwards its exit
//! status; the offer token itself is passed through unvalidated.

use anyhow::{Context, Result, bail};

use crate::config::Config;
use crate::utils::exec::Cmd;
use crate::{hooks, log};

/// Run the tailor command.
pub fn run(config: &Config, offer: &str) -> Result<()> {
    let script = config.tailor_script();
    if !script.exists() {
        bail!(
            "tailor script not found: {} (set [tailor] script in cvbuild.toml)",
            script.display()
        );
    }

    let interpreter = which::which(&config.tailor.interpreter).with_context(|| {
        format!(
            "interpreter `{}` not found in PATH (required by tailor)",
            config.tailor.interpreter
        )
    })?;

    log!("tailor"; "{} {}", config.root_relative(&script).display(), offer);

    // The script owns the terminal: prompts and progress go straight through
    let status = Cmd::new(interpreter)
        .arg(&script)
        .arg(offer)
        .cwd(config.get_root())
        .envs(&hooks::build_vars(config))
        .status()?;

    if !status.success() {
        // Forward the script's exit code unchanged
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_script_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.root = dir.path().to_path_buf();

        let err = run(&config, "acme").unwrap_err();
        assert!(err.to_string().contains("tailor script not found"));
    }

    #[test]
    fn test_missing_interpreter_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tailor.py"), "").unwrap();

        let mut config = Config::default();
        config.root = dir.path().to_path_buf();
        config.tailor.interpreter = "definitely-not-an-interpreter".into();

        let err = run(&config, "acme").unwrap_err();
        assert!(err.to_string().contains("not found in PATH"));
    }

    #[test]
    fn test_successful_dispatch_forwards_offer() {
        let dir = tempfile::tempdir().unwrap();
        // "Script" that records its argv; run through sh as the interpreter
        std::fs::write(dir.path().join("tailor.py"), "echo \"$1\" > argv.txt\n").unwrap();

        let mut config = Config::default();
        config.root = dir.path().to_path_buf();
        config.tailor.interpreter = "sh".into();

        run(&config, "acme-search-2026").unwrap();

        let argv = std::fs::read_to_string(dir.path().join("argv.txt")).unwrap();
        assert_eq!(argv.trim(), "acme-search-2026");
    }
}
