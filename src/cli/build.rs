//! Build command orchestration.
//!
//! One build cycle:
//! - **Pre hooks** - user-defined commands from `[[hooks.pre]]`
//! - **Compiler passes** - the configured number of runs (default two)
//! - **Post hooks** - user-defined commands from `[[hooks.post]]`
//!
//! A failed pass aborts the cycle; the remaining passes and post hooks
//! do not run.

use anyhow::{Result, bail};

use crate::compiler::{LatexCompiler, Typeset, run_passes};
use crate::config::Config;
use crate::{hooks, log};

/// Run the build command.
pub fn run(config: &Config) -> Result<()> {
    let compiler = LatexCompiler::new(config)?;
    run_cycle(config, &compiler)?;
    log!("build"; "{} ready", config.build.output().display());
    Ok(())
}

/// One full build cycle against any typesetting backend.
///
/// Shared between the build command and the watch loop.
pub fn run_cycle(config: &Config, compiler: &impl Typeset) -> Result<()> {
    let source = config.source_path();
    if !source.exists() {
        bail!("source file not found: {}", config.build.source.display());
    }

    hooks::run_pre_hooks(config)?;
    run_passes(compiler, &config.build.source, config.build.passes)?;
    hooks::run_post_hooks(config)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::TypesetError;
    use std::cell::Cell;
    use std::fs;
    use std::path::Path;

    struct CountingCompiler {
        calls: Cell<u32>,
        fail: bool,
    }

    impl Typeset for CountingCompiler {
        fn compile(&self, _source: &Path) -> Result<(), TypesetError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(TypesetError::Io {
                    command: "fake".into(),
                    source: std::io::Error::other("boom"),
                });
            }
            Ok(())
        }
    }

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.root = dir.to_path_buf();
        config
    }

    #[test]
    fn test_missing_source_aborts_before_compiling() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let compiler = CountingCompiler {
            calls: Cell::new(0),
            fail: false,
        };

        assert!(run_cycle(&config, &compiler).is_err());
        assert_eq!(compiler.calls.get(), 0);
    }

    #[test]
    fn test_cycle_runs_configured_passes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("resume.tex"), "\\documentclass{article}").unwrap();
        let config = config_in(dir.path());
        let compiler = CountingCompiler {
            calls: Cell::new(0),
            fail: false,
        };

        run_cycle(&config, &compiler).unwrap();
        assert_eq!(compiler.calls.get(), 2);
    }

    #[test]
    fn test_failed_pass_propagates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("resume.tex"), "\\documentclass{article}").unwrap();
        let config = config_in(dir.path());
        let compiler = CountingCompiler {
            calls: Cell::new(0),
            fail: true,
        };

        assert!(run_cycle(&config, &compiler).is_err());
        assert_eq!(compiler.calls.get(), 1);
    }
}
