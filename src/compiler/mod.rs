//! Typesetting invocation.
//!
//! The external compiler sits behind the [`Typeset`] trait so the build
//! orchestration and the watch loop are testable against a fake. The real
//! implementation, [`LatexCompiler`], shells out to the configured
//! executable with non-interactive flags.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

use crate::config::Config;

/// Flags keeping the compiler non-interactive: recoverable issues are
/// skipped without prompting, the first unrecoverable error aborts.
const INTERACTION_FLAGS: [&str; 2] = ["-interaction=nonstopmode", "-halt-on-error"];

/// How much of the compiler's console output to keep in error messages.
const ERROR_TAIL_BYTES: usize = 2000;

// ============================================================================
// Capability trait
// ============================================================================

/// A typesetting backend: one compiler pass over one source file.
pub trait Typeset {
    fn compile(&self, source: &Path) -> Result<(), TypesetError>;
}

/// Typesetting failures.
#[derive(Debug, Error)]
pub enum TypesetError {
    #[error("compiler `{0}` not found in PATH")]
    CompilerNotFound(String),

    #[error("failed to run `{command}`")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}; see {}\n{tail}", .log.display())]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        log: PathBuf,
        tail: String,
    },
}

// ============================================================================
// Pass driver
// ============================================================================

/// Run `passes` compiler passes over `source`, stopping at the first failure.
///
/// The first pass writes label and reference data to the aux file; the
/// second pass reads it back, so page numbers and cross-references settle.
pub fn run_passes<T: Typeset + ?Sized>(
    compiler: &T,
    source: &Path,
    passes: u32,
) -> Result<(), TypesetError> {
    for pass in 1..=passes {
        crate::debug!("build"; "pass {}/{}", pass, passes);
        compiler.compile(source)?;
    }
    Ok(())
}

// ============================================================================
// LaTeX compiler
// ============================================================================

/// The real compiler: spawns the configured executable from the project root.
pub struct LatexCompiler {
    /// Resolved executable path.
    program: PathBuf,
    /// Display name for error messages (as configured, not the full path).
    name: String,
    /// Working directory for compiler runs; artifacts land here.
    root: PathBuf,
}

impl LatexCompiler {
    /// Resolve the configured compiler on PATH.
    pub fn new(config: &Config) -> Result<Self, TypesetError> {
        let name = config.build.command.clone();
        let program = which::which(&name).map_err(|_| TypesetError::CompilerNotFound(name.clone()))?;
        Ok(Self {
            program,
            name,
            root: config.get_root().to_path_buf(),
        })
    }
}

impl Typeset for LatexCompiler {
    fn compile(&self, source: &Path) -> Result<(), TypesetError> {
        let output = Command::new(&self.program)
            .args(INTERACTION_FLAGS)
            .arg(source)
            .current_dir(&self.root)
            .output()
            .map_err(|e| TypesetError::Io {
                command: self.name.clone(),
                source: e,
            })?;

        if !output.status.success() {
            // LaTeX engines report errors on stdout, not stderr
            let console = String::from_utf8_lossy(&output.stdout);
            return Err(TypesetError::Failed {
                command: self.name.clone(),
                status: output.status,
                log: source.with_extension("log"),
                tail: tail_of(&console, ERROR_TAIL_BYTES),
            });
        }
        Ok(())
    }
}

/// Last `limit` bytes of `text`, trimmed and aligned to a char boundary.
fn tail_of(text: &str, limit: usize) -> String {
    let trimmed = text.trim_end();
    if trimmed.len() <= limit {
        return trimmed.to_string();
    }
    let mut start = trimmed.len() - limit;
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &trimmed[start..])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Fake backend counting passes, optionally failing on a given one.
    struct FakeCompiler {
        calls: Cell<u32>,
        fail_on: Option<u32>,
    }

    impl FakeCompiler {
        fn ok() -> Self {
            Self {
                calls: Cell::new(0),
                fail_on: None,
            }
        }

        fn failing_on(pass: u32) -> Self {
            Self {
                calls: Cell::new(0),
                fail_on: Some(pass),
            }
        }
    }

    impl Typeset for FakeCompiler {
        fn compile(&self, _source: &Path) -> Result<(), TypesetError> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if Some(n) == self.fail_on {
                return Err(TypesetError::Io {
                    command: "fake".into(),
                    source: std::io::Error::other("boom"),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_two_passes_on_success() {
        let fake = FakeCompiler::ok();
        run_passes(&fake, Path::new("resume.tex"), 2).unwrap();
        assert_eq!(fake.calls.get(), 2);
    }

    #[test]
    fn test_first_pass_failure_skips_second() {
        let fake = FakeCompiler::failing_on(1);
        assert!(run_passes(&fake, Path::new("resume.tex"), 2).is_err());
        assert_eq!(fake.calls.get(), 1);
    }

    #[test]
    fn test_second_pass_failure_propagates() {
        let fake = FakeCompiler::failing_on(2);
        assert!(run_passes(&fake, Path::new("resume.tex"), 2).is_err());
        assert_eq!(fake.calls.get(), 2);
    }

    #[test]
    fn test_repeat_builds_are_independent() {
        let fake = FakeCompiler::ok();
        run_passes(&fake, Path::new("resume.tex"), 2).unwrap();
        run_passes(&fake, Path::new("resume.tex"), 2).unwrap();
        assert_eq!(fake.calls.get(), 4);
    }

    #[test]
    fn test_tail_of_short_text() {
        assert_eq!(tail_of("hello\n", 100), "hello");
    }

    #[test]
    fn test_tail_of_truncates() {
        let text = "x".repeat(50);
        let tail = tail_of(&text, 10);
        assert_eq!(tail, format!("...{}", "x".repeat(10)));
    }

    #[test]
    fn test_tail_of_respects_char_boundary() {
        // 'é' is two bytes; an odd limit would otherwise split it
        let text = "ééééé";
        let tail = tail_of(text, 3);
        assert!(tail.ends_with('é'));
    }
}
