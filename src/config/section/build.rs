//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "resume.tex"       # Tracked LaTeX source file
//! command = "pdflatex"        # Typesetting compiler
//! passes = 2                  # Compiler passes per build
//! ```
//!
//! Two passes are the default so label and page references settle;
//! bibliography-heavy documents may need three.
//!
//! `artifacts` lists the intermediate-file suffixes `cvbuild clean` removes.
//! Overriding it replaces the whole list.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build settings: source file, compiler and artifact suffixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Tracked LaTeX source file, relative to the project root.
    pub source: PathBuf,

    /// Typesetting compiler executable.
    pub command: String,

    /// Number of compiler passes per build.
    pub passes: u32,

    /// Intermediate-artifact suffixes removed by `clean`.
    /// Matched against the end of file names, so multi-dot
    /// suffixes like `synctex.gz` work.
    pub artifacts: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("resume.tex"),
            command: "pdflatex".into(),
            passes: 2,
            artifacts: [
                "aux",
                "log",
                "out",
                "toc",
                "fls",
                "fdb_latexmk",
                "synctex.gz",
                "bbl",
                "blg",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl BuildConfig {
    /// Output document name: source stem with a `.pdf` extension.
    ///
    /// The compiler derives the output name itself, so this is not
    /// independently configurable.
    pub fn output(&self) -> PathBuf {
        self.source.with_extension("pdf")
    }

    /// Check whether a file name matches one of the artifact suffixes.
    pub fn is_artifact(&self, file_name: &str) -> bool {
        self.artifacts
            .iter()
            .any(|suffix| has_suffix(file_name, suffix))
    }

    /// Validate build settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.source.as_os_str().is_empty() {
            return Err("build.source must not be empty".into());
        }
        if self.command.trim().is_empty() {
            return Err("build.command must not be empty".into());
        }
        if self.passes == 0 {
            return Err("build.passes must be at least 1".into());
        }

        let output = self.output();
        let protected = [
            self.source.extension().and_then(|e| e.to_str()),
            output.extension().and_then(|e| e.to_str()),
        ];
        for suffix in &self.artifacts {
            if suffix.trim_matches('.').is_empty() {
                return Err("build.artifacts entries must not be empty".into());
            }
            if protected.iter().flatten().any(|ext| suffix == ext) {
                return Err(format!(
                    "build.artifacts must not contain `{suffix}`: it would delete the {} file",
                    if *suffix == "pdf" { "output" } else { "source" },
                ));
            }
        }
        Ok(())
    }
}

/// Suffix match on the extension boundary: `resume.synctex.gz` matches
/// `synctex.gz`, but `resume.log` does not match `g`.
fn has_suffix(file_name: &str, suffix: &str) -> bool {
    file_name
        .strip_suffix(suffix)
        .is_some_and(|stem| stem.ends_with('.') && stem.len() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_build_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.build.source, PathBuf::from("resume.tex"));
        assert_eq!(config.build.command, "pdflatex");
        assert_eq!(config.build.passes, 2);
        assert_eq!(config.build.output(), PathBuf::from("resume.pdf"));
        assert_eq!(config.build.artifacts.len(), 9);
    }

    #[test]
    fn test_build_config_override() {
        let config = test_parse_config(
            "[build]\nsource = \"cv.tex\"\ncommand = \"lualatex\"\npasses = 3",
        );

        assert_eq!(config.build.source, PathBuf::from("cv.tex"));
        assert_eq!(config.build.command, "lualatex");
        assert_eq!(config.build.passes, 3);
        assert_eq!(config.build.output(), PathBuf::from("cv.pdf"));
    }

    #[test]
    fn test_is_artifact_suffixes() {
        let build = BuildConfig::default();

        assert!(build.is_artifact("resume.aux"));
        assert!(build.is_artifact("resume.synctex.gz"));
        assert!(build.is_artifact("notes.toc"));
        assert!(build.is_artifact("resume.fdb_latexmk"));

        assert!(!build.is_artifact("resume.tex"));
        assert!(!build.is_artifact("resume.pdf"));
        // No bare-suffix match: the whole name is not an artifact
        assert!(!build.is_artifact("aux"));
        assert!(!build.is_artifact(".aux"));
        // Suffix must sit on an extension boundary
        assert!(!build.is_artifact("resume.gz"));
    }

    #[test]
    fn test_validate_rejects_zero_passes() {
        let config = test_parse_config("[build]\npasses = 0");
        assert!(config.build.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_source_extension_in_artifacts() {
        let config = test_parse_config("[build]\nartifacts = [\"aux\", \"tex\"]");
        assert!(config.build.validate().is_err());

        let config = test_parse_config("[build]\nartifacts = [\"pdf\"]");
        assert!(config.build.validate().is_err());
    }
}
