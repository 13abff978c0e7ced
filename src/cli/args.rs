//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// cvbuild resume automation CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: cvbuild.toml)
    #[arg(short = 'C', long, default_value = "cvbuild.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// subcommands (runs `build` when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Typeset the resume (two compiler passes to settle cross-references)
    #[command(visible_alias = "b")]
    Build,

    /// Remove intermediate typesetting artifacts
    #[command(visible_alias = "c")]
    Clean,

    /// Rebuild whenever the tracked source file changes
    #[command(visible_alias = "w")]
    Watch,

    /// Run the external tailor script against a job offer
    #[command(visible_aliases = ["t", "tailored"])]
    Tailor {
        /// Offer identifier, forwarded untouched to the tailor script
        #[arg(value_name = "OFFER")]
        offer: String,
    },
}

impl Cli {
    /// Resolve the effective command; a bare `cvbuild` means `build`.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_asserts() {
        <Cli as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_build() {
        let cli = Cli::parse_from(["cvbuild"]);
        assert!(matches!(cli.command(), Commands::Build));
    }

    #[test]
    fn test_subcommand_aliases() {
        let cli = Cli::parse_from(["cvbuild", "w"]);
        assert!(matches!(cli.command(), Commands::Watch));

        let cli = Cli::parse_from(["cvbuild", "c"]);
        assert!(matches!(cli.command(), Commands::Clean));
    }

    #[test]
    fn test_tailor_requires_offer() {
        assert!(Cli::try_parse_from(["cvbuild", "tailor"]).is_err());

        let cli = Cli::parse_from(["cvbuild", "tailor", "acme"]);
        match cli.command() {
            Commands::Tailor { offer } => assert_eq!(offer, "acme"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
