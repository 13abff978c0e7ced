//! Command-line interface: argument definitions and command entry points.

mod args;

pub mod build;
pub mod clean;
pub mod tailor;
pub mod watch;

pub use args::{Cli, Commands};
