//! Pre/post build hook execution.

mod runner;

pub use runner::{build_vars, run_post_hooks, run_pre_hooks};
