//! Configuration section definitions.

pub mod build;
pub mod hooks;
pub mod tailor;
pub mod watch;

pub use build::BuildConfig;
pub use hooks::{HookConfig, HooksConfig};
pub use tailor::TailorConfig;
pub use watch::WatchConfig;
