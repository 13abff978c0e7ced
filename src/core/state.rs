//! Process-wide shutdown tracking.
//!
//! Two orthogonal states:
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)
//! - `WATCHING`: Is the watch loop active? (decides how Ctrl+C is handled)

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// The watch loop is active and will poll `is_shutdown()` itself
static WATCHING: AtomicBool = AtomicBool::new(false);

/// Setup the global Ctrl+C handler. Call once at program start
///
/// The handler behavior depends on whether the watch loop has been registered:
/// - Before `register_watcher()`: exit immediately, there is no loop to unwind
/// - After `register_watcher()`: set SHUTDOWN so the loop can finish its cycle
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if !WATCHING.load(Ordering::SeqCst) {
            // Conventional exit code for SIGINT
            std::process::exit(130);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the watch loop for graceful shutdown
///
/// Call this before entering the wait loop
pub fn register_watcher() {
    WATCHING.store(true, Ordering::SeqCst);
}

/// Check if shutdown has been requested
///
/// Uses Relaxed ordering for performance - worst case is one extra
/// wait iteration before stopping, which is acceptable
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // No test flips SHUTDOWN: the flag is process-global and the watch
    // loop tests poll it concurrently.

    #[test]
    fn test_shutdown_not_requested_by_default() {
        assert!(!is_shutdown());
    }

    #[test]
    fn test_register_watcher() {
        register_watcher();
        assert!(WATCHING.load(Ordering::SeqCst));
    }
}
