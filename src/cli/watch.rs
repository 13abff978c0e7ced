//! Watch command: rebuild whenever the tracked source changes.
//!
//! Wiring:
//! ```text
//! notify watcher → Debouncer (pure timing) → build cycle → status line
//! ```
//!
//! The loop is single-threaded and blocking: it suspends on the event
//! channel while idle and runs one build cycle per debounced change.
//! Build failures keep the loop alive; only Ctrl+C or a watcher failure
//! ends it.

use std::ffi::{OsStr, OsString};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::cli::build;
use crate::compiler::{LatexCompiler, Typeset};
use crate::config::Config;
use crate::{core, log, logger};

/// Upper bound on a single wait so Ctrl+C is noticed promptly.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Run the watch command. Blocks until Ctrl+C.
pub fn run(config: &Config) -> Result<()> {
    let compiler = LatexCompiler::new(config)?;
    let source = config.source_path();
    if !source.exists() {
        anyhow::bail!("source file not found: {}", config.build.source.display());
    }

    // Watch the parent directory: editors that replace-on-save would
    // otherwise detach the watch from the old inode after the first save.
    let watch_dir = source
        .parent()
        .map(std::path::Path::to_path_buf)
        .unwrap_or_else(|| config.get_root().to_path_buf());

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })
    .context("Failed to create filesystem watcher")?;
    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", watch_dir.display()))?;

    core::register_watcher();
    log!("watch"; "watching {} (Ctrl+C to stop)", config.build.source.display());

    watch_loop(config, &compiler, &rx)
}

/// The wait/rebuild loop, driven by an event channel so tests can feed
/// synthetic events.
fn watch_loop(
    config: &Config,
    compiler: &impl Typeset,
    rx: &Receiver<notify::Result<Event>>,
) -> Result<()> {
    let source_name: OsString = config
        .build
        .source
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    let mut debouncer = Debouncer::new(config.watch.debounce());

    loop {
        if core::is_shutdown() {
            log!("watch"; "stopped");
            return Ok(());
        }

        match rx.recv_timeout(debouncer.wait_timeout(Instant::now())) {
            Ok(Ok(event)) => {
                if is_source_event(&event, &source_name) {
                    debouncer.note_event(Instant::now());
                }
            }
            // Notification infrastructure failures are fatal; there is no
            // way to keep the promise of rebuilding on change without it.
            Ok(Err(e)) => return Err(e).context("Filesystem notification failed"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                anyhow::bail!("filesystem watcher channel closed")
            }
        }

        if debouncer.take_if_ready(Instant::now()) {
            rebuild(config, compiler);
        }
    }
}

/// One rebuild cycle. Failure keeps the loop alive; the next save gets
/// another chance.
fn rebuild(config: &Config, compiler: &impl Typeset) {
    match build::run_cycle(config, compiler) {
        Ok(()) => {
            logger::status_success(&format!("rebuilt {}", config.build.output().display()));
        }
        Err(e) => logger::status_error("build failed", &e.to_string()),
    }
}

/// Does this event describe a content change of the tracked source file?
///
/// Matching on the file name keeps editor temp files (`.resume.tex.swp`,
/// `resume.tex~`, numbered vim buffers) from triggering builds, and also
/// covers replace-on-save, which surfaces as a create or rename of the
/// real name.
fn is_source_event(event: &Event, source_name: &OsStr) -> bool {
    if source_name.is_empty() {
        return false;
    }
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|p| p.file_name() == Some(source_name))
}

// =============================================================================
// Debouncer - pure timing, no filesystem access
// =============================================================================

/// Folds bursts of events into one rebuild: the clock is passed in, so
/// the quiet-window logic is testable without waiting.
struct Debouncer {
    window: Duration,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new(window: Duration) -> Self {
        Self {
            window,
            last_event: None,
        }
    }

    /// Record a relevant event at `now`.
    fn note_event(&mut self, now: Instant) {
        self.last_event = Some(now);
    }

    /// Consume the pending change once the quiet window has elapsed.
    fn take_if_ready(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(at) if now.duration_since(at) >= self.window => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }

    /// How long the loop may block waiting for the next event.
    fn wait_timeout(&self, now: Instant) -> Duration {
        match self.last_event {
            Some(at) => {
                let elapsed = now.duration_since(at);
                self.window.saturating_sub(elapsed).min(POLL_INTERVAL)
            }
            None => POLL_INTERVAL,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
