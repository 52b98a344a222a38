//! Opt-in timing scopes around the render and serialize passes.
//!
//! Timing is off unless the host switches it on (the binary maps `--perf`
//! here). A [`Scope`] measures from construction to drop and emits one
//! `tracing` event per pass, so timings land in the same output stream as
//! the rest of the instrumentation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static TIMING: AtomicBool = AtomicBool::new(false);

/// Turns timing scopes on or off for the whole process.
pub fn set_enabled(enabled: bool) {
    TIMING.store(enabled, Ordering::Relaxed);
}

/// Whether timing scopes currently report.
pub fn is_enabled() -> bool {
    TIMING.load(Ordering::Relaxed)
}

/// Starts a timing scope covering the rest of the enclosing block.
pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        started: Instant::now(),
    }
}

/// Measures the time between its creation and its drop.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    started: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if is_enabled() {
            let micros = self.started.elapsed().as_micros();
            tracing::info!(target: "perf", pass = self.name, elapsed_us = %micros);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_flag_round_trips() {
        set_enabled(true);
        assert!(is_enabled());
        set_enabled(false);
        assert!(!is_enabled());
    }

    #[test]
    fn test_scope_drop_is_silent_when_disabled() {
        set_enabled(false);
        let guard = scope("noop");
        drop(guard);
    }
}
