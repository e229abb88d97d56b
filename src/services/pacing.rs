// src/services/pacing.rs
//
// Animation pacing after each redraw. The wait is injectable and can be cut
// short from another thread without touching the drawing state.

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

pub trait Pacer {
    fn wait(&self, delay: Duration);
}

/// Never waits. Used for headless runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn wait(&self, _delay: Duration) {}
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: Mutex<bool>,
    signal: Condvar,
}

/// Sleeps for the requested delay unless cancelled through its [`PacingHandle`].
#[derive(Debug, Default, Clone)]
pub struct SleepPacer {
    state: Arc<CancelState>,
}

/// Cross-thread control over a [`SleepPacer`].
#[derive(Debug, Clone)]
pub struct PacingHandle {
    state: Arc<CancelState>,
}

impl SleepPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> PacingHandle {
        PacingHandle {
            state: Arc::clone(&self.state),
        }
    }
}

impl Pacer for SleepPacer {
    fn wait(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        let guard = match self.state.cancelled.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // spurious wakeups re-enter the wait; cancellation ends it
        let _ = self
            .state
            .signal
            .wait_timeout_while(guard, delay, |cancelled| !*cancelled);
    }
}

impl PacingHandle {
    /// Skips the wait in progress and every later one until [`resume`](Self::resume).
    pub fn cancel(&self) {
        self.set(true);
        self.state.signal.notify_all();
    }

    pub fn resume(&self) {
        self.set(false);
    }

    pub fn is_cancelled(&self) -> bool {
        match self.state.cancelled.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn set(&self, value: bool) {
        match self.state.cancelled.lock() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}
