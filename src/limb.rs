//! A single named health tracker
//!
//! A limb carries two independent flags. `alive` starts true and can only
//! go false; `ready` starts false and can only go true. Both flags are
//! atomics so probes can read them while the owning subsystem flips them.

use crate::pulse::{LimbEvent, Nerves};
use crate::report::LimbStatus;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

#[derive(Debug)]
struct LimbState {
    name: String,
    alive: AtomicBool,
    ready: AtomicBool,
}

/// Handle to one monitored sub-component
///
/// Cloning a limb yields another handle onto the same state, so the
/// organism and the subsystem that owns the limb always agree.
#[derive(Debug, Clone)]
pub struct Limb {
    state: Arc<LimbState>,
    nerves: Arc<Nerves>,
}

impl Limb {
    /// Create a detached limb: alive, not ready
    ///
    /// Any name is accepted, including empty ones.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_nerves(name.into(), Arc::new(Nerves::default()))
    }

    pub(crate) fn with_nerves(name: String, nerves: Arc<Nerves>) -> Self {
        Self {
            state: Arc::new(LimbState {
                name,
                alive: AtomicBool::new(true),
                ready: AtomicBool::new(false),
            }),
            nerves,
        }
    }

    /// Get limb name
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// Check if the limb has not died
    pub fn is_alive(&self) -> bool {
        self.state.alive.load(Ordering::SeqCst)
    }

    /// Check if the limb has been marked ready
    pub fn is_ready(&self) -> bool {
        self.state.ready.load(Ordering::SeqCst)
    }

    /// Mark the limb ready
    ///
    /// Idempotent, and allowed after death.
    pub fn ready(&self) {
        if !self.state.ready.swap(true, Ordering::SeqCst) {
            info!(limb = %self.name(), "limb ready");
            self.nerves.fire(LimbEvent::Ready {
                name: self.name().to_string(),
            });
        }
    }

    /// Mark the limb dead. There is no way back.
    pub fn die(&self) {
        if self.state.alive.swap(false, Ordering::SeqCst) {
            warn!(limb = %self.name(), "limb died");
            self.nerves.fire(LimbEvent::Died {
                name: self.name().to_string(),
            });
        }
    }

    /// Point-in-time view of this limb
    pub fn status(&self) -> LimbStatus {
        LimbStatus {
            name: self.name().to_string(),
            alive: self.is_alive(),
            ready: self.is_ready(),
        }
    }

    /// Check if both handles point at the same limb
    pub fn same_limb(&self, other: &Limb) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}
