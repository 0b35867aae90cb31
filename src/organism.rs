//! The organism: aggregate health of a whole service
//!
//! Every part of a service its health depends on is a limb, for example a
//! client-facing HTTP server or a gRPC server. The organism is not ready
//! while any limb is not ready, and it is dead as soon as any limb dies.
//! An orchestrator watching the liveness probe then replaces the process.
//!
//! The organism always owns one implicit limb, `core`, standing for the
//! process's own main loop. [`Organism::ready`] and [`Organism::die`]
//! drive that limb.

use crate::limb::Limb;
use crate::pulse::{LimbEvent, Nerves};
use crate::report::HealthReport;
use crossbeam::channel::Receiver;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use tracing::debug;

/// Name of the limb every organism grows at construction
pub const CORE_LIMB: &str = "core";

/// Aggregate of limbs with AND-ed readiness and liveness
///
/// Clones share the same limbs: hand one to the probe-serving layer and
/// keep growing limbs through another.
#[derive(Debug, Clone)]
pub struct Organism {
    /// All limbs in growth order, core first
    limbs: Arc<RwLock<Vec<Limb>>>,
    /// Handle onto the first entry of `limbs`
    core: Limb,
    nerves: Arc<Nerves>,
}

impl Organism {
    /// Create an organism holding only its core limb
    pub fn new() -> Self {
        let limbs = Arc::new(RwLock::new(Vec::new()));
        let nerves = Arc::new(Nerves::default());
        let core = graft(&limbs, &nerves, CORE_LIMB.to_string());

        Self {
            limbs,
            core,
            nerves,
        }
    }

    /// Grow a new limb and return a handle to it
    ///
    /// Duplicate and empty names are accepted as-is.
    pub fn grow_limb(&self, name: impl Into<String>) -> Limb {
        graft(&self.limbs, &self.nerves, name.into())
    }

    /// Check if every limb, core included, is ready
    pub fn is_ready(&self) -> bool {
        self.read().iter().all(Limb::is_ready)
    }

    /// Check if no limb has died
    pub fn is_alive(&self) -> bool {
        self.read().iter().all(Limb::is_alive)
    }

    /// Limbs that died, in growth order
    pub fn dead_limbs(&self) -> Vec<Limb> {
        self.filter(|limb| !limb.is_alive())
    }

    /// Limbs that are not ready yet, in growth order
    pub fn not_ready_limbs(&self) -> Vec<Limb> {
        self.filter(|limb| !limb.is_ready())
    }

    /// Mark the core limb ready
    pub fn ready(&self) {
        self.core.ready();
    }

    /// Mark the core limb dead, killing the organism for good
    pub fn die(&self) {
        self.core.die();
    }

    /// Get the core limb
    pub fn core(&self) -> &Limb {
        &self.core
    }

    /// All limbs in growth order
    pub fn limbs(&self) -> Vec<Limb> {
        self.read().clone()
    }

    /// Find the earliest grown limb with the given name
    pub fn limb(&self, name: &str) -> Option<Limb> {
        self.read().iter().find(|limb| limb.name() == name).cloned()
    }

    /// Number of limbs, core included
    pub fn limb_count(&self) -> usize {
        self.read().len()
    }

    /// Receive every limb event fired from now on
    pub fn subscribe(&self) -> Receiver<LimbEvent> {
        self.nerves.subscribe()
    }

    /// Snapshot of the whole organism taken in one pass
    pub fn report(&self) -> HealthReport {
        HealthReport::from_statuses(self.read().iter().map(Limb::status).collect())
    }

    fn filter(&self, keep: impl Fn(&Limb) -> bool) -> Vec<Limb> {
        self.read().iter().filter(|limb| keep(limb)).cloned().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Limb>> {
        // Append-only: a poisoned lock still guards a consistent sequence
        self.limbs.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Organism {
    fn default() -> Self {
        Self::new()
    }
}

/// Growth primitive shared by construction and [`Organism::grow_limb`]
fn graft(limbs: &RwLock<Vec<Limb>>, nerves: &Arc<Nerves>, name: String) -> Limb {
    let limb = Limb::with_nerves(name, Arc::clone(nerves));
    limbs
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(limb.clone());

    debug!(limb = %limb.name(), "limb grown");
    nerves.fire(LimbEvent::Grown {
        name: limb.name().to_string(),
    });
    limb
}
