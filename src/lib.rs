//! Organism - aggregate readiness and liveness for services
//!
//! A service is an [`Organism`] made of [`Limb`]s: its own main loop (the
//! implicit `core` limb) plus every dependency it grows, such as an HTTP
//! server or a background worker. The organism is ready only when every
//! limb is ready and alive only while no limb has died. Death is terminal.
//!
//! ```
//! use organism::{Organism, Probe};
//!
//! let organism = Organism::new();
//! let http = organism.grow_limb("http-server");
//!
//! http.ready();
//! organism.ready();
//! assert!(Probe::Readiness.evaluate(&organism).passed);
//!
//! http.die();
//! assert!(!organism.is_alive());
//! assert_eq!(organism.dead_limbs()[0].name(), "http-server");
//! ```

pub mod error;
pub mod limb;
pub mod manifest;
pub mod organism;
pub mod pulse;
pub mod report;

pub use error::{Error, Result};
pub use limb::Limb;
pub use organism::{CORE_LIMB, Organism};
pub use pulse::LimbEvent;
pub use report::{HealthReport, LimbStatus, Probe, ProbeVerdict};
