//! Health reports and probe verdicts
//!
//! Serializable views of an organism for whatever serves the actual
//! `/healthz` and `/readyz` endpoints.

use crate::error::Result;
use crate::organism::Organism;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Point-in-time state of a single limb
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimbStatus {
    pub name: String,
    pub alive: bool,
    pub ready: bool,
}

/// Point-in-time state of a whole organism
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// No limb has died
    pub alive: bool,
    /// Every limb is ready
    pub ready: bool,
    /// Every limb, in growth order
    pub limbs: Vec<LimbStatus>,
    /// Names of dead limbs, in growth order
    pub dead: Vec<String>,
    /// Names of limbs not ready yet, in growth order
    pub not_ready: Vec<String>,
}

impl HealthReport {
    /// Aggregate from statuses read in one pass
    pub(crate) fn from_statuses(limbs: Vec<LimbStatus>) -> Self {
        let dead: Vec<String> = limbs
            .iter()
            .filter(|l| !l.alive)
            .map(|l| l.name.clone())
            .collect();
        let not_ready: Vec<String> = limbs
            .iter()
            .filter(|l| !l.ready)
            .map(|l| l.name.clone())
            .collect();

        Self {
            alive: dead.is_empty(),
            ready: not_ready.is_empty(),
            limbs,
            dead,
            not_ready,
        }
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Kind of orchestrator health probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Probe {
    /// Has the process irrecoverably failed?
    Liveness,
    /// Can the process serve traffic right now?
    Readiness,
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probe::Liveness => write!(f, "liveness"),
            Probe::Readiness => write!(f, "readiness"),
        }
    }
}

impl Probe {
    /// Evaluate this probe against the organism's current state
    pub fn evaluate(self, organism: &Organism) -> ProbeVerdict {
        let failing = match self {
            Probe::Liveness => organism.dead_limbs(),
            Probe::Readiness => organism.not_ready_limbs(),
        };
        let failing: Vec<String> = failing.iter().map(|l| l.name().to_string()).collect();

        ProbeVerdict {
            probe: self,
            passed: failing.is_empty(),
            failing,
        }
    }
}

/// Outcome of a single probe evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeVerdict {
    pub probe: Probe,
    pub passed: bool,
    /// Names of the limbs failing the probe
    pub failing: Vec<String>,
}

impl ProbeVerdict {
    /// HTTP status a probe endpoint should answer with
    pub fn status_code(&self) -> u16 {
        if self.passed { 200 } else { 503 }
    }

    /// Render as compact JSON, suitable for a probe response body
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for ProbeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            write!(f, "{}: ok", self.probe)
        } else {
            write!(f, "{}: failing ({})", self.probe, self.failing.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_organism_report() {
        let report = Organism::new().report();
        assert!(report.alive);
        assert!(!report.ready);
        assert!(report.dead.is_empty());
        assert_eq!(report.not_ready, vec!["core"]);
        assert_eq!(
            report.limbs,
            vec![LimbStatus {
                name: "core".into(),
                alive: true,
                ready: false,
            }]
        );
    }

    #[test]
    fn test_report_json_shape() {
        let organism = Organism::new();
        organism.grow_limb("http-server").die();
        organism.ready();

        let json: serde_json::Value =
            serde_json::from_str(&organism.report().to_json().unwrap()).unwrap();
        assert_eq!(json["alive"], false);
        assert_eq!(json["ready"], false);
        assert_eq!(json["dead"], serde_json::json!(["http-server"]));
        assert_eq!(json["not_ready"], serde_json::json!(["http-server"]));
        assert_eq!(json["limbs"][0]["name"], "core");
        assert_eq!(json["limbs"][1]["alive"], false);
    }

    #[test]
    fn test_liveness_probe() {
        let organism = Organism::new();
        let limb = organism.grow_limb("grpc-server");

        let verdict = Probe::Liveness.evaluate(&organism);
        assert!(verdict.passed);
        assert_eq!(verdict.status_code(), 200);
        assert_eq!(verdict.to_string(), "liveness: ok");

        limb.die();
        let verdict = Probe::Liveness.evaluate(&organism);
        assert!(!verdict.passed);
        assert_eq!(verdict.status_code(), 503);
        assert_eq!(verdict.failing, vec!["grpc-server"]);
        assert_eq!(verdict.to_string(), "liveness: failing (grpc-server)");
    }

    #[test]
    fn test_readiness_probe() {
        let organism = Organism::new();
        organism.grow_limb("http-server").ready();

        let verdict = Probe::Readiness.evaluate(&organism);
        assert!(!verdict.passed);
        assert_eq!(verdict.failing, vec!["core"]);

        organism.ready();
        let verdict = Probe::Readiness.evaluate(&organism);
        assert!(verdict.passed);
        assert!(verdict.failing.is_empty());
    }

    #[test]
    fn test_readiness_unaffected_by_death() {
        let organism = Organism::new();
        organism.ready();
        organism.die();

        assert!(Probe::Readiness.evaluate(&organism).passed);
        assert!(!Probe::Liveness.evaluate(&organism).passed);
    }

    #[test]
    fn test_verdict_json() {
        let organism = Organism::new();
        let json = Probe::Readiness.evaluate(&organism).to_json().unwrap();
        assert_eq!(
            json,
            r#"{"probe":"readiness","passed":false,"failing":["core"]}"#
        );
    }

    #[test]
    fn test_probe_from_cli_value() {
        assert_eq!(
            Probe::from_str("liveness", false).unwrap(),
            Probe::Liveness
        );
        assert_eq!(
            Probe::from_str("readiness", false).unwrap(),
            Probe::Readiness
        );
        assert!(Probe::from_str("startup", false).is_err());
    }
}
