//! Configuration file parsing for Organism
//!
//! Parses `organism.toml` manifests declaring the limbs a service grows
//! at startup.

use crate::error::{Error, Result};
use crate::organism::{CORE_LIMB, Organism};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load configuration from a file
pub fn load(path: &Path) -> Result<OrganismConfig> {
    let content = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: OrganismConfig = toml::from_str(&content)?;
    config.validate()?;

    Ok(config)
}

/// Root configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct OrganismConfig {
    /// Service-level settings
    #[serde(default)]
    pub organism: ServiceConfig,

    /// Limb definitions, grown in this order after core
    #[serde(default)]
    pub limbs: Vec<LimbDef>,
}

/// Service-level settings
#[derive(Debug, Default, Deserialize)]
pub struct ServiceConfig {
    /// Label used in logs and CLI output
    pub name: Option<String>,
}

/// A single limb definition
#[derive(Debug, Clone, Deserialize)]
pub struct LimbDef {
    /// Limb name
    pub name: String,
}

impl OrganismConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for limb in &self.limbs {
            if limb.name.trim().is_empty() {
                return Err(Error::ConfigValidation("Limb name must not be empty".into()));
            }

            if limb.name == CORE_LIMB {
                return Err(Error::ConfigValidation(format!(
                    "Limb name '{}' is reserved",
                    CORE_LIMB
                )));
            }

            if !names.insert(limb.name.as_str()) {
                return Err(Error::ConfigValidation(format!(
                    "Duplicate limb name: {}",
                    limb.name
                )));
            }
        }

        Ok(())
    }

    /// Get the service label, falling back to "organism"
    pub fn service_name(&self) -> &str {
        self.organism.name.as_deref().unwrap_or("organism")
    }

    /// Create an organism and grow every declared limb
    pub fn grow(&self) -> Organism {
        let organism = Organism::new();
        for limb in &self.limbs {
            organism.grow_limb(limb.name.as_str());
        }
        debug!(
            service = %self.service_name(),
            limbs = organism.limb_count(),
            "organism grown from manifest"
        );
        organism
    }
}
