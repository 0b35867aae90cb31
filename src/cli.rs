//! Command-line interface for Organism
//!
//! Uses clap with derive for type-safe CLI parsing

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use organism::error::{Error, Result};
use organism::{CORE_LIMB, Limb, Organism, Probe};
use std::path::PathBuf;

/// Organism - aggregate readiness and liveness for services
#[derive(Parser)]
#[command(name = "organism")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "organism.toml")]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate configuration and list the limbs it grows
    Check,

    /// Evaluate a probe; exits non-zero when it fails
    Probe {
        /// Probe to evaluate
        #[arg(value_enum)]
        probe: Probe,

        #[command(flatten)]
        transitions: Transitions,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the full health report as JSON
    Report {
        #[command(flatten)]
        transitions: Transitions,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Limb transitions to apply before evaluating
#[derive(Args, Debug, Default)]
pub struct Transitions {
    /// Limbs to mark ready (comma-separated, `core` included)
    #[arg(long, value_delimiter = ',')]
    pub ready: Vec<String>,

    /// Limbs to mark dead (comma-separated, `core` included)
    #[arg(long, value_delimiter = ',')]
    pub dead: Vec<String>,
}

impl Transitions {
    /// Apply readiness first, then deaths
    ///
    /// Every name is resolved before anything changes, so an unknown name
    /// leaves the organism untouched.
    pub fn apply(&self, organism: &Organism) -> Result<()> {
        // None stands for core, which goes through the organism
        let resolve = |name: &String| -> Result<Option<Limb>> {
            if name == CORE_LIMB {
                return Ok(None);
            }
            organism
                .limb(name)
                .map(Some)
                .ok_or_else(|| Error::UnknownLimb(name.clone()))
        };

        let ready = self.ready.iter().map(resolve).collect::<Result<Vec<_>>>()?;
        let dead = self.dead.iter().map(resolve).collect::<Result<Vec<_>>>()?;

        for limb in ready {
            match limb {
                Some(limb) => limb.ready(),
                None => organism.ready(),
            }
        }
        for limb in dead {
            match limb {
                Some(limb) => limb.die(),
                None => organism.die(),
            }
        }

        Ok(())
    }
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Generate shell completion scripts
    pub fn generate_completion(shell: Shell) {
        let mut cmd = Self::command();
        clap_complete::generate(shell, &mut cmd, "organism", &mut std::io::stdout());
    }
}
