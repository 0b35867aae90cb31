//! Organism - aggregate readiness and liveness for services
//!
//! Builds an organism from a TOML manifest and evaluates orchestrator
//! probes against it.

mod cli;

use cli::{Cli, Commands};
use organism::error::Result;
use organism::manifest;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the fmt subscriber, filtered by `ORGANISM_LOG` when set
fn init_tracing(verbose: bool) {
    let default = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .with_env_var("ORGANISM_LOG")
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Completion { shell } => {
            Cli::generate_completion(shell);
        }

        Commands::Check => {
            let config = manifest::load(&cli.config)?;
            println!(
                "Configuration valid: {} ({})",
                config.service_name(),
                cli.config.display()
            );
            println!("  core (implicit)");
            for limb in &config.limbs {
                println!("  {}", limb.name);
            }
        }

        Commands::Probe {
            probe,
            transitions,
            json,
        } => {
            let config = manifest::load(&cli.config)?;
            let organism = config.grow();
            transitions.apply(&organism)?;

            let verdict = probe.evaluate(&organism);
            if json {
                println!("{}", verdict.to_json()?);
            } else {
                println!("{}", verdict);
            }

            if !verdict.passed {
                std::process::exit(1);
            }
        }

        Commands::Report { transitions } => {
            let config = manifest::load(&cli.config)?;
            let organism = config.grow();
            transitions.apply(&organism)?;

            println!("{}", organism.report().to_json()?);
        }
    }

    Ok(())
}
