//! Rigview CLI - headless front end for the rigview scene core
//!
//! # Commands
//!
//! - `rigview run <script>` - Execute a scene script and report assertions
//! - `rigview inspect` - Print a figure's part matrices for a given pose
//! - `rigview config` - Show or initialize the configuration file
//!
//! # Usage
//!
//! ```bash
//! # Run a script, writing a JSON report and stopping at the first failure
//! rigview run scripts/walk.toml --report walk.json --fail-fast
//!
//! # Where does the car's front-left wheel end up?
//! rigview inspect --figure car --x 2 --z 3 --yaw 90
//!
//! # Write the default config.toml
//! rigview config --init
//! ```
//!
//! Logging follows `RUST_LOG` and defaults to `info`.

mod config_cmd;
mod inspect;
mod run;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rigview_core::config::{self, Config};

/// Rigview CLI - hierarchical model viewer tools
#[derive(Parser)]
#[command(name = "rigview")]
#[command(about = "Headless tools for the rigview scene core")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a scene script headlessly
    Run(run::RunArgs),

    /// Print the part matrices of a posed figure
    Inspect(inspect::InspectArgs),

    /// Show or initialize the configuration
    Config(config_cmd::ConfigArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Config(args) => config_cmd::execute(args),
    }
}

/// Configuration from `path`, or the platform config file when absent.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => config::load_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(config::load()),
    }
}

#[cfg(test)]
pub(crate) fn default_config_file(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    config::save_to(&path, &Config::default()).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_accepts_negative_values() {
        let cli = Cli::try_parse_from(["rigview", "inspect", "--x", "-2", "--yaw", "-90", "--scale", "-1"]).unwrap();
        let Commands::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.x, -2.0);
        assert_eq!(args.yaw, -90.0);
        assert_eq!(args.scale, -1.0);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_config_file(dir.path());
        assert_eq!(load_config(Some(&path)).unwrap(), Config::default());
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
