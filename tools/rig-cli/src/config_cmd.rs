//! Show or initialize the configuration file

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use rigview_core::config::{self, Config};

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default configuration
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,

    /// Print the config file location and exit
    #[arg(long)]
    pub path: bool,

    /// Config file to use instead of the platform config
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn execute(args: ConfigArgs) -> Result<()> {
    let path = match args.file.clone() {
        Some(path) => path,
        None => config::config_path().context("No platform config directory available")?,
    };

    if args.path {
        println!("{}", path.display());
        return Ok(());
    }

    if args.init {
        if path.exists() && !args.force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
        config::save_to(&path, &Config::default())
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = if path.exists() {
        crate::load_config(Some(&path))?
    } else {
        println!("# {} not found, showing defaults", path.display());
        Config::default()
    };
    print!("{}", toml::to_string_pretty(&config)?);

    for warning in config::validate_config(&config) {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(file: PathBuf) -> ConfigArgs {
        ConfigArgs {
            init: false,
            force: false,
            path: false,
            file: Some(file),
        }
    }

    #[test]
    fn test_init_then_refuse_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("config.toml");

        execute(ConfigArgs {
            init: true,
            ..args(file.clone())
        })
        .unwrap();
        assert_eq!(config::load_from(&file).unwrap(), Config::default());

        let again = execute(ConfigArgs {
            init: true,
            ..args(file.clone())
        });
        assert!(again.is_err());

        execute(ConfigArgs {
            init: true,
            force: true,
            ..args(file)
        })
        .unwrap();
    }

    #[test]
    fn test_show_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        execute(args(dir.path().join("absent.toml"))).unwrap();
    }
}
