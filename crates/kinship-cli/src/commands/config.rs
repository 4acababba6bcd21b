//! Config command for managing CLI configuration

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};
use crate::Cli;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Get a config value
    Get {
        /// Config key name
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key name
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
    /// Initialize default config file, seeding data_file from --data
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, cli: &Cli) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => run_get(key),
        ConfigCommands::Set { key, value } => run_set(key, value),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Init { force } => run_init(*force, cli),
    }
}

fn run_get(key: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    match config.get(key) {
        Some(value) => println!("{}", value),
        None => anyhow::bail!(
            "Unknown config key: {}. Available keys: {}",
            key,
            Config::keys().join(", ")
        ),
    }
    Ok(())
}

fn run_set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    tracing::info!("Saved config to {:?}", config_file_path());
    println!("Set {} = {}", key, value);
    Ok(())
}

fn run_list() -> anyhow::Result<()> {
    let path = config_file_path();
    let config = Config::load()?;
    let defaults = Config::default();

    if path.exists() {
        println!("Config file: {}", path.display());
    } else {
        println!("Config file: {} (not created, showing defaults)", path.display());
    }
    println!();
    for key in Config::keys() {
        let value = config.get(key).unwrap_or_default();
        if config.get(key) == defaults.get(key) {
            println!("{} = {} (default)", key, value);
        } else {
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}

fn run_path() -> anyhow::Result<()> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_init(force: bool, cli: &Cli) -> anyhow::Result<()> {
    let path = config_file_path();

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let mut config = Config::default();
    if let Some(data) = &cli.data {
        config.data_file = data.clone();
    }
    config.save()?;
    println!("Created config file at {}", path.display());
    Ok(())
}
