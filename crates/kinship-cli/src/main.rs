//! Kinship CLI - Command line interface for the family graph

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, query, stats};
use config::Config;
use kinship_core::limits::validate_max_distance;
use kinship_core::{GraphNode, PersonId, RegexAnchorExtractor};
use kinship_service::FamilyGraphService;
use kinship_store::JsonFileStore;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "kinship")]
#[command(author, version, about = "Explore family relationships")]
pub struct Cli {
    /// JSON file with person records
    #[arg(long, global = true, env = "KINSHIP_DATA")]
    pub data: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parents, grandparents and further
    Ancestors(query::DistanceArgs),
    /// Children, grandchildren and further
    Descendants(query::DistanceArgs),
    /// Directly listed siblings
    Siblings(query::PersonArgs),
    /// Close relatives of every kind
    Relatives(query::RelativesArgs),
    /// Relatives who are neither ancestors nor descendants
    Others(query::DistanceArgs),
    /// Graph size
    Stats,
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the running graph service
pub struct AppContext {
    pub service: FamilyGraphService,
    pub format: OutputFormat,
    pub max_distance: u32,
}

impl AppContext {
    pub async fn new(cli: &Cli, config: &Config) -> anyhow::Result<Self> {
        let data_file = cli.data.clone().unwrap_or_else(|| config.data_file.clone());

        if !data_file.exists() {
            anyhow::bail!(
                "Data file not found: {}. Pass --data or run `kinship config set data_file <FILE>`.",
                data_file.display()
            );
        }

        let format_name = cli.format.as_deref().unwrap_or(&config.format);
        let Some(format) = OutputFormat::parse(format_name) else {
            anyhow::bail!("Unknown format '{}', expected table or json", format_name);
        };

        let store = Arc::new(JsonFileStore::new(data_file));
        tracing::debug!("Using data file at: {:?}", store.path());
        let service = FamilyGraphService::start(store, RegexAnchorExtractor::new()).await?;

        Ok(Self {
            service,
            format,
            max_distance: config.max_distance,
        })
    }

    /// The requested distance, or the configured one
    pub fn distance(&self, requested: Option<u32>) -> anyhow::Result<u32> {
        let distance = requested.unwrap_or(self.max_distance);
        validate_max_distance(distance)?;
        Ok(distance)
    }

    /// Look up a person by id string
    pub fn person(&self, id: &str) -> anyhow::Result<Option<Arc<GraphNode>>> {
        let id = PersonId::from_string(id.trim())
            .map_err(|e| anyhow::anyhow!("Invalid person id '{}': {}", id, e))?;
        Ok(self.service.person(&id))
    }

    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.service.shutdown().await?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting kinship CLI");

    match &cli.command {
        Commands::Config(args) => return config_cmd::run(args, &cli),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let config = Config::load()?;
    let ctx = AppContext::new(&cli, &config).await?;

    match &cli.command {
        Commands::Ancestors(args) => query::ancestors(args, &ctx)?,
        Commands::Descendants(args) => query::descendants(args, &ctx)?,
        Commands::Siblings(args) => query::siblings(args, &ctx)?,
        Commands::Relatives(args) => query::relatives(args, &ctx)?,
        Commands::Others(args) => query::others(args, &ctx)?,
        Commands::Stats => stats::run(&ctx)?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    ctx.shutdown().await
}
