//! CLI configuration

use std::path::PathBuf;

use anyhow::Context;
use kinship_core::limits::validate_max_distance;
use kinship_core::DEFAULT_TRAVERSAL_DISTANCE;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "KINSHIP_CONFIG";

/// Location of the config file
pub fn config_file_path() -> PathBuf {
    std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("kinship")
                .join("config.toml")
        })
}

/// Get default data file
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kinship")
        .join("people.json")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the person records
    pub data_file: PathBuf,
    /// Traversal distance used when a command gives none
    pub max_distance: u32,
    /// Output format: table or json
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            max_distance: DEFAULT_TRAVERSAL_DISTANCE,
            format: "table".to_string(),
        }
    }
}

impl Config {
    /// Load the config file, or the defaults if there is none
    pub fn load() -> anyhow::Result<Self> {
        let path = config_file_path();
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        validate_max_distance(config.max_distance)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["data_file", "max_distance", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_file" => Some(self.data_file.display().to_string()),
            "max_distance" => Some(self.max_distance.to_string()),
            "format" => Some(self.format.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "data_file" => self.data_file = PathBuf::from(value),
            "max_distance" => {
                let distance: u32 = value
                    .parse()
                    .with_context(|| format!("max_distance must be a number, got '{}'", value))?;
                validate_max_distance(distance)?;
                self.max_distance = distance;
            }
            "format" => {
                if OutputFormat::parse(value).is_none() {
                    anyhow::bail!("Unknown format '{}', expected table or json", value);
                }
                self.format = value.to_lowercase();
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}
