//! Server configuration and static strategy profile content.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of per-strategy performance/holdings CSV files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Adjusted-close price CSV file (omit to serve without a market-data
    /// provider; component returns then degrade to zero)
    pub prices_file: Option<String>,

    /// Strategy profile content file
    pub profiles_file: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "./data".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            prices_file: None,
            profiles_file: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// One row of a strategy's info table (label/value pairs displayed as-is).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoRow {
    /// Row label, e.g. "Inception".
    pub label: String,
    /// Row value, e.g. "2021-01".
    pub value: String,
}

/// Static descriptive content for one strategy.
///
/// None of this is computed; it is configuration the dashboard displays
/// alongside the analytics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyProfile {
    /// Fund description paragraph.
    #[serde(default)]
    pub description: String,

    /// Label/value rows for the info table.
    #[serde(default)]
    pub info_table: Vec<InfoRow>,

    /// Investment philosophy bullet points.
    #[serde(default)]
    pub philosophy: Vec<String>,

    /// Risk framework bullet points.
    #[serde(default)]
    pub risk_framework: Vec<String>,
}

/// Profile content for all strategies, keyed by strategy name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyProfiles {
    /// Profiles by strategy name.
    #[serde(default)]
    pub strategies: HashMap<String, StrategyProfile>,
}

impl StrategyProfiles {
    /// Load profiles from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// The profile for a strategy, or empty content when none is
    /// configured (a strategy can exist in the data source without
    /// profile text).
    #[must_use]
    pub fn get(&self, strategy: &str) -> StrategyProfile {
        self.strategies.get(strategy).cloned().unwrap_or_default()
    }
}
