//! Connector configuration
//!
use std::fs;
use std::path::Path;
use std::{collections::HashMap, fmt::Display};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use yaml_peg::serde as yaml;

use crate::logging::debug;

/// The user-defined namespace corresponding to the connector.
#[derive(Clone, Deserialize, Debug, Hash, PartialEq, Eq, Default, PartialOrd, Ord, Serialize)]
pub struct ConnectorNamespace(pub String);

impl Display for ConnectorNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Struct representing the grantline.yaml project file.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct ProjectConfig {
    version: String,
    name: String,
    /// All connector configs defined.
    pub connectors: HashMap<ConnectorNamespace, ConnectorConfig>,
}

impl ProjectConfig {
    /// Read the project config from the given path.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<ProjectConfig> {
        let config_raw = fs::read_to_string(&path).context("Reading file")?;
        Self::from_yaml(&config_raw)
    }

    /// Parse the project config from a yaml string.
    pub fn from_yaml(raw: &str) -> Result<ProjectConfig> {
        let mut config = yaml::from_str::<ProjectConfig>(raw).context("Deserializing config")?;
        config.pop().ok_or_else(|| anyhow!["config file was empty"])
    }

    /// Get the name
    pub fn get_name(&self) -> String {
        self.name.to_owned()
    }
}

/// Config for a single connector in this project.
#[derive(Clone, Deserialize, Serialize, Default, Debug)]
pub struct ConnectorConfig {
    /// The connector type
    #[serde(rename = "type")]
    pub connector_type: String,
    /// Additional configuration, specific to the connector
    #[serde(flatten)]
    pub config: HashMap<String, String>,
}

impl ConnectorConfig {
    /// Basic constructor
    pub fn new(connector_type: String, config: HashMap<String, String>) -> Self {
        Self {
            connector_type,
            config,
        }
    }

    /// Get a config value split on commas, with blanks removed.
    ///
    /// Missing keys produce an empty list.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.config
            .get(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get a boolean config value. Missing keys are `false`.
    pub fn get_flag(&self, key: &str) -> Result<bool> {
        match self.config.get(key).map(|v| v.trim().to_lowercase()) {
            None => Ok(false),
            Some(v) if v == "true" => Ok(true),
            Some(v) if v == "false" || v.is_empty() => Ok(false),
            Some(other) => Err(anyhow!("expected true or false for {key}, got {other}")),
        }
    }
}

/// Alias for HashMap to hold credentials information.
pub type CredentialsMap = HashMap<String, String>;

/// Fetch the credentials for every connector namespace from the given file.
pub fn fetch_credentials<P: AsRef<Path>>(path: P) -> Result<HashMap<String, CredentialsMap>> {
    debug!("Trying to read credentials from {:?}", path.as_ref());
    let credentials_raw = fs::read_to_string(path)?;
    let mut config = yaml::from_str::<HashMap<String, CredentialsMap>>(&credentials_raw)?;

    config
        .pop()
        .ok_or_else(|| anyhow!["failed to generate credentials"])
}
