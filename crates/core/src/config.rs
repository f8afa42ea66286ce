//! Configuration management
//!
//! This module handles loading the s3cp configuration file.
//! The configuration file is stored in TOML format at ~/.config/s3cp/config.toml,
//! or under the directory named by `S3CP_CONFIG_DIR` when set.
//!
//! Credentials are never read from or written to this file; the S3 adapter
//! takes them from the ambient AWS environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::DEFAULT_ACL;

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "S3CP_CONFIG_DIR";

/// Default output format
const DEFAULT_OUTPUT: &str = "human";

/// Accepted values for `defaults.output`
const OUTPUT_FORMATS: &[&str] = &[DEFAULT_OUTPUT, "json"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default settings for CLI behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Canned ACL for uploads
    #[serde(default = "default_acl")]
    pub acl: String,

    /// Output format: "human" or "json"
    #[serde(default = "default_output")]
    pub output: String,

    /// Service region; falls back to the AWS environment when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[serde(default)]
    pub force_path_style: bool,
}

fn default_acl() -> String {
    DEFAULT_ACL.to_string()
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            acl: default_acl(),
            output: default_output(),
            region: None,
            endpoint_url: None,
            force_path_style: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
        }
    }
}

/// Connection settings handed to the storage client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
}

impl Defaults {
    /// Connection settings from the file, with command line values taking precedence
    pub fn endpoint(
        &self,
        region: Option<String>,
        endpoint_url: Option<String>,
        force_path_style: bool,
    ) -> EndpointConfig {
        EndpointConfig {
            region: region.or_else(|| self.region.clone()),
            endpoint_url: endpoint_url.or_else(|| self.endpoint_url.clone()),
            force_path_style: force_path_style || self.force_path_style,
        }
    }
}

/// Configuration manager handles locating and loading config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("s3cp"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)
            .map_err(|e| Error::local_io(&self.config_path, e))?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade s3cp.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        if !OUTPUT_FORMATS.contains(&config.defaults.output.as_str()) {
            return Err(Error::Config(format!(
                "Unknown output format '{}' in {} (expected one of: {})",
                config.defaults.output,
                self.config_path.display(),
                OUTPUT_FORMATS.join(", ")
            )));
        }

        Ok(config)
    }
}
