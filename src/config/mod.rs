//! Installer configuration file
//!
//! An optional YAML file supplies defaults for the install command:
//!
//! ```yaml
//! software: paper
//! version: latest
//! ram_max: 6G
//! geyser: true
//! server_properties:
//!   motd: My server
//!   max-players: 40
//! geyser_config:
//!   bedrock.port: 19133
//! ```
//!
//! The file is taken from `--config`/`MCSETUP_CONFIG`, or from
//! `<config dir>/mcsetup/config.yaml` when that exists.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{Result, SetupError};
use crate::template::{self, Overrides};

/// Config filename inside the user's config directory
pub const CONFIG_FILE: &str = "config.yaml";

/// Defaults for the install command
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    pub software: Option<String>,
    pub version: Option<String>,
    pub build: Option<u32>,
    pub ram_min: Option<String>,
    pub ram_max: Option<String>,
    pub geyser: Option<bool>,
    pub floodgate: Option<bool>,
    pub runtime: Option<bool>,
    pub accept_eula: Option<bool>,
    pub port: Option<u16>,
    pub server_properties: BTreeMap<String, Value>,
    pub geyser_config: BTreeMap<String, Value>,
}

impl SetupConfig {
    /// Parse a config document; `path` is only used in error messages
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SetupError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load the config named on the command line, or the default one if present
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let Some(path) = locate(explicit) else {
            return Ok(Self::default());
        };
        tracing::debug!(path = %path.display(), "loading config");

        let content = fs::read_to_string(&path).map_err(|e| SetupError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&content, &path)
    }

    /// `server_properties` as template overrides
    pub fn server_property_overrides(&self) -> Result<Overrides> {
        to_overrides(&self.server_properties, "server_properties")
    }

    /// `geyser_config` as template overrides
    pub fn geyser_overrides(&self) -> Result<Overrides> {
        to_overrides(&self.geyser_config, "geyser_config")
    }
}

/// Default config location, if the platform has a config directory
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mcsetup").join(CONFIG_FILE))
}

/// An explicit path always wins, even if it does not exist, so that a typo
/// surfaces as an error instead of silently using defaults
fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_path().filter(|path| path.is_file()),
    }
}

fn to_overrides(map: &BTreeMap<String, Value>, section: &str) -> Result<Overrides> {
    map.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                _ => {
                    return Err(SetupError::ConfigParseFailed {
                        path: section.to_string(),
                        reason: format!("value for '{key}' must be a string, number or boolean"),
                    });
                }
            };
            if !template::is_single_line(&value) {
                return Err(SetupError::InvalidOverride {
                    input: format!("{key}={value}"),
                });
            }
            Ok((key.clone(), value))
        })
        .collect()
}
