// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{ConfigError, UnhandledErrorPolicy};
use crate::observability::messages::config::ConfigLoaded;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Configuration for callbacks produced by a [`Guard`](crate::guard::Guard).
///
/// Every field is optional. An empty document yields the same behavior as
/// the free [`then`](crate::guard::then) function.
///
/// # Fields
/// * `unhandled_errors` - What to do with an error no abort handler receives (defaults to `swallow`)
/// * `name_prefix` - Prefix applied to callback names in log messages (optional)
///
/// # Example
/// ```yaml
/// unhandled_errors: log
/// name_prefix: "loader"
/// ```
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct GuardConfig {
    #[serde(default)]
    pub unhandled_errors: UnhandledErrorPolicy,
    #[serde(default)]
    pub name_prefix: Option<String>,
}

impl GuardConfig {
    /// Parse a config from YAML text.
    ///
    /// Empty, comment-only and null (`~`) documents yield the default config.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml treats an empty document as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }
}

/// Load a guard config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GuardConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = GuardConfig::from_yaml_str(&content)?;

    ConfigLoaded {
        path: &path.display().to_string(),
        policy: cfg.unhandled_errors,
        name_prefix: cfg.name_prefix.as_deref(),
    }
    .log();

    Ok(cfg)
}
