// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Layers, lowest to highest precedence: built-in defaults, the TOML config
//! file, then `COLLECTORY_*` environment variables (`__` separates nested
//! keys, e.g. `COLLECTORY_ANALYTICS__RECENT_LIMIT=20`).

use crate::analytics::AnalyticsSettings;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "COLLECTORY";

/// Achievement engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementSettings {
    /// Definition table to use instead of the built-in one
    pub definitions: Option<PathBuf>,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the collection, catalog and achievement snapshot
    pub data_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Aggregator settings
    pub analytics: AnalyticsSettings,
    /// Achievement settings
    pub achievements: AchievementSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: project_dirs()
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".collectory")),
            log_level: "info".to_string(),
            analytics: AnalyticsSettings::default(),
            achievements: AchievementSettings::default(),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "hyperpolymath", "collectory")
}

/// Default location of the config file
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("collectory.toml"))
}

/// Load configuration
///
/// An explicitly given file must exist; the default file is optional.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut builder = config::Config::builder();

    match path {
        Some(path) => {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        None => {
            if let Some(default) = default_config_path() {
                builder = builder.add_source(config::File::from(default).required(false));
            }
        }
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
