// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Layers, lowest precedence first: built-in defaults, the TOML config file,
//! then `LEARNPATH_*` environment variables (`__` separates nested keys, e.g.
//! `LEARNPATH_DEFAULTS__MAX_COST_AMOUNT=5000`). Default exclusions take a
//! comma-separated list: `LEARNPATH_DEFAULTS__EXCLUDED_NODES=a,b`.

use crate::types::Constraints;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LEARNPATH";

/// Default constraint values applied when a command leaves them unset
///
/// Kept separate from [`Constraints`] because config keys are snake_case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintDefaults {
    /// Default total time budget in hours
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration_hours: Option<f64>,
    /// Default total cost budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cost_amount: Option<f64>,
    /// Default average difficulty ceiling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_difficulty: Option<f64>,
    /// Resources never planned
    pub excluded_nodes: Vec<String>,
}

impl ConstraintDefaults {
    /// Convert into a constraint set
    #[must_use]
    pub fn to_constraints(&self) -> Constraints {
        Constraints {
            max_duration_hours: self.max_duration_hours,
            max_cost_amount: self.max_cost_amount,
            max_difficulty: self.max_difficulty,
            required_nodes: Vec::new(),
            excluded_nodes: self.excluded_nodes.clone(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `<topic>.json` graph files
    pub data_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Serve the bundled sample graphs when a topic is missing or empty
    pub fallback_to_samples: bool,
    /// Constraint defaults
    pub defaults: ConstraintDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: project_dirs()
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".learnpath")),
            log_level: "info".to_string(),
            fallback_to_samples: true,
            defaults: ConstraintDefaults::default(),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "hyperpolymath", "learnpath")
}

/// Platform config file location, if one can be determined
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration
///
/// An explicit `path` must exist; the platform default file is optional.
///
/// # Errors
///
/// Fails if the explicit file is missing, or a layer cannot be parsed.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut builder = ::config::Config::builder();

    match path {
        Some(p) => {
            builder = builder.add_source(::config::File::from(p).required(true));
        }
        None => {
            if let Some(p) = default_config_path() {
                builder = builder.add_source(::config::File::from(p).required(false));
            }
        }
    }

    builder = builder.add_source(
        ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("defaults.excluded_nodes"),
    );

    let config: Config = builder
        .build()
        .context("Failed to load configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    tracing::debug!("Loaded config: {:?}", config);
    Ok(config)
}

/// Render a configuration as TOML
///
/// # Errors
///
/// Fails if the configuration cannot be serialized.
pub fn to_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}
