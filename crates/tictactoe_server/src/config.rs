//! Server configuration.
//!
//! Values come from three layers, later layers overriding earlier ones:
//! environment variables (`ENVIRONMENT`, `AI_TYPE`), an optional TOML
//! file, and command-line flags applied by the binary.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_core::StrategyKind;
use tracing::{debug, info, instrument, warn};

/// Deployment environment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    /// Local development.
    #[default]
    Development,
    /// Pre-production.
    Staging,
    /// Production.
    Production,
    /// Test runs.
    Testing,
}

impl Environment {
    /// Parses an environment name; unknown names mean development.
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or_else(|_| {
            warn!(label, "Unknown environment, using development");
            Environment::default()
        })
    }
}

/// Effective server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct ServerConfig {
    /// Deployment environment.
    environment: Environment,
    /// Strategy used when a suggestion does not name one.
    ai_type: StrategyKind,
}

/// Keys accepted in a TOML config file; absent keys leave values alone.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    environment: Option<String>,
    ai_type: Option<String>,
}

impl ServerConfig {
    /// Reads `ENVIRONMENT` and `AI_TYPE` from the process environment.
    #[instrument]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment = lookup("ENVIRONMENT")
            .map(|v| Environment::from_label(&v))
            .unwrap_or_default();
        let ai_type = lookup("AI_TYPE")
            .map(|v| StrategyKind::from_label(v.trim()))
            .unwrap_or_default();
        debug!(%environment, %ai_type, "Configuration from variables");
        Self {
            environment,
            ai_type,
        }
    }

    /// Overlays the keys present in a TOML file onto this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn merge_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        self.merge_toml(&content)
    }

    /// Overlays the keys present in TOML text onto this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid config TOML.
    pub fn merge_toml(self, content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        let mut config = self;
        if let Some(environment) = file.environment {
            config.environment = Environment::from_label(&environment);
        }
        if let Some(ai_type) = file.ai_type {
            config.ai_type = StrategyKind::from_label(ai_type.trim());
        }
        info!(environment = %config.environment, ai_type = %config.ai_type, "Config loaded");
        Ok(config)
    }

    /// Environment variables, then the optional file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a file is given and cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::from_env();
        match path {
            Some(path) => config.merge_file(path),
            None => Ok(config),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
