//! `canopy.toml` loading.
//!
//! ```toml
//! [schema]
//! allow_values_arrays = false
//! ```
//!
//! Every key is optional; unknown keys are rejected so typos surface early.

use canopy_schema::NormalizeOptions;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Default file name looked up by tools.
pub const CONFIG_FILE_NAME: &str = "canopy.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

///
/// CanopyConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CanopyConfig {
    pub schema: SchemaConfig,
}

impl CanopyConfig {
    /// Parse configuration from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Load configuration from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: origin.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&text, &origin)?;

        tracing::debug!(path = %origin, ?config, "loaded config");

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    #[must_use]
    pub const fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            allow_values_arrays: self.schema.allow_values_arrays,
        }
    }
}

///
/// SchemaConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    /// Accept the deprecated array-of-properties shape.
    pub allow_values_arrays: bool,
}

///
/// TESTS
///
