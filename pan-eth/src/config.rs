use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::version::{Version, VersionError};

/// Where the device configuration lives and how to talk to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSettings {
    /// Configuration XML. Relative paths resolve against the settings file.
    pub config: Option<PathBuf>,
    /// Software version to assume instead of the one in the configuration.
    pub version: Option<String>,
    /// Default vsys for write commands.
    pub vsys: Option<String>,
}

/// Errors returned when loading device settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid version in settings file {path}: {source}")]
    Version { path: String, source: VersionError },
}

impl DeviceSettings {
    /// Parsed `version`, if set.
    pub fn parsed_version(&self) -> Result<Option<Version>, VersionError> {
        self.version.as_deref().map(str::parse).transpose()
    }
}

/// Load device settings from a TOML file.
pub fn load_device_settings(path: &Path) -> Result<DeviceSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut settings = parse_settings(&raw, path.display().to_string())?;
    if let (Some(config), Some(base)) = (&settings.config, path.parent()) {
        if config.is_relative() {
            settings.config = Some(base.join(config));
        }
    }
    Ok(settings)
}

fn parse_settings(raw: &str, path: String) -> Result<DeviceSettings, ConfigError> {
    let settings: DeviceSettings = toml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    settings
        .parsed_version()
        .map_err(|source| ConfigError::Version { path, source })?;
    Ok(settings)
}
