//! Configuration for the Braket adapter.
//!
//! Supports loading configuration from:
//! 1. A YAML file (default `<config dir>/quill/braket.yaml`)
//! 2. Environment variables (`QUILL_BRAKET_` prefix, plus `AWS_REGION`)
//!
//! Environment variables take precedence over the file, which takes
//! precedence over defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::device::{DeviceArn, DeviceKind};

/// Braket adapter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BraketConfig {
    /// S3 bucket for task results
    #[serde(default)]
    pub s3_bucket: Option<String>,

    /// Folder (key prefix) inside the bucket
    #[serde(default)]
    pub s3_folder: Option<String>,

    /// Device type: "quantum-simulator" or "qpu"
    #[serde(default = "default_device_type")]
    pub device_type: String,

    /// Device provider (e.g., "amazon", "rigetti")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Device name (e.g., "sv1", "Ankaa-3")
    #[serde(default = "default_device")]
    pub device: String,

    /// AWS region; empty for region-less simulators
    #[serde(default)]
    pub region: String,
}

fn default_device_type() -> String {
    "quantum-simulator".to_string()
}

fn default_provider() -> String {
    "amazon".to_string()
}

fn default_device() -> String {
    "sv1".to_string()
}

impl Default for BraketConfig {
    fn default() -> Self {
        BraketConfig {
            s3_bucket: None,
            s3_folder: None,
            device_type: default_device_type(),
            provider: default_provider(),
            device: default_device(),
            region: String::new(),
        }
    }
}

impl BraketConfig {
    /// Default location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quill").join("braket.yaml"))
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: BraketConfig =
            serde_yaml_ng::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from `path`, or from the default path if that file exists
    /// 2. Apply environment variable overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => {
                    debug!(path = %default.display(), "loading braket config");
                    Self::from_file(default)?
                }
                _ => BraketConfig::default(),
            },
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as YAML, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        let yaml =
            serde_yaml_ng::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        std::fs::write(path, yaml).map_err(|e| ConfigError::IoError(e.to_string()))
    }

    /// Merge process environment variables into this configuration.
    pub fn merge_env(self) -> Self {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Merge variables from `lookup` into this configuration.
    ///
    /// Only variables that are present override the current values.
    pub fn merge_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QUILL_BRAKET_S3_BUCKET") {
            self.s3_bucket = Some(v);
        }
        if let Some(v) = lookup("QUILL_BRAKET_S3_FOLDER") {
            self.s3_folder = Some(v);
        }
        if let Some(v) = lookup("QUILL_BRAKET_DEVICE_TYPE") {
            self.device_type = v;
        }
        if let Some(v) = lookup("QUILL_BRAKET_PROVIDER") {
            self.provider = v;
        }
        if let Some(v) = lookup("QUILL_BRAKET_DEVICE") {
            self.device = v;
        }
        if let Some(v) = lookup("AWS_REGION") {
            self.region = v;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if DeviceKind::from_device_type(&self.device_type).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "Unknown device type: {}",
                self.device_type
            )));
        }
        if self.provider.is_empty() {
            return Err(ConfigError::ValidationError(
                "provider must not be empty".to_string(),
            ));
        }
        if self.device.is_empty() || self.device.contains('/') {
            return Err(ConfigError::ValidationError(format!(
                "Invalid device name: {:?}",
                self.device
            )));
        }
        for (field, value) in [("s3_bucket", &self.s3_bucket), ("s3_folder", &self.s3_folder)] {
            if value.as_deref() == Some("") {
                return Err(ConfigError::ValidationError(format!(
                    "{field} must not be empty; omit the field instead"
                )));
            }
        }
        Ok(())
    }

    /// S3 destination for task results.
    ///
    /// Returns `Some` only when both bucket and folder are set.
    pub fn s3_destination(&self) -> Option<(&str, &str)> {
        match (self.s3_bucket.as_deref(), self.s3_folder.as_deref()) {
            (Some(bucket), Some(folder)) => Some((bucket, folder)),
            (Some(_), None) | (None, Some(_)) => {
                warn!("s3_bucket and s3_folder must both be set; ignoring S3 destination");
                None
            }
            (None, None) => None,
        }
    }

    /// ARN of the configured device.
    pub fn device_arn(&self) -> DeviceArn {
        DeviceArn::new(&self.region, &self.device_type, &self.provider, &self.device)
    }

    /// Kind of the configured device.
    pub fn device_kind(&self) -> Option<DeviceKind> {
        DeviceKind::from_device_type(&self.device_type)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
