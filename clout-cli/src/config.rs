use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clout_identity::RemoteSignerConfig;
use clout_types::constants::{DEFAULT_REMOTE_APPROVAL_TIMEOUT, DEFAULT_REMOTE_RESPONSE_TIMEOUT};
use clout_types::primitives::Network;

use crate::error::CliError;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "clout.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Network used for address encoding: "mainnet" or "testnet".
    pub network: Network,
    pub logging: LoggingConfig,
    pub remote_signer: RemoteSignerSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSignerSection {
    pub response_timeout_secs: u64,
    pub approval_timeout_secs: u64,
}

impl Default for RemoteSignerSection {
    fn default() -> Self {
        Self {
            response_timeout_secs: DEFAULT_REMOTE_RESPONSE_TIMEOUT.as_secs(),
            approval_timeout_secs: DEFAULT_REMOTE_APPROVAL_TIMEOUT.as_secs(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path, e),
        })?;
        let config: CliConfig = toml::from_str(&contents).map_err(|e| CliError::ConfigError {
            reason: format!("failed to parse config file '{}': {}", path, e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self, CliError> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write a default configuration file into `dir`. Refuses to overwrite.
    pub fn init(dir: &str) -> Result<PathBuf, CliError> {
        let dir_path = Path::new(dir);
        if !dir_path.exists() {
            std::fs::create_dir_all(dir_path)?;
        }

        let config_path = dir_path.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Err(CliError::ConfigError {
                reason: format!("'{}' already exists", config_path.display()),
            });
        }

        let toml_str =
            toml::to_string_pretty(&CliConfig::default()).map_err(|e| CliError::ConfigError {
                reason: format!("failed to serialize default config: {}", e),
            })?;
        std::fs::write(&config_path, toml_str)?;

        Ok(config_path)
    }

    /// Timeouts for the remote signer, as the identity layer wants them.
    pub fn remote_signer_config(&self) -> RemoteSignerConfig {
        RemoteSignerConfig::default()
            .with_response_timeout(Duration::from_secs(self.remote_signer.response_timeout_secs))
            .with_approval_timeout(Duration::from_secs(self.remote_signer.approval_timeout_secs))
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.remote_signer.response_timeout_secs == 0
            || self.remote_signer.approval_timeout_secs == 0
        {
            return Err(CliError::ConfigError {
                reason: "remote_signer timeouts must be at least one second".to_string(),
            });
        }
        Ok(())
    }
}
