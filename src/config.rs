//! Configuration management for the unfreeze ledger

use crate::crypto::MAINNET_ADDRESS_PREFIX;
use crate::error::ChainError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub governance: GovernanceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Address prefix byte as hex, e.g. "41" for mainnet or "a0" for testnet.
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

/// Values used to seed the dynamic properties of a fresh store.
#[derive(Debug, Clone, Deserialize)]
pub struct GovernanceConfig {
    #[serde(default = "default_unfreeze_delay_days")]
    pub unfreeze_delay_days: i64,
    #[serde(default)]
    pub genesis_timestamp: i64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            address_prefix: default_address_prefix(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            unfreeze_delay_days: default_unfreeze_delay_days(),
            genesis_timestamp: 0,
        }
    }
}

impl NetworkConfig {
    pub fn address_prefix_byte(&self) -> Result<u8, ChainError> {
        let bytes = hex::decode(&self.address_prefix).map_err(|e| {
            ChainError::ConfigError(format!("network.address_prefix is not hex: {}", e))
        })?;
        match bytes.as_slice() {
            [prefix] => Ok(*prefix),
            _ => Err(ChainError::ConfigError(format!(
                "network.address_prefix must be a single byte, got {} bytes",
                bytes.len()
            ))),
        }
    }
}

/// Loads configuration from `path`, falling back to defaults when the file
/// does not exist.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ChainError> {
    let path = path.as_ref();
    let config: Config = if path.exists() {
        let config_str = fs::read_to_string(path)?;
        toml::from_str(&config_str)?
    } else {
        tracing::debug!("{} not found, using default configuration", path.display());
        Config::default()
    };

    // Validate critical values
    if config.database.path.is_empty() {
        return Err(ChainError::ConfigError(
            "database.path must be set".to_string(),
        ));
    }
    config.network.address_prefix_byte()?;
    if config.governance.unfreeze_delay_days < 0 {
        return Err(ChainError::ConfigError(
            "governance.unfreeze_delay_days cannot be negative".to_string(),
        ));
    }

    Ok(config)
}

fn default_address_prefix() -> String {
    hex::encode([MAINNET_ADDRESS_PREFIX])
}

fn default_db_path() -> String {
    "./data/accounts.db".to_string()
}

fn default_unfreeze_delay_days() -> i64 {
    14
}
