//! Bridge configuration persisted under the user's home directory.

use crate::error::{BridgeError, Result};
use crate::network::{self, Network};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Name of the network transactions are materialized for.
    pub network: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            network: "mainnet".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Load from the default path, falling back to defaults if no config
    /// file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolve the configured network.
    ///
    /// A name the registry does not know is an error rather than a silent
    /// mainnet fallback; a config typo must not sign against chain id 1.
    pub fn resolve_network(&self) -> Result<Network> {
        network::by_name(&self.network)
            .ok_or_else(|| BridgeError::UnknownNetwork(self.network.clone()))
    }
}

/// Default config file location.
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bcvault")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = BridgeConfig::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.resolve_network().unwrap(), Network::mainnet());
    }

    #[test]
    fn save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = BridgeConfig {
            network: "polygon".to_string(),
        };
        config.save_to(&path).unwrap();

        let loaded = BridgeConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.resolve_network().unwrap().chain_id, 137);
    }

    #[test]
    fn unknown_network_is_an_error() {
        let config = BridgeConfig {
            network: "atlantis".to_string(),
        };
        assert!(matches!(
            config.resolve_network(),
            Err(BridgeError::UnknownNetwork(name)) if name == "atlantis"
        ));
    }
}
