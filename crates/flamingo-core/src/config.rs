//! Configuration types for the Flamingo swap engine

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Network};

/// Environment variable naming an optional JSON config file
pub const CONFIG_PATH_ENV: &str = "FLAMINGO_CONFIG";
pub const NODE_URL_ENV: &str = "FLAMINGO_NODE_URL";
pub const NETWORK_ENV: &str = "FLAMINGO_NETWORK";
pub const API_PORT_ENV: &str = "FLAMINGO_API_PORT";

/// RPC node connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Neo N3 JSON-RPC endpoint (e.g., "http://127.0.0.1:10332")
    pub url: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:10332".to_string(),
        }
    }
}

/// Swap session defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapConfig {
    /// Slippage tolerance as a fraction (0.005 = 0.5%)
    #[serde(default = "default_slippage")]
    pub slippage: Decimal,

    /// Minutes until a built swap invocation expires
    #[serde(default = "default_deadline_minutes")]
    pub deadline_minutes: u64,

    /// Seconds between block height polls
    #[serde(default = "default_block_poll_secs")]
    pub block_poll_secs: u64,
}

fn default_slippage() -> Decimal {
    Decimal::new(5, 3)
}

fn default_deadline_minutes() -> u64 {
    10
}

fn default_block_poll_secs() -> u64 {
    15
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            slippage: default_slippage(),
            deadline_minutes: default_deadline_minutes(),
            block_poll_secs: default_block_poll_secs(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Node connection settings
    pub node: NodeConfig,

    /// Network (mainnet or testnet)
    pub network: Network,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Swap session defaults
    #[serde(default)]
    pub swap: SwapConfig,
}

fn default_api_port() -> u16 {
    10340
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            network: Network::Mainnet,
            api_port: default_api_port(),
            swap: SwapConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a config from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Load config: optional file from `FLAMINGO_CONFIG`, then env overrides
    pub fn load() -> Result<Self, Error> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_json_file(path)?,
            _ => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (environment in production)
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        if let Some(url) = lookup(NODE_URL_ENV) {
            self.node.url = url;
        }
        if let Some(network) = lookup(NETWORK_ENV) {
            self.network = network.parse().map_err(Error::Config)?;
        }
        if let Some(port) = lookup(API_PORT_ENV) {
            self.api_port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid API port: {}", port)))?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.swap.slippage < Decimal::ZERO || self.swap.slippage >= Decimal::ONE {
            return Err(Error::Config(format!(
                "Slippage must be a fraction in [0, 1), got {}",
                self.swap.slippage
            )));
        }
        if self.swap.block_poll_secs == 0 {
            return Err(Error::Config("block_poll_secs must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.node.url, "http://127.0.0.1:10332");
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.api_port, 10340);
        assert_eq!(config.swap.slippage, dec!(0.005));
        assert_eq!(config.swap.deadline_minutes, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.node.url, config.node.url);
        assert_eq!(parsed.swap.slippage, config.swap.slippage);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{"node": {"url": "http://seed1.neo.org:10332"}, "network": "testnet"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.network, Network::Testnet);
        assert_eq!(parsed.api_port, 10340);
        assert_eq!(parsed.swap.block_poll_secs, 15);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .with_overrides(|key| match key {
                NODE_URL_ENV => Some("http://localhost:50012".to_string()),
                NETWORK_ENV => Some("testnet".to_string()),
                API_PORT_ENV => Some("8080".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.node.url, "http://localhost:50012");
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.api_port, 8080);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let err = AppConfig::default()
            .with_overrides(|key| (key == API_PORT_ENV).then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let mut config = AppConfig::default();
        config.swap.slippage = dec!(1.5);
        assert!(config.with_overrides(|_| None).is_err());
    }
}
