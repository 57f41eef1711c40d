use alloy_primitives::Address;
use config::{ConfigError, NetworkConfig, NetworkConfigBuilder, NetworkType};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level token manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint url
    pub rpc_url: String,

    /// Network the RPC endpoint serves
    pub network: NetworkType,

    /// Overrides of the network preset
    #[serde(default)]
    pub overrides: NetworkOverrides,

    /// Token contract to connect to (can be overridden on the command line)
    #[serde(default)]
    pub token_address: Option<Address>,

    /// Wallet used for account access and transaction submission
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Port of the Prometheus exporter, disabled when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

/// Per-deployment changes to a network preset, e.g. a forked dev node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkOverrides {
    pub chain_id: Option<u64>,
    pub block_time_secs: Option<u64>,
    pub max_log_range: Option<u64>,
}

/// Which wallet signs and submits transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WalletConfig {
    /// Local private key, supplied via `--private-key` or `PRIVATE_KEY`
    #[default]
    Local,
    /// External JSON-RPC wallet endpoint
    Remote { url: String },
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let config: Self = config::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let WalletConfig::Remote { url } = &self.wallet {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid("remote wallet url is empty".to_string()));
            }
        }
        if self.overrides.max_log_range == Some(0) {
            return Err(ConfigError::Invalid("max_log_range must be positive".to_string()));
        }
        Ok(())
    }

    /// Preset of the configured network with overrides applied.
    pub fn network_config(&self) -> NetworkConfig {
        let mut builder = NetworkConfigBuilder::new(self.network);
        if let Some(chain_id) = self.overrides.chain_id {
            builder = builder.chain_id(chain_id);
        }
        if let Some(secs) = self.overrides.block_time_secs {
            builder = builder.block_time_secs(secs);
        }
        if let Some(blocks) = self.overrides.max_log_range {
            builder = builder.max_log_range(blocks);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: Config = toml::from_str(
            r#"
            rpc_url = "http://127.0.0.1:8545"
            network = "local"
            "#,
        )
        .unwrap();

        assert_eq!(config.wallet, WalletConfig::Local);
        assert_eq!(config.token_address, None);
        assert_eq!(config.network_config().chain_id, 31337);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_remote_wallet_config() {
        let config: Config = toml::from_str(
            r#"
            rpc_url = "https://sepolia.example"
            network = "sepolia"
            token_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            metrics_port = 9100

            [wallet]
            kind = "remote"
            url = "http://127.0.0.1:1248"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.wallet,
            WalletConfig::Remote {
                url: "http://127.0.0.1:1248".to_string()
            }
        );
        assert!(config.token_address.is_some());
        assert_eq!(config.metrics_port, Some(9100));
        assert_eq!(config.network_config(), NetworkConfig::sepolia());
    }

    #[test]
    fn test_network_overrides() {
        let config: Config = toml::from_str(
            r#"
            rpc_url = "http://127.0.0.1:8545"
            network = "mainnet"

            [overrides]
            chain_id = 1337
            max_log_range = 2000
            "#,
        )
        .unwrap();

        let network = config.network_config();
        assert_eq!(network.network_type, NetworkType::Mainnet);
        assert_eq!(network.chain_id, 1337);
        assert_eq!(network.block_time_secs, 12);
        assert_eq!(network.max_log_range, 2000);
    }

    #[test]
    fn test_empty_remote_url_is_invalid() {
        let config: Config = toml::from_str(
            r#"
            rpc_url = "http://127.0.0.1:8545"
            network = "local"

            [wallet]
            kind = "remote"
            url = " "
            "#,
        )
        .unwrap();

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
