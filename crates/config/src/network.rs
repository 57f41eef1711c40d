//! Network configuration for token interactions.
//!
//! Provides chain-specific parameters for the networks the manager talks to
//! (mainnet, Sepolia, a local development node).

use serde::{Deserialize, Serialize};

/// Network type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    Sepolia,
    /// Local development node (hardhat / anvil)
    Local,
}

/// Chain parameters for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network type
    pub network_type: NetworkType,
    /// Chain ID
    pub chain_id: u64,
    /// Block time in seconds
    pub block_time_secs: u64,
    /// Maximum block span of a single `eth_getLogs` query
    pub max_log_range: u64,
}

impl NetworkConfig {
    /// Ethereum mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            network_type: NetworkType::Mainnet,
            chain_id: 1,
            block_time_secs: 12,
            max_log_range: 9_500,
        }
    }

    /// Ethereum Sepolia testnet configuration.
    pub const fn sepolia() -> Self {
        Self {
            network_type: NetworkType::Sepolia,
            chain_id: 11155111,
            block_time_secs: 12,
            max_log_range: 9_500,
        }
    }

    /// Local development node configuration (hardhat and anvil default chain ID).
    pub const fn local() -> Self {
        Self {
            network_type: NetworkType::Local,
            chain_id: 31337,
            block_time_secs: 1,
            max_log_range: 100_000,
        }
    }

    /// Create configuration from network type.
    pub const fn from_network_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Sepolia => Self::sepolia(),
            NetworkType::Local => Self::local(),
        }
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Start from the defaults of `network_type`.
    pub const fn new(network_type: NetworkType) -> Self {
        Self {
            config: NetworkConfig::from_network_type(network_type),
        }
    }

    /// Override the chain ID.
    pub const fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.chain_id = chain_id;
        self
    }

    /// Override the block time.
    pub const fn block_time_secs(mut self, secs: u64) -> Self {
        self.config.block_time_secs = secs;
        self
    }

    /// Override the maximum `eth_getLogs` block span.
    pub const fn max_log_range(mut self, blocks: u64) -> Self {
        self.config.max_log_range = blocks;
        self
    }

    /// Build the network configuration.
    pub const fn build(self) -> NetworkConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_config() {
        let config = NetworkConfig::mainnet();
        assert_eq!(config.chain_id, 1);
        assert_eq!(config.network_type, NetworkType::Mainnet);
    }

    #[test]
    fn test_sepolia_config() {
        let config = NetworkConfig::sepolia();
        assert_eq!(config.chain_id, 11155111);
        assert_eq!(config.network_type, NetworkType::Sepolia);
    }

    #[test]
    fn test_local_config() {
        let config = NetworkConfig::from_network_type(NetworkType::Local);
        assert_eq!(config.chain_id, 31337);
    }

    #[test]
    fn test_custom_config_builder() {
        let config = NetworkConfigBuilder::new(NetworkType::Local)
            .chain_id(1337)
            .max_log_range(500)
            .build();

        assert_eq!(config.chain_id, 1337);
        assert_eq!(config.max_log_range, 500);
        assert_eq!(config.network_type, NetworkType::Local);
    }

    #[test]
    fn test_network_type_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            network: NetworkType,
        }
        let parsed: Wrapper = toml::from_str(r#"network = "sepolia""#).unwrap();
        assert_eq!(parsed.network, NetworkType::Sepolia);
    }
}
