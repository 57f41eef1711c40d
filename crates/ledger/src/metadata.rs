use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Immutable token metadata, fixed when the ledger is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Number of decimals implied by every amount
    pub decimals: u8,
    /// Total supply in base units
    pub total_supply: U256,
}

impl TokenMetadata {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        total_supply: U256,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply,
        }
    }
}
