//! Token deployment parameters.

use alloy_primitives::U256;
use ledger::TokenMetadata;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_NAME: &str = "My ERC20 Token";
pub const DEFAULT_TOKEN_SYMBOL: &str = "MET";
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;
/// Default supply, in base units.
pub const DEFAULT_TOTAL_SUPPLY: u64 = 1_000_000_000;

/// Constructor arguments of a token: name, symbol, decimals and supply.
///
/// `total_supply` is in base units and is minted as-is; it is not scaled by
/// `decimals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenParams {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
}

impl Default for TokenParams {
    fn default() -> Self {
        Self {
            name: DEFAULT_TOKEN_NAME.to_string(),
            symbol: DEFAULT_TOKEN_SYMBOL.to_string(),
            decimals: DEFAULT_TOKEN_DECIMALS,
            total_supply: U256::from(DEFAULT_TOTAL_SUPPLY),
        }
    }
}

impl TokenParams {
    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata::new(
            self.name.clone(),
            self.symbol.clone(),
            self.decimals,
            self.total_supply,
        )
    }
}
