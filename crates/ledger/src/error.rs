use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Ledger errors. Any error aborts the call with no state change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Attempted debit exceeds the account's balance.
    #[error("Insufficient balance: {account} holds {available}, required {required}")]
    InsufficientBalance {
        account: Address,
        required: U256,
        available: U256,
    },

    /// Attempted delegated debit exceeds the remaining allowance.
    #[error("Allowance exceeded: {spender} may spend {available} of {owner}, required {required}")]
    AllowanceExceeded {
        owner: Address,
        spender: Address,
        required: U256,
        available: U256,
    },
}

impl LedgerError {
    /// Revert reason reported by the contract for this error.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "Insufficient balance",
            Self::AllowanceExceeded { .. } => "Allowance exceeded",
        }
    }
}
