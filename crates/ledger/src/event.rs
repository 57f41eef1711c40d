//! Ledger notifications.
//!
//! Notifications are append-only records. The ledger never reads them back.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Tokens moved from one account to another (or minted from the zero address).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

/// An allowance was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Transfer(Transfer),
    Approval(Approval),
}

impl Event {
    /// Amount carried by the notification.
    pub const fn value(&self) -> U256 {
        match self {
            Self::Transfer(t) => t.value,
            Self::Approval(a) => a.value,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Transfer(_) => "Transfer",
            Self::Approval(_) => "Approval",
        }
    }
}

impl From<Transfer> for Event {
    fn from(transfer: Transfer) -> Self {
        Self::Transfer(transfer)
    }
}

impl From<Approval> for Event {
    fn from(approval: Approval) -> Self {
        Self::Approval(approval)
    }
}
