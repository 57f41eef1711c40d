//! Token access for the manager.
//!
//! [`Erc20`] is the seam between the session logic and a concrete token:
//! - [`onchain::OnchainToken`] talks to a deployed contract through a provider
//!   and a wallet
//! - [`local::LocalToken`] drives an in-process [`ledger::SharedLedger`]
//!
//! [`session::TokenSession`] is the request/response client on top of either.

pub mod error;
pub mod events;
pub mod history;
pub mod local;
pub mod onchain;
pub mod session;
pub mod units;

pub use error::{SessionError, TokenError};
pub use local::LocalToken;
pub use onchain::OnchainToken;
pub use session::{TokenInfo, TokenSession};

use alloy_primitives::{Address, TxHash, U256};
use ledger::{Event, TokenMetadata};
use std::future::Future;

/// Fungible-token operations as seen by one account.
///
/// Mutating calls act on behalf of the account the implementation was bound
/// to, and are submitted exactly once.
pub trait Erc20: Send + Sync {
    /// Account that mutating calls act for.
    fn account(&self) -> Address;

    /// Name, symbol, decimals and total supply.
    fn metadata(&self) -> impl Future<Output = eyre::Result<TokenMetadata>> + Send;

    fn balance_of(&self, holder: Address) -> impl Future<Output = eyre::Result<U256>> + Send;

    fn allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> impl Future<Output = eyre::Result<U256>> + Send;

    fn transfer(
        &self,
        to: Address,
        amount: U256,
    ) -> impl Future<Output = eyre::Result<Submission>> + Send;

    fn approve(
        &self,
        spender: Address,
        amount: U256,
    ) -> impl Future<Output = eyre::Result<Submission>> + Send;

    fn transfer_from(
        &self,
        owner: Address,
        to: Address,
        amount: U256,
    ) -> impl Future<Output = eyre::Result<Submission>> + Send;
}

/// Result of a committed token operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Transaction hash, `None` for in-process ledgers
    pub tx_hash: Option<TxHash>,
    /// Block number where transaction was included
    pub block_number: Option<u64>,
    /// Gas used
    pub gas_used: Option<u64>,
    /// Notifications emitted by the operation
    pub events: Vec<Event>,
}
