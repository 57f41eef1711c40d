//! RPC provider and wallet collaborators.
//!
//! The token manager needs two things from the outside world: a provider for
//! contract reads, and a wallet that can list its accounts and submit
//! transactions. Wallets come in two flavors:
//! - [`LocalWallet`]: signs with a private key and broadcasts through a provider
//! - [`RemoteWallet`]: delegates to an external JSON-RPC wallet endpoint

mod local_wallet;
mod remote_wallet;

pub use local_wallet::LocalWallet;
pub use remote_wallet::RemoteWallet;

use alloy_primitives::{Address, TxHash};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error connecting to the RPC endpoint
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The wallet returned a JSON-RPC error
    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// General error with context
    #[error("Client error: {0}")]
    Other(String),
}

/// Wallet collaborator: exposes its accounts and submits transactions.
pub trait Wallet: Send + Sync {
    /// Accounts the wallet controls, the active one first.
    fn request_accounts(&self) -> impl Future<Output = eyre::Result<Vec<Address>>> + Send;

    /// Sign and broadcast a transaction, returning its hash.
    ///
    /// The transaction is submitted once; it is never retried.
    fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> impl Future<Output = eyre::Result<TxHash>> + Send;
}

/// Convenience function to create an ethereum rpc provider from url.
pub async fn create_provider(rpc_url: &str) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new().connect_http(url);

    Ok(provider)
}

/// Fill missing transaction fields using the provider.
pub async fn fill_transaction<P>(
    mut tx: TransactionRequest,
    provider: &P,
    from: Address,
    chain_id: u64,
) -> eyre::Result<TransactionRequest>
where
    P: Provider,
{
    if tx.from.is_none() {
        tx.from = Some(from);
    }

    if tx.chain_id.is_none() {
        tx.chain_id = Some(chain_id);
    }

    if tx.nonce.is_none() {
        let nonce = provider.get_transaction_count(from).await?;
        tx.nonce = Some(nonce);
    }

    // Fee parameters first, gas estimation may need them
    if tx.max_fee_per_gas.is_none() || tx.max_priority_fee_per_gas.is_none() {
        let fee_estimate = provider.estimate_eip1559_fees().await?;
        if tx.max_fee_per_gas.is_none() {
            tx.max_fee_per_gas = Some(fee_estimate.max_fee_per_gas);
        }
        if tx.max_priority_fee_per_gas.is_none() {
            tx.max_priority_fee_per_gas = Some(fee_estimate.max_priority_fee_per_gas);
        }
    }

    if tx.gas.is_none() {
        let gas_estimate = provider.estimate_gas(tx.clone()).await?;
        // 20% buffer
        tx.gas = Some(gas_estimate + gas_estimate / 5);
    }

    Ok(tx)
}
