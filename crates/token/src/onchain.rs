//! Token deployed on a chain, reached through a provider and a wallet.

use crate::{events::decode_event, Erc20, Submission, TokenError};
use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_rpc_types_eth::TransactionReceipt;
use alloy_transport::{RpcError, TransportErrorKind};
use alloy_sol_types::SolCall;
use binding::IERC20;
use client::Wallet;
use ledger::TokenMetadata;
use std::time::Duration;
use tokio_retry::{strategy::FixedInterval, Retry};
use tracing::{debug, info, warn};

/// How often the receipt of a submitted transaction is polled.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// How many times the receipt is polled before giving up.
const RECEIPT_POLL_ATTEMPTS: usize = 120;
/// JSON-RPC error code geth and anvil use for reverted calls.
const EXECUTION_REVERTED_CODE: i64 = 3;

/// Whether a failed `eth_call` was rejected by the contract, as opposed to
/// failing to reach the node.
fn is_revert(err: &RpcError<TransportErrorKind>) -> bool {
    err.as_error_resp().is_some_and(|payload| {
        payload.code == EXECUTION_REVERTED_CODE || payload.message.contains("revert")
    })
}

pub struct OnchainToken<P, W> {
    provider: P,
    wallet: W,
    address: Address,
    account: Address,
    poll_interval: Duration,
}

impl<P, W> OnchainToken<P, W>
where
    P: Provider + Clone,
    W: Wallet,
{
    /// Bind to the token at `address`, acting for `account`.
    pub const fn new(provider: P, wallet: W, address: Address, account: Address) -> Self {
        Self {
            provider,
            wallet,
            address,
            account,
            poll_interval: RECEIPT_POLL_INTERVAL,
        }
    }

    /// Override the receipt polling interval (typically the block time).
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub const fn address(&self) -> Address {
        self.address
    }

    /// Simulate, submit and await one contract call.
    async fn submit<C>(&self, operation: &'static str, call: C) -> eyre::Result<Submission>
    where
        C: SolCall + Send,
    {
        let tx = TransactionRequest::default()
            .with_from(self.account)
            .with_to(self.address)
            .with_input(call.abi_encode());

        // A dry run surfaces the revert reason before anything is signed.
        match self.provider.call(tx.clone()).await {
            Ok(_) => {}
            Err(e) if is_revert(&e) => {
                return Err(TokenError::reverted(operation, &e.to_string()).into());
            }
            Err(e) => return Err(e.into()),
        }

        let tx_hash = self.wallet.send_transaction(tx).await?;
        debug!(operation, tx_hash = %tx_hash, "Transaction submitted");

        let receipt = self.wait_for_receipt(tx_hash).await?;
        if !receipt.status() {
            return Err(TokenError::Failed(tx_hash).into());
        }

        let events = receipt
            .logs()
            .iter()
            .filter(|log| log.address() == self.address)
            .filter_map(|log| decode_event(&log.inner))
            .collect::<Vec<_>>();

        info!(
            operation,
            tx_hash = %receipt.transaction_hash,
            block_number = receipt.block_number,
            gas_used = receipt.gas_used,
            events = events.len(),
            "Token operation confirmed"
        );

        Ok(Submission {
            tx_hash: Some(receipt.transaction_hash),
            block_number: receipt.block_number,
            gas_used: Some(receipt.gas_used),
            events,
        })
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> eyre::Result<TransactionReceipt> {
        let strategy = FixedInterval::new(self.poll_interval).take(RECEIPT_POLL_ATTEMPTS);

        Retry::spawn(strategy, move || async move {
            match self.provider.get_transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => Ok(receipt),
                Ok(None) => Err(None),
                Err(e) => {
                    warn!(tx_hash = %tx_hash, error = %e, "Receipt query failed, will retry");
                    Err(Some(e))
                }
            }
        })
        .await
        .map_err(|last| match last {
            Some(e) => eyre::Report::new(e),
            None => TokenError::ReceiptTimeout(tx_hash).into(),
        })
    }
}

impl<P, W> Erc20 for OnchainToken<P, W>
where
    P: Provider + Clone,
    W: Wallet,
{
    fn account(&self) -> Address {
        self.account
    }

    async fn metadata(&self) -> eyre::Result<TokenMetadata> {
        let contract = IERC20::new(self.address, &self.provider);

        let (name, symbol, decimals, total_supply) = tokio::try_join!(
            async { contract.name().call().await },
            async { contract.symbol().call().await },
            async { contract.decimals().call().await },
            async { contract.totalSupply().call().await },
        )?;

        Ok(TokenMetadata::new(name, symbol, decimals, total_supply))
    }

    async fn balance_of(&self, holder: Address) -> eyre::Result<U256> {
        let contract = IERC20::new(self.address, &self.provider);
        Ok(contract.balanceOf(holder).call().await?)
    }

    async fn allowance(&self, owner: Address, spender: Address) -> eyre::Result<U256> {
        let contract = IERC20::new(self.address, &self.provider);
        Ok(contract.allowance(owner, spender).call().await?)
    }

    async fn transfer(&self, to: Address, amount: U256) -> eyre::Result<Submission> {
        self.submit("transfer", IERC20::transferCall { to, amount })
            .await
    }

    async fn approve(&self, spender: Address, amount: U256) -> eyre::Result<Submission> {
        self.submit("approve", IERC20::approveCall { spender, amount })
            .await
    }

    async fn transfer_from(
        &self,
        owner: Address,
        to: Address,
        amount: U256,
    ) -> eyre::Result<Submission> {
        self.submit(
            "transferFrom",
            IERC20::transferFromCall {
                from: owner,
                to,
                amount,
            },
        )
        .await
    }
}
