use crate::{fill_transaction, ClientError, Wallet};
use alloy_consensus::TxEnvelope;
use alloy_network::{eip2718::Encodable2718, EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use tracing::debug;

/// A wallet backed by a local private key.
///
/// Transactions are filled through the provider (nonce, fees, gas), signed
/// locally and broadcast as raw EIP-2718 bytes.
#[derive(Clone)]
pub struct LocalWallet<P> {
    address: Address,
    wallet: EthereumWallet,
    chain_id: u64,
    provider: P,
}

impl<P> LocalWallet<P>
where
    P: Provider + Clone,
{
    /// Create a wallet from a hex private key (with or without 0x prefix).
    pub fn new(private_key: &str, chain_id: u64, provider: P) -> Result<Self, ClientError> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))?;
        let address = signer.address();

        Ok(Self {
            address,
            wallet: EthereumWallet::from(signer),
            chain_id,
            provider,
        })
    }

    pub const fn address(&self) -> Address {
        self.address
    }

    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl<P> Wallet for LocalWallet<P>
where
    P: Provider + Clone,
{
    async fn request_accounts(&self) -> eyre::Result<Vec<Address>> {
        Ok(vec![self.address])
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> eyre::Result<TxHash> {
        let filled_tx = fill_transaction(tx, &self.provider, self.address, self.chain_id).await?;

        let tx_envelope: TxEnvelope = filled_tx
            .build(&self.wallet)
            .await
            .map_err(|e| eyre::eyre!("{}", e))?;

        let mut encoded = Vec::new();
        tx_envelope.encode_2718(&mut encoded);

        let pending = self.provider.send_raw_transaction(&encoded).await?;
        let tx_hash = *pending.tx_hash();

        debug!(tx_hash = %tx_hash, from = %self.address, "Broadcast signed transaction");
        Ok(tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_provider;
    use alloy_primitives::address;

    // Well-known development key (hardhat / anvil account #0).
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[tokio::test]
    async fn test_accounts_is_signer_address() {
        let provider = create_provider("http://127.0.0.1:8545").await.unwrap();
        let wallet = LocalWallet::new(DEV_KEY, 31337, provider).unwrap();

        let accounts = wallet.request_accounts().await.unwrap();
        assert_eq!(
            accounts,
            vec![address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")]
        );
        assert_eq!(wallet.chain_id(), 31337);
    }

    #[tokio::test]
    async fn test_invalid_private_key() {
        let provider = create_provider("http://127.0.0.1:8545").await.unwrap();
        let result = LocalWallet::new("not a key", 1, provider);
        assert!(matches!(result, Err(ClientError::InvalidPrivateKey(_))));
    }
}
