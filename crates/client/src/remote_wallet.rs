//! Wallet that delegates to an external JSON-RPC wallet endpoint.
//!
//! The endpoint is expected to answer `eth_requestAccounts` and
//! `eth_sendTransaction`, the same calls a browser wallet extension serves.
//! Signing and key custody stay with the wallet.

use crate::{ClientError, Wallet};
use alloy_primitives::{Address, TxHash};
use alloy_rpc_types::eth::TransactionRequest;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing::debug;

/// A wallet reached over JSON-RPC.
///
/// # Example
///
/// ```ignore
/// let wallet = RemoteWallet::new("http://localhost:1248");
/// let accounts = wallet.request_accounts().await?;
/// let tx_hash = wallet.send_transaction(tx_request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RemoteWallet {
    client: reqwest::Client,
    url: String,
    next_id: Arc<AtomicU64>,
}

impl RemoteWallet {
    /// Creates a new remote wallet for the given endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a new remote wallet with a custom HTTP client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<T, R>(&self, method: &'static str, params: T) -> eyre::Result<R>
    where
        T: Serialize + Send,
        R: DeserializeOwned,
    {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        let response = self.client.post(&self.url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            eyre::bail!("wallet returned {status}: {body}");
        }

        let rpc_response: JsonRpcResponse<R> = response.json().await?;
        debug!(method, url = %self.url, "Wallet request completed");
        Ok(rpc_response.into_result()?)
    }
}

impl Wallet for RemoteWallet {
    async fn request_accounts(&self) -> eyre::Result<Vec<Address>> {
        self.request("eth_requestAccounts", [(); 0]).await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> eyre::Result<TxHash> {
        self.request("eth_sendTransaction", [tx]).await
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<T> {
    jsonrpc: &'static str,
    method: &'static str,
    params: T,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl<T> JsonRpcResponse<T> {
    fn into_result(self) -> Result<T, ClientError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(ClientError::Other(
                "wallet response has neither result nor error".to_string(),
            )),
        }
    }
}
