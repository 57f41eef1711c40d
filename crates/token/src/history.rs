//! Notification history of a deployed token.
//!
//! Scans `Transfer` and `Approval` logs over a block range in chunks, since
//! most RPC providers cap the span of a single `eth_getLogs` query.

use crate::events::decode_event;
use alloy_primitives::{Address, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types_eth::Filter;
use alloy_sol_types::SolEvent;
use binding::IERC20;
use ledger::Event;
use serde::Serialize;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{debug, warn};

/// A notification together with where it was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalEvent {
    pub block_number: Option<u64>,
    pub tx_hash: Option<TxHash>,
    pub event: Event,
}

pub struct HistoryScanner<P> {
    provider: P,
    token: Address,
    chunk_size: u64,
}

impl<P> HistoryScanner<P>
where
    P: Provider + Clone,
{
    /// `chunk_size` is the largest block span queried at once.
    pub const fn new(provider: P, token: Address, chunk_size: u64) -> Self {
        Self {
            provider,
            token,
            chunk_size,
        }
    }

    /// Notifications emitted in `[from_block, to_block]`, oldest first.
    ///
    /// `to_block` defaults to the current block.
    pub async fn scan(
        &self,
        from_block: u64,
        to_block: Option<u64>,
    ) -> eyre::Result<Vec<HistoricalEvent>> {
        let to_block = match to_block {
            Some(block) => block,
            None => self.provider.get_block_number().await?,
        };

        let mut events = Vec::new();
        for (start, end) in chunks(from_block, to_block, self.chunk_size) {
            events.extend(self.scan_chunk_with_retry(start, end).await?);
        }

        debug!(
            token = %self.token,
            from = from_block,
            to = to_block,
            count = events.len(),
            "Scanned token history"
        );
        Ok(events)
    }

    async fn scan_chunk_with_retry(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> eyre::Result<Vec<HistoricalEvent>> {
        let retry_strategy = ExponentialBackoff::from_millis(100).take(5);

        Retry::spawn(retry_strategy, || async {
            self.scan_chunk(from_block, to_block).await.map_err(|e| {
                warn!(
                    from = from_block,
                    to = to_block,
                    error = %e,
                    "History chunk scan failed, will retry"
                );
                e
            })
        })
        .await
    }

    async fn scan_chunk(&self, from_block: u64, to_block: u64) -> eyre::Result<Vec<HistoricalEvent>> {
        let filter = Filter::new()
            .address(self.token)
            .event_signature(vec![
                IERC20::Transfer::SIGNATURE_HASH,
                IERC20::Approval::SIGNATURE_HASH,
            ])
            .from_block(from_block)
            .to_block(to_block);

        let logs = self.provider.get_logs(&filter).await?;

        Ok(logs
            .iter()
            .filter_map(|log| {
                decode_event(&log.inner).map(|event| HistoricalEvent {
                    block_number: log.block_number,
                    tx_hash: log.transaction_hash,
                    event,
                })
            })
            .collect())
    }
}

/// Split `[from, to]` into inclusive spans of at most `size` blocks.
fn chunks(from: u64, to: u64, size: u64) -> Vec<(u64, u64)> {
    let size = size.max(1);
    let mut spans = Vec::new();
    let mut current = from;

    while current <= to {
        let end = current.saturating_add(size - 1).min(to);
        spans.push((current, end));
        if end == u64::MAX {
            break;
        }
        current = end + 1;
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_cover_range() {
        assert_eq!(chunks(0, 9, 5), vec![(0, 4), (5, 9)]);
        assert_eq!(chunks(10, 12, 5), vec![(10, 12)]);
        assert_eq!(chunks(3, 3, 100), vec![(3, 3)]);
    }

    #[test]
    fn test_chunks_empty_range() {
        assert!(chunks(10, 9, 5).is_empty());
    }

    #[test]
    fn test_chunks_zero_size() {
        assert_eq!(chunks(0, 2, 0), vec![(0, 0), (1, 1), (2, 2)]);
    }
}
