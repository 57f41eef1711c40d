pub mod config;
pub mod metrics;
pub mod scenario;

use crate::metrics::Metrics;
use std::{future::Future, time::Instant};
use token::{error::rejection_reason, Submission};
use tracing::{error, info};

/// Install the global tracing subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Await one token operation and record its outcome.
///
/// Failures are logged with a generic message for the operation; the
/// ledger's rejection reason, when there is one, is attached as a field.
pub async fn track<F>(metrics: &Metrics, operation: &str, submission: F) -> eyre::Result<Submission>
where
    F: Future<Output = eyre::Result<Submission>>,
{
    let started = Instant::now();

    match submission.await {
        Ok(submission) => {
            metrics.record_success(operation, started.elapsed());
            info!(
                operation,
                tx_hash = ?submission.tx_hash,
                block = ?submission.block_number,
                gas_used = ?submission.gas_used,
                events = submission.events.len(),
                "Operation confirmed"
            );
            Ok(submission)
        }
        Err(e) => {
            let reason = rejection_reason(&e);
            metrics.record_failure(operation, reason);
            error!(operation, reason = reason.unwrap_or("unknown"), error = %e, "{}", failure_message(operation));
            Err(e)
        }
    }
}

/// User-facing message for a failed operation.
pub fn failure_message(operation: &str) -> &'static str {
    match operation {
        "transfer" => "Transfer failed",
        "approve" => "Approval failed",
        "transferFrom" => "Delegated transfer failed",
        _ => "Operation failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use ledger::{SharedLedger, TokenMetadata};
    use token::{Erc20, LocalToken};

    #[tokio::test]
    async fn test_track_passes_through_outcomes() {
        let owner = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let user = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let token = LocalToken::new(
            SharedLedger::new(TokenMetadata::new("T", "T", 0, U256::from(10)), owner),
            owner,
        );
        let metrics = Metrics::new();

        let ok = track(&metrics, "transfer", token.transfer(user, U256::from(4))).await;
        assert_eq!(ok.unwrap().events.len(), 1);

        let err = track(&metrics, "transfer", token.transfer(user, U256::from(7)))
            .await
            .unwrap_err();
        assert_eq!(rejection_reason(&err), Some("Insufficient balance"));
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(failure_message("transfer"), "Transfer failed");
        assert_eq!(failure_message("approve"), "Approval failed");
        assert_eq!(failure_message("history"), "Operation failed");
    }
}
