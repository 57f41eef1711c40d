use alloy_primitives::TxHash;
use ledger::LedgerError;
use thiserror::Error;

/// Revert reasons the token contract reports for its two failure modes.
const LEDGER_REASONS: [&str; 2] = ["Insufficient balance", "Allowance exceeded"];

/// Failures of an on-chain token operation.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The contract rejected the call before it was broadcast
    #[error("{operation} reverted: {reason}")]
    Reverted {
        operation: &'static str,
        reason: String,
    },

    /// The transaction was mined but its execution failed
    #[error("Transaction {0} failed on-chain")]
    Failed(TxHash),

    /// No receipt showed up while polling
    #[error("No receipt for transaction {0}")]
    ReceiptTimeout(TxHash),
}

impl TokenError {
    /// Classify an RPC failure of `operation`.
    ///
    /// Known ledger revert reasons are normalized; anything else keeps the
    /// provider's message.
    pub fn reverted(operation: &'static str, message: &str) -> Self {
        let reason = LEDGER_REASONS
            .iter()
            .find(|reason| message.contains(*reason))
            .map_or_else(|| message.to_string(), |reason| (*reason).to_string());
        Self::Reverted { operation, reason }
    }

    /// Whether this is one of the ledger's own rejections.
    pub fn is_ledger_rejection(&self) -> bool {
        matches!(self, Self::Reverted { reason, .. } if LEDGER_REASONS.contains(&reason.as_str()))
    }
}

/// Input rejected by the session before any token call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No accounts available in wallet")]
    NoAccounts,

    #[error("Address is empty")]
    EmptyAddress,

    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Amount must be positive")]
    NonPositiveAmount,
}

/// Revert reason of an operation failure, whichever token produced it.
pub fn rejection_reason(err: &eyre::Report) -> Option<&'static str> {
    if let Some(ledger) = err.downcast_ref::<LedgerError>() {
        return Some(ledger.reason());
    }
    match err.downcast_ref::<TokenError>() {
        Some(TokenError::Reverted { reason, .. }) => LEDGER_REASONS
            .iter()
            .copied()
            .find(|known| *known == reason.as_str()),
        _ => None,
    }
}
