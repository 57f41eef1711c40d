//! Decoding of contract logs into ledger notifications.

use alloy_primitives::Log;
use alloy_sol_types::SolEvent;
use binding::IERC20;
use ledger::{Approval, Event, Transfer};

/// Decode a `Transfer` or `Approval` log. Other logs yield `None`.
pub fn decode_event(log: &Log) -> Option<Event> {
    if let Ok(transfer) = IERC20::Transfer::decode_log(log) {
        return Some(Event::Transfer(Transfer {
            from: transfer.from,
            to: transfer.to,
            value: transfer.value,
        }));
    }

    if let Ok(approval) = IERC20::Approval::decode_log(log) {
        return Some(Event::Approval(Approval {
            owner: approval.owner,
            spender: approval.spender,
            value: approval.value,
        }));
    }

    None
}
