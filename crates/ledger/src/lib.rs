//! Fungible-token ledger.
//!
//! This crate provides:
//! - [`TokenMetadata`]: immutable name, symbol, decimals and total supply
//! - [`Ledger`]: balances, allowances and the transfer/approval state machine
//! - [`SharedLedger`]: a single-writer handle that serializes mutations and
//!   fans notifications out to subscribers
//!
//! Every mutating operation either commits completely and appends an [`Event`],
//! or fails with a [`LedgerError`] and leaves the ledger untouched.

pub mod error;
pub mod event;
pub mod ledger;
pub mod metadata;
pub mod shared;

pub use error::LedgerError;
pub use event::{Approval, Event, Transfer};
pub use ledger::Ledger;
pub use metadata::TokenMetadata;
pub use shared::SharedLedger;
