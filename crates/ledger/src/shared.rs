//! Single-writer handle over a [`Ledger`].
//!
//! All operations on one ledger instance go through one mutex, so mutations
//! never interleave. Notifications from each committed mutation are published
//! to subscribers in commit order.

use crate::{Event, Ledger, LedgerError, TokenMetadata};
use alloy_primitives::{Address, U256};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::trace;

/// Capacity of the notification channel. Slow subscribers lag and miss
/// notifications, they never block the ledger.
const EVENT_CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
    events: broadcast::Sender<Event>,
}

impl SharedLedger {
    /// Create a ledger with the entire supply minted to `deployer`.
    pub fn new(metadata: TokenMetadata, deployer: Address) -> Self {
        Self::from_ledger(Ledger::new(metadata, deployer))
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(ledger)),
            events,
        }
    }

    /// Subscribe to notifications committed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub async fn metadata(&self) -> TokenMetadata {
        self.inner.lock().await.metadata().clone()
    }

    pub async fn balance_of(&self, account: Address) -> U256 {
        self.inner.lock().await.balance_of(account)
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.inner.lock().await.allowance(owner, spender)
    }

    pub async fn transfer(
        &self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<Vec<Event>, LedgerError> {
        self.apply(|ledger| ledger.transfer(caller, to, amount))
            .await
    }

    pub async fn approve(
        &self,
        caller: Address,
        spender: Address,
        amount: U256,
    ) -> Result<Vec<Event>, LedgerError> {
        self.apply(|ledger| ledger.approve(caller, spender, amount))
            .await
    }

    pub async fn transfer_from(
        &self,
        caller: Address,
        owner: Address,
        to: Address,
        amount: U256,
    ) -> Result<Vec<Event>, LedgerError> {
        self.apply(|ledger| ledger.transfer_from(caller, owner, to, amount))
            .await
    }

    /// Full notification log, oldest first.
    pub async fn events(&self) -> Vec<Event> {
        self.inner.lock().await.events().to_vec()
    }

    /// Run `f` with a read-only view of the ledger.
    pub async fn inspect<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        let ledger = self.inner.lock().await;
        f(&*ledger)
    }

    /// Run one mutation under the lock and return the notifications it emitted.
    async fn apply<F>(&self, op: F) -> Result<Vec<Event>, LedgerError>
    where
        F: FnOnce(&mut Ledger) -> Result<bool, LedgerError>,
    {
        let mut ledger = self.inner.lock().await;
        let start = ledger.events().len();
        op(&mut *ledger)?;
        let emitted = ledger.events()[start..].to_vec();

        // Published while the lock is held so subscribers see commit order.
        for event in &emitted {
            // No receivers is not an error.
            if self.events.send(*event).is_err() {
                trace!(event = event.name(), "No notification subscribers");
            }
        }

        Ok(emitted)
    }
}
