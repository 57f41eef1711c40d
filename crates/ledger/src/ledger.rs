//! Balance and allowance state machine.
//!
//! The caller of each mutating operation is passed explicitly and plays the
//! role of the transaction sender.

use crate::{Approval, Event, LedgerError, TokenMetadata, Transfer};
use alloy_primitives::{Address, U256};
use std::collections::HashMap;
use tracing::debug;

/// Token ledger.
///
/// Invariant: the sum of all balances equals `metadata.total_supply`.
#[derive(Debug, Clone)]
pub struct Ledger {
    metadata: TokenMetadata,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    /// Emitted notifications (append-only)
    events: Vec<Event>,
}

impl Ledger {
    /// Create a ledger and mint the entire supply to `deployer`.
    ///
    /// The mint is recorded as a transfer from the zero address.
    pub fn new(metadata: TokenMetadata, deployer: Address) -> Self {
        let supply = metadata.total_supply;
        let mut balances = HashMap::new();
        balances.insert(deployer, supply);

        debug!(
            name = %metadata.name,
            symbol = %metadata.symbol,
            decimals = metadata.decimals,
            total_supply = %supply,
            deployer = %deployer,
            "Minted token supply"
        );

        Self {
            metadata,
            balances,
            allowances: HashMap::new(),
            events: vec![Event::Transfer(Transfer {
                from: Address::ZERO,
                to: deployer,
                value: supply,
            })],
        }
    }

    pub const fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub const fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub const fn total_supply(&self) -> U256 {
        self.metadata.total_supply
    }

    /// Balance of `account`, zero if never credited.
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Amount `spender` may still move out of `owner`'s balance.
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Move `amount` from `caller` to `to`.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, LedgerError> {
        self.ensure_balance(caller, amount)?;
        self.move_balance(caller, to, amount);

        debug!(from = %caller, to = %to, amount = %amount, "Transfer");
        Ok(true)
    }

    /// Set the allowance of `spender` over `caller`'s balance to exactly `amount`.
    ///
    /// Any previous allowance is replaced, not added to.
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        amount: U256,
    ) -> Result<bool, LedgerError> {
        self.allowances.insert((caller, spender), amount);
        self.events.push(Event::Approval(Approval {
            owner: caller,
            spender,
            value: amount,
        }));

        debug!(owner = %caller, spender = %spender, amount = %amount, "Approval");
        Ok(true)
    }

    /// Move `amount` from `owner` to `to` on behalf of `caller`.
    ///
    /// The allowance is checked before the balance.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        owner: Address,
        to: Address,
        amount: U256,
    ) -> Result<bool, LedgerError> {
        let allowed = self.allowance(owner, caller);
        if allowed < amount {
            return Err(LedgerError::AllowanceExceeded {
                owner,
                spender: caller,
                required: amount,
                available: allowed,
            });
        }
        self.ensure_balance(owner, amount)?;

        let remaining = allowed - amount;
        self.allowances.insert((owner, caller), remaining);
        self.move_balance(owner, to, amount);

        debug!(
            spender = %caller,
            from = %owner,
            to = %to,
            amount = %amount,
            remaining_allowance = %remaining,
            "Delegated transfer"
        );
        Ok(true)
    }

    /// Notifications emitted so far, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Credited accounts and their balances.
    pub fn holders(&self) -> impl Iterator<Item = (Address, U256)> + '_ {
        self.balances.iter().map(|(account, amount)| (*account, *amount))
    }

    fn ensure_balance(&self, account: Address, amount: U256) -> Result<(), LedgerError> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account,
                required: amount,
                available,
            });
        }
        Ok(())
    }

    // Callers must have checked the balance. Debit happens before credit so a
    // self transfer nets to zero and no credit can exceed the total supply.
    fn move_balance(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        self.balances.insert(from, from_balance - amount);

        let to_balance = self.balance_of(to);
        self.balances.insert(to, to_balance + amount);

        self.events
            .push(Event::Transfer(Transfer { from, to, value: amount }));
    }
}
