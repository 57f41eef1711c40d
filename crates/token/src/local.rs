//! In-process token backed by a [`SharedLedger`].

use crate::{Erc20, Submission};
use alloy_primitives::{Address, U256};
use ledger::{SharedLedger, TokenMetadata};

/// A view of a shared ledger acting as one account.
///
/// Clones share the same ledger; use [`LocalToken::as_account`] to act as
/// another account.
#[derive(Debug, Clone)]
pub struct LocalToken {
    ledger: SharedLedger,
    account: Address,
}

impl LocalToken {
    pub const fn new(ledger: SharedLedger, account: Address) -> Self {
        Self { ledger, account }
    }

    /// Same ledger, different caller.
    pub fn as_account(&self, account: Address) -> Self {
        Self {
            ledger: self.ledger.clone(),
            account,
        }
    }

    pub const fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    fn submission(events: Vec<ledger::Event>) -> Submission {
        Submission {
            tx_hash: None,
            block_number: None,
            gas_used: None,
            events,
        }
    }
}

impl Erc20 for LocalToken {
    fn account(&self) -> Address {
        self.account
    }

    async fn metadata(&self) -> eyre::Result<TokenMetadata> {
        Ok(self.ledger.metadata().await)
    }

    async fn balance_of(&self, holder: Address) -> eyre::Result<U256> {
        Ok(self.ledger.balance_of(holder).await)
    }

    async fn allowance(&self, owner: Address, spender: Address) -> eyre::Result<U256> {
        Ok(self.ledger.allowance(owner, spender).await)
    }

    async fn transfer(&self, to: Address, amount: U256) -> eyre::Result<Submission> {
        let events = self.ledger.transfer(self.account, to, amount).await?;
        Ok(Self::submission(events))
    }

    async fn approve(&self, spender: Address, amount: U256) -> eyre::Result<Submission> {
        let events = self.ledger.approve(self.account, spender, amount).await?;
        Ok(Self::submission(events))
    }

    async fn transfer_from(
        &self,
        owner: Address,
        to: Address,
        amount: U256,
    ) -> eyre::Result<Submission> {
        let events = self
            .ledger
            .transfer_from(self.account, owner, to, amount)
            .await?;
        Ok(Self::submission(events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use ledger::LedgerError;

    const OWNER: Address = address!("1111111111111111111111111111111111111111");
    const USER1: Address = address!("2222222222222222222222222222222222222222");

    #[tokio::test]
    async fn test_ledger_error_survives_erasure() {
        let ledger = SharedLedger::new(
            TokenMetadata::new("Test Token", "TEST", 0, U256::from(10)),
            OWNER,
        );
        let token = LocalToken::new(ledger, USER1);

        let err = token.transfer(OWNER, U256::from(1)).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::InsufficientBalance { .. })
        ));
    }

    #[tokio::test]
    async fn test_as_account_shares_ledger() {
        let ledger = SharedLedger::new(
            TokenMetadata::new("Test Token", "TEST", 0, U256::from(10)),
            OWNER,
        );
        let owner = LocalToken::new(ledger, OWNER);
        let user = owner.as_account(USER1);

        owner.transfer(USER1, U256::from(4)).await.unwrap();
        assert_eq!(user.balance_of(USER1).await.unwrap(), U256::from(4));
        assert_eq!(user.account(), USER1);
    }
}
