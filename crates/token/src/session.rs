//! Request/response client over an [`Erc20`] token.
//!
//! The session holds what the frontend displays: the connected account and
//! the last loaded token info. Input checks here only duplicate what the
//! token enforces itself, so bad input fails fast without a round trip.

use crate::{
    units::{format_amount, parse_positive_amount},
    Erc20, OnchainToken, SessionError, Submission,
};
use alloy_primitives::Address;
use alloy_provider::Provider;
use client::Wallet;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Decimals assumed for amounts entered before token info was loaded.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Token metadata and the session account's balance, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Total supply, scaled by `decimals`
    pub total_supply: String,
    /// Balance of the session account, scaled by `decimals`
    pub balance: String,
}

/// Ask the wallet for its accounts and pick the active one.
pub async fn connect_wallet<W: Wallet>(wallet: &W) -> eyre::Result<Address> {
    let accounts = wallet.request_accounts().await?;
    let account = accounts.first().copied().ok_or(SessionError::NoAccounts)?;
    info!(account = %account, "Wallet connected");
    Ok(account)
}

/// Validate a user-entered address.
pub fn parse_address(input: &str) -> Result<Address, SessionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SessionError::EmptyAddress);
    }
    trimmed
        .parse()
        .map_err(|_| SessionError::InvalidAddress(input.to_string()))
}

/// Bind a session to the token contract at a user-entered address.
///
/// Nothing is read from the chain until [`TokenSession::load_info`].
/// Receipts of submitted transactions are polled every `poll_interval`.
pub fn connect<P, W>(
    provider: P,
    wallet: W,
    account: Address,
    contract: &str,
    poll_interval: Duration,
) -> Result<TokenSession<OnchainToken<P, W>>, SessionError>
where
    P: Provider + Clone,
    W: Wallet,
{
    let address = parse_address(contract)?;
    info!(token = %address, account = %account, "Connected to token contract");
    let token = OnchainToken::new(provider, wallet, address, account).with_poll_interval(poll_interval);
    Ok(TokenSession::new(token))
}

pub struct TokenSession<T> {
    token: T,
    info: Option<TokenInfo>,
}

impl<T: Erc20> TokenSession<T> {
    pub const fn new(token: T) -> Self {
        Self { token, info: None }
    }

    pub fn account(&self) -> Address {
        self.token.account()
    }

    pub const fn token(&self) -> &T {
        &self.token
    }

    /// Last loaded token info, if any.
    pub const fn info(&self) -> Option<&TokenInfo> {
        self.info.as_ref()
    }

    /// Read metadata and the account balance concurrently.
    pub async fn load_info(&mut self) -> eyre::Result<&TokenInfo> {
        let account = self.token.account();
        let (metadata, balance) =
            tokio::try_join!(self.token.metadata(), self.token.balance_of(account))?;

        let info = TokenInfo {
            total_supply: format_amount(metadata.total_supply, metadata.decimals),
            balance: format_amount(balance, metadata.decimals),
            name: metadata.name,
            symbol: metadata.symbol,
            decimals: metadata.decimals,
        };
        Ok(self.info.insert(info))
    }

    /// Send `amount` (in whole-token units) to `to`, then refresh token info.
    pub async fn transfer(&mut self, to: &str, amount: &str) -> eyre::Result<Submission> {
        let to = parse_address(to)?;
        let amount = parse_positive_amount(amount, self.decimals())?;

        let submission = self.token.transfer(to, amount).await?;
        info!(to = %to, amount = %amount, "Transfer successful");

        self.refresh().await;
        Ok(submission)
    }

    /// Set `spender`'s allowance to `amount` (in whole-token units).
    pub async fn approve(&mut self, spender: &str, amount: &str) -> eyre::Result<Submission> {
        let spender = parse_address(spender)?;
        let amount = parse_positive_amount(amount, self.decimals())?;

        let submission = self.token.approve(spender, amount).await?;
        info!(spender = %spender, amount = %amount, "Approval successful");
        Ok(submission)
    }

    /// Spend the session account's allowance over `owner`.
    pub async fn transfer_from(
        &mut self,
        owner: &str,
        to: &str,
        amount: &str,
    ) -> eyre::Result<Submission> {
        let owner = parse_address(owner)?;
        let to = parse_address(to)?;
        let amount = parse_positive_amount(amount, self.decimals())?;

        let submission = self.token.transfer_from(owner, to, amount).await?;
        info!(owner = %owner, to = %to, amount = %amount, "Delegated transfer successful");

        self.refresh().await;
        Ok(submission)
    }

    /// Formatted allowance of `spender` over `owner`.
    pub async fn allowance(&self, owner: &str, spender: &str) -> eyre::Result<String> {
        let owner = parse_address(owner)?;
        let spender = parse_address(spender)?;
        let amount = self.token.allowance(owner, spender).await?;
        Ok(format_amount(amount, self.decimals()))
    }

    /// Formatted balance of any holder.
    pub async fn balance_of(&self, holder: &str) -> eyre::Result<String> {
        let holder = parse_address(holder)?;
        let amount = self.token.balance_of(holder).await?;
        Ok(format_amount(amount, self.decimals()))
    }

    fn decimals(&self) -> u8 {
        self.info
            .as_ref()
            .map_or(DEFAULT_DECIMALS, |info| info.decimals)
    }

    // A failed refresh keeps the previous info; the operation already succeeded.
    async fn refresh(&mut self) {
        if let Err(e) = self.load_info().await {
            warn!(error = %e, "Failed to refresh token info");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("  "), Err(SessionError::EmptyAddress));
        assert_eq!(
            parse_address("0x1234"),
            Err(SessionError::InvalidAddress("0x1234".to_string()))
        );
        assert!(parse_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").is_ok());
    }
}
