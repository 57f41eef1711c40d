//! Session behavior against an in-process ledger.

use alloy_primitives::{address, Address, U256};
use ledger::{Approval, Event, LedgerError, SharedLedger, TokenMetadata, Transfer};
use token::{error::rejection_reason, Erc20, LocalToken, SessionError, TokenSession};

const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
const USER1: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
const USER2: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");

const USER1_STR: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
const USER2_STR: &str = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";
const OWNER_STR: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

fn tokens(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

fn deploy() -> LocalToken {
    let ledger = SharedLedger::new(
        TokenMetadata::new("Test Token", "TEST", 18, tokens(1_000_000)),
        OWNER,
    );
    LocalToken::new(ledger, OWNER)
}

#[tokio::test]
async fn test_load_info_formats_amounts() {
    let mut session = TokenSession::new(deploy());

    let info = session.load_info().await.unwrap().clone();

    assert_eq!(info.name, "Test Token");
    assert_eq!(info.symbol, "TEST");
    assert_eq!(info.decimals, 18);
    assert_eq!(info.total_supply, "1000000.0");
    assert_eq!(info.balance, "1000000.0");
    assert_eq!(session.info(), Some(&info));
}

#[tokio::test]
async fn test_end_to_end_transfer_approve_transfer_from() {
    let owner_token = deploy();
    let mut owner = TokenSession::new(owner_token.clone());
    let mut user1 = TokenSession::new(owner_token.as_account(USER1));
    owner.load_info().await.unwrap();
    user1.load_info().await.unwrap();

    let submission = owner.transfer(USER1_STR, "100").await.unwrap();
    assert_eq!(submission.tx_hash, None);
    assert_eq!(
        submission.events,
        vec![Event::Transfer(Transfer {
            from: OWNER,
            to: USER1,
            value: tokens(100),
        })]
    );
    assert_eq!(owner.info().unwrap().balance, "999900.0");
    assert_eq!(user1.balance_of(USER1_STR).await.unwrap(), "100.0");

    let submission = owner.approve(USER1_STR, "1000").await.unwrap();
    assert_eq!(
        submission.events,
        vec![Event::Approval(Approval {
            owner: OWNER,
            spender: USER1,
            value: tokens(1000),
        })]
    );

    user1
        .transfer_from(OWNER_STR, USER2_STR, "500")
        .await
        .unwrap();

    let token = owner.token();
    assert_eq!(token.balance_of(OWNER).await.unwrap(), tokens(999_400));
    assert_eq!(token.balance_of(USER2).await.unwrap(), tokens(500));
    assert_eq!(token.balance_of(USER1).await.unwrap(), tokens(100));
    assert_eq!(token.allowance(OWNER, USER1).await.unwrap(), tokens(500));
    assert_eq!(
        owner.allowance(OWNER_STR, USER1_STR).await.unwrap(),
        "500.0"
    );
}

#[tokio::test]
async fn test_invalid_input_never_reaches_ledger() {
    let token = deploy();
    let mut session = TokenSession::new(token.clone());
    let before = token.ledger().events().await.len();

    let err = session.transfer("", "1").await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<SessionError>(),
        Some(&SessionError::EmptyAddress)
    );

    let err = session.transfer(USER1_STR, "0").await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<SessionError>(),
        Some(&SessionError::NonPositiveAmount)
    );

    let err = session.approve("not-an-address", "5").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::InvalidAddress(_))
    ));

    assert_eq!(token.ledger().events().await.len(), before);
}

#[tokio::test]
async fn test_ledger_rejection_is_surfaced() {
    let token = deploy();
    let mut user1 = TokenSession::new(token.as_account(USER1));

    let err = user1.transfer(USER2_STR, "1").await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InsufficientBalance { .. })
    ));
    assert_eq!(rejection_reason(&err), Some("Insufficient balance"));
}

#[tokio::test]
async fn test_amounts_use_token_decimals_once_loaded() {
    let ledger = SharedLedger::new(
        TokenMetadata::new("Six", "SIX", 6, U256::from(10_000_000u64)),
        OWNER,
    );
    let token = LocalToken::new(ledger, OWNER);
    let mut session = TokenSession::new(token.clone());

    session.load_info().await.unwrap();
    session.transfer(USER1_STR, "2.5").await.unwrap();

    assert_eq!(token.balance_of(USER1).await.unwrap(), U256::from(2_500_000u64));
    assert_eq!(session.info().unwrap().balance, "7.5");
}

#[tokio::test]
async fn test_amounts_default_to_18_decimals() {
    let token = deploy();
    let mut session = TokenSession::new(token.clone());

    session.transfer(USER1_STR, "1").await.unwrap();

    assert_eq!(token.balance_of(USER1).await.unwrap(), tokens(1));
}
