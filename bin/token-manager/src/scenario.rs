//! Scripted ledger runs for the `simulate` binary.
//!
//! A scenario deploys one in-process token and replays a list of steps
//! against it. Rejected steps are recorded and the run continues, the same
//! way a reverted transaction does not stop the next one.

use alloy_primitives::{address, Address, U256};
use config::token::TokenParams;
use ledger::{Event, LedgerError, SharedLedger};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use token::units::{format_amount, parse_amount};
use tracing::{info, warn};

/// Hardhat's first three dev accounts.
pub const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const USER1: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
pub const USER2: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Constructor arguments of the simulated token
    #[serde(default)]
    pub token: TokenParams,

    /// Account credited with the whole supply
    pub deployer: Address,

    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One ledger call. Amounts are in whole tokens, scaled by the token's decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Transfer {
        caller: Address,
        to: Address,
        amount: String,
    },
    Approve {
        caller: Address,
        spender: Address,
        amount: String,
    },
    TransferFrom {
        caller: Address,
        owner: Address,
        to: Address,
        amount: String,
    },
}

impl Step {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::Approve { .. } => "approve",
            Self::TransferFrom { .. } => "transferFrom",
        }
    }

    const fn amount(&self) -> &String {
        match self {
            Self::Transfer { amount, .. }
            | Self::Approve { amount, .. }
            | Self::TransferFrom { amount, .. } => amount,
        }
    }

    /// The (owner, spender) pair whose allowance this step reads or writes.
    const fn allowance_key(&self) -> Option<(Address, Address)> {
        match self {
            Self::Transfer { .. } => None,
            Self::Approve {
                caller, spender, ..
            } => Some((*caller, *spender)),
            Self::TransferFrom { caller, owner, .. } => Some((*owner, *caller)),
        }
    }
}

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Committed { events: Vec<Event> },
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub op: &'static str,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowanceReport {
    pub owner: Address,
    pub spender: Address,
    pub amount: String,
}

/// Final state of a scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: String,
    pub steps: Vec<StepReport>,
    /// Non-zero balances, formatted with the token's decimals
    pub balances: BTreeMap<Address, String>,
    /// Allowances touched by the scenario
    pub allowances: Vec<AllowanceReport>,
    /// Every notification, starting with the mint
    pub events: Vec<Event>,
}

impl Report {
    pub fn committed(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step.outcome, StepOutcome::Committed { .. }))
            .count()
    }
}

impl Scenario {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        Ok(config::load_toml(path)?)
    }

    /// Mint 1,000,000 tokens to the owner, move 100 to user1, let user1
    /// spend 500 of a 1000 allowance on behalf of the owner.
    pub fn end_to_end() -> Self {
        Self {
            token: TokenParams {
                name: "Test Token".to_string(),
                symbol: "TEST".to_string(),
                decimals: 18,
                total_supply: U256::from(1_000_000u64) * U256::from(10u64).pow(U256::from(18)),
            },
            deployer: OWNER,
            steps: vec![
                Step::Transfer {
                    caller: OWNER,
                    to: USER1,
                    amount: "100".to_string(),
                },
                Step::Approve {
                    caller: OWNER,
                    spender: USER1,
                    amount: "1000".to_string(),
                },
                Step::TransferFrom {
                    caller: USER1,
                    owner: OWNER,
                    to: USER2,
                    amount: "500".to_string(),
                },
            ],
        }
    }

    /// Deploy the token on a fresh ledger.
    pub fn deploy(&self) -> SharedLedger {
        SharedLedger::new(self.token.metadata(), self.deployer)
    }

    /// Replay every step against `ledger` and collect the final state.
    ///
    /// Fails only on malformed amounts; ledger rejections are part of the report.
    pub async fn run(&self, ledger: &SharedLedger) -> eyre::Result<Report> {
        let metadata = ledger.metadata().await;
        let decimals = metadata.decimals;

        let mut steps = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            let amount = parse_amount(step.amount(), decimals)?;
            let outcome = match apply(ledger, step, amount).await {
                Ok(events) => {
                    info!(index, op = step.name(), amount = %amount, "Step committed");
                    StepOutcome::Committed { events }
                }
                Err(e) => {
                    warn!(index, op = step.name(), error = %e, "Step rejected");
                    StepOutcome::Rejected {
                        reason: e.reason().to_string(),
                    }
                }
            };
            steps.push(StepReport {
                index,
                op: step.name(),
                outcome,
            });
        }

        let mut allowances = Vec::new();
        for (owner, spender) in self.allowance_keys() {
            allowances.push(AllowanceReport {
                owner,
                spender,
                amount: format_amount(ledger.allowance(owner, spender).await, decimals),
            });
        }

        let (balances, events) = ledger
            .inspect(|ledger| {
                let balances = ledger
                    .holders()
                    .filter(|(_, balance)| !balance.is_zero())
                    .map(|(holder, balance)| (holder, format_amount(balance, decimals)))
                    .collect::<BTreeMap<_, _>>();
                (balances, ledger.events().to_vec())
            })
            .await;

        Ok(Report {
            total_supply: format_amount(metadata.total_supply, decimals),
            name: metadata.name,
            symbol: metadata.symbol,
            decimals,
            steps,
            balances,
            allowances,
            events,
        })
    }

    // First-seen order, no duplicates.
    fn allowance_keys(&self) -> Vec<(Address, Address)> {
        let mut keys = Vec::new();
        for key in self.steps.iter().filter_map(Step::allowance_key) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

async fn apply(ledger: &SharedLedger, step: &Step, amount: U256) -> Result<Vec<Event>, LedgerError> {
    match step {
        Step::Transfer { caller, to, .. } => ledger.transfer(*caller, *to, amount).await,
        Step::Approve {
            caller, spender, ..
        } => ledger.approve(*caller, *spender, amount).await,
        Step::TransferFrom {
            caller, owner, to, ..
        } => ledger.transfer_from(*caller, *owner, *to, amount).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario_file() {
        let scenario: Scenario = toml::from_str(
            r#"
            deployer = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"

            [token]
            name = "Six"
            symbol = "SIX"
            decimals = 6
            total_supply = "1000000"

            [[step]]
            op = "approve"
            caller = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            spender = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
            amount = "0.5"

            [[step]]
            op = "transfer_from"
            caller = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
            owner = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            to = "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"
            amount = "0.25"
            "#,
        )
        .unwrap();

        assert_eq!(scenario.deployer, OWNER);
        assert_eq!(scenario.token.decimals, 6);
        assert_eq!(scenario.token.total_supply, U256::from(1_000_000u64));
        assert_eq!(scenario.steps.len(), 2);
        assert_eq!(scenario.steps[1].name(), "transferFrom");
        assert_eq!(scenario.allowance_keys(), vec![(OWNER, USER1)]);
    }

    #[test]
    fn test_token_defaults_apply() {
        let scenario: Scenario = toml::from_str(
            r#"deployer = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266""#,
        )
        .unwrap();

        assert_eq!(scenario.token, TokenParams::default());
        assert!(scenario.steps.is_empty());
    }
}
