//! Run token scenarios against an in-process ledger.
//!
//! - `scenario`: the built-in end-to-end flow (mint, transfer, approve, transferFrom)
//! - `run <file>`: replay the steps of a TOML scenario file
//!
//! Notifications are logged as they are committed; the final state is printed as JSON.

use clap::{Parser, Subcommand};
use ledger::Event;
use tokio::sync::broadcast::{error::RecvError, Receiver};
use token_manager::{init_tracing, scenario::Scenario};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Replay token operations on an in-process ledger")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the built-in end-to-end scenario
    Scenario,

    /// Replay a scenario file
    Run {
        /// Path to the scenario TOML file
        path: String,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let scenario = match &cli.command {
        Command::Scenario => Scenario::end_to_end(),
        Command::Run { path } => {
            info!(path = %path, "Loading scenario");
            Scenario::from_file(path)?
        }
    };

    let ledger = scenario.deploy();
    let listener = tokio::spawn(log_notifications(ledger.subscribe()));

    let report = scenario.run(&ledger).await?;
    info!(
        steps = report.steps.len(),
        committed = report.committed(),
        "Scenario finished"
    );

    // Closing the last sender ends the listener once it has drained.
    drop(ledger);
    if let Err(e) = listener.await {
        warn!(error = %e, "Notification listener stopped abnormally");
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn log_notifications(mut notifications: Receiver<Event>) {
    loop {
        match notifications.recv().await {
            Ok(Event::Transfer(t)) => {
                info!(from = %t.from, to = %t.to, value = %t.value, "Transfer");
            }
            Ok(Event::Approval(a)) => {
                info!(owner = %a.owner, spender = %a.spender, value = %a.value, "Approval");
            }
            Err(RecvError::Lagged(missed)) => {
                warn!(missed, "Notification listener lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
