//! CLI for a deployed ERC20 token.
//!
//! Each subcommand is one frontend action against the configured token:
//! - `accounts`: list the wallet's accounts
//! - `info`: name, symbol, decimals, total supply and the account's balance
//! - `balance` / `allowance`: formatted reads
//! - `transfer` / `approve` / `transfer-from`: submit and await one transaction
//! - `history`: scan past `Transfer` and `Approval` notifications

use alloy_provider::Provider;
use clap::{Parser, Subcommand};
use client::{LocalWallet, RemoteWallet, Wallet};
use config::NetworkConfig;
use eyre::eyre;
use std::time::Duration;
use token::{
    history::HistoryScanner,
    session::{self, connect_wallet, parse_address},
    Erc20, TokenSession,
};
use token_manager::{
    config::{Config, WalletConfig},
    init_tracing,
    metrics::{install_prometheus_exporter, Metrics},
    track,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "token-manager")]
#[command(about = "Inspect and operate an ERC20 token")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private key for the local wallet (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Token contract address, overrides `token_address` from the config
    #[arg(short, long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the accounts the wallet controls
    Accounts,

    /// Print past Transfer and Approval notifications as JSON lines
    History {
        #[arg(long, default_value_t = 0)]
        from_block: u64,

        /// Defaults to the latest block
        #[arg(long)]
        to_block: Option<u64>,
    },

    #[command(flatten)]
    Session(SessionCommand),
}

/// Commands that act through a session bound to the connected account.
#[derive(Subcommand)]
enum SessionCommand {
    /// Show token metadata and the connected account's balance
    Info,

    /// Show the balance of a holder (defaults to the connected account)
    Balance { holder: Option<String> },

    /// Show how much `spender` may still move out of `owner`'s balance
    Allowance { owner: String, spender: String },

    /// Send tokens from the connected account
    Transfer { to: String, amount: String },

    /// Set the allowance of `spender` over the connected account
    Approve { spender: String, amount: String },

    /// Move tokens out of `owner`'s balance using the connected account's allowance
    TransferFrom {
        owner: String,
        to: String,
        amount: String,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_file(&cli.config)?;

    init_tracing(config.json_logs);

    let network = config.network_config();
    info!(
        network = ?config.network,
        chain_id = network.chain_id,
        rpc_url = %config.rpc_url,
        "Loaded config"
    );

    if let Some(port) = config.metrics_port {
        install_prometheus_exporter(port)?;
        info!(port, "Prometheus exporter listening");
    }

    let provider = client::create_provider(&config.rpc_url).await?;
    let token = cli
        .token
        .clone()
        .or_else(|| config.token_address.map(|address| address.to_string()));

    match &config.wallet {
        WalletConfig::Local => {
            let private_key = cli
                .private_key
                .as_deref()
                .ok_or_else(|| eyre!("Local wallet requires --private-key or PRIVATE_KEY"))?;
            let wallet = LocalWallet::new(private_key, network.chain_id, provider.clone())?;
            info!(account = %wallet.address(), "Using local wallet");
            run(cli.command, provider, wallet, token, network).await
        }
        WalletConfig::Remote { url } => {
            info!(url = %url, "Using remote wallet");
            let wallet = RemoteWallet::new(url.clone());
            run(cli.command, provider, wallet, token, network).await
        }
    }
}

async fn run<P, W>(
    command: Command,
    provider: P,
    wallet: W,
    token: Option<String>,
    network: NetworkConfig,
) -> eyre::Result<()>
where
    P: Provider + Clone,
    W: Wallet,
{
    let token_address = || token.clone().ok_or_else(|| eyre!("No token address configured"));

    match command {
        Command::Accounts => {
            for account in wallet.request_accounts().await? {
                println!("{account}");
            }
        }
        Command::History {
            from_block,
            to_block,
        } => {
            let address = parse_address(&token_address()?)?;
            let scanner = HistoryScanner::new(provider, address, network.max_log_range);
            for event in scanner.scan(from_block, to_block).await? {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
        Command::Session(command) => {
            let account = connect_wallet(&wallet).await?;
            let session = session::connect(
                provider,
                wallet,
                account,
                &token_address()?,
                Duration::from_secs(network.block_time_secs),
            )?;
            run_session(command, session).await?;
        }
    }

    Ok(())
}

async fn run_session<T: Erc20>(
    command: SessionCommand,
    mut session: TokenSession<T>,
) -> eyre::Result<()> {
    let metrics = Metrics::new();
    let info = session.load_info().await?.clone();
    if let Ok(balance) = info.balance.parse::<f64>() {
        metrics.set_account_balance(&info.symbol, balance);
    }

    match command {
        SessionCommand::Info => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        SessionCommand::Balance { holder } => {
            let holder = holder.unwrap_or_else(|| session.account().to_string());
            let balance = session.balance_of(&holder).await?;
            println!("{balance} {}", info.symbol);
        }
        SessionCommand::Allowance { owner, spender } => {
            let allowance = session.allowance(&owner, &spender).await?;
            println!("{allowance} {}", info.symbol);
        }
        SessionCommand::Transfer { to, amount } => {
            let submission = track(&metrics, "transfer", session.transfer(&to, &amount)).await?;
            print_submission(submission.tx_hash);
            if let Some(info) = session.info() {
                println!("Balance: {} {}", info.balance, info.symbol);
            }
        }
        SessionCommand::Approve { spender, amount } => {
            let submission =
                track(&metrics, "approve", session.approve(&spender, &amount)).await?;
            print_submission(submission.tx_hash);
        }
        SessionCommand::TransferFrom { owner, to, amount } => {
            let submission = track(
                &metrics,
                "transferFrom",
                session.transfer_from(&owner, &to, &amount),
            )
            .await?;
            print_submission(submission.tx_hash);
        }
    }

    Ok(())
}

fn print_submission(tx_hash: Option<alloy_primitives::TxHash>) {
    match tx_hash {
        Some(hash) => println!("Confirmed: {hash}"),
        None => println!("Confirmed"),
    }
}
