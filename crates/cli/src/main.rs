//! Multisig CLI - Main entry point

use clap::{Parser, Subcommand};
use multisig_cli::{commands, AppContext};
use multisig_core::{Amount, Identity, ProposalId};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "multisig")]
#[command(about = "Multisig wallet - quorum-approved transfers", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a wallet with a fixed approver set and quorum
    Init {
        /// Approver identity (repeat for each approver, order is kept)
        #[arg(long = "approver", required = true)]
        approvers: Vec<Identity>,
        /// Distinct approvals required to execute a transfer
        #[arg(long)]
        quorum: u32,
        /// Reject proposals larger than the current balance
        #[arg(long)]
        require_funds: bool,
    },

    /// Add funds to the pool
    Deposit {
        /// Amount in the smallest unit
        amount: Amount,
    },

    /// Propose a transfer out of the pool
    CreateTransfer {
        /// Identity submitting the proposal
        #[arg(long)]
        caller: Identity,
        /// Amount in the smallest unit
        amount: Amount,
        /// Destination identity
        destination: Identity,
    },

    /// Approve a pending transfer
    Approve {
        /// Identity approving
        #[arg(long)]
        caller: Identity,
        /// Proposal ID
        id: ProposalId,
    },

    /// Show the approver set
    Approvers,

    /// Show the quorum
    Quorum,

    /// Show the pool balance and payouts
    Balance,

    /// List all transfers
    Transfers,

    /// Audit the journal (verify hash chain)
    Audit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let open = || AppContext::open(&cli.data);

    match cli.command {
        Commands::Init {
            approvers,
            quorum,
            require_funds,
        } => {
            commands::init(&cli.data, approvers, quorum, require_funds).await?;
        }

        Commands::Deposit { amount } => {
            let mut ctx = open().await?;
            commands::deposit(&mut ctx, amount).await?;
        }

        Commands::CreateTransfer {
            caller,
            amount,
            destination,
        } => {
            let mut ctx = open().await?;
            commands::create_transfer(&mut ctx, &caller, amount, destination).await?;
        }

        Commands::Approve { caller, id } => {
            let mut ctx = open().await?;
            commands::approve(&mut ctx, &caller, id).await?;
        }

        Commands::Approvers => commands::approvers(&open().await?).await?,
        Commands::Quorum => commands::quorum(&open().await?).await?,
        Commands::Balance => commands::balance(&open().await?).await?,
        Commands::Transfers => commands::transfers(&open().await?).await?,
        Commands::Audit => commands::audit(&open().await?).await?,
    }

    Ok(())
}
