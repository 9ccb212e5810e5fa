//! CLI commands

use multisig_core::{Amount, Identity, ProposalId};
use multisig_wallet::{ApprovalOutcome, CreationPolicy, WalletConfig};
use std::path::Path;

use crate::context::AppContext;

/// Write the approver set and quorum for a new wallet
pub async fn init(
    data_path: &Path,
    approvers: Vec<Identity>,
    quorum: u32,
    require_funds: bool,
) -> Result<(), anyhow::Error> {
    let policy = if require_funds {
        CreationPolicy::RequireFunds
    } else {
        CreationPolicy::Permissive
    };
    let config = WalletConfig::new(approvers, quorum).with_creation_policy(policy);

    let ctx = AppContext::init(data_path, config).await?;

    println!(
        "✅ Wallet initialized: {}-of-{} at {}",
        ctx.config().quorum,
        ctx.config().approvers.len(),
        ctx.data_path().display()
    );
    Ok(())
}

/// Fund the pool
pub async fn deposit(ctx: &mut AppContext, amount: Amount) -> Result<(), anyhow::Error> {
    let balance = ctx.deposit(amount).await?;
    println!("✅ Deposited {} (balance: {})", amount, balance);
    Ok(())
}

/// Submit a transfer proposal
pub async fn create_transfer(
    ctx: &mut AppContext,
    caller: &Identity,
    amount: Amount,
    destination: Identity,
) -> Result<(), anyhow::Error> {
    let id = ctx.create_transfer(caller, amount, destination.clone()).await?;
    println!(
        "✅ Transfer {} created: {} to {} (quorum: {})",
        id,
        amount,
        destination,
        ctx.wallet.quorum().await
    );
    Ok(())
}

/// Approve a transfer proposal
pub async fn approve(
    ctx: &mut AppContext,
    caller: &Identity,
    id: ProposalId,
) -> Result<(), anyhow::Error> {
    match ctx.approve_transfer(caller, id).await? {
        ApprovalOutcome::Pending {
            approvals,
            remaining,
        } => {
            println!(
                "✅ Transfer {} approved by {} ({} approvals, {} more needed)",
                id, caller, approvals, remaining
            );
        }
        ApprovalOutcome::Executed {
            amount,
            destination,
        } => {
            println!(
                "✅ Transfer {} approved by {}: quorum reached, sent {} to {}",
                id, caller, amount, destination
            );
        }
    }
    Ok(())
}

pub async fn approvers(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let approvers = ctx.wallet.approvers().await;
    let names: Vec<&str> = approvers.iter().map(|a| a.as_str()).collect();
    println!("Approvers: {}", names.join(", "));
    Ok(())
}

pub async fn quorum(ctx: &AppContext) -> Result<(), anyhow::Error> {
    println!("Quorum: {}", ctx.wallet.quorum().await);
    Ok(())
}

pub async fn balance(ctx: &AppContext) -> Result<(), anyhow::Error> {
    println!("Balance: {}", ctx.wallet.balance().await);

    for (destination, paid) in ctx.executor.payouts() {
        println!("  paid to {}: {}", destination, paid);
    }
    Ok(())
}

/// List every transfer in creation order
pub async fn transfers(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let transfers = ctx.wallet.transfers().await;

    if transfers.is_empty() {
        println!("No transfers");
        return Ok(());
    }

    println!(
        "{:<6} {:>20} {:<24} {:>9} {:<5}",
        "ID", "AMOUNT", "TO", "APPROVALS", "SENT"
    );
    for t in &transfers {
        println!(
            "{:<6} {:>20} {:<24} {:>9} {:<5}",
            t.id.to_string(),
            t.amount.to_string(),
            t.destination.as_str(),
            t.approval_count(),
            if t.is_executed() { "yes" } else { "no" }
        );
    }
    Ok(())
}

/// Verify the journal hash chain
pub async fn audit(ctx: &AppContext) -> Result<(), anyhow::Error> {
    match ctx.audit() {
        Ok(count) => println!("✅ Hash chain verified ({} records)", count),
        Err(e) => println!("❌ Hash chain broken: {}", e),
    }
    Ok(())
}
