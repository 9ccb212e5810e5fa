//! Shared wallet handle
//!
//! All mutations are serialized by one write guard held for the whole
//! operation, including the event write and the awaited transfer. Reads take
//! the read guard and return owned copies so they never observe a
//! half-applied mutation.

use std::sync::Arc;

use multisig_core::{Amount, Identity, ProposalId};
use tokio::sync::RwLock;

use crate::config::WalletConfig;
use crate::error::{ExecutionFailure, WalletError, WalletResult};
use crate::event::{EventLog, RecordError, WalletEvent};
use crate::executor::TransferExecutor;
use crate::proposal::{ApprovalOutcome, Proposal, TransferRequest};
use crate::state::{WalletSnapshot, WalletState};

/// Multisig wallet: quorum-gated transfers out of a shared pool
pub struct Wallet {
    state: RwLock<WalletState>,
    executor: Arc<dyn TransferExecutor>,
}

impl Wallet {
    /// Initialize with a validated configuration and an empty pool
    pub fn new(config: &WalletConfig, executor: Arc<dyn TransferExecutor>) -> WalletResult<Self> {
        let state = WalletState::new(config)?;

        tracing::info!(
            approvers = state.approvers().len(),
            quorum = state.quorum().value(),
            "Wallet initialized"
        );

        Ok(Self {
            state: RwLock::new(state),
            executor,
        })
    }

    /// Add funds to the pool. Anyone may deposit.
    pub async fn deposit(&self, amount: Amount) -> WalletResult<Amount> {
        self.apply_deposit(amount, None).await
    }

    /// [`deposit`](Self::deposit), writing the event to `log` first
    pub async fn deposit_recorded(
        &self,
        amount: Amount,
        log: &mut dyn EventLog,
    ) -> WalletResult<Amount> {
        self.apply_deposit(amount, Some(log)).await
    }

    /// Submit a new transfer proposal; returns its id
    pub async fn create_transfer(
        &self,
        caller: &Identity,
        request: TransferRequest,
    ) -> WalletResult<ProposalId> {
        self.apply_create(caller, request, None).await
    }

    /// [`create_transfer`](Self::create_transfer), writing the event to `log` first
    pub async fn create_transfer_recorded(
        &self,
        caller: &Identity,
        request: TransferRequest,
        log: &mut dyn EventLog,
    ) -> WalletResult<ProposalId> {
        self.apply_create(caller, request, Some(log)).await
    }

    /// Approve a proposal, executing it if this approval reaches the quorum.
    ///
    /// On any error, including a failed transfer, neither the approval nor
    /// the debit is recorded.
    pub async fn approve_transfer(
        &self,
        caller: &Identity,
        id: ProposalId,
    ) -> WalletResult<ApprovalOutcome> {
        self.apply_approval(caller, id, None).await
    }

    /// [`approve_transfer`](Self::approve_transfer), writing the event to
    /// `log` before the transfer runs.
    ///
    /// If the transfer then fails, an `ExecutionAborted` event follows so a
    /// replay skips the approval.
    pub async fn approve_transfer_recorded(
        &self,
        caller: &Identity,
        id: ProposalId,
        log: &mut dyn EventLog,
    ) -> WalletResult<ApprovalOutcome> {
        self.apply_approval(caller, id, Some(log)).await
    }

    /// Re-apply a recorded event without calling the transfer executor.
    ///
    /// Runs the same checks as the live operation. Returns the event as
    /// this wallet would record it now.
    pub async fn restore(&self, event: &WalletEvent) -> WalletResult<WalletEvent> {
        let mut state = self.state.write().await;
        let restored = state.restore(event)?;
        tracing::trace!(kind = restored.kind(), "Event restored");
        Ok(restored)
    }

    async fn apply_deposit(
        &self,
        amount: Amount,
        mut log: Option<&mut dyn EventLog>,
    ) -> WalletResult<Amount> {
        let mut state = self.state.write().await;
        let balance = state.plan_deposit(amount)?;

        record(&mut log, &WalletEvent::Deposited { amount })?;
        state.commit_deposit(balance);

        tracing::debug!(%amount, %balance, "Deposit accepted");
        Ok(balance)
    }

    async fn apply_create(
        &self,
        caller: &Identity,
        request: TransferRequest,
        mut log: Option<&mut dyn EventLog>,
    ) -> WalletResult<ProposalId> {
        let mut state = self.state.write().await;
        let amount = request.amount;
        let destination = request.destination.clone();

        let id = state.plan_create(caller, &request)?;
        record(
            &mut log,
            &WalletEvent::TransferCreated {
                id,
                proposer: caller.clone(),
                amount,
                destination: destination.clone(),
            },
        )?;
        state.commit_create(request);

        tracing::info!(%id, proposer = %caller, %amount, %destination, "Transfer proposed");
        Ok(id)
    }

    async fn apply_approval(
        &self,
        caller: &Identity,
        id: ProposalId,
        mut log: Option<&mut dyn EventLog>,
    ) -> WalletResult<ApprovalOutcome> {
        let mut state = self.state.write().await;
        let plan = state.plan_approval(caller, id)?;

        record(
            &mut log,
            &WalletEvent::TransferApproved {
                id,
                approver: caller.clone(),
                executed: plan.execution.is_some(),
            },
        )?;

        if let Some(ref execution) = plan.execution {
            if let Err(e) = self
                .executor
                .transfer(&execution.destination, execution.amount)
                .await
            {
                tracing::warn!(%id, approver = %caller, error = %e, "Execution failed, approval rolled back");

                let aborted = WalletEvent::ExecutionAborted {
                    id,
                    approver: caller.clone(),
                };
                if let Err(record_err) = record(&mut log, &aborted) {
                    // The log now shows an execution that never happened
                    tracing::error!(%id, approver = %caller, error = %record_err, "Failed to record aborted execution");
                }

                return Err(WalletError::ExecutionFailed {
                    id,
                    cause: ExecutionFailure::Transfer(e),
                });
            }
        }

        let outcome = state.commit_approval(plan);

        match &outcome {
            ApprovalOutcome::Executed {
                amount,
                destination,
            } => {
                tracing::info!(%id, approver = %caller, %amount, %destination, "Quorum reached, transfer executed");
            }
            ApprovalOutcome::Pending {
                approvals,
                remaining,
            } => {
                tracing::debug!(%id, approver = %caller, approvals, remaining, "Approval recorded");
            }
        }

        Ok(outcome)
    }

    /// Approvers in configured order
    pub async fn approvers(&self) -> Vec<Identity> {
        self.state.read().await.approvers().as_slice().to_vec()
    }

    pub async fn quorum(&self) -> u32 {
        self.state.read().await.quorum().value()
    }

    pub async fn balance(&self) -> Amount {
        self.state.read().await.balance()
    }

    /// Full proposal history in creation order
    pub async fn transfers(&self) -> Vec<Proposal> {
        self.state.read().await.proposals().to_vec()
    }

    pub async fn transfer(&self, id: ProposalId) -> Option<Proposal> {
        self.state.read().await.proposal(id).cloned()
    }

    pub async fn snapshot(&self) -> WalletSnapshot {
        self.state.read().await.snapshot()
    }
}

fn record(log: &mut Option<&mut dyn EventLog>, event: &WalletEvent) -> Result<(), RecordError> {
    match log {
        Some(log) => log.record(event),
        None => Ok(()),
    }
}
