//! Wallet state machine
//!
//! Pure bookkeeping with no I/O. Every mutation is split into a check phase
//! (`plan_*`) and an apply phase (`commit_*`) so the caller can record the
//! event and run the external transfer in between, and drop the plan on
//! failure. Nothing is mutated before the commit.

use multisig_core::{Amount, Identity, ProposalId};
use serde::{Deserialize, Serialize};

use crate::approvers::{ApproverSet, Quorum};
use crate::config::{CreationPolicy, WalletConfig};
use crate::error::{ExecutionFailure, WalletError, WalletResult};
use crate::event::WalletEvent;
use crate::proposal::{ApprovalOutcome, Proposal, TransferRequest};

/// Consistent copy of the wallet taken under a single read guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub approvers: Vec<Identity>,
    pub quorum: u32,
    pub balance: Amount,
    pub transfers: Vec<Proposal>,
}

/// Accepted approval that has not been applied yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApprovalPlan {
    pub id: ProposalId,
    index: usize,
    pub approver: Identity,
    /// Set when this approval reaches the quorum
    pub execution: Option<Execution>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Execution {
    pub amount: Amount,
    pub destination: Identity,
    pub balance_after: Amount,
}

pub(crate) struct WalletState {
    approvers: ApproverSet,
    quorum: Quorum,
    policy: CreationPolicy,
    balance: Amount,
    proposals: Vec<Proposal>,
}

impl WalletState {
    pub fn new(config: &WalletConfig) -> WalletResult<Self> {
        let (approvers, quorum) = config.validate()?;

        Ok(Self {
            approvers,
            quorum,
            policy: config.creation_policy,
            balance: Amount::ZERO,
            proposals: Vec::new(),
        })
    }

    pub fn approvers(&self) -> &ApproverSet {
        &self.approvers
    }

    pub fn quorum(&self) -> Quorum {
        self.quorum
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        id.index().and_then(|index| self.proposals.get(index))
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            approvers: self.approvers.as_slice().to_vec(),
            quorum: self.quorum.value(),
            balance: self.balance,
            transfers: self.proposals.clone(),
        }
    }

    /// Balance after depositing `amount`
    pub fn plan_deposit(&self, amount: Amount) -> WalletResult<Amount> {
        self.balance
            .checked_add(&amount)
            .ok_or(WalletError::BalanceOverflow(amount))
    }

    pub fn commit_deposit(&mut self, balance: Amount) {
        self.balance = balance;
    }

    /// Add funds to the pool; returns the new balance
    pub fn deposit(&mut self, amount: Amount) -> WalletResult<Amount> {
        let balance = self.plan_deposit(amount)?;
        self.commit_deposit(balance);
        Ok(balance)
    }

    /// Check a new proposal; returns the id it will be stored under
    pub fn plan_create(&self, caller: &Identity, request: &TransferRequest) -> WalletResult<ProposalId> {
        self.ensure_approver(caller)?;

        if request.amount.is_zero() {
            return Err(WalletError::InvalidAmount);
        }

        if self.policy == CreationPolicy::RequireFunds && request.amount > self.balance {
            return Err(WalletError::InsufficientFunds {
                requested: request.amount,
                available: self.balance,
            });
        }

        // Ids are dense indexes into the append-only history
        Ok(ProposalId::new(self.proposals.len() as u64))
    }

    pub fn commit_create(&mut self, request: TransferRequest) -> ProposalId {
        let id = ProposalId::new(self.proposals.len() as u64);
        self.proposals.push(Proposal::new(id, request));
        id
    }

    pub fn create_transfer(
        &mut self,
        caller: &Identity,
        request: TransferRequest,
    ) -> WalletResult<ProposalId> {
        self.plan_create(caller, &request)?;
        Ok(self.commit_create(request))
    }

    /// Run every approval check without touching state
    pub fn plan_approval(&self, caller: &Identity, id: ProposalId) -> WalletResult<ApprovalPlan> {
        self.ensure_approver(caller)?;

        let index = id
            .index()
            .filter(|&index| index < self.proposals.len())
            .ok_or(WalletError::UnknownProposal(id))?;
        let proposal = &self.proposals[index];

        if proposal.is_executed() {
            return Err(WalletError::AlreadyExecuted(id));
        }

        if proposal.has_approved(caller) {
            return Err(WalletError::DuplicateApproval {
                id,
                approver: caller.clone(),
            });
        }

        let execution = if self.quorum.is_met_by(proposal.approval_count() + 1) {
            let balance_after = self.balance.checked_sub(&proposal.amount).ok_or(
                WalletError::ExecutionFailed {
                    id,
                    cause: ExecutionFailure::InsufficientFunds {
                        requested: proposal.amount,
                        available: self.balance,
                    },
                },
            )?;

            Some(Execution {
                amount: proposal.amount,
                destination: proposal.destination.clone(),
                balance_after,
            })
        } else {
            None
        };

        Ok(ApprovalPlan {
            id,
            index,
            approver: caller.clone(),
            execution,
        })
    }

    /// Apply a plan produced by `plan_approval` on this same, unmodified state
    pub fn commit_approval(&mut self, plan: ApprovalPlan) -> ApprovalOutcome {
        let quorum = self.quorum.value();
        let proposal = &mut self.proposals[plan.index];
        proposal.add_approval(plan.approver);

        match plan.execution {
            Some(execution) => {
                proposal.mark_executed();
                self.balance = execution.balance_after;
                ApprovalOutcome::Executed {
                    amount: execution.amount,
                    destination: execution.destination,
                }
            }
            None => ApprovalOutcome::Pending {
                approvals: proposal.approval_count(),
                remaining: proposal.remaining_approvals(quorum),
            },
        }
    }

    /// Re-apply a recorded event with the same checks, without moving funds.
    ///
    /// Returns the event as it would be recorded against this state, so the
    /// caller can compare it with the stored one. `ExecutionAborted` carries
    /// no state change.
    pub fn restore(&mut self, event: &WalletEvent) -> WalletResult<WalletEvent> {
        match event {
            WalletEvent::Deposited { amount } => {
                self.deposit(*amount)?;
                Ok(event.clone())
            }
            WalletEvent::TransferCreated {
                proposer,
                amount,
                destination,
                ..
            } => {
                let request = TransferRequest::new(*amount, destination.clone());
                let id = self.create_transfer(proposer, request)?;
                Ok(WalletEvent::TransferCreated {
                    id,
                    proposer: proposer.clone(),
                    amount: *amount,
                    destination: destination.clone(),
                })
            }
            WalletEvent::TransferApproved { id, approver, .. } => {
                let plan = self.plan_approval(approver, *id)?;
                let executed = plan.execution.is_some();
                self.commit_approval(plan);
                Ok(WalletEvent::TransferApproved {
                    id: *id,
                    approver: approver.clone(),
                    executed,
                })
            }
            WalletEvent::ExecutionAborted { .. } => Ok(event.clone()),
        }
    }

    fn ensure_approver(&self, caller: &Identity) -> WalletResult<()> {
        if self.approvers.contains(caller) {
            Ok(())
        } else {
            Err(WalletError::NotApprover(caller.clone()))
        }
    }
}
