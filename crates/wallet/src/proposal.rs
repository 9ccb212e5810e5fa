//! Transfer proposal data structures

use multisig_core::{Amount, Identity, ProposalId};
use serde::{Deserialize, Serialize};

/// What an approver asks the wallet to pay out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub amount: Amount,
    pub destination: Identity,
}

impl TransferRequest {
    pub fn new(amount: Amount, destination: Identity) -> Self {
        Self {
            amount,
            destination,
        }
    }
}

/// A requested outbound transfer and the approvals collected for it.
///
/// `id`, `amount` and `destination` never change after creation. Approvals
/// are kept in the order they were accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub amount: Amount,
    pub destination: Identity,
    approvals: Vec<Identity>,
    executed: bool,
}

impl Proposal {
    pub(crate) fn new(id: ProposalId, request: TransferRequest) -> Self {
        Self {
            id,
            amount: request.amount,
            destination: request.destination,
            approvals: Vec::new(),
            executed: false,
        }
    }

    /// Approvers who approved, in approval order
    pub fn approvals(&self) -> &[Identity] {
        &self.approvals
    }

    pub fn approval_count(&self) -> usize {
        self.approvals.len()
    }

    pub fn has_approved(&self, approver: &Identity) -> bool {
        self.approvals.iter().any(|a| a == approver)
    }

    /// Whether the transfer has been carried out
    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// Approvals still needed to reach `quorum` (0 once reached)
    pub fn remaining_approvals(&self, quorum: u32) -> usize {
        (quorum as usize).saturating_sub(self.approvals.len())
    }

    /// Record an approval; returns false if this approver already approved
    pub(crate) fn add_approval(&mut self, approver: Identity) -> bool {
        if self.has_approved(&approver) {
            return false;
        }
        self.approvals.push(approver);
        true
    }

    pub(crate) fn mark_executed(&mut self) {
        self.executed = true;
    }
}

/// Result of an accepted approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApprovalOutcome {
    /// Recorded; quorum not reached yet
    Pending {
        approvals: usize,
        remaining: usize,
    },
    /// Quorum reached by this approval and funds were sent
    Executed {
        amount: Amount,
        destination: Identity,
    },
}

impl ApprovalOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, ApprovalOutcome::Executed { .. })
    }
}
