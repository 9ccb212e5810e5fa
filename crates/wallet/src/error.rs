//! Wallet errors

use multisig_core::{Amount, Identity, ProposalId};
use thiserror::Error;

use crate::event::RecordError;
use crate::executor::TransferError;

/// Reasons a wallet configuration is rejected at initialization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("approver list is empty")]
    NoApprovers,

    #[error("duplicate approver: {0}")]
    DuplicateApprover(Identity),

    #[error("quorum {quorum} outside [1, {approvers}]")]
    QuorumOutOfRange { quorum: u32, approvers: usize },
}

/// Why a quorum-reaching approval could not move funds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionFailure {
    #[error("insufficient pool balance: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    #[error("transfer primitive failed: {0}")]
    Transfer(#[from] TransferError),
}

/// Errors from wallet operations.
///
/// Every error leaves the wallet state exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Caller is not an approver: {0}")]
    NotApprover(Identity),

    #[error("Unknown proposal: {0}")]
    UnknownProposal(ProposalId),

    #[error("Proposal {0} already executed")]
    AlreadyExecuted(ProposalId),

    #[error("Approver {approver} already approved proposal {id}")]
    DuplicateApproval { id: ProposalId, approver: Identity },

    #[error("Execution of proposal {id} failed: {cause}")]
    ExecutionFailed {
        id: ProposalId,
        #[source]
        cause: ExecutionFailure,
    },

    #[error("Transfer amount must be positive")]
    InvalidAmount,

    #[error("Insufficient funds for new transfer: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    #[error("Deposit of {0} would overflow the pool balance")]
    BalanceOverflow(Amount),

    #[error("Operation not recorded: {0}")]
    NotRecorded(#[from] RecordError),
}

impl WalletError {
    /// Whether retrying the same call can succeed once the wallet changes
    ///
    /// Execution and funding failures depend on the pool balance; a record
    /// failure depends on the log's storage.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WalletError::ExecutionFailed { .. }
                | WalletError::InsufficientFunds { .. }
                | WalletError::NotRecorded(_)
        )
    }
}

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;
