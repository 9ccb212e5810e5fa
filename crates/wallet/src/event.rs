//! Accepted operations and the log they are written to
//!
//! Every mutating call emits one [`WalletEvent`] to an optional
//! [`EventLog`] while the wallet's write guard is held. The event is written
//! before the change is applied, and a failed write cancels the change.

use multisig_core::{Amount, Identity, ProposalId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An operation the wallet accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WalletEvent {
    Deposited {
        amount: Amount,
    },
    TransferCreated {
        id: ProposalId,
        proposer: Identity,
        amount: Amount,
        destination: Identity,
    },
    TransferApproved {
        id: ProposalId,
        approver: Identity,
        /// Whether this approval executed the transfer
        executed: bool,
    },
    /// The transfer primitive refused the execution announced by the
    /// immediately preceding `TransferApproved`; that approval never applied
    ExecutionAborted {
        id: ProposalId,
        approver: Identity,
    },
}

impl WalletEvent {
    /// Short label for logs and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            WalletEvent::Deposited { .. } => "deposited",
            WalletEvent::TransferCreated { .. } => "transfer_created",
            WalletEvent::TransferApproved { .. } => "transfer_approved",
            WalletEvent::ExecutionAborted { .. } => "execution_aborted",
        }
    }
}

/// Failure to persist an event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RecordError(pub String);

/// Durable sink for accepted operations
pub trait EventLog: Send {
    fn record(&mut self, event: &WalletEvent) -> Result<(), RecordError>;
}

impl EventLog for Vec<WalletEvent> {
    fn record(&mut self, event: &WalletEvent) -> Result<(), RecordError> {
        self.push(event.clone());
        Ok(())
    }
}
