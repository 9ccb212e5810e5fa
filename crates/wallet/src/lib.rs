//! # Multisig Wallet
//!
//! Quorum-gated authorization engine for outbound transfers of pooled funds.
//!
//! ## Flow
//! - An approver submits a transfer proposal (`create_transfer`)
//! - Distinct approvers approve it (`approve_transfer`)
//! - The approval that reaches the quorum executes the transfer exactly once
//!
//! ## Guarantees
//! - Approver set and quorum are fixed at initialization
//! - One approval per approver per proposal
//! - No approvals accepted after execution
//! - Failed execution leaves the wallet exactly as it was before the call
//! - With an [`EventLog`], nothing is applied that was not recorded first

mod approvers;
mod config;
mod error;
mod event;
mod executor;
mod proposal;
mod state;
mod wallet;

pub use approvers::{ApproverSet, Quorum};
pub use config::{CreationPolicy, WalletConfig};
pub use error::{ConfigError, ExecutionFailure, WalletError, WalletResult};
pub use event::{EventLog, RecordError, WalletEvent};
pub use executor::{LedgerExecutor, TransferError, TransferExecutor};
pub use proposal::{ApprovalOutcome, Proposal, TransferRequest};
pub use state::WalletSnapshot;
pub use wallet::Wallet;

pub use multisig_core::{Amount, Identity, ProposalId};
