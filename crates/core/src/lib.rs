//! Multisig Core - Domain types
//!
//! This crate contains the fundamental types used across the multisig wallet:
//! - `Amount`: Exact-width unsigned amount in the smallest unit
//! - `Identity`: Opaque account identity (approvers, destinations)
//! - `ProposalId`: Sequential transfer proposal identifier

pub mod amount;
pub mod id;
pub mod identity;

pub use amount::{Amount, AmountError};
pub use id::ProposalId;
pub use identity::{Identity, IdentityError};
