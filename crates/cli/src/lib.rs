//! Multisig CLI - operator surface
//!
//! This crate provides the `multisig` binary and command orchestration.

pub mod commands;
pub mod context;

pub use context::{AppContext, ContextError};
