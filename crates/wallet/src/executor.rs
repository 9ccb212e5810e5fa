//! Transfer execution primitive
//!
//! The wallet decides *when* funds move; a [`TransferExecutor`] moves them.
//! A successful call means the funds reached the destination. A failed call
//! must not have moved anything.

use async_trait::async_trait;
use multisig_core::{Amount, Identity};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use thiserror::Error;

/// Failure reported by a transfer primitive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("destination rejected transfer: {0}")]
    Rejected(String),

    #[error("transfer backend unavailable")]
    Unavailable,
}

/// Moves value out of the pool to a destination identity
#[async_trait]
pub trait TransferExecutor: Send + Sync {
    async fn transfer(&self, destination: &Identity, amount: Amount) -> Result<(), TransferError>;
}

/// In-memory executor that credits payouts per destination.
///
/// Used by the CLI and tests. Can be switched off to simulate an
/// unreachable backend.
pub struct LedgerExecutor {
    payouts: RwLock<HashMap<Identity, Amount>>,
    available: AtomicBool,
}

impl LedgerExecutor {
    pub fn new() -> Self {
        Self {
            payouts: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Toggle backend availability; while unavailable every transfer fails
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Total received by `destination`
    pub fn paid_to(&self, destination: &Identity) -> Amount {
        let payouts = self.payouts.read().unwrap_or_else(|e| e.into_inner());
        payouts.get(destination).copied().unwrap_or_default()
    }

    /// Sum of all payouts, `None` if it exceeds the `Amount` range
    pub fn total_paid(&self) -> Option<Amount> {
        let payouts = self.payouts.read().unwrap_or_else(|e| e.into_inner());
        payouts
            .values()
            .try_fold(Amount::ZERO, |acc, a| acc.checked_add(a))
    }

    /// Re-credit a payout that already happened, e.g. when rebuilding from a
    /// journal. Ignores availability.
    pub fn restore_payout(&self, destination: &Identity, amount: Amount) -> Result<(), TransferError> {
        self.credit(destination, amount)
    }

    fn credit(&self, destination: &Identity, amount: Amount) -> Result<(), TransferError> {
        let mut payouts = self.payouts.write().unwrap_or_else(|e| e.into_inner());
        let current = payouts.get(destination).copied().unwrap_or_default();
        let credited = current
            .checked_add(&amount)
            .ok_or_else(|| TransferError::Rejected(format!("{} balance overflow", destination)))?;
        payouts.insert(destination.clone(), credited);
        Ok(())
    }

    /// Destinations with their received totals, sorted by identity
    pub fn payouts(&self) -> Vec<(Identity, Amount)> {
        let payouts = self.payouts.read().unwrap_or_else(|e| e.into_inner());
        let mut list: Vec<_> = payouts.iter().map(|(k, v)| (k.clone(), *v)).collect();
        list.sort();
        list
    }
}

impl Default for LedgerExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransferExecutor for LedgerExecutor {
    async fn transfer(&self, destination: &Identity, amount: Amount) -> Result<(), TransferError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(TransferError::Unavailable);
        }

        self.credit(destination, amount)?;

        tracing::debug!(%destination, %amount, "Payout credited");
        Ok(())
    }
}
