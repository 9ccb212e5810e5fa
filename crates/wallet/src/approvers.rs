//! Approver set and quorum threshold

use multisig_core::Identity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::ConfigError;

/// Ordered, duplicate-free set of approvers fixed at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproverSet {
    ordered: Vec<Identity>,
    lookup: HashSet<Identity>,
}

impl ApproverSet {
    /// Build the set, rejecting empty input and duplicates
    pub fn new(approvers: Vec<Identity>) -> Result<Self, ConfigError> {
        if approvers.is_empty() {
            return Err(ConfigError::NoApprovers);
        }

        let mut lookup = HashSet::with_capacity(approvers.len());
        for approver in &approvers {
            if !lookup.insert(approver.clone()) {
                return Err(ConfigError::DuplicateApprover(approver.clone()));
            }
        }

        Ok(Self {
            ordered: approvers,
            lookup,
        })
    }

    /// Check membership
    pub fn contains(&self, identity: &Identity) -> bool {
        self.lookup.contains(identity)
    }

    /// Approvers in configured order
    pub fn as_slice(&self) -> &[Identity] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.ordered.iter()
    }
}

/// Minimum number of distinct approvals needed to execute a proposal.
///
/// # Invariant
/// `1 <= quorum <= approvers.len()`, checked by [`Quorum::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quorum(u32);

impl Quorum {
    pub fn new(value: u32, approvers: &ApproverSet) -> Result<Self, ConfigError> {
        if value == 0 || value as usize > approvers.len() {
            return Err(ConfigError::QuorumOutOfRange {
                quorum: value,
                approvers: approvers.len(),
            });
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Whether `approvals` distinct approvals satisfy this quorum
    #[inline]
    pub fn is_met_by(&self, approvals: usize) -> bool {
        approvals >= self.0 as usize
    }
}

impl fmt::Display for Quorum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
