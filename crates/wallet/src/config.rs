//! Wallet configuration
//!
//! The approver list and quorum are supplied once at initialization and are
//! immutable afterwards. Stored as JSON so operators can review them.

use multisig_core::Identity;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::approvers::{ApproverSet, Quorum};
use crate::error::ConfigError;

/// Whether funds are checked when a proposal is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CreationPolicy {
    /// Accept any positive amount; funds are checked only at execution (DEFAULT)
    #[default]
    Permissive,

    /// Reject proposals whose amount exceeds the current pool balance
    RequireFunds,
}

/// Initialization parameters for a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Approvers in display order
    pub approvers: Vec<Identity>,

    /// Distinct approvals required to execute a transfer
    pub quorum: u32,

    #[serde(default)]
    pub creation_policy: CreationPolicy,
}

impl WalletConfig {
    pub fn new(approvers: Vec<Identity>, quorum: u32) -> Self {
        Self {
            approvers,
            quorum,
            creation_policy: CreationPolicy::default(),
        }
    }

    pub fn with_creation_policy(mut self, policy: CreationPolicy) -> Self {
        self.creation_policy = policy;
        self
    }

    /// Check the invariants and build the immutable approver set and quorum
    pub fn validate(&self) -> Result<(ApproverSet, Quorum), ConfigError> {
        let approvers = ApproverSet::new(self.approvers.clone())?;
        let quorum = Quorum::new(self.quorum, &approvers)?;
        Ok((approvers, quorum))
    }

    /// Load configuration from JSON file
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Write configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}
