//! Journal record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use multisig_wallet::WalletEvent;

/// One line of the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Starts at 1, strictly increasing
    pub sequence: u64,
    pub prev_hash: String,
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub event: WalletEvent,
}
