//! Hash chain utilities for journal integrity

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::event::{JournalRecord, WalletEvent};

/// `prev_hash` of the first record
pub const GENESIS_HASH: &str = "GENESIS";

/// Calculate SHA256 hash of record content (excluding the hash field itself)
pub fn calculate_record_hash(record: &JournalRecord) -> String {
    let mut hasher = Sha256::new();

    hasher.update(record.sequence.to_le_bytes());
    hasher.update(record.prev_hash.as_bytes());
    hasher.update(record.timestamp.to_rfc3339().as_bytes());
    hash_event(&mut hasher, &record.event);

    hex::encode(hasher.finalize())
}

fn hash_event(hasher: &mut Sha256, event: &WalletEvent) {
    hash_str(hasher, event.kind());

    match event {
        WalletEvent::Deposited { amount } => {
            hasher.update(amount.value().to_le_bytes());
        }
        WalletEvent::TransferCreated {
            id,
            proposer,
            amount,
            destination,
        } => {
            hasher.update(id.value().to_le_bytes());
            hash_str(hasher, proposer.as_str());
            hasher.update(amount.value().to_le_bytes());
            hash_str(hasher, destination.as_str());
        }
        WalletEvent::TransferApproved {
            id,
            approver,
            executed,
        } => {
            hasher.update(id.value().to_le_bytes());
            hash_str(hasher, approver.as_str());
            hasher.update([u8::from(*executed)]);
        }
        WalletEvent::ExecutionAborted { id, approver } => {
            hasher.update(id.value().to_le_bytes());
            hash_str(hasher, approver.as_str());
        }
    }
}

/// Length-prefixed so adjacent strings cannot shift bytes between them
fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

/// Verify hash chain integrity
pub fn verify_chain(records: &[JournalRecord]) -> Result<(), ChainError> {
    let mut prev_hash = GENESIS_HASH.to_string();
    let mut expected_seq = 1;

    for record in records {
        if record.sequence != expected_seq {
            return Err(ChainError::InvalidSequence {
                expected: expected_seq,
                actual: record.sequence,
            });
        }

        if record.prev_hash != prev_hash {
            return Err(ChainError::BrokenLink {
                sequence: record.sequence,
                expected: prev_hash,
                actual: record.prev_hash.clone(),
            });
        }

        let calculated = calculate_record_hash(record);
        if record.hash != calculated {
            return Err(ChainError::InvalidHash {
                sequence: record.sequence,
                expected: calculated,
                actual: record.hash.clone(),
            });
        }

        prev_hash = record.hash.clone();
        expected_seq += 1;
    }

    Ok(())
}

/// Errors in hash chain verification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Broken link at seq {sequence}: expected prev_hash '{expected}', got '{actual}'")]
    BrokenLink {
        sequence: u64,
        expected: String,
        actual: String,
    },

    #[error("Invalid hash at seq {sequence}: expected '{expected}', got '{actual}'")]
    InvalidHash {
        sequence: u64,
        expected: String,
        actual: String,
    },

    #[error("Invalid sequence: expected {expected}, got {actual}")]
    InvalidSequence { expected: u64, actual: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use multisig_core::{Amount, ProposalId};

    fn create_record(sequence: u64, prev_hash: &str) -> JournalRecord {
        let mut record = JournalRecord {
            sequence,
            prev_hash: prev_hash.to_string(),
            hash: String::new(),
            timestamp: Utc::now(),
            event: WalletEvent::Deposited {
                amount: Amount::new(sequence as u128 * 10),
            },
        };
        record.hash = calculate_record_hash(&record);
        record
    }

    #[test]
    fn test_hash_deterministic() {
        let record = create_record(1, GENESIS_HASH);
        assert_eq!(calculate_record_hash(&record), calculate_record_hash(&record));
        assert_eq!(record.hash.len(), 64);
    }

    #[test]
    fn test_hash_covers_every_event_field() {
        let base = create_record(1, GENESIS_HASH);
        let hash_with = |event: WalletEvent| {
            let mut record = base.clone();
            record.event = event;
            calculate_record_hash(&record)
        };
        let approval = |approver: &str, executed: bool| WalletEvent::TransferApproved {
            id: ProposalId::new(0),
            approver: approver.parse().unwrap(),
            executed,
        };

        assert_ne!(hash_with(approval("ab", true)), hash_with(approval("ab", false)));
        assert_ne!(hash_with(approval("ab", true)), hash_with(approval("ac", true)));

        let aborted = WalletEvent::ExecutionAborted {
            id: ProposalId::new(0),
            approver: "ab".parse().unwrap(),
        };
        assert_ne!(hash_with(aborted), hash_with(approval("ab", false)));

        let created = |proposer: &str, destination: &str| WalletEvent::TransferCreated {
            id: ProposalId::new(0),
            proposer: proposer.parse().unwrap(),
            amount: Amount::new(1),
            destination: destination.parse().unwrap(),
        };
        assert_ne!(hash_with(created("ab", "c")), hash_with(created("a", "bc")));
    }

    #[test]
    fn test_verify_valid_chain() {
        let r1 = create_record(1, GENESIS_HASH);
        let r2 = create_record(2, &r1.hash);
        let r3 = create_record(3, &r2.hash);

        assert!(verify_chain(&[r1, r2, r3]).is_ok());
        assert!(verify_chain(&[]).is_ok());
    }

    #[test]
    fn test_verify_broken_chain() {
        let r1 = create_record(1, GENESIS_HASH);
        let r2 = create_record(2, "wrong_hash");

        let result = verify_chain(&[r1, r2]);
        assert!(matches!(result, Err(ChainError::BrokenLink { sequence: 2, .. })));
    }

    #[test]
    fn test_verify_tampered_event() {
        let r1 = create_record(1, GENESIS_HASH);
        let mut r2 = create_record(2, &r1.hash);
        r2.event = WalletEvent::Deposited {
            amount: Amount::new(1_000_000),
        };

        let result = verify_chain(&[r1, r2]);
        assert!(matches!(result, Err(ChainError::InvalidHash { sequence: 2, .. })));
    }

    #[test]
    fn test_verify_sequence_gap() {
        let r1 = create_record(1, GENESIS_HASH);
        let r3 = create_record(3, &r1.hash);

        let result = verify_chain(&[r1, r3]);
        assert_eq!(
            result,
            Err(ChainError::InvalidSequence {
                expected: 2,
                actual: 3
            })
        );
    }
}
