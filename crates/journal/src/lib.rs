//! Multisig Journal - JSONL operation log
//!
//! Every operation the wallet accepts is appended as one hash-chained JSON
//! line. The journal is the source of truth for the CLI: on startup the
//! wallet is rebuilt by replaying it.

pub mod error;
pub mod event;
pub mod hash;
pub mod reader;
pub mod replay;
pub mod store;

pub use error::JournalError;
pub use event::{JournalRecord, WalletEvent};
pub use hash::{calculate_record_hash, verify_chain, ChainError, GENESIS_HASH};
pub use reader::JournalReader;
pub use replay::replay;
pub use store::Journal;
