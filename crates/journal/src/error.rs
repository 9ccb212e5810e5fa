//! Journal errors

use thiserror::Error;

use crate::hash::ChainError;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Hash chain broken: {0}")]
    Chain(#[from] ChainError),

    #[error("Replay failed at seq {sequence}: {reason}")]
    Replay { sequence: u64, reason: String },
}
