//! JSONL journal - append-only writer

use chrono::Utc;
use multisig_wallet::{EventLog, RecordError};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::JournalError;
use crate::event::{JournalRecord, WalletEvent};
use crate::hash::{calculate_record_hash, GENESIS_HASH};
use crate::reader::JournalReader;

/// Append-only, day-rotated JSONL journal
pub struct Journal {
    base_path: PathBuf,
    current_file: Option<BufWriter<File>>,
    current_date: Option<String>,
    last_sequence: u64,
    last_hash: String,
}

impl Journal {
    /// Open the journal at `base_path`, creating it if needed, and position
    /// after the last stored record
    pub fn open(base_path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;

        let (last_sequence, last_hash) = match JournalReader::from_directory(&base_path)?.last_record()? {
            Some(last) => (last.sequence, last.hash),
            None => (0, GENESIS_HASH.to_string()),
        };

        Ok(Self {
            base_path,
            current_file: None,
            current_date: None,
            last_sequence,
            last_hash,
        })
    }

    /// Chain, hash and append an event; returns the written record
    pub fn append(&mut self, event: WalletEvent) -> Result<JournalRecord, JournalError> {
        let mut record = JournalRecord {
            sequence: self.last_sequence + 1,
            prev_hash: self.last_hash.clone(),
            hash: String::new(),
            timestamp: Utc::now(),
            event,
        };
        record.hash = calculate_record_hash(&record);

        let date = record.timestamp.format("%Y-%m-%d").to_string();

        // Rotate file if date changed
        if self.current_date.as_ref() != Some(&date) {
            self.rotate_file(&date)?;
        }

        if let Some(ref mut writer) = self.current_file {
            let json = serde_json::to_string(&record)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }

        self.last_sequence = record.sequence;
        self.last_hash = record.hash.clone();

        tracing::debug!(sequence = record.sequence, kind = record.event.kind(), "Journal record appended");
        Ok(record)
    }

    fn rotate_file(&mut self, date: &str) -> Result<(), JournalError> {
        if let Some(ref mut writer) = self.current_file {
            writer.flush()?;
        }

        let file_path = self.base_path.join(format!("{}.jsonl", date));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)?;

        self.current_file = Some(BufWriter::new(file));
        self.current_date = Some(date.to_string());

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// Sequence of the last record (0 when empty)
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    pub fn last_hash(&self) -> &str {
        &self.last_hash
    }

    /// Flush and close the current file
    pub fn close(&mut self) -> Result<(), JournalError> {
        if let Some(ref mut writer) = self.current_file {
            writer.flush()?;
        }
        self.current_file = None;
        self.current_date = None;
        Ok(())
    }
}

impl EventLog for Journal {
    fn record(&mut self, event: &WalletEvent) -> Result<(), RecordError> {
        self.append(event.clone())
            .map(|_| ())
            .map_err(|e| RecordError(e.to_string()))
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
