//! JSONL journal reader - sequential reader for replay and audit

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::JournalError;
use crate::event::JournalRecord;

/// Reads journal files in date order
pub struct JournalReader {
    files: Vec<PathBuf>,
}

impl JournalReader {
    /// Create a new reader from a directory; a missing directory reads as empty
    pub fn from_directory(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let path = path.as_ref();
        let mut files = Vec::new();

        if path.exists() {
            for entry in std::fs::read_dir(path)? {
                let entry = entry?;
                let file_path = entry.path();
                if file_path.extension().map_or(false, |ext| ext == "jsonl") {
                    files.push(file_path);
                }
            }
        }

        // YYYY-MM-DD names sort chronologically
        files.sort();

        Ok(Self { files })
    }

    /// Read all records from all files in order
    pub fn read_all(&self) -> Result<Vec<JournalRecord>, JournalError> {
        let mut records = Vec::new();

        for file_path in &self.files {
            let reader = BufReader::new(File::open(file_path)?);

            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                records.push(serde_json::from_str(&line)?);
            }
        }

        Ok(records)
    }

    /// Last record across all files, skipping trailing empty files
    pub fn last_record(&self) -> Result<Option<JournalRecord>, JournalError> {
        for file_path in self.files.iter().rev() {
            let reader = BufReader::new(File::open(file_path)?);
            let mut last = None;
            for line in reader.lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    last = Some(line);
                }
            }

            if let Some(line) = last {
                return Ok(Some(serde_json::from_str(&line)?));
            }
        }

        Ok(None)
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}
