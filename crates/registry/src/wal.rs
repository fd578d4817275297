// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSONL write-ahead log of registry mutations, grounded on this
//! codebase's event WAL: durable append-only storage with corruption
//! detection, so the registry does not require a live RDBMS to be
//! crash-safe (SPEC_FULL §4.C).

use crate::event::RegistryEvent;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct RecordRef<'a> {
    seq: u64,
    event: &'a RegistryEvent,
}

#[derive(Deserialize)]
struct Record {
    seq: u64,
    event: RegistryEvent,
}

#[derive(Debug, Clone)]
pub struct WalEntry {
    pub seq: u64,
    pub event: RegistryEvent,
}

/// Append-only log of [`RegistryEvent`]s. Each successful [`Wal::append`]
/// is immediately fsynced: the registry mutates state rarely enough
/// relative to the pipeline executor's hot path that group commit would
/// buy little and cost a durability window.
pub struct Wal {
    file: File,
    path: PathBuf,
    write_seq: u64,
}

impl Wal {
    pub fn open(path: &Path) -> Result<Self, WalError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        let write_seq = Self::scan_max_seq(&file, path)?;

        Ok(Self {
            file,
            path: path.to_owned(),
            write_seq,
        })
    }

    fn scan_max_seq(file: &File, path: &Path) -> Result<u64, WalError> {
        let reader = BufReader::new(file.try_clone()?);
        let mut max_seq = 0u64;
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Record>(trimmed) {
                Ok(record) => max_seq = max_seq.max(record.seq),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping corrupt WAL entry during scan");
                    break;
                }
            }
        }
        Ok(max_seq)
    }

    /// Append and durably persist `event`, returning its assigned
    /// sequence number.
    pub fn append(&mut self, event: &RegistryEvent) -> Result<u64, WalError> {
        self.write_seq += 1;
        let seq = self.write_seq;
        let record = RecordRef { seq, event };
        let mut bytes = serde_json::to_vec(&record)?;
        bytes.push(b'\n');
        self.file.write_all(&bytes)?;
        self.file.sync_all()?;
        Ok(seq)
    }

    /// Replay every entry from the beginning, skipping (and warning on)
    /// the first unparseable line rather than failing the whole replay.
    pub fn replay(&self) -> Result<Vec<WalEntry>, WalError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Record>(trimmed) {
                Ok(record) => entries.push(WalEntry {
                    seq: record.seq,
                    event: record.event,
                }),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "stopping replay at corrupt entry");
                    break;
                }
            }
        }
        Ok(entries)
    }

    pub fn write_seq(&self) -> u64 {
        self.write_seq
    }
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
