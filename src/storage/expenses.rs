//! Local expense file
//!
//! A JSON array of expense records. Records are only ever appended or
//! removed; a correction is a removal followed by a new expense.
//!
//! Entries are kept as raw JSON and read one at a time, so a single entry
//! of the wrong shape neither fails the load nor gets lost on the next save.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::file_io::{read_json, write_json_atomic};
use crate::error::{ZenSplitError, ZenSplitResult};
use crate::models::{Expense, ExpenseRecord};

/// Expense records backed by one JSON file
#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
    entries: Vec<Value>,
}

impl ExpenseStore {
    /// Load the store at `path`; a missing file is an empty store
    ///
    /// Only a file that is not a JSON array at all fails to load.
    pub fn open(path: impl AsRef<Path>) -> ZenSplitResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries: Vec<Value> = read_json(&path)?;
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored entries as they are on disk
    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a new expense
    pub fn add(&mut self, expense: &Expense) -> ZenSplitResult<()> {
        self.entries
            .push(serde_json::to_value(ExpenseRecord::from(expense))?);
        Ok(())
    }

    /// Find the entry whose id matches `id_prefix`
    ///
    /// The prefix may be the `exp-xxxxxxxx` display form or any leading part
    /// of the stored id, but must identify exactly one entry.
    pub fn find(&self, id_prefix: &str) -> ZenSplitResult<&Value> {
        let idx = self.position(id_prefix)?;
        Ok(&self.entries[idx])
    }

    /// Remove the entry whose id matches `id_prefix`
    pub fn remove(&mut self, id_prefix: &str) -> ZenSplitResult<Value> {
        let idx = self.position(id_prefix)?;
        Ok(self.entries.remove(idx))
    }

    fn position(&self, id_prefix: &str) -> ZenSplitResult<usize> {
        let matches: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                ExpenseRecord::stored_id(entry).is_some_and(|id| id.matches_prefix(id_prefix))
            })
            .map(|(idx, _)| idx)
            .collect();

        match matches.as_slice() {
            [idx] => Ok(*idx),
            [] => Err(ZenSplitError::expense_not_found(id_prefix)),
            _ => Err(ZenSplitError::Validation(format!(
                "'{}' matches {} expenses; use a longer id",
                id_prefix,
                matches.len()
            ))),
        }
    }

    /// Write all entries back to disk
    pub fn save(&self) -> ZenSplitResult<()> {
        write_json_atomic(&self.path, &self.entries)
    }
}
