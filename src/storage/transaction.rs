use super::repository::atomic_write;
use crate::error::{CrewError, Result};
use std::path::PathBuf;

/// A batch of file replacements applied all-or-nothing.
///
/// Writes are staged in memory and only touch disk on [`Transaction::commit`].
/// If any write fails, files already replaced are restored to their previous
/// content (or removed if they did not exist before the commit).
#[derive(Debug, Default)]
pub struct Transaction {
    writes: Vec<StagedWrite>,
}

#[derive(Debug)]
struct StagedWrite {
    path: PathBuf,
    content: String,
}

/// What a path looked like before the commit touched it.
enum Previous {
    Content(String),
    Absent,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, path: PathBuf, content: String) {
        // A later write to the same file supersedes the earlier one
        self.writes.retain(|w| w.path != path);
        self.writes.push(StagedWrite { path, content });
    }

    /// Apply every staged write. Returns the number of files written.
    pub fn commit(self) -> Result<usize> {
        // Capture the previous state of every file before writing anything
        let mut previous = Vec::with_capacity(self.writes.len());
        for write in &self.writes {
            let state = if write.path.exists() {
                Previous::Content(std::fs::read_to_string(&write.path)?)
            } else {
                Previous::Absent
            };
            previous.push(state);
        }

        for (index, write) in self.writes.iter().enumerate() {
            if let Err(e) = atomic_write(&write.path, &write.content) {
                tracing::error!(
                    path = %write.path.display(),
                    error = %e,
                    applied = index,
                    "Write failed, rolling back transaction"
                );
                self.rollback(&previous[..index]);
                return Err(CrewError::Storage(format!(
                    "Transaction aborted, no changes kept: {}",
                    e
                )));
            }
        }

        tracing::debug!(files = self.writes.len(), "Transaction committed");
        Ok(self.writes.len())
    }

    fn rollback(&self, applied: &[Previous]) {
        for (write, state) in self.writes.iter().zip(applied).rev() {
            let restored = match state {
                Previous::Content(content) => atomic_write(&write.path, content),
                Previous::Absent => std::fs::remove_file(&write.path).map_err(CrewError::from),
            };
            if let Err(e) = restored {
                tracing::error!(
                    path = %write.path.display(),
                    error = %e,
                    "Failed to restore file during rollback"
                );
            }
        }
    }
}
