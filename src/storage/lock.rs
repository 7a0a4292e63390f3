use crate::error::{CrewError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LOCK_FILE_NAME: &str = ".lock";

/// Exclusive mutation scope over a workspace.
///
/// Held for the duration of one mutating operation; the lock file is removed
/// when the guard is dropped, whether the operation succeeded or not.
#[derive(Debug)]
pub struct WorkspaceLock {
    path: PathBuf,
}

impl WorkspaceLock {
    pub fn acquire(data_path: &Path, operation: &str) -> Result<Self> {
        std::fs::create_dir_all(data_path)?;
        let path = data_path.join(LOCK_FILE_NAME);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                let lock = Self::claim(path, &mut file, operation)?;
                tracing::debug!(operation, path = %lock.path.display(), "Acquired workspace lock");
                Ok(lock)
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                let holder = std::fs::read_to_string(&path).unwrap_or_default();
                Err(CrewError::Locked(holder.trim().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Take ownership of a freshly created lock file and record the holder.
    /// The guard exists before the write, so a failed write still removes
    /// the file.
    fn claim<W: Write>(path: PathBuf, file: &mut W, operation: &str) -> Result<Self> {
        let lock = Self { path };
        writeln!(file, "{} (pid {})", operation, std::process::id())?;
        file.flush()?;
        Ok(lock)
    }

    /// Remove a lock left behind by a process that died while holding it.
    pub fn force_release(data_path: &Path) -> Result<bool> {
        let path = data_path.join(LOCK_FILE_NAME);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        tracing::warn!(path = %path.display(), "Removed workspace lock");
        Ok(true)
    }
}

impl Drop for WorkspaceLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to release workspace lock");
        }
    }
}
