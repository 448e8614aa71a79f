//! Write ledger for undoable install runs
//!
//! Every file and directory the installer creates is recorded here, so a
//! failed run can put the target directory back the way it found it.
//!
//! ## Usage
//!
//! ```ignore
//! let mut ledger = WriteLedger::new();
//! ledger.make_dirs(&server_dir)?;
//! ledger.save_file(&server_dir.join("eula.txt"), "eula=true\n")?;
//!
//! // On success:
//! ledger.commit();
//!
//! // On a fatal error:
//! let report = ledger.rollback();
//! ```
//!
//! A ledger dropped without `commit` or `rollback` rolls back on its own.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SetupError, write_error};

#[cfg(test)]
mod tests;

/// Original content of a file the run overwrote
#[derive(Debug, Clone)]
struct FileBackup {
    path: PathBuf,
    content: Vec<u8>,
}

/// What kind of entry a rollback step dealt with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Restore,
}

/// A rollback step that could not be completed
#[derive(Debug, Clone)]
pub struct RollbackFailure {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub reason: String,
}

/// Outcome of a rollback
#[derive(Debug, Default)]
pub struct RollbackReport {
    /// Files and directories that were removed
    pub removed: Vec<PathBuf>,
    /// Overwritten files whose original content was put back
    pub restored: Vec<PathBuf>,
    pub failures: Vec<RollbackFailure>,
}

impl RollbackReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Record of everything one install run created
#[derive(Debug, Default)]
pub struct WriteLedger {
    /// Files created by this run, in creation order
    files: Vec<PathBuf>,

    /// Directories created by this run, in creation order
    directories: Vec<PathBuf>,

    /// Pre-existing files this run overwrote
    replaced: Vec<FileBackup>,

    /// Set once the ledger has been committed or rolled back
    finished: bool,
}

impl WriteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file that was just written and did not exist before
    pub fn record_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::debug!(path = %path.display(), "recorded file");
        self.files.push(path);
    }

    /// Record a directory that was just created
    pub fn record_directory(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::debug!(path = %path.display(), "recorded directory");
        self.directories.push(path);
    }

    /// Record the original content of a file about to be overwritten
    pub fn record_replaced(&mut self, path: impl Into<PathBuf>, content: Vec<u8>) {
        let path = path.into();
        tracing::debug!(path = %path.display(), bytes = content.len(), "recorded overwrite");
        self.replaced.push(FileBackup { path, content });
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty() && self.replaced.is_empty()
    }

    /// Create `path` and any missing parents, recording only the segments
    /// that did not exist yet
    pub fn make_dirs(&mut self, path: &Path) -> Result<()> {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if matches!(
                component,
                Component::Prefix(_) | Component::RootDir | Component::CurDir
            ) {
                continue;
            }
            if current.is_dir() {
                continue;
            }
            fs::create_dir(&current).map_err(|e| {
                if e.kind() == ErrorKind::PermissionDenied {
                    SetupError::PermissionDenied {
                        path: current.display().to_string(),
                    }
                } else {
                    SetupError::DirectoryCreateFailed {
                        path: current.display().to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;
            self.record_directory(current.clone());
        }
        Ok(())
    }

    /// Write `contents` to `path` and record the write
    ///
    /// Overwriting a file that existed before this run keeps its old content
    /// for rollback. Files this run created are simply rewritten.
    pub fn save_file(&mut self, path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
        let created_here = self.files.iter().any(|p| p == path);
        if !created_here {
            match fs::read(path) {
                Ok(original) => self.record_replaced(path, original),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(SetupError::FileReadFailed {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.write_with(path, || fs::write(path, contents))
    }

    /// Run `write`, which creates or replaces `path`, and record a new file
    ///
    /// Backing up a pre-existing file is the caller's job. When `write`
    /// fails after creating a new file, the partial file is removed again;
    /// if that fails too it is recorded so rollback retries it.
    pub fn write_with(&mut self, path: &Path, write: impl FnOnce() -> io::Result<()>) -> Result<()> {
        let existed = self.files.iter().any(|p| p == path) || path.symlink_metadata().is_ok();

        if let Err(e) = write() {
            if !existed && path.symlink_metadata().is_ok() {
                if let Err(cleanup) = fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %cleanup, "could not remove partial file");
                    self.record_file(path);
                }
            }
            return Err(write_error(path, &e));
        }

        if !existed {
            self.record_file(path);
        }
        Ok(())
    }

    /// Keep everything that was written
    pub fn commit(mut self) {
        tracing::debug!(
            files = self.files.len(),
            directories = self.directories.len(),
            "committed write ledger"
        );
        self.finished = true;
    }

    /// Undo every recorded write
    ///
    /// Files go first, then overwritten files get their content back, then
    /// directories are removed newest first so children go before parents.
    /// A failing step is reported and the remaining steps still run.
    pub fn rollback(mut self) -> RollbackReport {
        self.unwind()
    }

    fn unwind(&mut self) -> RollbackReport {
        self.finished = true;
        let mut report = RollbackReport::default();

        for path in self.files.drain(..) {
            match fs::remove_file(&path) {
                Ok(()) => report.removed.push(path),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not delete file");
                    report.failures.push(RollbackFailure {
                        path,
                        kind: EntryKind::File,
                        reason: e.to_string(),
                    });
                }
            }
        }

        // Oldest backup holds the true original, so it is written last
        for backup in self.replaced.drain(..).rev() {
            match fs::write(&backup.path, &backup.content) {
                Ok(()) => report.restored.push(backup.path),
                Err(e) => {
                    tracing::warn!(path = %backup.path.display(), error = %e, "could not restore file");
                    report.failures.push(RollbackFailure {
                        path: backup.path,
                        kind: EntryKind::Restore,
                        reason: e.to_string(),
                    });
                }
            }
        }

        for path in self.directories.drain(..).rev() {
            match fs::remove_dir(&path) {
                Ok(()) => report.removed.push(path),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not delete directory");
                    report.failures.push(RollbackFailure {
                        path,
                        kind: EntryKind::Directory,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

impl Drop for WriteLedger {
    fn drop(&mut self) {
        if !self.finished && !self.is_empty() {
            let report = self.unwind();
            if !report.is_clean() {
                eprintln!(
                    "Warning: Rollback left {} entries behind",
                    report.failures.len()
                );
            }
        }
    }
}
