//! Temp-artifact lifetime management.

use std::fs;
use std::path::{Path, PathBuf};

/// Owns a file that must not outlive the command invocation.
///
/// The patched descriptor exists only while Maven runs against it.
/// Dropping the guard removes the file, so success, error return, and
/// panic paths all end with the file gone. A failed removal is
/// swallowed: cleanup is best-effort and never masks the run's outcome.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    /// Take ownership of the given path. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The guarded path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
