//! Per-run scratch directory for intermediate tool outputs.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::error::Result;

/// A unique temp directory that lives as long as the app and is removed
/// on drop.
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("primepad-").tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a scratch file inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
