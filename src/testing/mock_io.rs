//! Scratch space for export tests.

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A directory for export files, removed with everything in it on drop.
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where `name` would live inside the scratch directory. Nothing is created.
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `entries` as JSON Lines to `name`, one value per line. `None`
    /// is written as `null`, the way a record query marks a missing row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or an entry fails to
    /// serialize.
    pub fn write_jsonl<T: Serialize>(
        &self,
        name: &str,
        entries: &[Option<T>],
    ) -> std::io::Result<PathBuf> {
        let path = self.file_path(name);
        let mut file = std::fs::File::create(&path)?;
        for entry in entries {
            serde_json::to_writer(&mut file, entry)?;
            file.write_all(b"\n")?;
        }
        file.flush()?;
        Ok(path)
    }
}
