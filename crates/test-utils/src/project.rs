use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A throwaway project tree on the real filesystem.
///
/// Files are addressed by `/`-separated paths relative to the root; the
/// directory is removed when the value is dropped.
pub struct TempProject {
    dir: TempDir,
}

impl TempProject {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("creating temp project dir")?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write a file, creating parent directories as needed.
    pub fn file(&self, rel: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {:?}", path))?;
        Ok(path)
    }

    pub fn dir(&self, rel: &str) -> Result<PathBuf> {
        let path = self.path(rel);
        fs::create_dir_all(&path).with_context(|| format!("creating dir {:?}", path))?;
        Ok(path)
    }

    /// Pin a file's modification time to `secs` seconds after the epoch.
    pub fn set_modified_secs(&self, rel: &str, secs: u64) -> Result<()> {
        let path = self.path(rel);
        let time: SystemTime = UNIX_EPOCH + Duration::from_secs(secs);
        OpenOptions::new()
            .write(true)
            .open(&path)
            .and_then(|file| file.set_modified(time))
            .with_context(|| format!("setting mtime of {:?}", path))
    }
}
