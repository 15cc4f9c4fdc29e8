// src/scan/fixed.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::Result;
use crate::scan::{FilenameComparator, Scanner};

/// Scanner over a fixed, pre-supplied file set.
///
/// Include/exclude configuration is accepted and discarded; the file list is
/// always the backing set in its iteration order, and no directories are
/// ever reported.
#[derive(Debug, Clone)]
pub struct FixedFileScanner {
    basedir: PathBuf,
    files: Arc<BTreeSet<String>>,
}

impl FixedFileScanner {
    pub fn new(basedir: impl Into<PathBuf>, files: Arc<BTreeSet<String>>) -> Self {
        Self {
            basedir: basedir.into(),
            files,
        }
    }
}

impl Scanner for FixedFileScanner {
    fn set_includes(&mut self, _includes: &[&str]) {}

    fn set_excludes(&mut self, _excludes: &[&str]) {}

    fn add_default_excludes(&mut self) {}

    fn set_filename_comparator(&mut self, _comparator: Option<FilenameComparator>) {}

    fn scan(&mut self) -> Result<()> {
        Ok(())
    }

    fn included_files(&self) -> Vec<String> {
        self.files.iter().cloned().collect()
    }

    fn included_directories(&self) -> Vec<String> {
        Vec::new()
    }

    fn basedir(&self) -> &Path {
        &self.basedir
    }
}
