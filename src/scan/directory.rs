// src/scan/directory.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::{BuildContextError, Result};
use crate::fs::path_utils::relative_str;
use crate::fs::{FileSystem, RealFileSystem};
use crate::scan::patterns::{normalize_pattern, PatternMatcher, DEFAULT_EXCLUDES};
use crate::scan::{FilenameComparator, Scanner};

/// Scanner that walks a real directory tree.
///
/// Paths are matched relative to the base directory with `/` separators.
/// Results are only available after [`Scanner::scan`].
pub struct DirectoryScanner {
    fs: Arc<dyn FileSystem>,
    basedir: PathBuf,
    includes: Vec<String>,
    excludes: Vec<String>,
    comparator: Option<FilenameComparator>,
    included_files: Vec<String>,
    included_dirs: Vec<String>,
}

impl fmt::Debug for DirectoryScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryScanner")
            .field("basedir", &self.basedir)
            .field("includes", &self.includes)
            .field("excludes", &self.excludes)
            .finish_non_exhaustive()
    }
}

impl DirectoryScanner {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self::with_file_system(basedir, Arc::new(RealFileSystem))
    }

    pub fn with_file_system(basedir: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            basedir: basedir.into(),
            includes: Vec::new(),
            excludes: Vec::new(),
            comparator: None,
            included_files: Vec::new(),
            included_dirs: Vec::new(),
        }
    }

    fn walk(
        &self,
        dir: &Path,
        matcher: &PatternMatcher,
        files: &mut Vec<String>,
        dirs: &mut Vec<String>,
    ) -> Result<()> {
        let entries = self.fs.read_dir(dir).map_err(BuildContextError::from_fs)?;

        let mut named: Vec<(String, PathBuf)> = entries
            .into_iter()
            .filter_map(|path| {
                let name = path.file_name()?.to_string_lossy().into_owned();
                Some((name, path))
            })
            .collect();

        match &self.comparator {
            Some(cmp) => named.sort_by(|(a, _), (b, _)| cmp(a.as_str(), b.as_str())),
            None => named.sort_by(|(a, _), (b, _)| a.cmp(b)),
        }

        for (_, path) in named {
            let Some(rel) = relative_str(&self.basedir, &path) else {
                continue;
            };

            if self.fs.is_dir(&path) {
                if matcher.is_included(&rel) {
                    dirs.push(rel);
                }
                self.walk(&path, matcher, files, dirs)?;
            } else if self.fs.is_file(&path) && matcher.is_included(&rel) {
                files.push(rel);
            }
        }

        Ok(())
    }
}

impl Scanner for DirectoryScanner {
    fn set_includes(&mut self, includes: &[&str]) {
        self.includes = includes.iter().map(|p| normalize_pattern(p)).collect();
    }

    fn set_excludes(&mut self, excludes: &[&str]) {
        self.excludes = excludes.iter().map(|p| normalize_pattern(p)).collect();
    }

    fn add_default_excludes(&mut self) {
        self.excludes
            .extend(DEFAULT_EXCLUDES.iter().map(|p| p.to_string()));
    }

    fn set_filename_comparator(&mut self, comparator: Option<FilenameComparator>) {
        self.comparator = comparator;
    }

    fn scan(&mut self) -> Result<()> {
        if !self.fs.exists(&self.basedir) {
            return Err(BuildContextError::ScanError(format!(
                "basedir {:?} does not exist",
                self.basedir
            )));
        }
        if !self.fs.is_dir(&self.basedir) {
            return Err(BuildContextError::ScanError(format!(
                "basedir {:?} is not a directory",
                self.basedir
            )));
        }

        let matcher = PatternMatcher::new(&self.includes, &self.excludes)?;

        let mut files = Vec::new();
        let mut dirs = Vec::new();
        self.walk(&self.basedir, &matcher, &mut files, &mut dirs)?;

        debug!(
            basedir = ?self.basedir,
            files = files.len(),
            dirs = dirs.len(),
            "directory scan complete"
        );

        self.included_files = files;
        self.included_dirs = dirs;
        Ok(())
    }

    fn included_files(&self) -> Vec<String> {
        self.included_files.clone()
    }

    fn included_directories(&self) -> Vec<String> {
        self.included_dirs.clone()
    }

    fn basedir(&self) -> &Path {
        &self.basedir
    }
}
