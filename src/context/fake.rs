// src/context/fake.rs

use std::any::Any;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::Fixture;
use crate::context::{BuildContext, ContextMap, ContextValue, FakeBuildContextBuilder};
use crate::errors::{BuildContextError, Result};
use crate::fs::path_utils::{absolute, canonicalize_lenient, normalize_lexically, relative_str};
use crate::fs::{FileSystem, RealFileSystem};
use crate::scan::{DirectoryScanner, FixedFileScanner, Scanner};
use crate::types::{render_cause, Diagnostic, Severity};

/// In-memory [`BuildContext`] for unit-testing build-participating code.
///
/// The changed and deleted sets are fixed at construction. Only the
/// refreshed-file set and the context map change afterwards. Diagnostics are
/// accepted and discarded; [`FakeBuildContext::warnings`] and
/// [`FakeBuildContext::errors`] only ever hold what was passed in.
///
/// Existence checks, modification times, canonicalization, output files and
/// real directory scans go through the configured [`FileSystem`]
/// ([`RealFileSystem`] unless replaced).
pub struct FakeBuildContext {
    fs: Arc<dyn FileSystem>,
    basedir: PathBuf,
    /// `basedir` as a string, for trimming absolute path strings.
    basepath: String,
    changed: Arc<BTreeSet<String>>,
    deleted: Arc<BTreeSet<String>>,
    context: ContextMap,
    warnings: Vec<Diagnostic>,
    errors: Vec<Diagnostic>,
    refreshed: BTreeSet<PathBuf>,
}

impl fmt::Debug for FakeBuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeBuildContext")
            .field("basedir", &self.basedir)
            .field("changed", &self.changed)
            .field("deleted", &self.deleted)
            .field("context_keys", &self.context.keys().collect::<Vec<_>>())
            .field("refreshed", &self.refreshed)
            .finish_non_exhaustive()
    }
}

impl FakeBuildContext {
    pub fn new<C, S>(basedir: impl AsRef<Path>, changed: C, context: ContextMap) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_deleted(basedir, changed, Vec::<String>::new(), context)
    }

    pub fn with_deleted<C, D, S, T>(
        basedir: impl AsRef<Path>,
        changed: C,
        deleted: D,
        context: ContextMap,
    ) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        D: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_diagnostics(basedir, changed, deleted, context, Vec::new(), Vec::new())
    }

    pub fn with_diagnostics<C, D, S, T>(
        basedir: impl AsRef<Path>,
        changed: C,
        deleted: D,
        context: ContextMap,
        warnings: Vec<Diagnostic>,
        errors: Vec<Diagnostic>,
    ) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        D: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::from_parts(
            basedir.as_ref(),
            changed.into_iter().map(Into::into).collect(),
            deleted.into_iter().map(Into::into).collect(),
            context,
            warnings,
            errors,
            Arc::new(RealFileSystem),
        )
    }

    pub fn builder(basedir: impl Into<PathBuf>) -> FakeBuildContextBuilder {
        FakeBuildContextBuilder::new(basedir)
    }

    /// Build a context from a validated fixture file.
    ///
    /// Context values are stored as [`toml::Value`].
    pub fn from_fixture(fixture: Fixture) -> Self {
        let mut builder = FakeBuildContextBuilder::new(fixture.basedir)
            .changed_all(fixture.changed)
            .deleted_all(fixture.deleted);
        for (key, value) in fixture.context {
            builder = builder.value(key, value);
        }
        for warning in fixture.warnings {
            builder = builder.warning(warning);
        }
        for error in fixture.errors {
            builder = builder.error(error);
        }
        builder.build()
    }

    pub(crate) fn from_parts(
        basedir: &Path,
        changed: BTreeSet<String>,
        deleted: BTreeSet<String>,
        context: ContextMap,
        warnings: Vec<Diagnostic>,
        errors: Vec<Diagnostic>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        let basedir = normalize_lexically(&absolute(basedir));
        let basepath = basedir.to_string_lossy().into_owned();

        debug!(
            basedir = %basepath,
            changed = changed.len(),
            deleted = deleted.len(),
            "created fake build context"
        );

        Self {
            fs,
            basedir,
            basepath,
            changed: Arc::new(changed),
            deleted: Arc::new(deleted),
            context,
            warnings,
            errors,
            refreshed: BTreeSet::new(),
        }
    }

    /// Replace the filesystem used for existence, timestamp and output checks.
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    pub fn changed_files(&self) -> &BTreeSet<String> {
        &self.changed
    }

    pub fn deleted_files(&self) -> &BTreeSet<String> {
        &self.deleted
    }

    pub fn context(&self) -> &ContextMap {
        &self.context
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Trim the base directory and one separator off an absolute path string.
    fn strip_basedir<'a>(&self, path: &'a str) -> &'a str {
        match path.strip_prefix(self.basepath.as_str()) {
            Some(rest) => rest
                .strip_prefix(|c: char| std::path::is_separator(c))
                .unwrap_or(rest),
            None => path,
        }
    }

    /// Path of `file` relative to the base directory, if strictly below it.
    fn relpath(&self, file: &Path) -> Result<Option<String>> {
        let path = canonicalize_lenient(self.fs.as_ref(), file).map_err(|e| {
            BuildContextError::InvalidArgument(format!("cannot canonicalize {:?}: {:#}", file, e))
        })?;
        let base = canonicalize_lenient(self.fs.as_ref(), &self.basedir).map_err(|e| {
            BuildContextError::InvalidArgument(format!(
                "cannot canonicalize basedir {:?}: {:#}",
                self.basedir, e
            ))
        })?;
        Ok(relative_str(&base, &path))
    }

    /// `file` exists and has no delta. A failed delta check counts as a delta.
    fn exists_without_delta(&self, file: &Path) -> bool {
        self.fs.exists(file) && !self.has_delta_file(file).unwrap_or(true)
    }

    fn discard_diagnostic(
        &self,
        file: &Path,
        line: u32,
        column: u32,
        message: &str,
        severity: Severity,
        cause: Option<&dyn Error>,
    ) {
        debug!(
            file = ?file,
            line,
            column,
            %severity,
            text = message,
            cause = ?cause.map(render_cause),
            "diagnostic discarded by fake build context"
        );
    }
}

impl BuildContext for FakeBuildContext {
    fn has_delta(&self, relpath: &str) -> bool {
        let relpath = self.strip_basedir(relpath);
        let hit = self.changed.contains(relpath) || self.deleted.contains(relpath);
        trace!(relpath, hit, "delta lookup");
        hit
    }

    fn has_delta_file(&self, file: &Path) -> Result<bool> {
        match self.relpath(file)? {
            Some(rel) => Ok(self.has_delta(&rel)),
            None => {
                trace!(file = ?file, "file outside basedir, reporting delta");
                Ok(true)
            }
        }
    }

    fn is_incremental(&self) -> bool {
        true
    }

    fn new_delete_scanner(&self, basedir: &Path) -> Box<dyn Scanner> {
        Box::new(FixedFileScanner::new(basedir, Arc::clone(&self.deleted)))
    }

    fn new_scanner(&self, basedir: &Path) -> Box<dyn Scanner> {
        Box::new(FixedFileScanner::new(basedir, Arc::clone(&self.changed)))
    }

    fn new_scanner_ignore_delta(&self, basedir: &Path, ignore_delta: bool) -> Box<dyn Scanner> {
        if ignore_delta {
            debug!(basedir = ?basedir, "creating directory scanner, delta ignored");
            return Box::new(DirectoryScanner::with_file_system(
                basedir,
                Arc::clone(&self.fs),
            ));
        }
        self.new_scanner(basedir)
    }

    fn new_file_output_stream(&mut self, file: &Path) -> Result<Box<dyn Write + Send>> {
        self.refresh(file);
        debug!(file = ?file, "opening output stream");
        self.fs.create(file).map_err(BuildContextError::from_fs)
    }

    fn refresh(&mut self, file: &Path) {
        let file = absolute(file);
        debug!(file = ?file, "refreshed");
        self.refreshed.insert(file);
    }

    fn value(&self, key: &str) -> Option<&(dyn Any + Send + Sync)> {
        self.context.get(key).map(|value| &**value)
    }

    fn set_value(&mut self, key: &str, value: ContextValue) {
        self.context.insert(key.to_string(), value);
    }

    fn refresh_files(&self) -> &BTreeSet<PathBuf> {
        &self.refreshed
    }

    fn add_error(
        &mut self,
        file: &Path,
        line: u32,
        column: u32,
        message: &str,
        cause: Option<&dyn Error>,
    ) {
        self.discard_diagnostic(file, line, column, message, Severity::Error, cause);
    }

    fn add_warning(
        &mut self,
        file: &Path,
        line: u32,
        column: u32,
        message: &str,
        cause: Option<&dyn Error>,
    ) {
        self.discard_diagnostic(file, line, column, message, Severity::Warning, cause);
    }

    fn add_message(
        &mut self,
        file: &Path,
        line: u32,
        column: u32,
        message: &str,
        severity: Severity,
        cause: Option<&dyn Error>,
    ) {
        self.discard_diagnostic(file, line, column, message, severity, cause);
    }

    fn remove_messages(&mut self, file: &Path) {
        debug!(file = ?file, "remove_messages ignored by fake build context");
    }

    fn is_uptodate(&self, target: Option<&Path>, source: Option<&Path>) -> bool {
        let Some(target) = target else {
            return false;
        };
        if !self.exists_without_delta(target) {
            return false;
        }
        let Some(source) = source else {
            return false;
        };
        if !self.exists_without_delta(source) {
            return false;
        }

        match (self.fs.modified(target), self.fs.modified(source)) {
            (Ok(target_time), Ok(source_time)) => target_time > source_time,
            _ => false,
        }
    }
}
