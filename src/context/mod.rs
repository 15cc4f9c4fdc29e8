// src/context/mod.rs

//! The incremental build context capability surface.
//!
//! Build-participating code talks to a [`BuildContext`] to ask which inputs
//! changed, to enumerate inputs, to open outputs and to report diagnostics.
//! Production hosts provide their own implementation; tests use
//! [`FakeBuildContext`], which answers from test-supplied data.

use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::scan::Scanner;
use crate::types::Severity;

pub mod builder;
pub mod fake;

pub use builder::FakeBuildContextBuilder;
pub use fake::FakeBuildContext;

/// A value stored in the context map.
pub type ContextValue = Box<dyn Any + Send + Sync>;

/// Scratch storage shared across calls; last write wins.
pub type ContextMap = HashMap<String, ContextValue>;

pub trait BuildContext {
    /// Whether `relpath` changed or was deleted since the last build.
    ///
    /// A path that starts with the base directory is trimmed to its relative
    /// form first.
    fn has_delta(&self, relpath: &str) -> bool;

    /// Whether any of `relpaths` has a delta. Stops at the first hit.
    fn has_any_delta(&self, relpaths: &[&str]) -> bool {
        relpaths.iter().any(|relpath| self.has_delta(relpath))
    }

    /// Whether `file` has a delta.
    ///
    /// Files that do not lie strictly below the base directory always report
    /// a delta. Fails with [`crate::errors::BuildContextError::InvalidArgument`]
    /// if the path cannot be canonicalized.
    fn has_delta_file(&self, file: &Path) -> Result<bool>;

    fn is_incremental(&self) -> bool;

    /// Scanner over the files deleted since the last build.
    fn new_delete_scanner(&self, basedir: &Path) -> Box<dyn Scanner>;

    /// Scanner over the files changed since the last build.
    fn new_scanner(&self, basedir: &Path) -> Box<dyn Scanner>;

    /// Like [`BuildContext::new_scanner`], but with `ignore_delta` the
    /// scanner walks the real directory tree instead.
    fn new_scanner_ignore_delta(&self, basedir: &Path, ignore_delta: bool) -> Box<dyn Scanner>;

    /// Open `file` for writing and mark it as refreshed.
    fn new_file_output_stream(&mut self, file: &Path) -> Result<Box<dyn Write + Send>>;

    /// Mark `file` as refreshed (written by the build).
    fn refresh(&mut self, file: &Path);

    fn value(&self, key: &str) -> Option<&(dyn Any + Send + Sync)>;

    /// Typed view of [`BuildContext::value`].
    fn value_as<T: Any>(&self, key: &str) -> Option<&T>
    where
        Self: Sized,
    {
        self.value(key)?.downcast_ref::<T>()
    }

    fn set_value(&mut self, key: &str, value: ContextValue);

    fn refresh_files(&self) -> &BTreeSet<PathBuf>;

    fn add_error(
        &mut self,
        file: &Path,
        line: u32,
        column: u32,
        message: &str,
        cause: Option<&dyn Error>,
    );

    fn add_warning(
        &mut self,
        file: &Path,
        line: u32,
        column: u32,
        message: &str,
        cause: Option<&dyn Error>,
    );

    fn add_message(
        &mut self,
        file: &Path,
        line: u32,
        column: u32,
        message: &str,
        severity: Severity,
        cause: Option<&dyn Error>,
    );

    fn remove_messages(&mut self, file: &Path);

    /// Whether `target` is newer than `source` and neither has a delta.
    fn is_uptodate(&self, target: Option<&Path>, source: Option<&Path>) -> bool;
}
