// src/scan/mod.rs

//! Scanners enumerate the files and directories below a base directory.
//!
//! Two implementations exist:
//! - [`FixedFileScanner`] reports a predetermined file list and ignores every
//!   configuration call. The fake build context hands these out for its
//!   changed and deleted sets.
//! - [`DirectoryScanner`] walks the filesystem and filters with Ant-style
//!   include/exclude globs.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::Result;

pub mod directory;
pub mod fixed;
pub mod patterns;

pub use directory::DirectoryScanner;
pub use fixed::FixedFileScanner;
pub use patterns::DEFAULT_EXCLUDES;

/// Ordering applied to the entries of each directory during a scan.
pub type FilenameComparator = Box<dyn Fn(&str, &str) -> Ordering + Send + Sync>;

pub trait Scanner: Debug {
    fn set_includes(&mut self, includes: &[&str]);
    fn set_excludes(&mut self, excludes: &[&str]);
    fn add_default_excludes(&mut self);
    fn set_filename_comparator(&mut self, comparator: Option<FilenameComparator>);

    fn scan(&mut self) -> Result<()>;

    /// Included files, relative to [`Scanner::basedir`], `/`-separated.
    fn included_files(&self) -> Vec<String>;

    /// Included directories, relative to [`Scanner::basedir`], `/`-separated.
    fn included_directories(&self) -> Vec<String>;

    fn basedir(&self) -> &Path;
}
