// src/lib.rs

//! An in-memory incremental build context for testing build plugins.
//!
//! Plugin code written against [`BuildContext`] can be unit-tested with a
//! [`FakeBuildContext`] that answers delta queries from fixed changed/deleted
//! sets, hands out scanners over those sets, and records refreshed outputs.

pub mod config;
pub mod context;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod scan;
pub mod types;

use std::path::Path;

use tracing::info;

pub use context::{BuildContext, ContextMap, ContextValue, FakeBuildContext, FakeBuildContextBuilder};
pub use errors::{BuildContextError, Result};
pub use scan::{DirectoryScanner, FilenameComparator, FixedFileScanner, Scanner};
pub use types::{Diagnostic, Severity};

/// Load a fixture file and build the fake context it describes.
pub fn load_context(path: impl AsRef<Path>) -> Result<FakeBuildContext> {
    let path = path.as_ref();
    let fixture = config::load_and_validate(path)?;
    info!(
        fixture = ?path,
        changed = fixture.changed.len(),
        deleted = fixture.deleted.len(),
        "fake build context loaded from fixture"
    );
    Ok(FakeBuildContext::from_fixture(fixture))
}
