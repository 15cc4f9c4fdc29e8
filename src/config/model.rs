// src/config/model.rs

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::{Diagnostic, Severity};

/// Fixture file as read from TOML.
///
/// ```toml
/// basedir = "project"
/// changed = ["src/A.java"]
/// deleted = ["src/Old.java"]
///
/// [context]
/// mode = "fast"
///
/// [[warning]]
/// file = "src/A.java"
/// line = 3
/// column = 1
/// message = "unused import"
/// ```
///
/// Everything except `basedir` is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFixture {
    /// Base directory; relative paths are resolved against the fixture
    /// file's directory by the loader.
    pub basedir: PathBuf,

    /// Paths considered modified since the last build.
    #[serde(default)]
    pub changed: Vec<String>,

    /// Paths considered removed since the last build.
    #[serde(default)]
    pub deleted: Vec<String>,

    /// Initial context map values.
    #[serde(default)]
    pub context: BTreeMap<String, toml::Value>,

    /// `[[warning]]` entries.
    #[serde(default, rename = "warning")]
    pub warnings: Vec<DiagnosticEntry>,

    /// `[[error]]` entries.
    #[serde(default, rename = "error")]
    pub errors: Vec<DiagnosticEntry>,
}

/// One `[[warning]]` / `[[error]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticEntry {
    pub file: PathBuf,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
    pub message: String,
    #[serde(default)]
    pub cause: Option<String>,
}

impl DiagnosticEntry {
    pub fn into_diagnostic(self, severity: Severity) -> Diagnostic {
        let mut diagnostic =
            Diagnostic::new(self.file, self.line, self.column, self.message, severity);
        diagnostic.cause = self.cause;
        diagnostic
    }
}

/// Validated fixture. Construct via `TryFrom<RawFixture>`.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub basedir: PathBuf,
    pub changed: BTreeSet<String>,
    pub deleted: BTreeSet<String>,
    pub context: BTreeMap<String, toml::Value>,
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

impl Fixture {
    /// Resolve a relative `basedir` against `root`.
    pub fn resolve_basedir(mut self, root: &Path) -> Self {
        if self.basedir.is_relative() {
            self.basedir = root.join(&self.basedir);
        }
        self
    }
}
