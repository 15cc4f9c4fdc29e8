// src/context/builder.rs

use std::any::Any;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::context::{ContextMap, FakeBuildContext};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::Diagnostic;

/// Builder for [`FakeBuildContext`] when the positional constructors get
/// unwieldy (custom filesystem, seeded context values, diagnostics).
pub struct FakeBuildContextBuilder {
    basedir: PathBuf,
    changed: BTreeSet<String>,
    deleted: BTreeSet<String>,
    context: ContextMap,
    warnings: Vec<Diagnostic>,
    errors: Vec<Diagnostic>,
    fs: Option<Arc<dyn FileSystem>>,
}

impl FakeBuildContextBuilder {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
            changed: BTreeSet::new(),
            deleted: BTreeSet::new(),
            context: ContextMap::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            fs: None,
        }
    }

    pub fn changed(mut self, path: impl Into<String>) -> Self {
        self.changed.insert(path.into());
        self
    }

    pub fn changed_all<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn deleted(mut self, path: impl Into<String>) -> Self {
        self.deleted.insert(path.into());
        self
    }

    pub fn deleted_all<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deleted.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn value<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.context.insert(key.into(), Box::new(value));
        self
    }

    pub fn warning(mut self, diagnostic: Diagnostic) -> Self {
        self.warnings.push(diagnostic);
        self
    }

    pub fn error(mut self, diagnostic: Diagnostic) -> Self {
        self.errors.push(diagnostic);
        self
    }

    pub fn file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    pub fn build(self) -> FakeBuildContext {
        FakeBuildContext::from_parts(
            &self.basedir,
            self.changed,
            self.deleted,
            self.context,
            self.warnings,
            self.errors,
            self.fs.unwrap_or_else(|| Arc::new(RealFileSystem)),
        )
    }
}
