#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use buildctx::config::{DiagnosticEntry, Fixture, RawFixture};

/// Builder for `Fixture` to simplify test setup without writing TOML.
pub struct FixtureBuilder {
    fixture: RawFixture,
}

impl FixtureBuilder {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            fixture: RawFixture {
                basedir: basedir.into(),
                changed: vec![],
                deleted: vec![],
                context: BTreeMap::new(),
                warnings: vec![],
                errors: vec![],
            },
        }
    }

    pub fn changed(mut self, path: &str) -> Self {
        self.fixture.changed.push(path.to_string());
        self
    }

    pub fn deleted(mut self, path: &str) -> Self {
        self.fixture.deleted.push(path.to_string());
        self
    }

    pub fn value(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.fixture.context.insert(key.to_string(), value.into());
        self
    }

    pub fn warning(mut self, file: &str, line: u32, message: &str) -> Self {
        self.fixture.warnings.push(entry(file, line, message));
        self
    }

    pub fn error(mut self, file: &str, line: u32, message: &str) -> Self {
        self.fixture.errors.push(entry(file, line, message));
        self
    }

    /// The unvalidated fixture, for exercising validation failures.
    pub fn raw(self) -> RawFixture {
        self.fixture
    }

    pub fn build(self) -> Fixture {
        Fixture::try_from(self.fixture).expect("Failed to build valid fixture from builder")
    }
}

fn entry(file: &str, line: u32, message: &str) -> DiagnosticEntry {
    DiagnosticEntry {
        file: PathBuf::from(file),
        line,
        column: 0,
        message: message.to_string(),
        cause: None,
    }
}
