// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{DiagnosticEntry, Fixture, RawFixture};
use crate::errors::{BuildContextError, Result};
use crate::types::Severity;

impl TryFrom<RawFixture> for Fixture {
    type Error = BuildContextError;

    fn try_from(raw: RawFixture) -> std::result::Result<Self, Self::Error> {
        validate_raw_fixture(&raw)?;
        Ok(Fixture {
            basedir: raw.basedir,
            changed: raw.changed.into_iter().collect(),
            deleted: raw.deleted.into_iter().collect(),
            context: raw.context,
            warnings: raw
                .warnings
                .into_iter()
                .map(|w| w.into_diagnostic(Severity::Warning))
                .collect(),
            errors: raw
                .errors
                .into_iter()
                .map(|e| e.into_diagnostic(Severity::Error))
                .collect(),
        })
    }
}

fn validate_raw_fixture(raw: &RawFixture) -> Result<()> {
    validate_basedir(raw)?;
    validate_path_list("changed", &raw.changed)?;
    validate_path_list("deleted", &raw.deleted)?;
    validate_diagnostics("warning", &raw.warnings)?;
    validate_diagnostics("error", &raw.errors)?;
    Ok(())
}

fn validate_basedir(raw: &RawFixture) -> Result<()> {
    if raw.basedir.as_os_str().is_empty() {
        return Err(BuildContextError::ConfigError(
            "`basedir` must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_path_list(section: &str, paths: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for path in paths {
        if path.trim().is_empty() {
            return Err(BuildContextError::ConfigError(format!(
                "`{section}` contains an empty path"
            )));
        }
        if !seen.insert(path.as_str()) {
            return Err(BuildContextError::ConfigError(format!(
                "`{section}` lists '{path}' more than once"
            )));
        }
    }
    Ok(())
}

fn validate_diagnostics(kind: &str, entries: &[DiagnosticEntry]) -> Result<()> {
    for entry in entries {
        if entry.message.trim().is_empty() {
            return Err(BuildContextError::ConfigError(format!(
                "[[{kind}]] for {:?} has an empty message",
                entry.file
            )));
        }
    }
    Ok(())
}
