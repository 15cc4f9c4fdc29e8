// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{Fixture, RawFixture};
use crate::errors::Result;

/// Load a fixture file from a given path and return the raw `RawFixture`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawFixture> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let fixture: RawFixture = toml::from_str(&contents)?;

    Ok(fixture)
}

/// Load a fixture file, validate it and resolve a relative `basedir`
/// against the directory containing the file.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Fixture> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let fixture = Fixture::try_from(raw)?.resolve_basedir(fixture_root_dir(path));
    debug!(fixture = ?path, basedir = ?fixture.basedir, "loaded fixture");
    Ok(fixture)
}

/// Directory that relative paths in a fixture are resolved against.
///
/// A bare filename like "fixture.toml" (parent = "") resolves against ".".
fn fixture_root_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
