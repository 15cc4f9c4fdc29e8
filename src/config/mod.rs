// src/config/mod.rs

//! Fixture files: TOML descriptions of a fake build context.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a fixture file from disk (`loader.rs`).
//! - Validate basic invariants like non-empty, unique paths (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{DiagnosticEntry, Fixture, RawFixture};
