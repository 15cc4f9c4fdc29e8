// tests/fixture_config.rs

use std::error::Error;
use std::io::Write;

use tempfile::{tempdir, NamedTempFile};

use buildctx::config::{load_and_validate, load_from_path, Fixture};
use buildctx::{load_context, BuildContext, BuildContextError, FakeBuildContext, Severity};
use buildctx_test_utils::builders::FixtureBuilder;
use buildctx_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

const FIXTURE: &str = r#"
basedir = "project"
changed = ["src/A.java", "src/B.java"]
deleted = ["src/Old.java"]

[context]
mode = "fast"
retries = 3

[[warning]]
file = "src/A.java"
line = 3
column = 1
message = "unused import"

[[error]]
file = "src/B.java"
line = 10
message = "missing semicolon"
cause = "parse failure"
"#;

#[test]
fn fixture_file_builds_a_context() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("fixture.toml");
    std::fs::write(&path, FIXTURE)?;

    let ctx = load_context(&path)?;

    assert_eq!(ctx.basedir(), dir.path().join("project"));
    assert!(ctx.has_delta("src/A.java"));
    assert!(ctx.has_delta(&format!("{}/src/Old.java", dir.path().join("project").display())));
    assert!(!ctx.has_delta("src/C.java"));

    assert_eq!(
        ctx.value_as::<toml::Value>("mode"),
        Some(&toml::Value::String("fast".to_string()))
    );
    assert_eq!(
        ctx.value_as::<toml::Value>("retries").and_then(toml::Value::as_integer),
        Some(3)
    );

    assert_eq!(ctx.warnings().len(), 1);
    assert_eq!(ctx.warnings()[0].severity, Severity::Warning);
    assert_eq!(ctx.warnings()[0].line, 3);
    assert_eq!(ctx.errors().len(), 1);
    assert_eq!(ctx.errors()[0].severity, Severity::Error);
    assert_eq!(ctx.errors()[0].column, 0);
    assert_eq!(ctx.errors()[0].cause.as_deref(), Some("parse failure"));

    Ok(())
}

#[test]
fn absolute_basedir_is_kept() -> TestResult {
    init_tracing();

    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
basedir = "/proj"
changed = ["src/A.java"]
"#
    )?;

    let fixture = load_and_validate(file.path())?;
    assert_eq!(fixture.basedir, std::path::PathBuf::from("/proj"));

    Ok(())
}

#[test]
fn raw_load_skips_validation() -> TestResult {
    init_tracing();

    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
basedir = "/proj"
changed = ["src/A.java", "src/A.java"]
"#
    )?;

    let raw = load_from_path(file.path())?;
    assert_eq!(raw.changed.len(), 2);

    match load_and_validate(file.path()) {
        Err(BuildContextError::ConfigError(msg)) => {
            assert!(msg.contains("more than once"));
            assert!(msg.contains("src/A.java"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }

    Ok(())
}

#[test]
fn path_may_be_both_changed_and_deleted() -> TestResult {
    init_tracing();

    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
basedir = "/proj"
changed = ["src/A.java"]
deleted = ["src/A.java"]
"#
    )?;

    let ctx = FakeBuildContext::from_fixture(load_and_validate(file.path())?);
    assert!(ctx.changed_files().contains("src/A.java"));
    assert!(ctx.deleted_files().contains("src/A.java"));
    assert!(ctx.has_delta("src/A.java"));

    Ok(())
}

#[test]
fn validation_rejects_bad_fixtures() {
    init_tracing();

    let cases = [
        (
            FixtureBuilder::new("/proj").changed("a").changed("a").raw(),
            "more than once",
        ),
        (FixtureBuilder::new("/proj").deleted("  ").raw(), "empty path"),
        (FixtureBuilder::new("").raw(), "basedir"),
        (
            FixtureBuilder::new("/proj").warning("a", 1, "").raw(),
            "empty message",
        ),
    ];

    for (raw, expected) in cases {
        match Fixture::try_from(raw) {
            Err(BuildContextError::ConfigError(msg)) => {
                assert!(msg.contains(expected), "{msg:?} should mention {expected:?}");
            }
            Err(e) => panic!("Expected ConfigError, got: {:?}", e),
            Ok(_) => panic!("Expected error for case {expected:?}, got Ok"),
        }
    }
}

#[test]
fn malformed_or_unknown_keys_are_toml_errors() -> TestResult {
    init_tracing();

    let mut unknown = NamedTempFile::new()?;
    write!(unknown, "basedir = \"/proj\"\nchanged_files = [\"a\"]\n")?;
    assert!(matches!(
        load_and_validate(unknown.path()),
        Err(BuildContextError::TomlError(_))
    ));

    let mut malformed = NamedTempFile::new()?;
    write!(malformed, "basedir = [\n")?;
    assert!(matches!(
        load_and_validate(malformed.path()),
        Err(BuildContextError::TomlError(_))
    ));

    Ok(())
}

#[test]
fn missing_fixture_is_io_error() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    assert!(matches!(
        load_context(dir.path().join("nope.toml")),
        Err(BuildContextError::IoError(_))
    ));

    Ok(())
}

#[test]
fn builder_fixture_feeds_the_context() {
    init_tracing();

    let fixture = FixtureBuilder::new("/proj")
        .changed("src/A.java")
        .deleted("src/Old.java")
        .value("profile", "release")
        .error("src/A.java", 7, "type mismatch")
        .build();

    let ctx = FakeBuildContext::from_fixture(fixture);

    assert!(ctx.has_delta("/proj/src/A.java"));
    assert!(ctx.has_delta("src/Old.java"));
    assert_eq!(
        ctx.value_as::<toml::Value>("profile").and_then(toml::Value::as_str),
        Some("release")
    );
    assert_eq!(ctx.errors().len(), 1);
    assert!(ctx.warnings().is_empty());
}
