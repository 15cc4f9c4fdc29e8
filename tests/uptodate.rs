// tests/uptodate.rs

use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use buildctx::fs::mock::MockFileSystem;
use buildctx::{BuildContext, ContextMap, FakeBuildContext};
use buildctx_test_utils::init_tracing;
use buildctx_test_utils::project::TempProject;

type TestResult = Result<(), Box<dyn Error>>;

const TARGET: &str = "/proj/target/A.class";
const SOURCE: &str = "/proj/src/A.java";

/// Mock project with a target at `target_secs` and a source at `source_secs`.
fn mock_project(target_secs: u64, source_secs: u64) -> Result<MockFileSystem, Box<dyn Error>> {
    let fs = MockFileSystem::new();
    fs.add_file(TARGET, "bytecode");
    fs.add_file(SOURCE, "class A {}");
    fs.set_modified(TARGET, UNIX_EPOCH + Duration::from_secs(target_secs))?;
    fs.set_modified(SOURCE, UNIX_EPOCH + Duration::from_secs(source_secs))?;
    Ok(fs)
}

fn uptodate(ctx: &FakeBuildContext, target: &str, source: &str) -> bool {
    ctx.is_uptodate(Some(Path::new(target)), Some(Path::new(source)))
}

#[test]
fn newer_target_without_delta_is_uptodate() -> TestResult {
    init_tracing();

    let fs = mock_project(200, 100)?;
    let ctx = FakeBuildContext::builder("/proj")
        .file_system(Arc::new(fs))
        .build();

    assert!(uptodate(&ctx, TARGET, SOURCE));

    Ok(())
}

#[test]
fn older_or_equal_target_is_not_uptodate() -> TestResult {
    init_tracing();

    let older = FakeBuildContext::builder("/proj")
        .file_system(Arc::new(mock_project(100, 200)?))
        .build();
    assert!(!uptodate(&older, TARGET, SOURCE));

    let equal = FakeBuildContext::builder("/proj")
        .file_system(Arc::new(mock_project(150, 150)?))
        .build();
    assert!(!uptodate(&equal, TARGET, SOURCE));

    Ok(())
}

#[test]
fn missing_arguments_or_files_are_not_uptodate() -> TestResult {
    init_tracing();

    let ctx = FakeBuildContext::builder("/proj")
        .file_system(Arc::new(mock_project(200, 100)?))
        .build();

    assert!(!ctx.is_uptodate(None, Some(Path::new(SOURCE))));
    assert!(!ctx.is_uptodate(Some(Path::new(TARGET)), None));
    assert!(!ctx.is_uptodate(None, None));
    assert!(!uptodate(&ctx, "/proj/target/Missing.class", SOURCE));
    assert!(!uptodate(&ctx, TARGET, "/proj/src/Missing.java"));

    Ok(())
}

#[test]
fn delta_on_either_side_is_not_uptodate() -> TestResult {
    init_tracing();

    let source_changed = FakeBuildContext::builder("/proj")
        .changed("src/A.java")
        .file_system(Arc::new(mock_project(200, 100)?))
        .build();
    assert!(!uptodate(&source_changed, TARGET, SOURCE));

    let target_deleted = FakeBuildContext::builder("/proj")
        .deleted("target/A.class")
        .file_system(Arc::new(mock_project(200, 100)?))
        .build();
    assert!(!uptodate(&target_deleted, TARGET, SOURCE));

    Ok(())
}

#[test]
fn file_outside_basedir_is_never_uptodate() -> TestResult {
    init_tracing();

    let fs = mock_project(200, 100)?;
    fs.add_file("/elsewhere/A.class", "bytecode");
    fs.set_modified("/elsewhere/A.class", UNIX_EPOCH + Duration::from_secs(500))?;

    let ctx = FakeBuildContext::builder("/proj")
        .file_system(Arc::new(fs))
        .build();

    assert!(!uptodate(&ctx, "/elsewhere/A.class", SOURCE));

    Ok(())
}

#[test]
fn canonicalization_failure_is_not_uptodate() -> TestResult {
    init_tracing();

    let fs = mock_project(200, 100)?;
    fs.deny(TARGET);

    let ctx = FakeBuildContext::builder("/proj")
        .file_system(Arc::new(fs))
        .build();

    assert!(!uptodate(&ctx, TARGET, SOURCE));

    Ok(())
}

#[test]
fn real_files_compare_modification_times() -> TestResult {
    init_tracing();

    let project = TempProject::new()?;
    let target = project.file("target/A.class", "bytecode")?;
    let source = project.file("src/A.java", "class A {}")?;
    project.set_modified_secs("target/A.class", 2_000_000)?;
    project.set_modified_secs("src/A.java", 1_000_000)?;

    let ctx = FakeBuildContext::new(project.root(), Vec::<String>::new(), ContextMap::new());

    assert!(ctx.is_uptodate(Some(target.as_path()), Some(source.as_path())));
    assert!(!ctx.is_uptodate(Some(source.as_path()), Some(target.as_path())));

    Ok(())
}
