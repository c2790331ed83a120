use flowdose::core::build::{backup_path, run_build, BuildPlan, ENTRY_FILE};
use flowdose::core::prefetch::{render_stub_module, StubStorefront};
use flowdose::GlueError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ACTIONS_SRC: &str = "import { sdk } from '../lib/config';\nexport async function prefetchRegions() {\n  return sdk.store.region.list();\n}\n";
const DATA_SRC: &str = "module.exports = require('./products');\n\u{feff}// bytes: \u{00e9}\n";

/// A storefront checkout with `actions` and `lib/data` but no `lib/hooks`.
fn storefront() -> (TempDir, Vec<(PathBuf, Vec<u8>)>) {
    let dir = TempDir::new().unwrap();
    let mut originals = Vec::new();
    for (module, content) in [("actions", ACTIONS_SRC), ("lib/data", DATA_SRC)] {
        let module_dir = dir.path().join("src").join(module);
        fs::create_dir_all(&module_dir).unwrap();
        let entry = module_dir.join(ENTRY_FILE);
        fs::write(&entry, content).unwrap();
        originals.push((entry, content.as_bytes().to_vec()));
    }
    (dir, originals)
}

fn shell(root: &Path, script: &str) -> BuildPlan {
    BuildPlan::next_build(root).with_command("sh", vec!["-c".to_string(), script.to_string()])
}

fn assert_restored(originals: &[(PathBuf, Vec<u8>)]) {
    for (entry, bytes) in originals {
        assert_eq!(&fs::read(entry).unwrap(), bytes, "{} not restored", entry.display());
        assert!(!backup_path(entry).exists(), "backup left for {}", entry.display());
    }
}

#[tokio::test]
async fn test_successful_build_sees_stubs_and_restores() {
    let (dir, originals) = storefront();
    let module = render_stub_module(&StubStorefront).await.unwrap();

    // the bundler runs in the project root with the stubs and flags in place
    let plan = shell(
        dir.path(),
        "grep -q prefetchCategories src/actions/index.js \
         && grep -q prefetchRegions src/lib/data/index.js \
         && test -f src/actions/index.js.bak \
         && test \"$NODE_ENV\" = production \
         && test \"$NEXT_PUBLIC_SKIP_PREFETCH\" = true \
         && test \"$NEXT_SKIP_BUILD_FETCH\" = true",
    );

    run_build(&plan, Some(&module)).await.unwrap();

    assert_restored(&originals);
    assert!(!dir.path().join("src/lib/hooks").exists());
}

#[tokio::test]
async fn test_failed_build_propagates_code_after_restoring() {
    let (dir, originals) = storefront();
    let module = render_stub_module(&StubStorefront).await.unwrap();
    let plan = shell(dir.path(), "exit 3");

    let result = run_build(&plan, Some(&module)).await;

    assert!(matches!(result, Err(GlueError::BundlerFailed { code: Some(3) })));
    assert_restored(&originals);
}

#[tokio::test]
async fn test_missing_bundler_still_restores() {
    let (dir, originals) = storefront();
    let plan = BuildPlan::next_build(dir.path());

    // no node_modules in the temp checkout, so spawning fails
    let result = run_build(&plan, Some("// stub\n")).await;

    assert!(matches!(result, Err(GlueError::IoError(_))));
    assert_restored(&originals);
}

#[tokio::test]
async fn test_without_ci_files_are_untouched() {
    let (dir, originals) = storefront();
    let plan = shell(dir.path(), "grep -q 'sdk.store.region.list' src/actions/index.js");

    run_build(&plan, None).await.unwrap();

    assert_restored(&originals);
}

#[tokio::test]
async fn test_checkout_without_src_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let plan = shell(dir.path(), "true");

    run_build(&plan, Some("// stub\n")).await.unwrap();
}
