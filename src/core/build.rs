//! Storefront production build with stubbed data modules.
//!
//! In CI the storefront's data-access modules are swapped for stand-ins
//! returning empty results, the bundler runs, and the originals are put back.
//! Restoration is owned by [`StubGuard`], so it happens on every exit path,
//! including a panic while the bundler runs.

use crate::utils::error::{GlueError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const STUB_PATHS: [&str; 3] = ["actions", "lib/data", "lib/hooks"];
pub const ENTRY_FILE: &str = "index.js";
pub const BACKUP_SUFFIX: &str = ".bak";

#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub project_root: PathBuf,
    pub stub_paths: Vec<String>,
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl BuildPlan {
    /// `next build` with pre-fetching disabled in the UI layer.
    pub fn next_build(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            stub_paths: STUB_PATHS.iter().map(|p| p.to_string()).collect(),
            program: "./node_modules/.bin/next".to_string(),
            args: vec!["build".to_string()],
            env: vec![
                ("NODE_ENV".to_string(), "production".to_string()),
                ("NEXT_PUBLIC_SKIP_PREFETCH".to_string(), "true".to_string()),
                ("NEXT_SKIP_BUILD_FETCH".to_string(), "true".to_string()),
            ],
        }
    }

    pub fn with_command(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.program = program.into();
        self.args = args;
        self
    }

    pub fn src_dir(&self) -> PathBuf {
        self.project_root.join("src")
    }
}

pub fn backup_path(entry: &Path) -> PathBuf {
    let mut name = entry.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Puts `entry`'s backup back in place and removes it.
fn restore_entry(entry: &Path) -> Result<()> {
    let backup = backup_path(entry);
    let original = fs::read(&backup)?;
    fs::write(entry, original)?;
    fs::remove_file(&backup)?;
    Ok(())
}

/// Owns the stubbed entry files until they are restored.
#[derive(Debug)]
pub struct StubGuard {
    stubbed: Vec<PathBuf>,
    restored: bool,
}

impl StubGuard {
    /// Stubs `<src_dir>/<path>/index.js` for each path that has one.
    ///
    /// Leftover backups from an interrupted run are restored first, even when
    /// the entry itself is gone. Missing paths are skipped. Per-path failures
    /// are logged and skipped.
    pub fn install(src_dir: &Path, paths: &[String], stub_module: &str) -> Self {
        let mut stubbed = Vec::new();

        for stub_path in paths {
            let entry = src_dir.join(stub_path).join(ENTRY_FILE);

            // 上次中斷留下的備份要先還原，否則會把 stub 當成原始檔備份
            let backup = backup_path(&entry);
            if backup.is_file() {
                if entry.exists() {
                    tracing::warn!("Found leftover backup {}, restoring it first", backup.display());
                } else {
                    tracing::warn!(
                        "Found orphaned backup {} without {}, restoring it",
                        backup.display(),
                        ENTRY_FILE
                    );
                }
                if let Err(e) = restore_entry(&entry) {
                    tracing::error!("Error restoring leftover backup for {}: {}", stub_path, e);
                    continue;
                }
            }

            if !entry.is_file() {
                tracing::debug!("No {} under {}, skipping", ENTRY_FILE, stub_path);
                continue;
            }

            if let Err(e) = fs::copy(&entry, &backup) {
                tracing::error!("Error creating stub for {}: {}", stub_path, e);
                continue;
            }
            stubbed.push(entry.clone());

            match fs::write(&entry, stub_module) {
                Ok(()) => tracing::info!("Stubbed {}", entry.display()),
                Err(e) => tracing::error!("Error creating stub for {}: {}", stub_path, e),
            }
        }

        Self {
            stubbed,
            restored: false,
        }
    }

    pub fn stubbed(&self) -> &[PathBuf] {
        &self.stubbed
    }

    /// Restores every stubbed file, attempting all of them before reporting
    /// the first failure.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        restore_all(&self.stubbed)
    }
}

impl Drop for StubGuard {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(e) = restore_all(&self.stubbed) {
                tracing::error!("Restoring stubbed modules failed: {}", e);
            }
        }
    }
}

fn restore_all(entries: &[PathBuf]) -> Result<()> {
    let mut first_error = None;
    for entry in entries {
        match restore_entry(entry) {
            Ok(()) => tracing::info!("Restored {}", entry.display()),
            Err(e) => {
                tracing::error!("Error restoring {}: {}", entry.display(), e);
                first_error.get_or_insert(e);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub async fn run_bundler(plan: &BuildPlan) -> Result<()> {
    tracing::info!("Starting build: {} {}", plan.program, plan.args.join(" "));

    let status = tokio::process::Command::new(&plan.program)
        .args(&plan.args)
        .current_dir(&plan.project_root)
        .envs(plan.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .status()
        .await?;

    if status.success() {
        Ok(())
    } else {
        Err(GlueError::BundlerFailed {
            code: status.code(),
        })
    }
}

/// Runs the bundler, stubbing data modules first when `stub_module` is given.
///
/// A bundler failure is reported after restoration; a restoration failure is
/// reported only when the bundler itself succeeded.
pub async fn run_build(plan: &BuildPlan, stub_module: Option<&str>) -> Result<()> {
    let guard = stub_module.map(|module| StubGuard::install(&plan.src_dir(), &plan.stub_paths, module));

    let outcome = run_bundler(plan).await;

    if let Some(guard) = guard {
        let restored = guard.restore();
        if outcome.is_ok() {
            restored?;
        }
    }

    outcome
}
