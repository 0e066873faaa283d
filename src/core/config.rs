//! # Batch Manifest Module / 批量清单模块
//!
//! A batch manifest is a TOML file listing many runs, each a [`JobSpec`].
//! Paths inside the manifest are resolved relative to the manifest's own
//! directory, after `~` and `$VAR` expansion.
//!
//! 批量清单是一个列出多个运行任务的 TOML 文件，每个任务是一个 [`JobSpec`]。
//! 清单中的路径在展开 `~` 和 `$VAR` 后，相对于清单所在目录进行解析。

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::fs::resolve_manifest_path;

/// One run described in a batch manifest.
/// 批量清单中描述的单个运行任务。
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct JobSpec {
    /// Unique name used in the summary and the report.
    /// 在摘要和报告中使用的唯一名称。
    pub name: String,
    /// Path to the executable.
    /// 可执行文件的路径。
    pub executable: PathBuf,
    /// Optional environment override file.
    /// 可选的环境覆盖文件。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_file: Option<PathBuf>,
    /// Positional arguments passed to the executable.
    #[serde(default)]
    pub args: Vec<String>,
    /// The exit code that counts as a pass. Defaults to `0`.
    /// 视为通过的退出码，默认为 `0`。
    #[serde(default)]
    pub expected_exit_code: i32,
    /// Operating systems (e.g. "windows", "linux") on which a failure of this
    /// job does not fail the whole batch.
    /// 在这些操作系统上，此任务失败不会导致整个批次失败。
    #[serde(default)]
    pub allow_failure: Vec<String>,
}

impl JobSpec {
    /// Returns `true` if a failure is tolerated on the current OS.
    pub fn failure_allowed(&self) -> bool {
        self.allow_failure
            .iter()
            .any(|os| os == std::env::consts::OS)
    }
}

/// The whole batch manifest.
/// 整个批量清单。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchManifest {
    /// Maximum number of jobs running at once. `None` picks a default from
    /// the CPU count.
    #[serde(default)]
    pub parallelism: Option<usize>,
    /// Stop starting new jobs after the first unexpected failure.
    #[serde(default)]
    pub fail_fast: bool,
    pub jobs: Vec<JobSpec>,
}

impl BatchManifest {
    /// Parses a manifest from TOML text without resolving paths.
    pub fn from_toml(content: &str) -> Result<Self> {
        let manifest: BatchManifest =
            toml::from_str(content).context("Failed to parse batch manifest")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Checks job names and executables.
    pub fn validate(&self) -> Result<()> {
        if self.parallelism == Some(0) {
            bail!("parallelism must be at least 1");
        }

        let mut seen = HashSet::new();
        for (index, job) in self.jobs.iter().enumerate() {
            if job.name.trim().is_empty() {
                bail!("job #{} has an empty name", index + 1);
            }
            if !seen.insert(job.name.as_str()) {
                bail!("duplicate job name '{}'", job.name);
            }
            if job.executable.as_os_str().is_empty() {
                bail!("job '{}' has an empty executable path", job.name);
            }
        }
        Ok(())
    }

    /// Resolves every path field against `base_dir`.
    pub fn resolve_paths(&mut self, base_dir: &Path) -> Result<()> {
        for job in &mut self.jobs {
            job.executable = resolve_job_path(&job.executable, base_dir)
                .with_context(|| format!("Invalid executable path in job '{}'", job.name))?;
            if let Some(env_file) = &job.env_file {
                let resolved = resolve_job_path(env_file, base_dir)
                    .with_context(|| format!("Invalid env_file path in job '{}'", job.name))?;
                job.env_file = Some(resolved);
            }
        }
        Ok(())
    }
}

fn resolve_job_path(path: &Path, base_dir: &Path) -> Result<PathBuf> {
    let raw = path
        .to_str()
        .with_context(|| format!("Path is not valid UTF-8: {}", path.display()))?;
    resolve_manifest_path(raw, base_dir)
}

/// Loads, validates and resolves the manifest at `path`.
///
/// 加载、验证并解析位于 `path` 的清单。
pub fn load_batch_manifest(path: &Path) -> Result<BatchManifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch manifest: {}", path.display()))?;
    let mut manifest = BatchManifest::from_toml(&content)
        .with_context(|| format!("Invalid batch manifest: {}", path.display()))?;

    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    manifest.resolve_paths(base_dir)?;
    Ok(manifest)
}
