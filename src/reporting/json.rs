//! # JSON Report Module / JSON 报告模块
//!
//! Writes machine-readable reports of single and batch runs.
//!
//! 写入单次运行和批量运行的机器可读报告。

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::{BatchReport, JobResult};

/// Writes `report` as pretty-printed JSON to `path`.
pub fn write_report<T: Serialize>(report: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

/// Writes a [`BatchReport`] for `results`, stamped with the current time.
///
/// 为 `results` 写入带有当前时间戳的 [`BatchReport`]。
pub fn write_batch_report(results: &[JobResult], path: &Path) -> Result<()> {
    let report = BatchReport {
        generated_at: chrono::Utc::now(),
        jobs: results,
    };
    write_report(&report, path)
}
