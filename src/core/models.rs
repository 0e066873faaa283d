//! # Data Models Module / 数据模型模块
//!
//! Result types for executed jobs and the serializable batch report.
//!
//! 已执行任务的结果类型以及可序列化的批量报告。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::core::config::JobSpec;

/// Final state of a job.
/// 任务的最终状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// The child exited with the expected code.
    Passed,
    /// The child exited with a different code.
    UnexpectedExitCode,
    /// The run failed before or while launching the child.
    Error,
    /// The job never started.
    Skipped,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobStatus::Passed => "Passed",
            JobStatus::UnexpectedExitCode => "Wrong Exit Code",
            JobStatus::Error => "Error",
            JobStatus::Skipped => "Skipped",
        };
        f.write_str(label)
    }
}

/// The outcome of one job, including everything captured from the child.
/// 单个任务的结果，包括从子进程捕获的所有内容。
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub job: JobSpec,
    pub status: JobStatus,
    /// Present only when the child exited normally.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// The run error message for [`JobStatus::Error`].
    pub error: Option<String>,
    #[serde(serialize_with = "serialize_millis", rename = "duration_ms")]
    pub duration: Duration,
}

impl JobResult {
    pub fn skipped(job: JobSpec) -> Self {
        Self {
            job,
            status: JobStatus::Skipped,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            error: None,
            duration: Duration::ZERO,
        }
    }

    pub fn errored(job: JobSpec, error: String, duration: Duration) -> Self {
        Self {
            job,
            status: JobStatus::Error,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            error: Some(error),
            duration,
        }
    }

    pub fn name(&self) -> &str {
        &self.job.name
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self.status,
            JobStatus::UnexpectedExitCode | JobStatus::Error
        )
    }

    /// A failure that is not tolerated on the current OS.
    pub fn is_unexpected_failure(&self) -> bool {
        self.is_failure() && !self.job.failure_allowed()
    }

    pub fn is_allowed_failure(&self) -> bool {
        self.is_failure() && self.job.failure_allowed()
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration_millis(*duration))
}

/// Written by `--report`.
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub jobs: &'a [JobResult],
}

/// Summary of a single `run` invocation, written by `run --report`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub executable: &'a Path,
    pub env_file: Option<&'a Path>,
    pub args: &'a [String],
    pub exit_code: i32,
    pub stdout: &'a str,
    pub stderr: &'a str,
    pub duration_ms: u64,
}
