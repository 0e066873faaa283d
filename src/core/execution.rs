//! # Job Execution Module / 任务执行模块
//!
//! Runs jobs from a batch manifest. Each job gets its own [`Runner`] on a
//! blocking worker thread, so independent children run side by side while
//! every individual run stays synchronous.
//!
//! 运行批量清单中的任务。每个任务在阻塞工作线程上拥有自己的 [`Runner`]，
//! 因此独立的子进程可以并行运行，而每次单独的运行仍然是同步的。

use futures::{StreamExt, stream};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::core::{
    config::JobSpec,
    models::{JobResult, JobStatus},
    runner::Runner,
};

/// Runs a single job to completion on the current thread.
///
/// 在当前线程上运行单个任务直到完成。
pub fn execute_job(job: JobSpec) -> JobResult {
    let env_file = job.env_file.clone().unwrap_or_default();
    let mut runner = Runner::new(&job.executable, env_file, job.args.clone());

    let start_time = Instant::now();
    let outcome = runner.run();
    let duration = start_time.elapsed();

    match outcome {
        Ok(exit_code) => {
            let status = if exit_code == job.expected_exit_code {
                JobStatus::Passed
            } else {
                JobStatus::UnexpectedExitCode
            };
            JobResult {
                job,
                status,
                exit_code: Some(exit_code),
                stdout: runner.stdout().to_string(),
                stderr: runner.stderr().to_string(),
                error: None,
                duration,
            }
        }
        Err(e) => JobResult::errored(job, e.to_string(), duration),
    }
}

/// Options controlling a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of jobs running at once; at least 1.
    pub parallelism: usize,
    /// Stop starting new jobs after the first unexpected failure.
    pub fail_fast: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallelism: num_cpus::get() / 2 + 1,
            fail_fast: false,
        }
    }
}

/// Runs every job with at most `options.parallelism` children alive at once.
///
/// Cancelling `stop_token` (e.g. on Ctrl-C) prevents jobs that have not
/// started yet from starting; they are reported as skipped. Children that are
/// already running are waited for, never killed.
///
/// 以最多 `options.parallelism` 个并发子进程运行所有任务。
/// 取消 `stop_token` 会阻止尚未开始的任务启动；正在运行的子进程会被等待，不会被终止。
///
/// # Returns
/// One result per job, in manifest order.
pub async fn run_batch(
    jobs: Vec<JobSpec>,
    options: &BatchOptions,
    stop_token: CancellationToken,
) -> Vec<JobResult> {
    let fast_fail_token = CancellationToken::new();
    let fail_fast = options.fail_fast;

    let mut results: Vec<(usize, JobResult)> = stream::iter(jobs.into_iter().enumerate().map(
        |(index, job)| {
            let stop_token = stop_token.clone();
            let fast_fail_token = fast_fail_token.clone();

            async move {
                if stop_token.is_cancelled() || fast_fail_token.is_cancelled() {
                    tracing::debug!(job = %job.name, "skipping job");
                    return (index, JobResult::skipped(job));
                }

                let job_for_error = job.clone();
                let result = match tokio::task::spawn_blocking(move || execute_job(job)).await {
                    Ok(result) => result,
                    Err(e) => JobResult::errored(
                        job_for_error,
                        format!("Critical error during job execution: {e}"),
                        Default::default(),
                    ),
                };

                if fail_fast && result.is_unexpected_failure() {
                    fast_fail_token.cancel();
                }
                (index, result)
            }
        },
    ))
    .buffer_unordered(options.parallelism.max(1))
    .collect()
    .await;

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}
