//! # Run Command Module / 运行命令模块
//!
//! Implements `envrunner run`: a single run whose captured output is replayed
//! on this process's streams and whose exit code becomes ours.
//!
//! 实现 `envrunner run`：单次运行，其捕获的输出在当前进程的流上重放，
//! 其退出码成为本进程的退出码。

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use crate::core::models::{RunReport, duration_millis};
use crate::core::runner::Runner;
use crate::reporting::{print_capture, write_report};

/// Executes the run command with the provided arguments.
///
/// # Arguments
/// * `executable` - Path to the executable
/// * `env_file` - Optional environment override file
/// * `args` - Arguments passed to the executable
/// * `report` - Optional path for a JSON report
/// * `quiet` - Suppress the exit code trailer
///
/// # Returns
/// The child's exit code, truncated to the 0-255 range the OS reports.
pub async fn execute(
    executable: PathBuf,
    env_file: Option<PathBuf>,
    args: Vec<String>,
    report: Option<PathBuf>,
    quiet: bool,
) -> Result<ExitCode> {
    let mut runner = Runner::new(executable, env_file.unwrap_or_default(), args);

    let start_time = Instant::now();
    let (runner, outcome) = tokio::task::spawn_blocking(move || {
        let outcome = runner.run();
        (runner, outcome)
    })
    .await
    .context("Run task panicked")?;
    let duration = start_time.elapsed();

    let exit_code = outcome.with_context(|| {
        format!("Failed to run {}", runner.executable_path().display())
    })?;

    print_capture(runner.stdout(), runner.stderr(), exit_code, !quiet)
        .context("Failed to write captured output")?;

    if let Some(report_path) = &report {
        let env_file = runner.environment_file_path();
        let run_report = RunReport {
            generated_at: chrono::Utc::now(),
            executable: runner.executable_path(),
            env_file: (!env_file.as_os_str().is_empty()).then_some(env_file),
            args: runner.arguments(),
            exit_code,
            stdout: runner.stdout(),
            stderr: runner.stderr(),
            duration_ms: duration_millis(duration),
        };
        write_report(&run_report, report_path)?;
        tracing::debug!(path = %report_path.display(), "wrote run report");
    }

    Ok(ExitCode::from((exit_code & 0xff) as u8))
}
