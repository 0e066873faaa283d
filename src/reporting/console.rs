//! # Console Reporting Module / 控制台报告模块
//!
//! Prints captured output of single runs and colored summaries of batch runs.
//!
//! 打印单次运行的捕获输出以及批量运行的彩色摘要。

use colored::*;
use std::io::{self, Write};

use crate::core::models::{JobResult, JobStatus};

/// Replays a run's captured stdout and stderr on this process's streams,
/// byte for byte, followed by a dimmed exit code line on stderr.
///
/// 将运行捕获的 stdout 和 stderr 原样输出到当前进程的流，
/// 然后在 stderr 上输出一行暗色的退出码。
pub fn print_capture(stdout: &str, stderr: &str, exit_code: i32, show_trailer: bool) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(stdout.as_bytes())?;
    out.flush()?;

    let mut err = io::stderr().lock();
    err.write_all(stderr.as_bytes())?;
    if show_trailer {
        writeln!(err, "{}", format!("[exit code: {exit_code}]").dimmed())?;
    }
    err.flush()
}

/// Prints a formatted summary of batch results to the console.
///
/// ```text
/// --- Batch Summary ---
///   - Status           | Job Name                                 |  Exit |   Duration
///   - Passed           | greet                                    |     0 |    12.31ms
///   - Wrong Exit Code  | flaky                                    |     3 |     4.02ms
///   - Error            | missing                                  |     - |    10.00µs
///   - Skipped          | later                                    |     - |        N/A
/// ```
pub fn print_summary(results: &[JobResult]) {
    println!("\n{}", "--- Batch Summary ---".bold());
    println!(
        "  - {:<16} | {:<40} | {:>5} | {:>10}",
        "Status", "Job Name", "Exit", "Duration"
    );

    for result in results {
        let status_str = result.status.to_string();
        let status_colored = match result.status {
            JobStatus::Passed => status_str.green(),
            JobStatus::Skipped => status_str.dimmed(),
            _ if result.is_allowed_failure() => status_str.yellow(),
            _ => status_str.red(),
        };

        let exit_str = result
            .exit_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "-".to_string());
        let duration_str = if result.status == JobStatus::Skipped {
            "N/A".to_string()
        } else {
            format!("{:.2?}", result.duration)
        };

        println!(
            "  - {:<16} | {:<40} | {:>5} | {:>10}",
            status_colored,
            result.name(),
            exit_str,
            duration_str
        );
    }
}

/// Prints the error or captured output of every job that failed unexpectedly.
///
/// 打印每个意外失败任务的错误或捕获输出。
pub fn print_unexpected_failure_details(unexpected_failures: &[&JobResult]) {
    if unexpected_failures.is_empty() {
        return;
    }

    println!("\n{}", "!!! UNEXPECTED FAILURE DETECTED !!!".red().bold());
    println!("{}", "-".repeat(80));

    for (i, result) in unexpected_failures.iter().enumerate() {
        println!(
            "[{}/{}] {} '{}'",
            i + 1,
            unexpected_failures.len(),
            "Failure in job".red(),
            result.name().cyan()
        );

        match (&result.error, result.exit_code) {
            (Some(error), _) => {
                println!("\n--- {} ---\n", "Error".yellow());
                println!("{error}");
            }
            (None, Some(code)) => {
                println!(
                    "\nexpected exit code {}, got {}",
                    result.job.expected_exit_code,
                    code.to_string().red()
                );
                println!("\n--- {} ---\n", "stdout".yellow());
                println!("{}", result.stdout.trim_end());
                println!("\n--- {} ---\n", "stderr".yellow());
                println!("{}", result.stderr.trim_end());
            }
            (None, None) => {}
        }
        println!("\n{}", "-".repeat(80));
    }
}
