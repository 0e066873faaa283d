//! # Batch Command Module / 批量命令模块
//!
//! Implements `envrunner batch`, which executes every job of a batch manifest.
//!
//! 实现 `envrunner batch`，执行批量清单中的所有任务。

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::core::{
    config::load_batch_manifest,
    execution::{BatchOptions, run_batch},
};
use crate::reporting::{print_summary, print_unexpected_failure_details, write_batch_report};

/// Executes the batch command with the provided arguments.
///
/// # Arguments
/// * `config` - Path to the batch manifest
/// * `jobs` - Number of parallel jobs, overriding the manifest
/// * `fail_fast` - Stop starting new jobs after an unexpected failure
/// * `report` - Optional path for a JSON report
///
/// # Returns
/// `ExitCode::SUCCESS` when no job failed unexpectedly.
pub async fn execute(
    config: PathBuf,
    jobs: Option<usize>,
    fail_fast: bool,
    report: Option<PathBuf>,
) -> Result<ExitCode> {
    let manifest = load_batch_manifest(&config)
        .with_context(|| format!("Failed to load batch manifest {}", config.display()))?;

    println!("Loading batch manifest from: {}", config.display());

    if manifest.jobs.is_empty() {
        println!("{}", "No jobs to run.".green());
        return Ok(ExitCode::SUCCESS);
    }

    let defaults = BatchOptions::default();
    let options = BatchOptions {
        parallelism: jobs.or(manifest.parallelism).unwrap_or(defaults.parallelism),
        fail_fast: fail_fast || manifest.fail_fast,
    };
    println!(
        "{}",
        format!(
            "Running {} job(s) with parallelism {}",
            manifest.jobs.len(),
            options.parallelism
        )
        .bold()
    );

    let stop_token = setup_signal_handler();
    let results = run_batch(manifest.jobs, &options, stop_token).await;

    print_summary(&results);

    if let Some(report_path) = &report {
        println!("\nWriting JSON report to: {}", report_path.display());
        if let Err(e) = write_batch_report(&results, report_path) {
            eprintln!("{} {:#}", "Failed to write JSON report:".red(), e);
        }
    }

    let unexpected_failures: Vec<_> = results
        .iter()
        .filter(|r| r.is_unexpected_failure())
        .collect();

    if unexpected_failures.is_empty() {
        println!("\n{}", "ALL JOBS PASSED".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        print_unexpected_failure_details(&unexpected_failures);
        Ok(ExitCode::FAILURE)
    }
}

/// Stops launching new jobs on Ctrl-C. Running children are left alone.
fn setup_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!(
                "\n{}",
                "Received Ctrl-C, no new jobs will be started.".yellow()
            );
            token_clone.cancel();
        }
    });

    token
}
