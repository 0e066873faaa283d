// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

pub mod commands;

pub fn build_cli() -> Command {
    Command::new("envrunner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run an executable with an environment override file and capture its output.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("run")
                .about("Run one executable and replay its captured output.")
                .arg(
                    Arg::new("env-file")
                        .short('e')
                        .long("env-file")
                        .help("File of KEY=VALUE lines appended to the inherited environment")
                        .value_name("ENV_FILE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Write a JSON report of the run to this path")
                        .value_name("REPORT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Do not print the exit code trailer")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("executable")
                        .help("Path to the executable")
                        .value_name("EXECUTABLE")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("args")
                        .help("Arguments passed to the executable")
                        .value_name("ARGS")
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .allow_hyphen_values(true)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("batch")
                .about("Run every job listed in a batch manifest.")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to the batch manifest")
                        .value_name("CONFIG")
                        .default_value("Runs.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Number of jobs to run in parallel")
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("fail-fast")
                        .long("fail-fast")
                        .help("Stop starting new jobs after the first unexpected failure")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Write a JSON report of all jobs to this path")
                        .value_name("REPORT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub async fn run() -> Result<ExitCode> {
    let matches = build_cli().get_matches();
    process_matches(matches).await
}

pub async fn process_matches(matches: ArgMatches) -> Result<ExitCode> {
    init_tracing(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let executable = run_matches
                .get_one::<PathBuf>("executable")
                .cloned()
                .expect("EXECUTABLE is required by clap");
            let env_file = run_matches.get_one::<PathBuf>("env-file").cloned();
            let args: Vec<String> = run_matches
                .get_many::<String>("args")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            let report = run_matches.get_one::<PathBuf>("report").cloned();
            let quiet = run_matches.get_flag("quiet");

            commands::run::execute(executable, env_file, args, report, quiet).await
        }
        Some(("batch", batch_matches)) => {
            let config = batch_matches
                .get_one::<PathBuf>("config")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("Runs.toml")); // Has default
            let jobs = batch_matches.get_one::<usize>("jobs").copied();
            let fail_fast = batch_matches.get_flag("fail-fast");
            let report = batch_matches.get_one::<PathBuf>("report").cloned();

            commands::batch::execute(config, jobs, fail_fast, report).await
        }
        // `subcommand_required` makes clap exit before we get here.
        _ => Ok(ExitCode::SUCCESS),
    }
}
