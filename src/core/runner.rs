//! # Runner Module / 运行器模块
//!
//! [`Runner`] launches one executable with an argument list and an optional
//! environment override file, waits for it, and keeps its captured stdout,
//! stderr and exit code for inspection.
//!
//! [`Runner`] 使用参数列表和可选的环境覆盖文件启动一个可执行文件，
//! 等待其结束，并保存捕获的 stdout、stderr 和退出码以供查询。

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::core::env_file::{self, EnvEntry};
use crate::core::error::RunError;
use crate::core::validation;

/// Runs an executable and captures its output.
///
/// Paths are checked against the filesystem when [`run`](Runner::run) is
/// called, not when the runner is built. An empty `environment_file_path`
/// means no override file.
///
/// ```no_run
/// use envrunner::core::runner::Runner;
///
/// let mut runner = Runner::new("/usr/bin/env", "", vec![]);
/// let code = runner.run()?;
/// assert_eq!(code, 0);
/// assert!(!runner.stdout().is_empty());
/// # Ok::<(), envrunner::core::error::RunError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Runner {
    executable_path: PathBuf,
    environment_file_path: PathBuf,
    arguments: Vec<String>,

    stdout: String,
    stderr: String,
    exit_code: i32,
}

impl Runner {
    pub fn new(
        executable_path: impl Into<PathBuf>,
        environment_file_path: impl Into<PathBuf>,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            executable_path: executable_path.into(),
            environment_file_path: environment_file_path.into(),
            arguments,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    /// Validates the configured paths, runs the executable to completion and
    /// records its output.
    ///
    /// The child inherits this process's environment, extended with the
    /// entries of the environment file in file order. Stdin is null; stdout
    /// and stderr are buffered in memory until the child exits. This call
    /// blocks the current thread for the lifetime of the child.
    ///
    /// 验证配置的路径，运行可执行文件直到结束并记录其输出。
    ///
    /// # Returns
    /// The child's exit code. Non-zero codes are `Ok`.
    ///
    /// # Errors
    /// A [`RunError`] if validation fails, the environment file cannot be
    /// read, the child cannot be launched, or it ends without an exit code.
    /// On error the previously captured output is left untouched.
    pub fn run(&mut self) -> Result<i32, RunError> {
        validation::verify_executable(&self.executable_path)?;
        if self.has_environment_file() {
            validation::verify_environment_file(&self.environment_file_path)?;
        }

        let overrides = if self.has_environment_file() {
            env_file::load_env_file(&self.environment_file_path)?
        } else {
            Vec::new()
        };

        let mut command = self.build_command(&overrides);
        tracing::debug!(
            executable = %self.executable_path.display(),
            args = ?self.arguments,
            overrides = overrides.len(),
            "spawning child process"
        );

        let output = command.output().map_err(|source| RunError::Execution {
            path: self.executable_path.clone(),
            source,
        })?;

        let exit_code = output.status.code().ok_or_else(|| RunError::Terminated {
            path: self.executable_path.clone(),
            status: output.status,
        })?;

        self.exit_code = exit_code;
        self.stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        self.stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        tracing::debug!(exit_code, "child process exited");

        Ok(exit_code)
    }

    fn build_command(&self, overrides: &[EnvEntry]) -> Command {
        let mut command = Command::new(&self.executable_path);
        command
            .args(&self.arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // Applied in order on top of the inherited environment; a later
        // entry for the same key replaces an earlier one.
        for entry in overrides {
            command.env(entry.key_os(), entry.value_os());
        }
        command
    }

    fn has_environment_file(&self) -> bool {
        !self.environment_file_path.as_os_str().is_empty()
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn executable_path(&self) -> &Path {
        &self.executable_path
    }

    /// The environment file path, empty when none was given.
    pub fn environment_file_path(&self) -> &Path {
        &self.environment_file_path
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}
