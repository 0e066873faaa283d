//! # Run Errors / 运行错误
//!
//! Every way a [`Runner::run`](crate::core::runner::Runner::run) call can fail.
//! A child that exits normally, whatever its exit code, is never an error.
//!
//! [`Runner::run`](crate::core::runner::Runner::run) 调用可能失败的所有方式。
//! 正常退出的子进程（无论退出码为何）永远不是错误。

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors returned by the runner before or while launching the child process.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The executable could not be stat'ed.
    #[error("error verifying binary at {}: {source}", path.display())]
    VerifyBinary { path: PathBuf, source: io::Error },

    #[error("binary at {} is not a regular file", path.display())]
    BinaryNotRegular { path: PathBuf },

    #[error("binary at {} is not executable", path.display())]
    BinaryNotExecutable { path: PathBuf },

    /// The environment file could not be stat'ed.
    #[error("error verifying environment file at {}: {source}", path.display())]
    VerifyEnvFile { path: PathBuf, source: io::Error },

    #[error("environment file at {} is not a regular file", path.display())]
    EnvFileNotRegular { path: PathBuf },

    #[error("environment file at {} is not readable", path.display())]
    EnvFileNotReadable { path: PathBuf },

    /// The environment file passed validation but reading it failed.
    #[error("error opening environment file at {}: {source}", path.display())]
    OpenEnvFile { path: PathBuf, source: io::Error },

    /// The OS refused to launch the child, or waiting on it failed.
    #[error("error when running the command: {source}")]
    Execution { path: PathBuf, source: io::Error },

    /// The child ended without an exit code, e.g. it was killed by a signal.
    #[error("error when running the command: {status}")]
    Terminated { path: PathBuf, status: ExitStatus },
}

impl RunError {
    /// Returns `true` when no process was spawned because a precondition failed.
    ///
    /// 如果由于前置条件失败而未创建任何进程，则返回 `true`。
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RunError::VerifyBinary { .. }
                | RunError::BinaryNotRegular { .. }
                | RunError::BinaryNotExecutable { .. }
                | RunError::VerifyEnvFile { .. }
                | RunError::EnvFileNotRegular { .. }
                | RunError::EnvFileNotReadable { .. }
        )
    }
}
