//! # Validation Module / 验证模块
//!
//! Filesystem preconditions checked at the start of every run. Nothing here
//! runs at construction time, so a runner can be built for a path that does
//! not exist yet.
//!
//! 每次运行开始时检查的文件系统前置条件。

use std::fs;
use std::path::Path;

use crate::core::error::RunError;
use crate::infra::fs::{has_execute_bit, has_read_bit};

/// Verifies that `path` is a regular file with at least one execute bit set.
///
/// Symlinks are followed, so a link to an executable is accepted.
///
/// 验证 `path` 是至少设置了一个执行位的普通文件。
pub fn verify_executable(path: &Path) -> Result<(), RunError> {
    let metadata = fs::metadata(path).map_err(|source| RunError::VerifyBinary {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(RunError::BinaryNotRegular {
            path: path.to_path_buf(),
        });
    }
    if !has_execute_bit(&metadata) {
        return Err(RunError::BinaryNotExecutable {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Verifies that `path` is a regular file with at least one read bit set.
///
/// 验证 `path` 是至少设置了一个读取位的普通文件。
pub fn verify_environment_file(path: &Path) -> Result<(), RunError> {
    let metadata = fs::metadata(path).map_err(|source| RunError::VerifyEnvFile {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(RunError::EnvFileNotRegular {
            path: path.to_path_buf(),
        });
    }
    if !has_read_bit(&metadata) {
        return Err(RunError::EnvFileNotReadable {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}
