//! # File System Operations Module / 文件系统操作模块
//!
//! Permission-bit checks used by run validation, and path resolution for
//! paths read from a batch manifest.
//!
//! 运行验证所使用的权限位检查，以及批量清单中路径的解析。

use anyhow::{Context, Result};
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Any of the owner/group/other execute bits.
pub const EXECUTE_BITS: u32 = 0o111;
/// Any of the owner/group/other read bits.
pub const READ_BITS: u32 = 0o444;

/// Returns `true` if at least one execute permission bit is set.
///
/// On platforms without Unix permission bits every regular file counts as executable.
#[cfg(unix)]
pub fn has_execute_bit(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & EXECUTE_BITS != 0
}

#[cfg(not(unix))]
pub fn has_execute_bit(_metadata: &Metadata) -> bool {
    true
}

/// Returns `true` if at least one read permission bit is set.
#[cfg(unix)]
pub fn has_read_bit(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & READ_BITS != 0
}

#[cfg(not(unix))]
pub fn has_read_bit(_metadata: &Metadata) -> bool {
    true
}

/// Expands `~` and environment variables in a manifest path, then anchors
/// relative results at `base_dir`.
///
/// 展开清单路径中的 `~` 和环境变量，然后将相对路径锚定到 `base_dir`。
///
/// # Arguments
/// * `raw` - The path as written in the manifest
/// * `base_dir` - Directory containing the manifest
///
/// # Returns
/// The resolved path. An empty `raw` stays empty.
pub fn resolve_manifest_path(raw: &str, base_dir: &Path) -> Result<PathBuf> {
    if raw.is_empty() {
        return Ok(PathBuf::new());
    }

    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand path: {raw}"))?;
    let path = PathBuf::from(expanded.into_owned());

    if path.is_relative() {
        Ok(base_dir.join(path))
    } else {
        Ok(path)
    }
}
