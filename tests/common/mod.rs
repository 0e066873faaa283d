// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

pub fn setup_test_environment() -> TempDir {
    tempdir().expect("Failed to create temporary directory")
}

/// Writes `content` to `dir/name` and applies `mode`.
#[cfg(unix)]
pub fn write_file_with_mode(dir: &Path, name: &str, content: &str, mode: u32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write file");
    fs::set_permissions(&path, fs::Permissions::from_mode(mode))
        .expect("Failed to set permissions");
    path
}

/// Writes an executable `/bin/sh` script.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    write_file_with_mode(dir, name, &format!("#!/bin/sh\n{body}"), 0o755)
}

/// Writes a readable environment file.
#[cfg(unix)]
pub fn write_env_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    write_file_with_mode(dir, name, content, 0o644)
}

/// The script used by most runner tests: `$KEY1` to stdout, `$KEY2` to
/// stderr, exit 42.
pub const ECHO_KEYS_SCRIPT: &str = "echo $KEY1\necho $KEY2 >&2\nexit 42\n";

pub const ECHO_KEYS_ENV: &str = "\n#KEY1=THISLINESHOULDBEIGNORED\nKEY1=VALUE1\nKEY2=VALUE2\n";

/// Writes `Runs.toml` into `dir`.
pub fn write_manifest(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("Runs.toml");
    fs::write(&path, content).expect("Failed to write manifest");
    path
}
