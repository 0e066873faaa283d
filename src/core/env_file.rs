//! # Environment File Module / 环境文件模块
//!
//! Parses environment override files. The format is deliberately literal:
//! one entry per `\n`-separated line, taken verbatim when an `=` appears
//! before any `#`. There is no quoting, escaping, variable expansion or
//! multi-line value support.
//!
//! 解析环境覆盖文件。格式是字面的：每行（以 `\n` 分隔）一个条目，
//! 当 `=` 出现在任何 `#` 之前时原样采用。不支持引号、转义、变量展开或多行值。
//!
//! ```text
//! # comment, skipped
//! KEY1=VALUE1
//! #KEY1=also skipped
//! URL=http://host/#fragment   <- kept, the `=` comes first
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::core::error::RunError;

/// A single raw `KEY=VALUE` line accepted from an environment file.
///
/// The line is stored byte for byte as written, so values that are not valid
/// UTF-8 reach the child unchanged. [`key`](EnvEntry::key) and
/// [`value`](EnvEntry::value) split it at the first `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    raw: Vec<u8>,
    /// Index of the first `=` in `raw`.
    eq: usize,
}

impl EnvEntry {
    /// Accepts `line` if it is an entry line, see [`is_entry_line`].
    pub fn parse(line: impl AsRef<[u8]>) -> Option<Self> {
        let line = line.as_ref();
        entry_separator(line).map(|eq| Self {
            raw: line.to_vec(),
            eq,
        })
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Everything before the first `=`. May be empty.
    pub fn key(&self) -> &[u8] {
        &self.raw[..self.eq]
    }

    /// Everything after the first `=`, including further `=` or `#` characters.
    pub fn value(&self) -> &[u8] {
        &self.raw[self.eq + 1..]
    }

    pub fn key_os(&self) -> OsString {
        bytes_to_os(self.key())
    }

    pub fn value_os(&self) -> OsString {
        bytes_to_os(self.value())
    }
}

#[cfg(unix)]
fn bytes_to_os(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    std::ffi::OsStr::from_bytes(bytes).to_os_string()
}

// Only Unix environments carry arbitrary bytes.
#[cfg(not(unix))]
fn bytes_to_os(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Position of the `=` that makes `line` an entry, if any.
fn entry_separator(line: &[u8]) -> Option<usize> {
    line.iter()
        .position(|&b| b == b'=' || b == b'#')
        .filter(|&i| line[i] == b'=')
}

/// Returns `true` if `line` matches `^[^#]*=.*`: the first `=` or `#` in the
/// line is an `=`.
///
/// 如果行中第一个出现的 `=` 或 `#` 是 `=`，则返回 `true`。
pub fn is_entry_line(line: impl AsRef<[u8]>) -> bool {
    entry_separator(line.as_ref()).is_some()
}

/// Splits `content` on `\n` and keeps the entry lines in file order.
///
/// A `\r` before the line feed is not stripped and ends up in the value.
pub fn parse_env_entries(content: impl AsRef<[u8]>) -> Vec<EnvEntry> {
    content
        .as_ref()
        .split(|&b| b == b'\n')
        .filter_map(|line| {
            let entry = EnvEntry::parse(line);
            if entry.is_none() && !line.is_empty() {
                tracing::trace!(
                    line = %String::from_utf8_lossy(line),
                    "skipping environment file line"
                );
            }
            entry
        })
        .collect()
}

/// Reads the environment file at `path` and returns its entries.
///
/// # Errors
/// [`RunError::OpenEnvFile`] if the file cannot be read, e.g. it was removed
/// after validation.
pub fn load_env_file(path: &Path) -> Result<Vec<EnvEntry>, RunError> {
    let bytes = fs::read(path).map_err(|source| RunError::OpenEnvFile {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_env_entries(&bytes);
    tracing::debug!(
        path = %path.display(),
        count = entries.len(),
        "loaded environment overrides"
    );
    Ok(entries)
}
