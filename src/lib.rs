//! # envrunner Library / envrunner 库
//!
//! Runs an executable with an optional environment override file and
//! captures its standard output, standard error and exit code.
//!
//! 使用可选的环境覆盖文件运行可执行文件，并捕获其标准输出、标准错误和退出码。
//!
//! ## Modules / 模块
//!
//! - `core` - The runner, environment file parsing, validation and batch execution
//! - `infra` - File system helpers
//! - `reporting` - Console output and JSON reports
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 运行器、环境文件解析、验证和批量执行
//! - `infra` - 文件系统辅助功能
//! - `reporting` - 控制台输出和 JSON 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::env_file;
pub use crate::core::{RunError, Runner};
