//! # Core Module / 核心模块
//!
//! This module contains the core functionality of envrunner: the [`Runner`]
//! itself, the environment file parser, run validation and errors, and the
//! batch manifest with its executor.
//!
//! 此模块包含 envrunner 的核心功能：[`Runner`] 本身、环境文件解析器、
//! 运行验证与错误，以及批量清单及其执行器。

pub mod config;
pub mod env_file;
pub mod error;
pub mod execution;
pub mod models;
pub mod runner;
pub mod validation;

// Re-exports
pub use error::RunError;
pub use runner::Runner;
