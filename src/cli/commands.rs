//! # CLI Commands / CLI 命令
//!
//! - `run` - Run one executable / 运行单个可执行文件
//! - `batch` - Run a batch manifest / 运行批量清单

pub mod batch;
pub mod run;
