//! # Reporting Module / 报告模块
//!
//! This module handles the display of run results on the console and the
//! generation of JSON reports.
//!
//! 此模块处理运行结果在控制台上的显示以及 JSON 报告的生成。

pub mod console;
pub mod json;

// Re-export common reporting functions
pub use console::{print_capture, print_summary, print_unexpected_failure_details};
pub use json::{write_batch_report, write_report};
