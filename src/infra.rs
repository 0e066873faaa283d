//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for envrunner,
//! currently file system helpers such as permission-bit checks.
//!
//! 此模块为 envrunner 提供基础设施服务，
//! 目前为文件系统辅助功能，例如权限位检查。

pub mod fs;
