//! PostgreSQL 存储实现模块
//!
//! 包含以下实现：
//! - DeviceDirectory: PgDeviceDirectory

pub mod directory;

pub use directory::*;
