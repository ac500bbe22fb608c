//! 响应与 DTO 转换辅助。

pub mod response;
