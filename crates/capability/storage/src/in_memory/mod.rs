//! 内存存储实现（用于测试与本地运行）。

pub mod current;
pub mod directory;
pub mod series;

pub use current::*;
pub use directory::*;
pub use series::*;
