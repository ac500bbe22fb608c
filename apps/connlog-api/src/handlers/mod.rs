//! Handlers 模块

pub mod current;
pub mod health;
pub mod historical;
pub mod metrics;

pub use current::*;
pub use health::*;
pub use historical::*;
pub use metrics::*;
