//! 存储层（Storage Layer）
//!
//! 职责：
//! - 定义外部协作方的异步接口（当前状态、设备目录、时序查询）
//! - 提供多种存储实现：
//!   - InfluxDB：连接状态时序查询
//!   - Redis：当前在线状态快照
//!   - PostgreSQL：设备组、位置成员与设备属性
//!   - 内存：测试与本地运行
//!
//! 设计原则：
//! - 所有接口显式接收 RequestContext
//! - 设备组与位置不直接落到时序库，必须先展开

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod influx;
pub mod models;
pub mod postgres;
pub mod redis;
pub mod series;
pub mod traits;
pub mod validation;

pub use connection::*;
pub use error::*;
pub use influx::{InfluxConfig, InfluxStateSeries, parse_query_response};
pub use models::*;
pub use redis::RedisCurrentStateStore;
pub use series::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::{InMemoryCurrentStateStore, InMemoryDeviceDirectory, InMemoryStateSeries};

pub use postgres::PgDeviceDirectory;
