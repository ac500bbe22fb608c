//! 历史连接状态重建能力
//!
//! 职责：
//! - 窗口分类（7 种互斥情形）
//! - 查询规划（带角色的 InfluxQL 片段）
//! - 结果归并（按角色装配 prev/states/next，坏行跳过并记录）
//! - 查询编排：权限过滤 → 标识符展开 → 分类型查询 → 合并
//! - 当前在线状态查询
//!
//! 所有外部调用受 RequestContext 截止时间约束。

pub mod access;
pub mod clock;
pub mod current;
pub mod deadline;
pub mod error;
pub mod planner;
pub mod reconcile;
pub mod service;
pub mod window;

pub use access::{AccessFilter, parse_ids, parse_single};
pub use clock::{Clock, FixedClock, RenderZone, SystemClock};
pub use current::CurrentStateService;
pub use error::HistoryError;
pub use planner::{PlanError, plan};
pub use reconcile::{
    ReconcileError, Reconciled, RowDecodeError, SkippedRow, decode_row, merge, reconcile,
};
pub use service::HistoryService;
pub use window::{WindowCase, classify};
