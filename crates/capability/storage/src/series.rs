//! 时序查询边界：查询片段、语句结果与执行器接口。
//!
//! 每个查询片段显式携带自己的角色（窗口前沿、窗口主体、窗口后沿），
//! 执行器把角色原样带回结果，归并阶段不依赖语句位置推断角色。

use crate::error::StorageError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{RequestContext, ResourceKind};
use std::collections::HashMap;
use std::fmt;

/// 查询片段在时间线重建中的角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryRole {
    /// 窗口下界之前最近的一条状态
    EdgeBefore,
    /// 窗口内全部状态
    Main,
    /// 窗口上界之后最早的一条状态
    EdgeAfter,
}

impl fmt::Display for QueryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryRole::EdgeBefore => "edge_before",
            QueryRole::Main => "main",
            QueryRole::EdgeAfter => "edge_after",
        };
        f.write_str(name)
    }
}

/// 片段的时间条件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryBounds {
    /// 闭区间内的全部状态，缺失的一侧为无界
    Range {
        lower: Option<DateTime<Utc>>,
        upper: Option<DateTime<Utc>>,
    },
    /// 严格早于该时刻的最近一条
    LastBefore(DateTime<Utc>),
    /// 严格晚于该时刻的最早一条
    FirstAfter(DateTime<Utc>),
}

/// 一个查询片段：角色 + 结构化条件 + 渲染后的查询语句。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateQuery {
    pub role: QueryRole,
    pub kind: ResourceKind,
    pub ids: Vec<String>,
    pub bounds: QueryBounds,
    pub text: String,
}

/// 按资源分组的一组结果行。
///
/// `tags` 中以资源类型名为键保存资源 ID；`values` 的每一行按 `columns` 排列，
/// 类型由时序库决定，解码在归并阶段完成。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSeries {
    pub tags: HashMap<String, String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<serde_json::Value>>,
}

/// 单条语句的执行结果。
#[derive(Debug, Clone, PartialEq)]
pub struct StatementResult {
    pub statement_id: usize,
    /// 对应片段的角色；时序库返回了未提交过的语句编号时为 `None`
    pub role: Option<QueryRole>,
    pub series: Vec<ResultSeries>,
}

/// 时序查询执行器
///
/// 把一组片段合并为一次请求发送给时序库，按片段角色返回结果。
/// 传输失败或查询被拒绝返回 StorageError，本层不重试。
#[async_trait]
pub trait StateSeriesExecutor: Send + Sync {
    async fn execute(
        &self,
        ctx: &RequestContext,
        queries: &[StateQuery],
    ) -> Result<Vec<StatementResult>, StorageError>;
}
