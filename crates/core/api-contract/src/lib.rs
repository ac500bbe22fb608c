//! 稳定的 DTO 与 API 响应契约。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 标准 API 错误响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 时长参数：时长串（`24h`）或整数秒。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RangeValue {
    Seconds(i64),
    Text(String),
}

impl RangeValue {
    /// 统一为字符串形式，交由时长解析器处理。
    pub fn to_range_string(&self) -> String {
        match self {
            RangeValue::Seconds(seconds) => seconds.to_string(),
            RangeValue::Text(text) => text.clone(),
        }
    }
}

/// 历史状态批量查询请求体。
#[derive(Debug, Deserialize)]
pub struct HistoricalQueryRequest {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub range: Option<RangeValue>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub until: Option<String>,
}

/// 单资源历史查询的 URL 参数。
#[derive(Debug, Default, Deserialize)]
pub struct HistoricalQueryParams {
    pub range: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
}

/// 当前状态批量查询请求体。
#[derive(Debug, Deserialize)]
pub struct CurrentQueryRequest {
    #[serde(default)]
    pub ids: Vec<String>,
}

/// 单次连接状态。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDto {
    pub time: DateTime<Utc>,
    pub connected: bool,
}

/// 单资源历史时间线（map 形式的值）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalStatesDto {
    pub prev_state: Option<StateDto>,
    pub states: Vec<StateDto>,
    pub next_state: Option<StateDto>,
}

/// 带 ID 的历史时间线（list 形式的元素）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceHistoricalStatesDto {
    pub id: String,
    #[serde(flatten)]
    pub states: HistoricalStatesDto,
}

/// 带 ID 的当前状态。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCurrentStateDto {
    pub id: String,
    pub connected: bool,
}

/// 指标快照返回结构。
#[derive(Debug, Serialize)]
pub struct MetricsSnapshotDto {
    pub historical_queries: u64,
    pub current_queries: u64,
    pub store_statements: u64,
    pub store_failures: u64,
    pub rows_skipped: u64,
    pub ids_denied: u64,
    pub ids_blacklisted: u64,
}
