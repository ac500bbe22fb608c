pub mod attribute;
pub mod resource;
pub mod state;
pub mod window;

pub use attribute::{AttributeFilter, DeviceAttribute};
pub use resource::{IdentifierError, ResourceId, ResourceKind};
pub use state::{HistoricalStates, State};
pub use window::{WindowSpec, WindowSpecError, is_zero_instant, parse_range, parse_timestamp};

use std::time::{Duration, Instant};

/// 请求上下文：所有模块共享的执行上下文。
///
/// `token` 原样转发给权限服务；`deadline` 约束本次请求内的全部外部调用。
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub token: String,
    pub request_id: String,
    pub deadline: Option<Instant>,
}

impl RequestContext {
    /// 构造携带访问令牌与请求 ID 的上下文（无截止时间）。
    pub fn new(token: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            request_id: request_id.into(),
            deadline: None,
        }
    }

    /// 以当前时刻为起点设置截止时间；`timeout` 为零表示不限时。
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = if timeout.is_zero() {
            None
        } else {
            Some(Instant::now() + timeout)
        };
        self
    }
}

impl Default for RequestContext {
    /// 空上下文（仅用于测试或占位）。
    fn default() -> Self {
        Self {
            token: "".to_string(),
            request_id: "".to_string(),
            deadline: None,
        }
    }
}
