//! 连接状态 HTTP API：历史时间线、当前状态、健康检查与指标。

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

use axum::Router;
use connlog_history::{CurrentStateService, HistoryService};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub history: Arc<HistoryService>,
    pub current: Arc<CurrentStateService>,
    /// 单次请求的截止时间，零表示不限时
    pub request_timeout: Duration,
}

/// 组装带中间件的应用路由。
pub fn create_app(state: AppState) -> Router {
    routes::create_api_router()
        .with_state(state)
        // 注入 request_id/trace_id
        .layer(axum::middleware::from_fn(middleware::request_context))
        .layer(TraceLayer::new_for_http())
}
