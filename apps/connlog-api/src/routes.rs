//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers：
//! - 健康检查与指标：/health, /metrics
//! - 当前状态：/current/*
//! - 历史时间线：/historical/*

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .route("/current/devices/:id", get(get_device_current))
        .route("/current/gateways/:id", get(get_gateway_current))
        .route("/current/query/map", post(query_current_map))
        .route("/current/query/list", post(query_current_list))
        .route("/historical/devices/:id", get(get_device_history))
        .route("/historical/gateways/:id", get(get_gateway_history))
        .route("/historical/query/map", post(query_historical_map))
        .route("/historical/query/list", post(query_historical_list))
}
