//! HTTP 响应辅助函数和 DTO 转换
//!
//! - 错误响应：auth_error, bad_request_error, not_found_error, internal_error, history_error
//! - DTO 转换：states_to_dto, state_to_dto

use api_contract::{ApiResponse, HistoricalStatesDto, StateDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use connlog_history::HistoryError;
use domain::{HistoricalStates, State};
use tracing::warn;

/// 权限不足响应
pub fn auth_error(message: impl Into<String>) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error("AUTH.UNAUTHORIZED", message.into())),
    )
        .into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 内部错误响应
pub fn internal_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message.into())),
    )
        .into_response()
}

/// 查询错误映射为 HTTP 响应
pub fn history_error(err: HistoryError) -> Response {
    match err {
        HistoryError::AccessDenied(_) => auth_error("access denied"),
        HistoryError::NotFound(_) => not_found_error(),
        err if err.is_client_error() => bad_request_error(err.to_string()),
        err => {
            warn!(target: "connlog.history", error = %err, "request_failed");
            internal_error(err.to_string())
        }
    }
}

/// State 转 StateDto
pub fn state_to_dto(state: State) -> StateDto {
    StateDto {
        time: state.time,
        connected: state.connected,
    }
}

/// HistoricalStates 转 HistoricalStatesDto
pub fn states_to_dto(states: HistoricalStates) -> HistoricalStatesDto {
    HistoricalStatesDto {
        prev_state: states.prev_state.map(state_to_dto),
        states: states.states.into_iter().map(state_to_dto).collect(),
        next_state: states.next_state.map(state_to_dto),
    }
}
