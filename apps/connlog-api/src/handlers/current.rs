//! 当前连接状态 handlers
//!
//! - GET /current/devices/{id}
//! - GET /current/gateways/{id}
//! - POST /current/query/map
//! - POST /current/query/list

use crate::AppState;
use crate::middleware::request_ctx;
use crate::utils::response::{bad_request_error, history_error};
use api_contract::{CurrentQueryRequest, ResourceCurrentStateDto};
use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use connlog_telemetry::RequestIds;
use domain::ResourceKind;

async fn single(
    state: AppState,
    kind: ResourceKind,
    id: String,
    headers: HeaderMap,
    ids: Option<Extension<RequestIds>>,
) -> Response {
    let ctx = request_ctx(&headers, ids.as_deref(), state.request_timeout);
    match state.current.get_single(&ctx, kind, &id).await {
        Ok(connected) => (StatusCode::OK, Json(connected)).into_response(),
        Err(err) => history_error(err),
    }
}

pub async fn get_device_current(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    ids: Option<Extension<RequestIds>>,
) -> Response {
    single(state, ResourceKind::Device, id, headers, ids).await
}

pub async fn get_gateway_current(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    ids: Option<Extension<RequestIds>>,
) -> Response {
    single(state, ResourceKind::Gateway, id, headers, ids).await
}

pub async fn query_current_map(
    State(state): State<AppState>,
    headers: HeaderMap,
    ids: Option<Extension<RequestIds>>,
    body: Result<Json<CurrentQueryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(err) => return bad_request_error(err.body_text()),
    };
    let ctx = request_ctx(&headers, ids.as_deref(), state.request_timeout);
    match state.current.query_map(&ctx, &request.ids).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => history_error(err),
    }
}

pub async fn query_current_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    ids: Option<Extension<RequestIds>>,
    body: Result<Json<CurrentQueryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(err) => return bad_request_error(err.body_text()),
    };
    let ctx = request_ctx(&headers, ids.as_deref(), state.request_timeout);
    match state.current.query_list(&ctx, &request.ids).await {
        Ok(result) => {
            let data: Vec<ResourceCurrentStateDto> = result
                .into_iter()
                .map(|(id, connected)| ResourceCurrentStateDto { id, connected })
                .collect();
            (StatusCode::OK, Json(data)).into_response()
        }
        Err(err) => history_error(err),
    }
}
