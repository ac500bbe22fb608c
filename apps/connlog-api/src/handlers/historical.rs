//! 历史连接状态 handlers
//!
//! - GET /historical/devices/{id}
//! - GET /historical/gateways/{id}
//! - POST /historical/query/map
//! - POST /historical/query/list

use crate::AppState;
use crate::middleware::request_ctx;
use crate::utils::response::{bad_request_error, history_error, states_to_dto};
use api_contract::{
    HistoricalQueryParams, HistoricalQueryRequest, HistoricalStatesDto,
    ResourceHistoricalStatesDto,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use connlog_telemetry::RequestIds;
use domain::{ResourceKind, WindowSpec};
use std::collections::HashMap;

fn window_spec(
    range: Option<&str>,
    since: Option<&str>,
    until: Option<&str>,
) -> Result<WindowSpec, Response> {
    WindowSpec::parse(range, since, until).map_err(|err| bad_request_error(err.to_string()))
}

async fn single(
    state: AppState,
    kind: ResourceKind,
    id: String,
    params: HistoricalQueryParams,
    headers: HeaderMap,
    ids: Option<Extension<RequestIds>>,
) -> Response {
    let spec = match window_spec(
        params.range.as_deref(),
        params.since.as_deref(),
        params.until.as_deref(),
    ) {
        Ok(spec) => spec,
        Err(response) => return response,
    };
    let ctx = request_ctx(&headers, ids.as_deref(), state.request_timeout);
    match state.history.get_single(&ctx, kind, &id, &spec).await {
        Ok(states) => (StatusCode::OK, Json(states_to_dto(states))).into_response(),
        Err(err) => history_error(err),
    }
}

pub async fn get_device_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HistoricalQueryParams>,
    headers: HeaderMap,
    ids: Option<Extension<RequestIds>>,
) -> Response {
    single(state, ResourceKind::Device, id, params, headers, ids).await
}

pub async fn get_gateway_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HistoricalQueryParams>,
    headers: HeaderMap,
    ids: Option<Extension<RequestIds>>,
) -> Response {
    single(state, ResourceKind::Gateway, id, params, headers, ids).await
}

fn body_spec(
    body: Result<Json<HistoricalQueryRequest>, JsonRejection>,
) -> Result<(Vec<String>, WindowSpec), Response> {
    let Json(request) = body.map_err(|err| bad_request_error(err.body_text()))?;
    let range = request.range.map(|range| range.to_range_string());
    let spec = window_spec(
        range.as_deref(),
        request.since.as_deref(),
        request.until.as_deref(),
    )?;
    Ok((request.ids, spec))
}

pub async fn query_historical_map(
    State(state): State<AppState>,
    headers: HeaderMap,
    ids: Option<Extension<RequestIds>>,
    body: Result<Json<HistoricalQueryRequest>, JsonRejection>,
) -> Response {
    let (resource_ids, spec) = match body_spec(body) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };
    let ctx = request_ctx(&headers, ids.as_deref(), state.request_timeout);
    match state.history.query_map(&ctx, &resource_ids, &spec).await {
        Ok(result) => {
            let data: HashMap<String, HistoricalStatesDto> = result
                .into_iter()
                .map(|(id, states)| (id, states_to_dto(states)))
                .collect();
            (StatusCode::OK, Json(data)).into_response()
        }
        Err(err) => history_error(err),
    }
}

pub async fn query_historical_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    ids: Option<Extension<RequestIds>>,
    body: Result<Json<HistoricalQueryRequest>, JsonRejection>,
) -> Response {
    let (resource_ids, spec) = match body_spec(body) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };
    let ctx = request_ctx(&headers, ids.as_deref(), state.request_timeout);
    match state.history.query_list(&ctx, &resource_ids, &spec).await {
        Ok(result) => {
            let data: Vec<ResourceHistoricalStatesDto> = result
                .into_iter()
                .map(|(id, states)| ResourceHistoricalStatesDto {
                    id,
                    states: states_to_dto(states),
                })
                .collect();
            (StatusCode::OK, Json(data)).into_response()
        }
        Err(err) => history_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_range_is_bad_request() {
        let response = window_spec(Some("-5m"), None, None).expect_err("negative");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn blank_params_mean_unset() {
        let spec = window_spec(Some(""), Some(""), None).expect("spec");
        assert_eq!(spec, WindowSpec::default());
    }
}
