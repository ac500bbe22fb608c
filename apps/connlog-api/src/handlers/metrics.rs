//! Telemetry 指标快照。
//!
//! - GET /metrics

use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use connlog_telemetry::metrics;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            historical_queries: snapshot.historical_queries,
            current_queries: snapshot.current_queries,
            store_statements: snapshot.store_statements,
            store_failures: snapshot.store_failures,
            rows_skipped: snapshot.rows_skipped,
            ids_denied: snapshot.ids_denied,
            ids_blacklisted: snapshot.ids_blacklisted,
        })),
    )
        .into_response()
}
