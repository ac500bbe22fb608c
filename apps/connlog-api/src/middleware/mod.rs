//! 请求中间件与请求上下文
//!
//! - request_context：注入 request_id/trace_id，设置追踪 span 与响应头
//! - access_token：原样读取 Authorization 头，转发给权限服务
//! - request_ctx：构造带截止时间的 RequestContext

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use connlog_telemetry::{RequestIds, new_request_ids};
use domain::RequestContext;
use std::time::Duration;
use tracing::{Instrument, info_span};

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

/// 读取 Authorization 头（含 `Bearer ` 前缀，原样转发）。
pub fn access_token(headers: &HeaderMap) -> &str {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// 构造本次请求的执行上下文。
pub fn request_ctx(headers: &HeaderMap, ids: Option<&RequestIds>, timeout: Duration) -> RequestContext {
    let request_id = ids.map(|ids| ids.request_id.as_str()).unwrap_or("");
    RequestContext::new(access_token(headers), request_id).with_timeout(timeout)
}
