use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use connlog_permission::{HttpPermissionClient, PermissionChecker, PermissionError, READ_RIGHT};
use domain::{RequestContext, ResourceKind};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Received(Arc<Mutex<Vec<(Option<String>, Value)>>>);

async fn answer(
    State(received): State<Received>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<HashMap<String, bool>> {
    let token = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let ids: Vec<String> = body["check_ids"]["ids"]
        .as_array()
        .map(|ids| {
            ids.iter()
                .filter_map(|id| id.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    received.0.lock().expect("lock").push((token, body));
    Json(
        ids.into_iter()
            .map(|id| {
                let allowed = id.ends_with("ok");
                (id, allowed)
            })
            .collect(),
    )
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> HttpPermissionClient {
    HttpPermissionClient::new(format!("{base_url}/"), Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn posts_query_and_forwards_token_verbatim() {
    let received = Received::default();
    let router = Router::new()
        .route("/v3/query", post(answer))
        .with_state(received.clone());
    let base_url = serve(router).await;

    let ctx = RequestContext::new("Bearer token-1", "req-1");
    let ids = vec!["device:ok".to_string(), "device:no".to_string()];
    let result = client(&base_url)
        .check_access(&ctx, ResourceKind::Device, &ids, READ_RIGHT)
        .await
        .expect("check");
    assert_eq!(result.get("device:ok"), Some(&true));
    assert_eq!(result.get("device:no"), Some(&false));

    let received = received.0.lock().expect("lock");
    assert_eq!(received.len(), 1);
    let (token, body) = &received[0];
    assert_eq!(token.as_deref(), Some("Bearer token-1"));
    assert_eq!(
        body,
        &json!({
            "resource": "deviceinstance",
            "check_ids": { "ids": ["device:ok", "device:no"], "rights": "r" }
        })
    );
}

#[tokio::test]
async fn empty_ids_skip_the_request() {
    let received = Received::default();
    let router = Router::new()
        .route("/v3/query", post(answer))
        .with_state(received.clone());
    let base_url = serve(router).await;

    let result = client(&base_url)
        .check_access(&RequestContext::default(), ResourceKind::Gateway, &[], READ_RIGHT)
        .await
        .expect("check");
    assert!(result.is_empty());
    assert!(received.0.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn non_success_status_is_rejected() {
    let router = Router::new().route(
        "/v3/query",
        post(|| async { (StatusCode::FORBIDDEN, "token expired") }),
    );
    let base_url = serve(router).await;

    let err = client(&base_url)
        .check_access(
            &RequestContext::default(),
            ResourceKind::Gateway,
            &["gateway:1".to_string()],
            READ_RIGHT,
        )
        .await
        .expect_err("rejected");
    match err {
        PermissionError::Rejected { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "token expired");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let router = Router::new().route("/v3/query", post(|| async { "not json" }));
    let base_url = serve(router).await;

    let err = client(&base_url)
        .check_access(
            &RequestContext::default(),
            ResourceKind::Device,
            &["device:1".to_string()],
            READ_RIGHT,
        )
        .await
        .expect_err("decode");
    assert!(matches!(err, PermissionError::Decode(_)));
}
