use connlog_permission::{READ_RIGHT, StaticPermissionChecker, filter_permitted};
use domain::{RequestContext, ResourceId};

fn ids(raw: &[&str]) -> Vec<ResourceId> {
    raw.iter()
        .map(|id| ResourceId::parse(*id).expect("valid id"))
        .collect()
}

#[tokio::test]
async fn explicit_false_is_dropped() {
    let checker = StaticPermissionChecker::new()
        .allow("device:ok")
        .deny("device:abc");
    let permitted = filter_permitted(
        &checker,
        &RequestContext::default(),
        ids(&["device:abc", "device:ok"]),
        READ_RIGHT,
    )
    .await
    .expect("filter");
    assert_eq!(permitted, ids(&["device:ok"]));
}

#[tokio::test]
async fn ids_missing_from_response_are_denied() {
    let checker = StaticPermissionChecker::new().allow("gateway:1");
    let permitted = filter_permitted(
        &checker,
        &RequestContext::default(),
        ids(&["device:unknown", "gateway:1", "location:l1"]),
        READ_RIGHT,
    )
    .await
    .expect("filter");
    assert_eq!(permitted, ids(&["gateway:1"]));
}

#[tokio::test]
async fn order_is_preserved_across_kinds() {
    let checker = StaticPermissionChecker::allow_all();
    let requested = ids(&["gateway:2", "device:1", "gateway:1", "device-group:g"]);
    let permitted = filter_permitted(
        &checker,
        &RequestContext::default(),
        requested.clone(),
        READ_RIGHT,
    )
    .await
    .expect("filter");
    assert_eq!(permitted, requested);
}

#[tokio::test]
async fn service_failure_aborts() {
    let checker = StaticPermissionChecker::failing("connection refused");
    let result = filter_permitted(
        &checker,
        &RequestContext::default(),
        ids(&["device:1"]),
        READ_RIGHT,
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn empty_input_needs_no_check() {
    let checker = StaticPermissionChecker::failing("should not be called");
    let permitted = filter_permitted(&checker, &RequestContext::default(), Vec::new(), READ_RIGHT)
        .await
        .expect("filter");
    assert!(permitted.is_empty());
}
