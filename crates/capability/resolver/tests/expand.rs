use connlog_resolver::{IdentifierResolver, group_by_kind};
use connlog_storage::InMemoryDeviceDirectory;
use domain::{RequestContext, ResourceId, ResourceKind};
use std::sync::Arc;

fn ids(raw: &[&str]) -> Vec<ResourceId> {
    raw.iter()
        .map(|id| ResourceId::parse(*id).expect("valid id"))
        .collect()
}

fn sorted(mut ids: Vec<ResourceId>) -> Vec<String> {
    ids.sort();
    ids.into_iter().map(ResourceId::into_string).collect()
}

#[tokio::test]
async fn location_expands_devices_and_group_members() {
    let directory = InMemoryDeviceDirectory::new()
        .with_location("location:L", &["device:x"], &["device-group:G"])
        .with_group("device-group:G", &["device:y", "device:z"]);
    let resolver = IdentifierResolver::new(Arc::new(directory));

    let leaves = resolver
        .expand(&RequestContext::default(), ids(&["location:L"]))
        .await
        .expect("expand");

    assert_eq!(sorted(leaves), vec!["device:x", "device:y", "device:z"]);
}

#[tokio::test]
async fn devices_and_gateways_pass_through() {
    let resolver = IdentifierResolver::new(Arc::new(InMemoryDeviceDirectory::new()));
    let leaves = resolver
        .expand(
            &RequestContext::default(),
            ids(&["gateway:1", "device:2"]),
        )
        .await
        .expect("expand");
    assert_eq!(leaves, ids(&["gateway:1", "device:2"]));
}

#[tokio::test]
async fn unknown_group_expands_to_nothing() {
    let resolver = IdentifierResolver::new(Arc::new(InMemoryDeviceDirectory::new()));
    let leaves = resolver
        .expand(&RequestContext::default(), ids(&["device-group:none"]))
        .await
        .expect("expand");
    assert!(leaves.is_empty());
}

#[tokio::test]
async fn non_device_members_are_skipped() {
    let directory =
        InMemoryDeviceDirectory::new().with_group("device-group:G", &["device:a", "gateway:b", "junk"]);
    let resolver = IdentifierResolver::new(Arc::new(directory));
    let leaves = resolver
        .expand(&RequestContext::default(), ids(&["device-group:G"]))
        .await
        .expect("expand");
    assert_eq!(leaves, ids(&["device:a"]));
}

#[test]
fn grouping_drops_duplicates_and_keeps_order() {
    let groups = group_by_kind(ids(&["device:b", "gateway:1", "device:a", "device:b"]));
    assert_eq!(
        groups.get(&ResourceKind::Device),
        Some(&vec!["device:b".to_string(), "device:a".to_string()])
    );
    assert_eq!(
        groups.get(&ResourceKind::Gateway),
        Some(&vec!["gateway:1".to_string()])
    );
}
