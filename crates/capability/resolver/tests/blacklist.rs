use connlog_resolver::{IdentifierResolver, is_blacklisted};
use connlog_storage::InMemoryDeviceDirectory;
use domain::{AttributeFilter, DeviceAttribute, RequestContext, ResourceId};
use std::sync::Arc;

fn ids(raw: &[&str]) -> Vec<ResourceId> {
    raw.iter()
        .map(|id| ResourceId::parse(*id).expect("valid id"))
        .collect()
}

fn resolver() -> IdentifierResolver {
    let directory = InMemoryDeviceDirectory::new()
        .with_attribute("device:hidden", DeviceAttribute::new("hidden", "true", "ui"))
        .with_attribute("device:imported", DeviceAttribute::new("hidden", "true", "import"))
        .with_attribute("device:visible", DeviceAttribute::new("hidden", "false", "ui"));
    IdentifierResolver::new(Arc::new(directory))
}

#[tokio::test]
async fn empty_blacklist_is_noop() {
    let input = ids(&["device:hidden", "gateway:1"]);
    let kept = resolver()
        .filter_by_attribute_blacklist(&RequestContext::default(), input.clone(), &[])
        .await
        .expect("filter");
    assert_eq!(kept, input);
}

#[tokio::test]
async fn entry_fields_must_all_match() {
    let blacklist = vec![
        AttributeFilter::key("hidden")
            .with_value("true")
            .with_origin("ui"),
    ];
    let kept = resolver()
        .filter_by_attribute_blacklist(
            &RequestContext::default(),
            ids(&["device:hidden", "device:imported", "device:visible", "gateway:1"]),
            &blacklist,
        )
        .await
        .expect("filter");
    assert_eq!(kept, ids(&["device:imported", "device:visible", "gateway:1"]));
}

#[tokio::test]
async fn any_matching_entry_excludes() {
    let blacklist = vec![
        AttributeFilter::key("hidden").with_origin("import"),
        AttributeFilter::key("hidden").with_value("false"),
    ];
    let kept = resolver()
        .filter_by_attribute_blacklist(
            &RequestContext::default(),
            ids(&["device:hidden", "device:imported", "device:visible"]),
            &blacklist,
        )
        .await
        .expect("filter");
    assert_eq!(kept, ids(&["device:hidden"]));
}

#[test]
fn unset_fields_are_wildcards() {
    let attributes = vec![DeviceAttribute::new("vendor", "acme", "import")];
    assert!(is_blacklisted(&attributes, &[AttributeFilter::key("vendor")]));
    assert!(!is_blacklisted(&attributes, &[AttributeFilter::key("model")]));
    assert!(!is_blacklisted(
        &attributes,
        &[AttributeFilter::key("vendor").with_value("other")]
    ));
    assert!(!is_blacklisted(&[], &[AttributeFilter::key("vendor")]));
}
