use connlog_storage::{DeviceDirectory, InMemoryDeviceDirectory};
use domain::{DeviceAttribute, RequestContext};

#[tokio::test]
async fn directory_lists_group_and_location_members() {
    let directory = InMemoryDeviceDirectory::new()
        .with_group("device-group:g1", &["device:a", "device:b"])
        .with_location("location:l1", &["device:c"], &["device-group:g1"]);
    let ctx = RequestContext::default();

    let devices = directory
        .list_group_devices(&ctx, "device-group:g1")
        .await
        .expect("group");
    assert_eq!(devices, vec!["device:a".to_string(), "device:b".to_string()]);

    let members = directory
        .find_location_members(&ctx, "location:l1")
        .await
        .expect("location");
    assert_eq!(members.device_ids, vec!["device:c".to_string()]);
    assert_eq!(members.device_group_ids, vec!["device-group:g1".to_string()]);

    let empty = directory
        .list_group_devices(&ctx, "device-group:unknown")
        .await
        .expect("unknown group");
    assert!(empty.is_empty());
}

#[tokio::test]
async fn directory_returns_attributes_for_requested_devices() {
    let directory = InMemoryDeviceDirectory::new()
        .with_attribute("device:a", DeviceAttribute::new("hidden", "true", "ui"))
        .with_attribute("device:b", DeviceAttribute::new("vendor", "acme", "import"));

    let attributes = directory
        .list_device_attributes(
            &RequestContext::default(),
            &["device:a".to_string(), "device:c".to_string()],
        )
        .await
        .expect("attributes");
    assert_eq!(attributes.len(), 1);
    assert_eq!(
        attributes.get("device:a"),
        Some(&vec![DeviceAttribute::new("hidden", "true", "ui")])
    );
}
