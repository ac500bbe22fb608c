use domain::{RequestContext, ResourceId, ResourceKind};
use std::time::Duration;

#[test]
fn request_context_builds() {
    let ctx = RequestContext::new("Bearer token-1", "req-1");

    assert_eq!(ctx.token, "Bearer token-1");
    assert_eq!(ctx.request_id, "req-1");
    assert!(ctx.deadline.is_none());
}

#[test]
fn request_context_zero_timeout_means_no_deadline() {
    let ctx = RequestContext::default().with_timeout(Duration::ZERO);
    assert!(ctx.deadline.is_none());

    let ctx = RequestContext::default().with_timeout(Duration::from_secs(5));
    assert!(ctx.deadline.is_some());
}

#[test]
fn resource_id_classifies_prefixes() {
    let cases = [
        ("device:abc", ResourceKind::Device),
        ("gateway:gw-1", ResourceKind::Gateway),
        ("device-group:g1", ResourceKind::DeviceGroup),
        ("location:l1", ResourceKind::Location),
        ("urn:infai:ses:device:9f3c", ResourceKind::Device),
        ("urn:infai:ses:device-group:7", ResourceKind::DeviceGroup),
    ];
    for (raw, kind) in cases {
        let id = ResourceId::parse(raw).expect("parse");
        assert_eq!(id.kind(), kind, "{raw}");
        assert_eq!(id.as_str(), raw);
    }
}

#[test]
fn resource_id_rejects_unknown_prefix() {
    assert!(ResourceId::parse("sensor:1").is_err());
    assert!(ResourceId::parse("device:").is_err());
    assert!(ResourceId::parse("").is_err());
    assert!(ResourceId::parse("devices:1").is_err());
}

#[test]
fn only_devices_and_gateways_are_queryable() {
    assert!(ResourceKind::Device.is_queryable());
    assert!(ResourceKind::Gateway.is_queryable());
    assert!(!ResourceKind::DeviceGroup.is_queryable());
    assert!(!ResourceKind::Location.is_queryable());
}

#[test]
fn permission_topics_append_instance_to_kind() {
    for kind in [
        ResourceKind::Device,
        ResourceKind::Gateway,
        ResourceKind::DeviceGroup,
        ResourceKind::Location,
    ] {
        assert_eq!(kind.permission_topic(), format!("{}instance", kind.as_str()));
    }
    assert_eq!(ResourceKind::Device.permission_topic(), "deviceinstance");
    assert_eq!(ResourceKind::Gateway.permission_topic(), "gatewayinstance");
}
