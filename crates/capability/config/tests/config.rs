use connlog_config::{AppConfig, ConfigError};
use domain::AttributeFilter;
use std::collections::HashMap;
use std::time::Duration;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

const REQUIRED: [(&str, &str); 3] = [
    ("CONNLOG_INFLUX_URL", "http://influx:8086"),
    ("CONNLOG_DATABASE_URL", "postgres://connlog@db/connlog"),
    ("CONNLOG_PERMISSIONS_URL", "http://permissions:8080"),
];

#[test]
fn defaults_apply_when_optional_vars_absent() {
    let config = AppConfig::from_lookup(lookup(&REQUIRED)).expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:8080");
    assert_eq!(config.influx_db, "connectionlog");
    assert_eq!(config.influx_timeout, Duration::from_secs(30));
    assert!(config.influx_use_utc);
    assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert!(config.influx_user.is_none());
    assert!(config.device_attribute_blacklist.is_empty());
}

#[test]
fn overrides_and_blacklist_are_parsed() {
    let mut pairs = REQUIRED.to_vec();
    pairs.extend([
        ("CONNLOG_HTTP_ADDR", "0.0.0.0:9000"),
        ("CONNLOG_INFLUX_USE_UTC", "false"),
        ("CONNLOG_REQUEST_TIMEOUT_SECONDS", "0"),
        ("CONNLOG_INFLUX_USER", "reader"),
        ("CONNLOG_DEVICE_ATTRIBUTE_BLACKLIST", "hidden=true@ui; vendor"),
    ]);
    let config = AppConfig::from_lookup(lookup(&pairs)).expect("config");
    assert_eq!(config.http_addr, "0.0.0.0:9000");
    assert!(!config.influx_use_utc);
    assert!(config.request_timeout.is_zero());
    assert_eq!(config.influx_user.as_deref(), Some("reader"));
    assert_eq!(
        config.device_attribute_blacklist,
        vec![
            AttributeFilter::key("hidden").with_value("true").with_origin("ui"),
            AttributeFilter::key("vendor"),
        ]
    );
}

#[test]
fn missing_required_var_is_reported() {
    let err = AppConfig::from_lookup(lookup(&REQUIRED[..2])).expect_err("missing");
    assert!(matches!(err, ConfigError::Missing(key) if key == "CONNLOG_PERMISSIONS_URL"));
}

#[test]
fn invalid_number_is_reported() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("CONNLOG_INFLUX_TIMEOUT_SECONDS", "soon"));
    let err = AppConfig::from_lookup(lookup(&pairs)).expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "CONNLOG_INFLUX_TIMEOUT_SECONDS"));
}

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        for (key, value) in REQUIRED {
            std::env::set_var(key, value);
        }
        std::env::set_var("CONNLOG_INFLUX_DB", "history");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.influx_url, "http://influx:8086");
    assert_eq!(config.influx_db, "history");
}
