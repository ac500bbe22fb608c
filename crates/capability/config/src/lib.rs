//! 应用运行配置加载。

use domain::AttributeFilter;
use std::env;
use std::time::Duration;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub influx_url: String,
    pub influx_db: String,
    pub influx_user: Option<String>,
    pub influx_password: Option<String>,
    pub influx_timeout: Duration,
    pub influx_use_utc: bool,
    pub redis_url: String,
    pub database_url: String,
    pub permissions_url: String,
    /// 单次请求的截止时间，零表示不限时
    pub request_timeout: Duration,
    pub device_attribute_blacklist: Vec<AttributeFilter>,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置（测试中使用固定表）。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let reader = Reader { lookup };
        let influx_url = reader.required("CONNLOG_INFLUX_URL")?;
        let database_url = reader.required("CONNLOG_DATABASE_URL")?;
        let permissions_url = reader.required("CONNLOG_PERMISSIONS_URL")?;
        let http_addr = reader.string_with_default("CONNLOG_HTTP_ADDR", "127.0.0.1:8080");
        let influx_db = reader.string_with_default("CONNLOG_INFLUX_DB", "connectionlog");
        let influx_user = reader.optional("CONNLOG_INFLUX_USER");
        let influx_password = reader.optional("CONNLOG_INFLUX_PASSWORD");
        let influx_timeout =
            Duration::from_secs(reader.u64_with_default("CONNLOG_INFLUX_TIMEOUT_SECONDS", 30)?);
        let influx_use_utc = reader.bool_with_default("CONNLOG_INFLUX_USE_UTC", true);
        let redis_url = reader.string_with_default("CONNLOG_REDIS_URL", "redis://127.0.0.1:6379");
        let request_timeout =
            Duration::from_secs(reader.u64_with_default("CONNLOG_REQUEST_TIMEOUT_SECONDS", 30)?);
        let device_attribute_blacklist = match reader.optional("CONNLOG_DEVICE_ATTRIBUTE_BLACKLIST")
        {
            Some(value) => AttributeFilter::parse_list(&value).map_err(|_| {
                ConfigError::Invalid("CONNLOG_DEVICE_ATTRIBUTE_BLACKLIST".to_string(), value)
            })?,
            None => Vec::new(),
        };

        Ok(Self {
            http_addr,
            influx_url,
            influx_db,
            influx_user,
            influx_password,
            influx_timeout,
            influx_use_utc,
            redis_url,
            database_url,
            permissions_url,
            request_timeout,
            device_attribute_blacklist,
        })
    }
}

struct Reader<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Reader<F> {
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    fn optional(&self, key: &str) -> Option<String> {
        match (self.lookup)(key) {
            Some(value) if !value.trim().is_empty() => Some(value),
            _ => None,
        }
    }

    fn string_with_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn u64_with_default(&self, key: &str, default: u64) -> Result<u64, ConfigError> {
        let value = match self.optional(key) {
            Some(value) => value,
            None => return Ok(default),
        };
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid(key.to_string(), value))
    }

    fn bool_with_default(&self, key: &str, default: bool) -> bool {
        match self.optional(key) {
            Some(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
            None => default,
        }
    }
}
