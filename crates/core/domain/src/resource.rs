//! 资源标识符与资源类型。
//!
//! 标识符是带类型前缀的不透明字符串，例如 `device:abc` 或
//! `urn:infai:ses:device-group:42`。前缀决定资源类型，其余部分不做解释。

use std::fmt;

/// 平台命名空间前缀，出现时先剥离再识别类型。
const URN_NAMESPACE: &str = "urn:infai:ses:";

/// 标识符分类错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("unsupported identifier kind: '{0}'")]
    UnsupportedKind(String),
}

/// 资源类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Device,
    Gateway,
    DeviceGroup,
    Location,
}

impl ResourceKind {
    /// 按匹配顺序排列的类型前缀（`device-group` 必须先于 `device`）。
    const PREFIXES: [(&'static str, ResourceKind); 4] = [
        ("device-group:", ResourceKind::DeviceGroup),
        ("device:", ResourceKind::Device),
        ("gateway:", ResourceKind::Gateway),
        ("location:", ResourceKind::Location),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Device => "device",
            ResourceKind::Gateway => "gateway",
            ResourceKind::DeviceGroup => "device-group",
            ResourceKind::Location => "location",
        }
    }

    /// 是否可直接在时序库中查询（仅设备与网关）。
    pub fn is_queryable(&self) -> bool {
        matches!(self, ResourceKind::Device | ResourceKind::Gateway)
    }

    /// 权限服务中的资源主题名：类型名加 `instance` 后缀。
    pub fn permission_topic(&self) -> &'static str {
        match self {
            ResourceKind::Device => "deviceinstance",
            ResourceKind::Gateway => "gatewayinstance",
            ResourceKind::DeviceGroup => "device-groupinstance",
            ResourceKind::Location => "locationinstance",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 已分类的资源标识符，保留原始字符串。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    kind: ResourceKind,
    raw: String,
}

impl ResourceId {
    /// 解析原始标识符，识别其类型前缀。
    pub fn parse(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        let body = raw.strip_prefix(URN_NAMESPACE).unwrap_or(&raw);
        for (prefix, kind) in ResourceKind::PREFIXES {
            if let Some(rest) = body.strip_prefix(prefix) {
                if rest.is_empty() {
                    break;
                }
                return Ok(Self { kind, raw });
            }
        }
        Err(IdentifierError::UnsupportedKind(raw))
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
