//! 设备属性与属性黑名单条目。

use std::str::FromStr;

/// 设备属性（键、值、来源）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAttribute {
    pub key: String,
    pub value: String,
    pub origin: String,
}

impl DeviceAttribute {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            origin: origin.into(),
        }
    }
}

/// 属性黑名单条目：键必须相等，值与来源未设置时视为通配。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFilter {
    pub key: String,
    pub value: Option<String>,
    pub origin: Option<String>,
}

impl AttributeFilter {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            origin: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// 条目内各字段为 AND 关系。
    pub fn matches(&self, attribute: &DeviceAttribute) -> bool {
        self.key == attribute.key
            && self.value.as_ref().is_none_or(|value| *value == attribute.value)
            && self.origin.as_ref().is_none_or(|origin| *origin == attribute.origin)
    }

    /// 解析 `;` 分隔的条目列表，空白条目忽略。
    pub fn parse_list(input: &str) -> Result<Vec<Self>, String> {
        input
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for AttributeFilter {
    type Err = String;

    /// 条目格式：`key[=value][@origin]`。
    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let (rest, origin) = match entry.rsplit_once('@') {
            Some((rest, origin)) => (rest, Some(origin.trim())),
            None => (entry, None),
        };
        let (key, value) = match rest.split_once('=') {
            Some((key, value)) => (key.trim(), Some(value.trim())),
            None => (rest.trim(), None),
        };
        if key.is_empty() {
            return Err(format!("attribute filter without key: '{entry}'"));
        }
        Ok(Self {
            key: key.to_string(),
            value: value.filter(|v| !v.is_empty()).map(str::to_string),
            origin: origin.filter(|o| !o.is_empty()).map(str::to_string),
        })
    }
}
