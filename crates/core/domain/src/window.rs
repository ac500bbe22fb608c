//! 历史查询窗口描述：`range` / `since` / `until` 三元组。

use chrono::{DateTime, Utc};
use std::time::Duration;

/// 零值时刻 `0001-01-01T00:00:00Z` 的 Unix 秒数，客户端以此表示“未设置”。
const ZERO_INSTANT_SECS: i64 = -62_135_596_800;

/// 窗口参数解析错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowSpecError {
    #[error("invalid range '{0}'")]
    InvalidRange(String),
    #[error("negative range '{0}'")]
    NegativeRange(String),
    #[error("invalid timestamp '{0}', expected RFC 3339")]
    InvalidTimestamp(String),
}

/// 查询窗口描述。
///
/// 三个字段可任意组合；`range` 为零、时间戳为 `None` 或零值时刻即视为未设置。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowSpec {
    pub range: Duration,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl WindowSpec {
    pub fn new(
        range: Duration,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            range,
            since: since.filter(|ts| !is_zero_instant(ts)),
            until: until.filter(|ts| !is_zero_instant(ts)),
        }
    }

    /// 由原始字符串解析窗口；空字符串视为未设置。
    pub fn parse(
        range: Option<&str>,
        since: Option<&str>,
        until: Option<&str>,
    ) -> Result<Self, WindowSpecError> {
        Ok(Self {
            range: range.map(parse_range).transpose()?.unwrap_or_default(),
            since: since.map(parse_timestamp).transpose()?.flatten(),
            until: until.map(parse_timestamp).transpose()?.flatten(),
        })
    }

    pub fn has_range(&self) -> bool {
        !self.range.is_zero()
    }
}

/// 是否为零值时刻（`0001-01-01T00:00:00Z`）。
pub fn is_zero_instant(ts: &DateTime<Utc>) -> bool {
    ts.timestamp() == ZERO_INSTANT_SECS && ts.timestamp_subsec_nanos() == 0
}

/// 解析 RFC 3339 时间戳；空字符串与零值时刻返回 `None`。
pub fn parse_timestamp(input: &str) -> Result<Option<DateTime<Utc>>, WindowSpecError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(input)
        .map(|ts| Some(ts.with_timezone(&Utc)).filter(|ts| !is_zero_instant(ts)))
        .map_err(|_| WindowSpecError::InvalidTimestamp(input.to_string()))
}

/// 解析时长。
///
/// 支持纯整数秒（`3600`）以及 `1h30m`、`250ms`、`1.5h` 形式的时长串，
/// 单位为 `ns`、`us`、`µs`、`ms`、`s`、`m`、`h`。空字符串与 `0` 为零时长。
pub fn parse_range(input: &str) -> Result<Duration, WindowSpecError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Duration::ZERO);
    }
    if let Ok(seconds) = input.parse::<i64>() {
        if seconds < 0 {
            return Err(WindowSpecError::NegativeRange(input.to_string()));
        }
        return Ok(Duration::from_secs(seconds as u64));
    }
    let invalid = || WindowSpecError::InvalidRange(input.to_string());
    let body = match input.strip_prefix('-') {
        Some(_) => return Err(WindowSpecError::NegativeRange(input.to_string())),
        None => input.strip_prefix('+').unwrap_or(input),
    };
    if body.is_empty() {
        return Err(invalid());
    }

    let mut total_nanos: f64 = 0.0;
    let mut rest = body;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        if number_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = &rest[number_len..];
        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            _ => return Err(invalid()),
        };
        total_nanos += value * nanos_per_unit;
        rest = &rest[unit_len..];
    }
    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(Duration::from_nanos(total_nanos.round() as u64))
}
