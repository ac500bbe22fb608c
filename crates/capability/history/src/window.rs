//! 窗口分类：把 `range`/`since`/`until` 组合归入 7 种互斥情形。
//!
//! 情形按固定优先级判定，同时设置三者时 `since + until` 生效，`range` 被忽略。

use chrono::{DateTime, TimeDelta, Utc};
use domain::{WindowSpec, WindowSpecError, is_zero_instant};

/// 窗口情形，携带生效的窗口边界。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCase {
    /// [since, until]，两侧边缘
    SinceUntil {
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    },
    /// [until - range, until]，两侧边缘
    RangeUntil {
        lower: DateTime<Utc>,
        until: DateTime<Utc>,
    },
    /// [since, since + range]，两侧边缘
    RangeSince {
        since: DateTime<Utc>,
        upper: DateTime<Utc>,
    },
    /// [now - range, now]，仅前沿
    RangeToNow {
        lower: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    /// (-∞, until]，仅后沿
    UntilOnly { until: DateTime<Utc> },
    /// [since, +∞)，仅前沿
    SinceOnly { since: DateTime<Utc> },
    /// (-∞, now]，无边缘
    Unbounded { now: DateTime<Utc> },
}

impl WindowCase {
    /// 窗口下界与上界，`None` 表示该侧无界。
    pub fn bounds(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match *self {
            WindowCase::SinceUntil { since, until } => (Some(since), Some(until)),
            WindowCase::RangeUntil { lower, until } => (Some(lower), Some(until)),
            WindowCase::RangeSince { since, upper } => (Some(since), Some(upper)),
            WindowCase::RangeToNow { lower, now } => (Some(lower), Some(now)),
            WindowCase::UntilOnly { until } => (None, Some(until)),
            WindowCase::SinceOnly { since } => (Some(since), None),
            WindowCase::Unbounded { now } => (None, Some(now)),
        }
    }

    pub fn needs_edge_before(&self) -> bool {
        matches!(
            self,
            WindowCase::SinceUntil { .. }
                | WindowCase::RangeUntil { .. }
                | WindowCase::RangeSince { .. }
                | WindowCase::RangeToNow { .. }
                | WindowCase::SinceOnly { .. }
        )
    }

    pub fn needs_edge_after(&self) -> bool {
        matches!(
            self,
            WindowCase::SinceUntil { .. }
                | WindowCase::RangeUntil { .. }
                | WindowCase::RangeSince { .. }
                | WindowCase::UntilOnly { .. }
        )
    }

    /// 用于日志的情形序号（1-7）。
    pub fn ordinal(&self) -> u8 {
        match self {
            WindowCase::SinceUntil { .. } => 1,
            WindowCase::RangeUntil { .. } => 2,
            WindowCase::RangeSince { .. } => 3,
            WindowCase::RangeToNow { .. } => 4,
            WindowCase::UntilOnly { .. } => 5,
            WindowCase::SinceOnly { .. } => 6,
            WindowCase::Unbounded { .. } => 7,
        }
    }
}

/// 按优先级判定窗口情形。
///
/// 零值时刻视为未设置。`range` 超出可表示的时间范围时返回 `InvalidRange`。
pub fn classify(spec: &WindowSpec, now: DateTime<Utc>) -> Result<WindowCase, WindowSpecError> {
    let range = || {
        TimeDelta::from_std(spec.range)
            .map_err(|_| WindowSpecError::InvalidRange(format!("{:?}", spec.range)))
    };
    let overflow = || WindowSpecError::InvalidRange(format!("{:?}", spec.range));

    let since = spec.since.filter(|ts| !is_zero_instant(ts));
    let until = spec.until.filter(|ts| !is_zero_instant(ts));
    let case = match (since, until, spec.has_range()) {
        (Some(since), Some(until), _) => WindowCase::SinceUntil { since, until },
        (None, Some(until), true) => WindowCase::RangeUntil {
            lower: until.checked_sub_signed(range()?).ok_or_else(overflow)?,
            until,
        },
        (Some(since), None, true) => WindowCase::RangeSince {
            since,
            upper: since.checked_add_signed(range()?).ok_or_else(overflow)?,
        },
        (None, None, true) => WindowCase::RangeToNow {
            lower: now.checked_sub_signed(range()?).ok_or_else(overflow)?,
            now,
        },
        (None, Some(until), false) => WindowCase::UntilOnly { until },
        (Some(since), None, false) => WindowCase::SinceOnly { since },
        (None, None, false) => WindowCase::Unbounded { now },
    };
    Ok(case)
}
