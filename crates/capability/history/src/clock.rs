//! 时间来源：生产环境取系统时间，测试中固定。

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定时刻（用于测试）。
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 查询语句中时间戳的渲染时区。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderZone {
    Fixed(FixedOffset),
    /// 进程本地时区，偏移按查询时刻计算。
    Local,
}

impl RenderZone {
    pub fn utc() -> Self {
        RenderZone::Fixed(Utc.fix())
    }

    /// `at` 时刻所适用的偏移。
    pub fn offset_at(&self, at: DateTime<Utc>) -> FixedOffset {
        match self {
            RenderZone::Fixed(offset) => *offset,
            RenderZone::Local => at.with_timezone(&Local).offset().fix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_zone_ignores_instant() {
        let cet = FixedOffset::east_opt(3600).expect("offset");
        let zone = RenderZone::Fixed(cet);
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        assert_eq!(zone.offset_at(winter), cet);
        assert_eq!(zone.offset_at(summer), cet);
        assert_eq!(RenderZone::utc().offset_at(summer).local_minus_utc(), 0);
    }

    #[test]
    fn local_zone_resolves_offset_per_instant() {
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        assert_eq!(
            RenderZone::Local.offset_at(winter),
            winter.with_timezone(&Local).offset().fix()
        );
        assert_eq!(
            RenderZone::Local.offset_at(summer),
            summer.with_timezone(&Local).offset().fix()
        );
    }
}
