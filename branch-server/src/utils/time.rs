//! 时间工具函数 — 业务时区转换
//!
//! 所有日期→时间戳/星期转换统一在 API handler 或 service 边界完成，
//! repository 层只接收 `i64` Unix millis 或 ISO 日期字符串。
//!
//! 星期编码：Sunday = 0 .. Saturday = 6（与 time_slot.days_of_week 一致）。

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析时段时间字符串 (HH:MM)
///
/// 时段窗口损坏时调用方按"不可用"处理，不中断聚合计算。
pub fn parse_hhmm(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M").ok()
}

/// 解析 IANA 时区名，失败回退 UTC
pub fn parse_tz(name: &str) -> Tz {
    name.parse().unwrap_or_else(|_| {
        tracing::warn!("Unknown timezone '{}', falling back to UTC", name);
        chrono_tz::UTC
    })
}

/// 日期 → 星期编码 (Sunday = 0)
///
/// 只依赖日历日期本身，与服务器本地时间无关。
pub fn day_of_week(date: NaiveDate) -> i32 {
    match date.weekday() {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

/// 当前营业日 (业务时区)
pub fn current_business_date(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_sunday_zero() {
        // 2026-08-09 is a Sunday
        let d = NaiveDate::from_ymd_opt(2026, 8, 9).unwrap();
        assert_eq!(day_of_week(d), 0);
        assert_eq!(day_of_week(d.succ_opt().unwrap()), 1);
    }

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(
            parse_hhmm("19:30"),
            NaiveTime::from_hms_opt(19, 30, 0)
        );
        assert!(parse_hhmm("25:00").is_none());
        assert!(parse_hhmm("dinner").is_none());
    }

    #[test]
    fn test_parse_tz_fallback() {
        assert_eq!(parse_tz("Europe/Madrid"), chrono_tz::Europe::Madrid);
        assert_eq!(parse_tz("Mars/Olympus"), chrono_tz::UTC);
    }
}
