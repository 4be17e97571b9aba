//! 时间工具函数 — 业务时区转换与时间桶键
//!
//! 所有日期→时间戳转换统一在这里完成，repository 层只接收 `i64` Unix millis。
//!
//! 图表聚合的"桶键"(日/周/月) 也集中定义于此：预建桶和订单归桶必须使用
//! 同一个键函数，否则周起点算法稍有出入就会静默丢数据。

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// 当前 Unix 时间戳 (毫秒)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// 业务时区的今天
pub fn today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// 日期 + 时分秒 → Unix millis (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(hour, min, sec).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// 日期结束 → 次日 00:00:00 的 Unix millis (业务时区)
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_hms_to_millis(next_day, 0, 0, 0, tz)
}

/// 当月 1 号
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 下月 1 号 (当月结束的开区间边界)
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// 往前回退 `months` 个月，取该月 1 号
pub fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month() as i32 - 1 - months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// 所在周的周一
///
/// 预建周桶和订单归桶共用此函数 (days-since-Monday 算法只实现一次)。
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(days)
}

/// Unix millis → 业务时区日期
pub fn millis_to_date(millis: i64, tz: Tz) -> NaiveDate {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| {
            DateTime::from_timestamp_millis(millis)
                .unwrap_or_default()
                .with_timezone(&tz)
                .date_naive()
        })
}

// ── 时间桶键 (图表聚合) ──────────────────────────────────────────────

/// 日桶键: "2026-08-30"
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 周桶键: 所在周周一的日桶键
pub fn week_key(date: NaiveDate) -> String {
    day_key(week_start(date))
}

/// 月桶键: "2026-08"
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

// ── 展示标签 ────────────────────────────────────────────────────────

/// 日标签: "Aug 30"
pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), date.day())
}

/// 周标签: 同月 "Aug 3 - 9"，跨月 "Aug 31 - Sep 6"
pub fn week_label(start: NaiveDate) -> String {
    let end = start + Duration::days(6);
    if start.month() == end.month() {
        format!("{} {} - {}", start.format("%b"), start.day(), end.day())
    } else {
        format!("{} - {}", day_label(start), day_label(end))
    }
}

/// 月标签: "Aug 2026"
pub fn month_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_start_is_monday() {
        // 2026-08-30 is a Sunday, week starts 2026-08-24 (Monday)
        assert_eq!(week_start(d(2026, 8, 30)), d(2026, 8, 24));
        // Monday maps to itself
        assert_eq!(week_start(d(2026, 8, 24)), d(2026, 8, 24));
        // Tuesday maps back one day
        assert_eq!(week_start(d(2026, 8, 25)), d(2026, 8, 24));
    }

    #[test]
    fn week_key_matches_prebuilt_bucket_key() {
        // every day of a week must share the Monday's key
        let monday = d(2026, 8, 24);
        for offset in 0..7 {
            let day = monday + Duration::days(offset);
            assert_eq!(week_key(day), day_key(monday));
        }
    }

    #[test]
    fn month_arithmetic_handles_year_rollover() {
        assert_eq!(next_month_start(d(2026, 12, 15)), d(2027, 1, 1));
        assert_eq!(months_back(d(2026, 2, 28), 11), d(2025, 3, 1));
        assert_eq!(months_back(d(2026, 2, 28), 2), d(2025, 12, 1));
        assert_eq!(months_back(d(2026, 2, 28), 0), d(2026, 2, 1));
    }

    #[test]
    fn labels_format_like_charts_expect() {
        assert_eq!(day_label(d(2026, 1, 5)), "Jan 5");
        assert_eq!(week_label(d(2026, 8, 3)), "Aug 3 - 9");
        assert_eq!(week_label(d(2026, 8, 31)), "Aug 31 - Sep 6");
        assert_eq!(month_label(d(2026, 8, 1)), "Aug 2026");
    }

    #[test]
    fn day_bounds_are_half_open() {
        let tz = chrono_tz::UTC;
        let start = day_start_millis(d(2026, 8, 30), tz);
        let end = day_end_millis(d(2026, 8, 30), tz);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
    }
}
