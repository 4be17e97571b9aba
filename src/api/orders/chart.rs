//! 销售时间序列聚合 (补零桶)
//!
//! 桶在查询前就按周期预建为零值序列，再把聚合结果按桶键合并进去——
//! 输出永远是严格时间序的 30/12/12 个桶，空档期也不缺项。
//!
//! 订单归桶和预建桶使用 [`crate::utils::time`] 里同一组键函数
//! (day_key / week_key / month_key)，周起点算法只存在一份。

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::db::models::Order;
use crate::utils::time;

/// 图表周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

/// 一个图表桶
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    /// 展示标签 ("Jan 5" / "Jan 1 - 7" / "Jan 2026")
    pub name: String,
    /// completed 订单的 total_price 之和
    pub sales: f64,
    /// completed 订单数
    pub orders: u64,
}

struct Bucket {
    key: String,
    point: ChartPoint,
}

/// 周期对应的业务日期查询窗口 `[start, end)` (Unix millis)
pub fn period_range(period: ChartPeriod, today: NaiveDate, tz: Tz) -> (i64, i64) {
    let start_date = match period {
        ChartPeriod::Daily => today - Duration::days(29),
        ChartPeriod::Weekly => time::week_start(today) - Duration::weeks(11),
        ChartPeriod::Monthly => time::months_back(today, 11),
    };
    (
        time::day_start_millis(start_date, tz),
        time::day_end_millis(today, tz),
    )
}

/// 预建零值桶并合并订单，输出严格时间序的完整序列
pub fn build_series(period: ChartPeriod, today: NaiveDate, tz: Tz, orders: &[Order]) -> Vec<ChartPoint> {
    let mut buckets = prebuild_buckets(period, today);

    for order in orders {
        let date = time::millis_to_date(order.date, tz);
        let key = bucket_key(period, date);
        // 窗口外的订单 (调用方已按范围过滤) 或键不匹配的订单直接跳过
        if let Some(bucket) = buckets.iter_mut().find(|b| b.key == key) {
            bucket.point.sales += order.total_price;
            bucket.point.orders += 1;
        }
    }

    buckets.into_iter().map(|b| b.point).collect()
}

fn bucket_key(period: ChartPeriod, date: NaiveDate) -> String {
    match period {
        ChartPeriod::Daily => time::day_key(date),
        ChartPeriod::Weekly => time::week_key(date),
        ChartPeriod::Monthly => time::month_key(date),
    }
}

fn prebuild_buckets(period: ChartPeriod, today: NaiveDate) -> Vec<Bucket> {
    match period {
        ChartPeriod::Daily => (0..30)
            .rev()
            .map(|back| {
                let date = today - Duration::days(back);
                Bucket {
                    key: time::day_key(date),
                    point: zero_point(time::day_label(date)),
                }
            })
            .collect(),
        ChartPeriod::Weekly => {
            let current_week = time::week_start(today);
            (0..12)
                .rev()
                .map(|back| {
                    let start = current_week - Duration::weeks(back);
                    Bucket {
                        key: time::day_key(start),
                        point: zero_point(time::week_label(start)),
                    }
                })
                .collect()
        }
        ChartPeriod::Monthly => (0..12)
            .rev()
            .map(|back| {
                let month = time::months_back(today, back);
                Bucket {
                    key: time::month_key(month),
                    point: zero_point(time::month_label(month)),
                }
            })
            .collect(),
    }
}

fn zero_point(name: String) -> ChartPoint {
    ChartPoint {
        name,
        sales: 0.0,
        orders: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Customer, OrderStatus};
    use chrono_tz::UTC;
    use surrealdb::RecordId;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn completed_order(date_millis: i64, total: f64) -> Order {
        Order {
            id: None,
            order_number: 1,
            table: RecordId::from_table_key("dining_table", "t1"),
            products: vec![],
            price: total,
            tax: 0.0,
            total_price: total,
            customer: Customer {
                name: "Walk-in".to_string(),
            },
            status: OrderStatus::Completed,
            payment_method: None,
            tip: 0.0,
            date: date_millis,
            created_at: date_millis,
            updated_at: date_millis,
            is_deleted: false,
        }
    }

    #[test]
    fn daily_series_has_exactly_30_buckets_when_empty() {
        let series = build_series(ChartPeriod::Daily, d(2026, 8, 30), UTC, &[]);
        assert_eq!(series.len(), 30);
        assert!(series.iter().all(|p| p.sales == 0.0 && p.orders == 0));
        assert_eq!(series.last().unwrap().name, "Aug 30");
        assert_eq!(series.first().unwrap().name, "Aug 1");
    }

    #[test]
    fn weekly_and_monthly_series_have_12_buckets() {
        assert_eq!(
            build_series(ChartPeriod::Weekly, d(2026, 8, 30), UTC, &[]).len(),
            12
        );
        assert_eq!(
            build_series(ChartPeriod::Monthly, d(2026, 8, 30), UTC, &[]).len(),
            12
        );
    }

    #[test]
    fn orders_merge_into_matching_day_bucket() {
        let today = d(2026, 8, 30);
        let millis = time::day_start_millis(today, UTC) + 3_600_000;
        let orders = vec![completed_order(millis, 40.0), completed_order(millis, 2.5)];
        let series = build_series(ChartPeriod::Daily, today, UTC, &orders);
        let last = series.last().unwrap();
        assert_eq!(last.sales, 42.5);
        assert_eq!(last.orders, 2);
        // 其余桶保持零值
        assert!(series[..29].iter().all(|p| p.sales == 0.0));
    }

    #[test]
    fn sunday_order_lands_in_monday_started_week() {
        let today = d(2026, 8, 30); // Sunday, week of Aug 24
        let millis = time::day_start_millis(today, UTC);
        let series = build_series(ChartPeriod::Weekly, today, UTC, &[completed_order(millis, 10.0)]);
        let last = series.last().unwrap();
        assert_eq!(last.name, "Aug 24 - 30");
        assert_eq!(last.orders, 1);
    }

    #[test]
    fn monthly_labels_cover_a_year_back() {
        let series = build_series(ChartPeriod::Monthly, d(2026, 1, 15), UTC, &[]);
        assert_eq!(series.first().unwrap().name, "Feb 2025");
        assert_eq!(series.last().unwrap().name, "Jan 2026");
    }

    #[test]
    fn period_range_is_half_open_and_covers_today() {
        let today = d(2026, 8, 30);
        let (start, end) = period_range(ChartPeriod::Daily, today, UTC);
        let today_noon = time::day_start_millis(today, UTC) + 12 * 3_600_000;
        assert!(today_noon >= start && today_noon < end);
        // 30 days wide
        assert_eq!(end - start, 30 * 24 * 3_600_000);
    }
}
