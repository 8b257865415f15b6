// src/aggregator.rs
use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone};
use rust_decimal::Decimal;

use crate::error::{QuotaError, Result};
use crate::models::DepositRecord;
use crate::window::Window;

/// Deposit ceilings for one VIP tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierCeilings {
    pub day: Decimal,
    pub month: Decimal,
}

impl TierCeilings {
    pub fn new(day: i64, month: i64) -> Self {
        Self {
            day: Decimal::from(day),
            month: Decimal::from(month),
        }
    }

    pub fn for_window(&self, window: Window) -> Decimal {
        match window {
            Window::Day => self.day,
            Window::Month => self.month,
        }
    }
}

/// Immutable tier -> ceilings mapping, handed to the calculator at call time
#[derive(Debug, Clone, PartialEq)]
pub struct VipQuotaTable {
    tiers: HashMap<u8, TierCeilings>,
}

impl Default for VipQuotaTable {
    fn default() -> Self {
        Self::new([
            (1, TierCeilings::new(150_000, 2_000_000)),
            (2, TierCeilings::new(500_000, 4_500_000)),
            (3, TierCeilings::new(1_000_000, 6_000_000)),
            (4, TierCeilings::new(2_000_000, 10_000_000)),
        ])
    }
}

impl VipQuotaTable {
    pub fn new(tiers: impl IntoIterator<Item = (u8, TierCeilings)>) -> Self {
        Self {
            tiers: tiers.into_iter().collect(),
        }
    }

    pub fn ceilings(&self, tier: u8) -> Result<TierCeilings> {
        self.tiers
            .get(&tier)
            .copied()
            .ok_or(QuotaError::InvalidTier(tier))
    }
}

// A rounded result drops below the wider operand's scale; overflow yields None.
fn exact(lhs: Decimal, op: char, rhs: Decimal, result: Option<Decimal>) -> Result<Decimal> {
    match result {
        Some(value) if value.scale() >= lhs.scale().max(rhs.scale()) => Ok(value),
        _ => Err(QuotaError::Inexact(format!("{lhs} {op} {rhs}"))),
    }
}

/// Exact decimal total of a window's amounts
pub fn window_total(records: &[DepositRecord]) -> Result<Decimal> {
    records.iter().try_fold(Decimal::ZERO, |total, r| {
        exact(total, '+', r.amount, total.checked_add(r.amount))
    })
}

/// `ceiling - sum(amount)`. Negative means the window is over quota.
pub fn compute_remaining(records: &[DepositRecord], ceiling: Decimal) -> Result<Decimal> {
    let total = window_total(records)?;
    exact(ceiling, '-', total, ceiling.checked_sub(total))
}

/// Instant the record leaves `window_duration`, shown in `zone`
pub fn project_unlock<Tz: TimeZone>(
    record: &DepositRecord,
    window_duration: Duration,
    zone: &Tz,
) -> Option<DateTime<Tz>> {
    let completed = DateTime::from_timestamp_millis(record.completed_at)?;
    let unlock = completed.checked_add_signed(window_duration)?;
    Some(unlock.with_timezone(zone))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DepositStatus;
    use crate::window::classify;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn rec(completed_at: i64, amount: &str) -> DepositRecord {
        DepositRecord {
            order_id: format!("o-{completed_at}"),
            asset: "USDT".into(),
            status: DepositStatus::Success,
            completed_at,
            amount: Decimal::from_str(amount).unwrap(),
        }
    }

    #[test]
    fn default_table_matches_published_tiers() {
        let table = VipQuotaTable::default();
        assert_eq!(table.ceilings(1).unwrap(), TierCeilings::new(150_000, 2_000_000));
        assert_eq!(table.ceilings(4).unwrap(), TierCeilings::new(2_000_000, 10_000_000));
    }

    #[test]
    fn unknown_tier_is_an_error() {
        let table = VipQuotaTable::default();
        assert!(matches!(table.ceilings(0), Err(QuotaError::InvalidTier(0))));
        assert!(matches!(table.ceilings(5), Err(QuotaError::InvalidTier(5))));
    }

    #[test]
    fn injected_table_is_used() {
        let table = VipQuotaTable::new([(9, TierCeilings::new(10, 20))]);
        assert_eq!(table.ceilings(9).unwrap().for_window(Window::Month), Decimal::from(20));
        assert!(table.ceilings(1).is_err());
    }

    #[test]
    fn sum_is_exact() {
        let records = vec![rec(1, "0.1"), rec(2, "0.2"), rec(3, "0.3")];
        assert_eq!(window_total(&records).unwrap(), Decimal::from_str("0.6").unwrap());
        assert_eq!(
            compute_remaining(&records, Decimal::ONE).unwrap(),
            Decimal::from_str("0.4").unwrap()
        );
    }

    #[test]
    fn sum_is_order_independent() {
        let mut records = vec![
            rec(1, "1234.5678"),
            rec(2, "0.00000001"),
            rec(3, "99999.99999999"),
        ];
        let forward = window_total(&records).unwrap();
        records.reverse();
        assert_eq!(forward, window_total(&records).unwrap());
    }

    #[test]
    fn sum_keeps_every_fractional_digit() {
        let records = vec![rec(1, "1000"), rec(2, "0.0000000000000000000000001")];
        assert_eq!(
            window_total(&records).unwrap(),
            Decimal::from_str("1000.0000000000000000000000001").unwrap()
        );
    }

    #[test]
    fn sum_that_would_round_is_an_error() {
        let records = vec![rec(1, "1000"), rec(2, "0.0000000000000000000000000001")];
        assert!(matches!(window_total(&records), Err(QuotaError::Inexact(_))));
    }

    #[test]
    fn sum_that_would_overflow_is_an_error() {
        let records = vec![
            rec(1, "50000000000000000000000000000"),
            rec(2, "50000000000000000000000000000"),
        ];
        assert!(matches!(
            compute_remaining(&records, Decimal::from(150_000)),
            Err(QuotaError::Inexact(_))
        ));
    }

    #[test]
    fn remaining_that_would_round_is_an_error() {
        let records = vec![rec(1, "0.0000000000000000000000000001")];
        assert!(matches!(
            compute_remaining(&records, Decimal::from(150_000)),
            Err(QuotaError::Inexact(_))
        ));
    }

    #[test]
    fn empty_window_leaves_full_ceiling() {
        assert_eq!(
            compute_remaining(&[], Decimal::from(150_000)).unwrap(),
            Decimal::from(150_000)
        );
    }

    #[test]
    fn over_quota_goes_negative() {
        let records = vec![rec(1, "100000"), rec(2, "60000")];
        assert_eq!(
            compute_remaining(&records, Decimal::from(150_000)).unwrap(),
            Decimal::from(-10_000)
        );
    }

    #[test]
    fn tier_one_worked_example() {
        let now = Utc.with_ymd_and_hms(2023, 5, 20, 12, 0, 0).unwrap();
        let hour = 60 * 60 * 1000;
        let records = vec![
            rec(now.timestamp_millis() - 50 * hour, "2000"),
            rec(now.timestamp_millis() - hour, "1000"),
        ];

        let ceilings = VipQuotaTable::default().ceilings(1).unwrap();
        let classified = classify(&records, now, "USDT");

        assert_eq!(classified.in_24h, vec![records[1].clone()]);
        assert_eq!(classified.in_30d, records);
        assert_eq!(
            compute_remaining(&classified.in_24h, ceilings.day).unwrap(),
            Decimal::from(149_000)
        );
        assert_eq!(
            compute_remaining(&classified.in_30d, ceilings.month).unwrap(),
            Decimal::from(1_997_000)
        );
    }

    #[test]
    fn unlock_is_completion_plus_window_in_zone() {
        // 2023-05-17 04:21:00.058 UTC
        let record = rec(1684297260058, "600000");
        let taipei = chrono_tz::Asia::Taipei;

        let day = project_unlock(&record, Window::Day.duration(), &taipei).unwrap();
        assert_eq!(day.format("%Y-%m-%d %H:%M:%S").to_string(), "2023-05-18 12:21:00");

        let month = project_unlock(&record, Window::Month.duration(), &taipei).unwrap();
        assert_eq!(month.format("%Y-%m-%d %H:%M:%S").to_string(), "2023-06-16 12:21:00");
    }
}
