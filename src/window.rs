// src/window.rs
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::models::DepositRecord;

/// Rolling interval ending at "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Day,
    Month,
}

impl Window {
    pub const ALL: [Window; 2] = [Window::Day, Window::Month];

    pub fn duration(self) -> Duration {
        match self {
            Window::Day => Duration::hours(24),
            Window::Month => Duration::days(30),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Window::Day => "24h",
            Window::Month => "30 days",
        }
    }

    /// Strict: an age equal to the window length is already outside
    pub fn contains(self, age: Duration) -> bool {
        age < self.duration()
    }
}

/// Eligible records split per window, each sorted by completion time
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Classified {
    pub in_24h: Vec<DepositRecord>,
    pub in_30d: Vec<DepositRecord>,
}

impl Classified {
    pub fn records(&self, window: Window) -> &[DepositRecord] {
        match window {
            Window::Day => &self.in_24h,
            Window::Month => &self.in_30d,
        }
    }
}

/// Age of a record relative to `now`; completions in the future count as age zero.
pub fn age_of(record: &DepositRecord, now: DateTime<Utc>) -> Duration {
    let age = Duration::milliseconds(now.timestamp_millis().saturating_sub(record.completed_at));
    age.max(Duration::zero())
}

pub fn classify(records: &[DepositRecord], now: DateTime<Utc>, target_asset: &str) -> Classified {
    let mut out = Classified::default();

    for record in records {
        if !record.is_eligible(target_asset) {
            debug!(
                "skip {} ({} / {:?})",
                record.order_id, record.asset, record.status
            );
            continue;
        }

        let age = age_of(record, now);
        if Window::Day.contains(age) {
            out.in_24h.push(record.clone());
        }
        if Window::Month.contains(age) {
            out.in_30d.push(record.clone());
        }
    }

    // stable: equal completion times keep input order
    out.in_24h.sort_by_key(|r| r.completed_at);
    out.in_30d.sort_by_key(|r| r.completed_at);

    out
}
