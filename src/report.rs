// src/report.rs
use chrono::TimeZone;
use rust_decimal::Decimal;
use std::fmt::{Display, Write};

use crate::aggregator::{compute_remaining, project_unlock, TierCeilings};
use crate::error::Result;
use crate::window::{Classified, Window};

pub const UNLOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What gets shown for one window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowReport {
    pub window: Window,
    pub remaining: Decimal,
    pub unlocks: Vec<(String, Decimal)>, // (unlock time in local zone, amount), earliest first
}

impl WindowReport {
    pub fn build<Tz: TimeZone>(
        window: Window,
        classified: &Classified,
        ceilings: &TierCeilings,
        zone: &Tz,
    ) -> Result<Self>
    where
        Tz::Offset: Display,
    {
        let records = classified.records(window);
        let unlocks = records
            .iter()
            .map(|r| {
                let at = project_unlock(r, window.duration(), zone)
                    .map(|t| t.format(UNLOCK_TIME_FORMAT).to_string())
                    .unwrap_or_else(|| "-".to_string());
                (at, r.amount)
            })
            .collect();

        Ok(Self {
            window,
            remaining: compute_remaining(records, ceilings.for_window(window))?,
            unlocks,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "-".repeat(50));
        let _ = writeln!(
            out,
            "*** current remaining deposit quota in {}: {}",
            self.window.label(),
            self.remaining.normalize()
        );

        if !self.unlocks.is_empty() {
            let rows: Vec<[String; 2]> = self
                .unlocks
                .iter()
                .map(|(at, amount)| [at.clone(), amount.normalize().to_string()])
                .collect();
            out.push_str(&simple_table(["unlock time", "amount"], &rows));
        }
        out
    }
}

/// Plain table: rule, header, rule, rows, rule. Columns right-aligned.
fn simple_table(headers: [&str; 2], rows: &[[String; 2]]) -> String {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let rule = format!("{}  {}\n", "-".repeat(widths[0]), "-".repeat(widths[1]));
    let [w0, w1] = widths;
    let line = |a: &str, b: &str| format!("{a:>w0$}  {b:>w1$}\n");

    let mut out = rule.clone();
    out.push_str(&line(headers[0], headers[1]));
    out.push_str(&rule);
    for [a, b] in rows {
        out.push_str(&line(a, b));
    }
    out.push_str(&rule);
    out
}
