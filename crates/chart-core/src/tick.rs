// File: crates/chart-core/src/tick.rs
// Summary: Calendar tick units (floor/ceil/round/offset/range) used for both bucket width and X ticks.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Timestamp;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
// 1970-01-01 was a Thursday; weeks start on the preceding Sunday.
const WEEK_ORIGIN_MS: i64 = -4 * DAY_MS;

/// Calendar granularity for binning and X-axis ticks. Arithmetic is UTC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    /// Sunday-based weeks.
    Week,
    Month,
    #[default]
    Year,
}

impl TickUnit {
    pub const ALL: [TickUnit; 8] = [
        TickUnit::Millisecond,
        TickUnit::Second,
        TickUnit::Minute,
        TickUnit::Hour,
        TickUnit::Day,
        TickUnit::Week,
        TickUnit::Month,
        TickUnit::Year,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TickUnit::Millisecond => "millisecond",
            TickUnit::Second => "second",
            TickUnit::Minute => "minute",
            TickUnit::Hour => "hour",
            TickUnit::Day => "day",
            TickUnit::Week => "week",
            TickUnit::Month => "month",
            TickUnit::Year => "year",
        }
    }

    /// Fixed width in milliseconds; `None` for calendar units of varying length.
    fn fixed_millis(self) -> Option<i64> {
        match self {
            TickUnit::Millisecond => Some(1),
            TickUnit::Second => Some(SECOND_MS),
            TickUnit::Minute => Some(MINUTE_MS),
            TickUnit::Hour => Some(HOUR_MS),
            TickUnit::Day => Some(DAY_MS),
            TickUnit::Week => Some(WEEK_MS),
            TickUnit::Month | TickUnit::Year => None,
        }
    }

    /// Latest unit boundary at or before `t`.
    pub fn floor(self, t: Timestamp) -> Timestamp {
        match self {
            TickUnit::Month => Utc.with_ymd_and_hms(t.year(), t.month(), 1, 0, 0, 0).single().unwrap_or(t),
            TickUnit::Year => Utc.with_ymd_and_hms(t.year(), 1, 1, 0, 0, 0).single().unwrap_or(t),
            TickUnit::Week => {
                let ms = t.timestamp_millis();
                from_millis(ms - (ms - WEEK_ORIGIN_MS).rem_euclid(WEEK_MS), t)
            }
            fixed => {
                let step = fixed.fixed_millis().unwrap_or(1);
                let ms = t.timestamp_millis();
                from_millis(ms - ms.rem_euclid(step), t)
            }
        }
    }

    /// Earliest unit boundary at or after `t`.
    pub fn ceil(self, t: Timestamp) -> Timestamp {
        let below = self.floor(t - chrono::Duration::milliseconds(1));
        self.floor(self.offset(below, 1))
    }

    /// Nearest unit boundary; exact midpoints go up.
    pub fn round(self, t: Timestamp) -> Timestamp {
        let lo = self.floor(t);
        let hi = self.ceil(t);
        if t - lo < hi - t { lo } else { hi }
    }

    /// Shift `t` by `steps` whole units without flooring it first.
    pub fn offset(self, t: Timestamp, steps: i32) -> Timestamp {
        match self {
            TickUnit::Month => shift_months(t, steps),
            TickUnit::Year => shift_months(t, steps.saturating_mul(12)),
            fixed => {
                let step = fixed.fixed_millis().unwrap_or(1);
                from_millis(t.timestamp_millis().saturating_add(step.saturating_mul(steps as i64)), t)
            }
        }
    }

    /// Unit boundaries in `[start, stop)`, ascending.
    pub fn range(self, start: Timestamp, stop: Timestamp) -> Vec<Timestamp> {
        let mut out = Vec::new();
        let mut cur = self.ceil(start);
        while cur < stop {
            out.push(cur);
            let next = self.floor(self.offset(cur, 1));
            if next <= cur {
                break;
            }
            cur = next;
        }
        out
    }

    /// Unit boundaries in `[start, stop]`, inclusive of `stop`.
    pub fn ticks(self, start: Timestamp, stop: Timestamp) -> Vec<Timestamp> {
        self.range(start, stop + chrono::Duration::milliseconds(1))
    }

    /// `strftime` pattern used for axis labels at this granularity.
    pub fn label_format(self) -> &'static str {
        match self {
            TickUnit::Millisecond => "%H:%M:%S%.3f",
            TickUnit::Second => "%H:%M:%S",
            TickUnit::Minute | TickUnit::Hour => "%H:%M",
            TickUnit::Day | TickUnit::Week => "%b %d",
            TickUnit::Month => "%B",
            TickUnit::Year => "%Y",
        }
    }
}

fn from_millis(ms: i64, fallback: Timestamp) -> Timestamp {
    Utc.timestamp_millis_opt(ms).single().unwrap_or(fallback)
}

fn shift_months(t: Timestamp, months: i32) -> Timestamp {
    let shifted = if months >= 0 {
        t.checked_add_months(Months::new(months as u32))
    } else {
        t.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(t)
}

impl fmt::Display for TickUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tick unit '{0}'")]
pub struct UnknownTickUnit(pub String);

impl FromStr for TickUnit {
    type Err = UnknownTickUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_suffix('s').unwrap_or(wanted.as_str());
        TickUnit::ALL
            .into_iter()
            .find(|u| u.name() == wanted)
            .ok_or_else(|| UnknownTickUnit(s.to_string()))
    }
}
