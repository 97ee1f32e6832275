// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (timestamps, data points, sizes, margins).

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Point in time on the X axis. All calendar arithmetic happens in UTC.
pub type Timestamp = DateTime<Utc>;

/// Default surface width in pixels.
pub const WIDTH: u32 = 960;
/// Default surface height in pixels.
pub const HEIGHT: u32 = 500;

/// Single observation of a series.
///
/// `x` is optional because upstream sources may emit partial points during live
/// updates; such points are dropped before binning, never reported.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: Option<Timestamp>,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: Timestamp, y: f64) -> Self {
        Self { x: Some(x), y }
    }

    /// Point at `millis` since the Unix epoch. Out-of-range values yield a point with no `x`.
    pub fn at_millis(millis: i64, y: f64) -> Self {
        Self { x: Utc.timestamp_millis_opt(millis).single(), y }
    }

    /// True when both coordinates can be binned. Infinite values are rejected with NaN.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.x.is_some() && self.y.is_finite()
    }
}

/// Screen margins around the plotting canvas, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }
    /// Total horizontal margin (left + right), saturating at `u32::MAX`.
    pub const fn hsum(&self) -> u32 { self.left.saturating_add(self.right) }
    /// Total vertical margin (top + bottom), saturating at `u32::MAX`.
    pub const fn vsum(&self) -> u32 { self.top.saturating_add(self.bottom) }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(10, 30, 30, 30)
    }
}
