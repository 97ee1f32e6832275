// File: crates/chart-core/src/binning.rs
// Summary: Shared time domain derivation and tick-unit bucketing of irregular points.

use crate::tick::TickUnit;
use crate::types::{DataPoint, Timestamp};

/// Time span shared by every series of a chart.
/// Contract: `start <= end`; after `from_points` it is strictly `start < end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeDomain {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeDomain {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        if start <= end { Self { start, end } } else { Self { start: end, end: start } }
    }

    /// Extent of the x values of every valid point across all series.
    ///
    /// A single distinct timestamp is widened by one `unit` on both sides so the
    /// binner never sees a zero-width domain. Returns `None` when no point has an `x`.
    pub fn from_points<'a, I>(points: I, unit: TickUnit) -> Option<Self>
    where
        I: IntoIterator<Item = &'a DataPoint>,
    {
        let mut extent: Option<(Timestamp, Timestamp)> = None;
        for x in points.into_iter().filter(|p| p.is_valid()).filter_map(|p| p.x) {
            extent = Some(match extent {
                None => (x, x),
                Some((lo, hi)) => (lo.min(x), hi.max(x)),
            });
        }
        let (lo, hi) = extent?;
        if lo == hi {
            Some(Self { start: unit.offset(lo, -1), end: unit.offset(hi, 1) })
        } else {
            Some(Self { start: lo, end: hi })
        }
    }

    #[inline]
    pub fn contains(&self, t: Timestamp) -> bool {
        self.start <= t && t <= self.end
    }

    pub fn span_millis(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }

    /// Interior bucket boundaries: unit ticks strictly after `start`, up to and including `end`.
    pub fn thresholds(&self, unit: TickUnit) -> Vec<Timestamp> {
        unit.ticks(self.start, self.end)
            .into_iter()
            .filter(|t| *t > self.start && *t <= self.end)
            .collect()
    }
}

/// One time slot of a series. Covers `[x0, x1)`; the last bucket of a domain also holds `x1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    pub x0: Timestamp,
    pub x1: Timestamp,
    pub points: Vec<DataPoint>,
    /// Mean of `points[..].y`, or 0.0 when empty. Filled by [`crate::aggregate::aggregate`].
    pub mean: f64,
}

impl Bucket {
    pub fn new(x0: Timestamp, x1: Timestamp) -> Self {
        Self { x0, x1, points: Vec::new(), mean: 0.0 }
    }
    #[inline]
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    #[inline]
    pub fn len(&self) -> usize { self.points.len() }
}

/// Split `domain` at `unit` boundaries and drop each point into its bucket.
///
/// Buckets come back ascending, contiguous and including empties. A point equal to a
/// boundary belongs to the later bucket; points outside the domain or without an `x`
/// are ignored.
pub fn bin(points: &[DataPoint], domain: &TimeDomain, unit: TickUnit) -> Vec<Bucket> {
    let thresholds = domain.thresholds(unit);

    let mut buckets = Vec::with_capacity(thresholds.len() + 1);
    let mut x0 = domain.start;
    for &t in &thresholds {
        buckets.push(Bucket::new(x0, t));
        x0 = t;
    }
    buckets.push(Bucket::new(x0, domain.end));

    for p in points.iter().filter(|p| p.is_valid()) {
        let Some(x) = p.x else { continue };
        if !domain.contains(x) {
            continue;
        }
        let idx = thresholds.partition_point(|t| *t <= x);
        buckets[idx].points.push(*p);
    }
    buckets
}
