// File: crates/chart-core/src/aggregate.rs
// Summary: Per-bucket mean aggregation and empty-edge trimming.

use crate::binning::Bucket;

/// Annotate every bucket with the arithmetic mean of its `y` values.
/// Empty buckets get 0.0 so downstream extents never see NaN.
pub fn aggregate(mut buckets: Vec<Bucket>) -> Vec<Bucket> {
    for b in &mut buckets {
        b.mean = mean_y(b);
    }
    buckets
}

/// Mean of the bucket's `y` values, 0.0 when there are none.
pub fn mean_y(bucket: &Bucket) -> f64 {
    if bucket.points.is_empty() {
        return 0.0;
    }
    let sum: f64 = bucket.points.iter().map(|p| p.y).sum();
    sum / bucket.points.len() as f64
}

/// Drop empty buckets from both ends, keeping interior gaps.
/// Returns how many leading buckets were removed.
pub fn trim_empty_edges(buckets: &mut Vec<Bucket>) -> usize {
    let lead = buckets.iter().take_while(|b| b.is_empty()).count();
    buckets.drain(..lead);
    let tail = buckets.iter().rev().take_while(|b| b.is_empty()).count();
    buckets.truncate(buckets.len() - tail);
    lead
}

/// (min, max) of the means; `None` for an empty slice.
pub fn mean_extent(buckets: &[Bucket]) -> Option<(f64, f64)> {
    buckets.iter().map(|b| b.mean).fold(None, |acc, m| match acc {
        None => Some((m, m)),
        Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
    })
}
