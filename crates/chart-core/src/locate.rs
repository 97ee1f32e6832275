// File: crates/chart-core/src/locate.rs
// Summary: Nearest-bucket lookup for pointer positions and the per-series tooltip readout built on it.

use serde::Serialize;

use crate::align::Alignment;
use crate::binning::Bucket;
use crate::types::Timestamp;

/// Vertical distance between a readout label and its marker.
const LABEL_OFFSET_PX: f64 = 20.0;

/// Bucket index for a pointer at domain time `t`.
///
/// Takes the first bucket with `x0 <= t <= x1`, then moves to the following bucket when
/// `t` is strictly closer to `x1` than to `x0` and such a bucket exists. Times before the
/// first bucket resolve to 0, times after the last one to the last index. `None` only for
/// an empty slice.
pub fn locate(buckets: &[Bucket], t: Timestamp) -> Option<usize> {
    let first = buckets.first()?;
    let last = buckets.len() - 1;
    if t < first.x0 {
        return Some(0);
    }
    let idx = buckets.partition_point(|b| b.x1 < t);
    if idx > last {
        return Some(last);
    }
    let b = &buckets[idx];
    if t - b.x0 > b.x1 - t && idx < last {
        Some(idx + 1)
    } else {
        Some(idx)
    }
}

/// Round half up to `decimals` places; NaN shows as 0.
pub fn round_value(value: f64, decimals: u32) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    let m = 10f64.powi(decimals as i32);
    (value * m + 0.5).floor() / m
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::End => "end",
        }
    }
}

/// Where the value label of one series goes, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub anchor: TextAnchor,
    pub x: f64,
    pub y: f64,
}

/// Pointer result for one series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesReadout {
    pub series_index: usize,
    /// Index into this series' own buckets.
    pub bucket_index: usize,
    pub mean: f64,
    /// `mean` rounded for display.
    pub value: f64,
    /// Marker position (bucket start, mean) in canvas pixels.
    pub marker: (f64, f64),
    pub label: LabelPlacement,
}

/// Resolved pointer position across every rendered series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointerReadout {
    /// Domain time under the pointer.
    pub time: Timestamp,
    /// Index into the reference series' buckets.
    pub bucket_index: usize,
    pub x0: Timestamp,
    pub x1: Timestamp,
    pub values: Vec<SeriesReadout>,
}

/// Resolve a pointer at canvas x `px` against a frame's alignment.
///
/// The bucket is found on the reference series and mapped to the others by its start
/// boundary, so series trimmed differently still report the same time slot. Series that
/// trimmed that slot away are left out of `values`.
pub fn read_pointer(alignment: &Alignment, px: f64, decimals: u32, canvas_height: f64) -> Option<PointerReadout> {
    let time = alignment.x_scale.from_px(px);
    let reference = alignment.reference()?;
    let bucket_index = locate(&reference.buckets, time)?;
    let slot = &reference.buckets[bucket_index];

    let values = alignment
        .series
        .iter()
        .enumerate()
        .filter_map(|(s, bins)| {
            let idx = bins.index_of(slot.x0)?;
            let y_scale = alignment.y_scale_for_slot(s)?;
            let bucket = &bins.buckets[idx];
            let marker = (alignment.x_scale.to_px(bucket.x0), y_scale.to_px(bucket.mean));
            let label = place_label(&bins.buckets, idx, marker, |m| y_scale.to_px(m), canvas_height);
            Some(SeriesReadout {
                series_index: bins.series_index,
                bucket_index: idx,
                mean: bucket.mean,
                value: round_value(bucket.mean, decimals),
                marker,
                label,
            })
        })
        .collect();

    Some(PointerReadout { time, bucket_index, x0: slot.x0, x1: slot.x1, values })
}

/// Labels in the first half read to the right and dodge the next bucket; the rest read
/// to the left and dodge the previous one. Kept `LABEL_OFFSET_PX` inside the canvas.
fn place_label<F>(buckets: &[Bucket], idx: usize, marker: (f64, f64), to_px: F, canvas_height: f64) -> LabelPlacement
where
    F: Fn(f64) -> f64,
{
    let (x, marker_y) = marker;
    let first_half = (idx as f64) < buckets.len() as f64 / 2.0;
    let (anchor, neighbour) = if first_half {
        (TextAnchor::Start, buckets.get(idx + 1))
    } else {
        (TextAnchor::End, idx.checked_sub(1).and_then(|i| buckets.get(i)))
    };

    let mut y = match neighbour.map(|b| to_px(b.mean)) {
        Some(ny) if ny <= marker_y => marker_y + LABEL_OFFSET_PX,
        _ => marker_y - LABEL_OFFSET_PX,
    };
    if y < LABEL_OFFSET_PX {
        y = LABEL_OFFSET_PX;
    }
    if y > canvas_height - LABEL_OFFSET_PX {
        y = canvas_height - LABEL_OFFSET_PX;
    }
    LabelPlacement { anchor, x, y }
}
