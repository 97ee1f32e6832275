// File: crates/chart-core/src/scale.rs
// Summary: Time (X) and Value (Y) scale transforms, plus derivation of shared or per-series Y scales.

use chrono::{TimeZone, Utc};

use crate::aggregate::mean_extent;
use crate::binning::{Bucket, TimeDomain};
use crate::types::Timestamp;

/// Domain <-> pixel mapping shared by both axes.
pub trait ScaleTransform {
    type Domain;
    fn apply(&self, v: Self::Domain) -> f64;
    fn invert(&self, px: f64) -> Self::Domain;
    /// Pixel range as (start, end); may be descending.
    fn range(&self) -> (f64, f64);
}

/// Horizontal time scale: linear in elapsed milliseconds, pixel output rounded to whole pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub domain: TimeDomain,
    pub left_px: f64,
    pub right_px: f64,
}

impl TimeScale {
    pub fn new(domain: TimeDomain, width: f64) -> Self {
        Self { domain, left_px: 0.0, right_px: width }
    }

    fn span_ms(&self) -> f64 {
        (self.domain.span_millis() as f64).max(1.0)
    }

    /// Unrounded pixel position of `t`.
    #[inline]
    pub fn to_px_exact(&self, t: Timestamp) -> f64 {
        let dt = (t - self.domain.start).num_milliseconds() as f64;
        self.left_px + dt / self.span_ms() * (self.right_px - self.left_px)
    }

    #[inline]
    pub fn to_px(&self, t: Timestamp) -> f64 {
        self.to_px_exact(t).round()
    }

    pub fn from_px(&self, px: f64) -> Timestamp {
        let width = self.right_px - self.left_px;
        let frac = if width.abs() < f64::EPSILON { 0.0 } else { (px - self.left_px) / width };
        let offset = (frac * self.span_ms()).round() as i64;
        let start = self.domain.start.timestamp_millis();
        Utc.timestamp_millis_opt(start.saturating_add(offset))
            .single()
            .unwrap_or(self.domain.start)
    }

    /// Pixel width of a bucket as drawn (rounded edges).
    pub fn band_px(&self, bucket: &Bucket) -> f64 {
        self.to_px(bucket.x1) - self.to_px(bucket.x0)
    }
}

impl ScaleTransform for TimeScale {
    type Domain = Timestamp;
    fn apply(&self, v: Timestamp) -> f64 { self.to_px(v) }
    fn invert(&self, px: f64) -> Timestamp { self.from_px(px) }
    fn range(&self) -> (f64, f64) { (self.left_px, self.right_px) }
}

/// Vertical value scale mapping `[vmin, vmax]` to `[bottom, top]` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f64,
    pub bottom_px: f64,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    /// Linear scale over `[vmin, vmax]`. A flat domain is padded by 0.5 on each side,
    /// or by a few ulps of the value when 0.5 would vanish at that magnitude.
    pub fn new_linear(height: f64, mut vmin: f64, mut vmax: f64) -> Self {
        if vmin > vmax {
            std::mem::swap(&mut vmin, &mut vmax);
        }
        if (vmax - vmin).abs() < 1e-12 {
            let pad = 0.5f64.max(vmin.abs().max(vmax.abs()) * f64::EPSILON * 4.0);
            vmin -= pad;
            vmax += pad;
        }
        Self { top_px: 0.0, bottom_px: height, vmin, vmax }
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f64 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - (y - self.vmin) / span * (self.bottom_px - self.top_px)
    }

    #[inline]
    pub fn from_px(&self, py: f64) -> f64 {
        let span = (self.vmax - self.vmin).max(1e-12);
        let height = self.bottom_px - self.top_px;
        if height.abs() < f64::EPSILON {
            return self.vmin;
        }
        self.vmin + (self.bottom_px - py) / height * span
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }

    /// Round-number ticks inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.vmin, self.vmax, count)
    }
}

impl ScaleTransform for ValueScale {
    type Domain = f64;
    fn apply(&self, v: f64) -> f64 { self.to_px(v) }
    fn invert(&self, px: f64) -> f64 { self.from_px(px) }
    fn range(&self) -> (f64, f64) { (self.bottom_px, self.top_px) }
}

/// Step between ticks: 1, 2 or 5 times a power of ten.
fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    let mut step = 10f64.powf(raw.log10().floor());
    let err = raw / step;
    if err >= 50f64.sqrt() {
        step *= 10.0;
    } else if err >= 10f64.sqrt() {
        step *= 5.0;
    } else if err >= 2f64.sqrt() {
        step *= 2.0;
    }
    step
}

pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !(start.is_finite() && stop.is_finite()) || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let step = tick_step(lo, hi, count);
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    // Integer multiples keep labels free of accumulated float error.
    if step >= 1.0 {
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    } else {
        let inv = (1.0 / step).round();
        let first = (lo * inv).ceil() as i64;
        let last = (hi * inv).floor() as i64;
        (first..=last).map(|i| i as f64 / inv).collect()
    }
}

/// Y mapping for a render pass: one scale for everything, or one per series.
#[derive(Clone, Debug, PartialEq)]
pub enum YScales {
    Shared(ValueScale),
    PerSeries(Vec<ValueScale>),
}

impl YScales {
    /// Scale used for the `slot`-th rendered series.
    pub fn for_slot(&self, slot: usize) -> Option<&ValueScale> {
        match self {
            YScales::Shared(s) => Some(s),
            YScales::PerSeries(v) => v.get(slot),
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, YScales::Shared(_))
    }

    pub fn len(&self) -> usize {
        match self {
            YScales::Shared(_) => 1,
            YScales::PerSeries(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Derive the Y scales from already-aggregated bucket sets.
///
/// Series without buckets contribute nothing. In shared mode the domain is the extent of
/// the pooled means; otherwise each series gets its own extent (an empty series then gets
/// a padded zero domain so slots stay aligned). Returns `None` when no series has buckets.
pub fn derive_y_scales(series: &[&[Bucket]], height: f64, shared: bool) -> Option<YScales> {
    let extents: Vec<Option<(f64, f64)>> = series.iter().map(|b| mean_extent(b)).collect();
    let pooled = extents.iter().flatten().copied().reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))?;

    if shared {
        Some(YScales::Shared(ValueScale::new_linear(height, pooled.0, pooled.1)))
    } else {
        Some(YScales::PerSeries(
            extents
                .into_iter()
                .map(|e| {
                    let (lo, hi) = e.unwrap_or((0.0, 0.0));
                    ValueScale::new_linear(height, lo, hi)
                })
                .collect(),
        ))
    }
}
