// File: crates/chart-core/src/align.rs
// Summary: Runs binning and aggregation over every series on one shared time axis and derives the scales.

use tracing::{debug, trace, warn};

use crate::aggregate::{aggregate, trim_empty_edges};
use crate::binning::{bin, Bucket, TimeDomain};
use crate::config::{ChartConfig, EmptySeriesPolicy};
use crate::error::{ChartError, ChartResult};
use crate::scale::{derive_y_scales, TimeScale, ValueScale, YScales};
use crate::tick::TickUnit;
use crate::types::{DataPoint, Timestamp};

/// Inputs of one alignment pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignOptions {
    pub tick_unit: TickUnit,
    pub shared_y_axis: bool,
    pub empty_series: EmptySeriesPolicy,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            tick_unit: TickUnit::Year,
            shared_y_axis: true,
            empty_series: EmptySeriesPolicy::SkipRender,
            canvas_width: 900.0,
            canvas_height: 460.0,
        }
    }
}

impl From<&ChartConfig> for AlignOptions {
    fn from(cfg: &ChartConfig) -> Self {
        Self {
            tick_unit: cfg.tick_unit(),
            shared_y_axis: cfg.shared_y_axis(),
            empty_series: cfg.empty_series(),
            canvas_width: cfg.canvas_width(),
            canvas_height: cfg.canvas_height(),
        }
    }
}

/// Trimmed buckets of one input series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesBins {
    /// Position of the series in the input list.
    pub series_index: usize,
    pub buckets: Vec<Bucket>,
    /// Empty buckets dropped from the front of the full domain subdivision.
    pub leading_trimmed: usize,
}

impl SeriesBins {
    /// Index of the bucket starting at `x0`, if this series kept it.
    pub fn index_of(&self, x0: Timestamp) -> Option<usize> {
        self.buckets.binary_search_by(|b| b.x0.cmp(&x0)).ok()
    }

    pub fn means(&self) -> impl Iterator<Item = f64> + '_ {
        self.buckets.iter().map(|b| b.mean)
    }
}

/// Everything a renderer needs for one pass. Immutable snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Alignment {
    pub domain: TimeDomain,
    pub tick_unit: TickUnit,
    pub x_scale: TimeScale,
    /// Slot `i` belongs to `series[i]` in per-series mode.
    pub y_scales: YScales,
    /// Rendered series, ascending by `series_index`.
    pub series: Vec<SeriesBins>,
}

impl Alignment {
    /// Rendered bins of the input series `series_index`.
    pub fn series_for(&self, series_index: usize) -> Option<&SeriesBins> {
        self.series.iter().find(|s| s.series_index == series_index)
    }

    /// Y scale paired with the rendered series at `slot`.
    pub fn y_scale_for_slot(&self, slot: usize) -> Option<&ValueScale> {
        self.y_scales.for_slot(slot)
    }

    /// Series whose buckets drive pointer lookups.
    pub fn reference(&self) -> Option<&SeriesBins> {
        self.series.first()
    }

    /// X tick positions: every unit boundary inside the domain.
    pub fn x_ticks(&self) -> Vec<Timestamp> {
        self.tick_unit.ticks(self.domain.start, self.domain.end)
    }
}

/// Bin, aggregate and trim every series against one shared time domain.
///
/// Points without `x` or with NaN `y` are dropped first. Empty series are handled per
/// `opts.empty_series`; if nothing is left the pass fails with [`ChartError::EmptyDataset`].
pub fn align(series: &[Vec<DataPoint>], opts: &AlignOptions) -> ChartResult<Alignment> {
    let filtered: Vec<Vec<DataPoint>> = series
        .iter()
        .map(|s| s.iter().copied().filter(DataPoint::is_valid).collect())
        .collect();

    if filtered.iter().all(Vec::is_empty) {
        return Err(ChartError::EmptyDataset);
    }
    if opts.empty_series == EmptySeriesPolicy::SkipRender {
        if let Some(index) = filtered.iter().position(Vec::is_empty) {
            debug!(index, "skipping render: series has no valid points");
            return Err(ChartError::EmptySeries { index });
        }
    }

    let domain = TimeDomain::from_points(filtered.iter().flatten(), opts.tick_unit)
        .ok_or(ChartError::EmptyDataset)?;

    let mut rendered = Vec::with_capacity(filtered.len());
    for (series_index, points) in filtered.iter().enumerate() {
        if points.is_empty() {
            warn!(series_index, "series has no valid points; left out of this pass");
            continue;
        }
        let mut buckets = aggregate(bin(points, &domain, opts.tick_unit));
        let leading_trimmed = trim_empty_edges(&mut buckets);
        if buckets.is_empty() {
            warn!(series_index, "series produced no buckets; left out of this pass");
            continue;
        }
        trace!(series_index, buckets = buckets.len(), leading_trimmed, "binned series");
        rendered.push(SeriesBins { series_index, buckets, leading_trimmed });
    }

    let bucket_sets: Vec<&[Bucket]> = rendered.iter().map(|s| s.buckets.as_slice()).collect();
    let y_scales = derive_y_scales(&bucket_sets, opts.canvas_height, opts.shared_y_axis)
        .ok_or(ChartError::EmptyDataset)?;
    let x_scale = TimeScale::new(domain, opts.canvas_width);

    debug!(
        inputs = series.len(),
        rendered = rendered.len(),
        shared = y_scales.is_shared(),
        start = %domain.start,
        end = %domain.end,
        "aligned series"
    );

    Ok(Alignment { domain, tick_unit: opts.tick_unit, x_scale, y_scales, series: rendered })
}
