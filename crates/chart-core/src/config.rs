// File: crates/chart-core/src/config.rs
// Summary: Chart options (serde-friendly) and the validated, immutable ChartConfig built from them.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::series::SeriesSpec;
use crate::tick::TickUnit;
use crate::types::{Margins, HEIGHT, WIDTH};

/// Margin reserved on an axis that carries a title.
const TITLED_AXIS_MARGIN: u32 = 40;
const MAX_DECIMALS: u32 = 15;

/// What a render pass does when some series have no valid points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySeriesPolicy {
    /// Any empty series skips the whole pass.
    #[default]
    SkipRender,
    /// Render only the series that still have points.
    FilterEmpty,
}

/// Raw, unvalidated options. Every recognized option is a field here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Container width in pixels (canvas plus margins).
    pub width: u32,
    /// Container height in pixels (canvas plus margins).
    pub height: u32,
    pub margins: Margins,
    pub tick_unit: TickUnit,
    pub shared_y_axis: bool,
    /// Decimal places for displayed aggregates.
    pub value_decimals: u32,
    pub empty_series: EmptySeriesPolicy,
    /// Enable brush selection on the X axis.
    pub selectable: bool,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    /// Extend Y ticks across the canvas.
    pub y_grid: bool,
    pub theme: String,
    pub series: Vec<SeriesSpec>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            margins: Margins::default(),
            tick_unit: TickUnit::Year,
            shared_y_axis: true,
            value_decimals: 0,
            empty_series: EmptySeriesPolicy::SkipRender,
            selectable: false,
            x_title: None,
            y_title: None,
            y_grid: false,
            theme: "light".to_string(),
            series: Vec::new(),
        }
    }
}

/// Which interaction and layout features a configured chart offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub supports_shared_axis: bool,
    pub supports_multi_series: bool,
    pub supports_selection: bool,
}

/// Validated chart configuration. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    opts: ChartOptions,
}

impl ChartConfig {
    pub fn builder() -> ChartConfigBuilder {
        ChartConfigBuilder::default()
    }

    /// Validate `opts`, widening margins for titled axes.
    pub fn from_options(mut opts: ChartOptions) -> ChartResult<Self> {
        if opts.series.is_empty() {
            return Err(ChartError::NoSeries);
        }
        if opts.value_decimals > MAX_DECIMALS {
            return Err(ChartError::InvalidDecimals(opts.value_decimals));
        }
        if opts.y_title.is_some() && opts.margins.left < TITLED_AXIS_MARGIN {
            opts.margins.left = TITLED_AXIS_MARGIN;
        }
        if opts.x_title.is_some() && opts.margins.bottom < TITLED_AXIS_MARGIN {
            opts.margins.bottom = TITLED_AXIS_MARGIN;
        }
        if opts.width <= opts.margins.hsum() || opts.height <= opts.margins.vsum() {
            return Err(ChartError::InvalidDimensions { width: opts.width, height: opts.height });
        }
        Ok(Self { opts })
    }

    pub fn options(&self) -> &ChartOptions { &self.opts }
    pub fn width(&self) -> u32 { self.opts.width }
    pub fn height(&self) -> u32 { self.opts.height }
    pub fn margins(&self) -> Margins { self.opts.margins }
    pub fn tick_unit(&self) -> TickUnit { self.opts.tick_unit }
    pub fn shared_y_axis(&self) -> bool { self.opts.shared_y_axis }
    pub fn value_decimals(&self) -> u32 { self.opts.value_decimals }
    pub fn empty_series(&self) -> EmptySeriesPolicy { self.opts.empty_series }
    pub fn selectable(&self) -> bool { self.opts.selectable }
    pub fn series(&self) -> &[SeriesSpec] { &self.opts.series }

    /// Drawable width inside the margins.
    pub fn canvas_width(&self) -> f64 {
        (self.opts.width - self.opts.margins.hsum()) as f64
    }

    /// Drawable height inside the margins.
    pub fn canvas_height(&self) -> f64 {
        (self.opts.height - self.opts.margins.vsum()) as f64
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            supports_shared_axis: self.opts.shared_y_axis,
            supports_multi_series: self.opts.series.len() > 1,
            supports_selection: self.opts.selectable,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChartConfigBuilder {
    opts: ChartOptions,
}

impl ChartConfigBuilder {
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.opts.width = width;
        self.opts.height = height;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.opts.margins = margins;
        self
    }

    pub fn tick_unit(mut self, unit: TickUnit) -> Self {
        self.opts.tick_unit = unit;
        self
    }

    pub fn shared_y_axis(mut self, shared: bool) -> Self {
        self.opts.shared_y_axis = shared;
        self
    }

    pub fn value_decimals(mut self, decimals: u32) -> Self {
        self.opts.value_decimals = decimals;
        self
    }

    pub fn empty_series(mut self, policy: EmptySeriesPolicy) -> Self {
        self.opts.empty_series = policy;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.opts.selectable = selectable;
        self
    }

    pub fn x_title(mut self, title: impl Into<String>) -> Self {
        self.opts.x_title = Some(title.into());
        self
    }

    pub fn y_title(mut self, title: impl Into<String>) -> Self {
        self.opts.y_title = Some(title.into());
        self
    }

    pub fn y_grid(mut self, on: bool) -> Self {
        self.opts.y_grid = on;
        self
    }

    pub fn theme(mut self, name: impl Into<String>) -> Self {
        self.opts.theme = name.into();
        self
    }

    pub fn series(mut self, spec: SeriesSpec) -> Self {
        self.opts.series.push(spec);
        self
    }

    pub fn build(self) -> ChartResult<ChartConfig> {
        ChartConfig::from_options(self.opts)
    }
}
