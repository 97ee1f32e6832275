// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the binning/scale pipeline, interaction helpers and SVG output.

pub mod aggregate;
pub mod align;
pub mod axis;
pub mod binning;
pub mod chart;
pub mod config;
pub mod error;
pub mod locate;
pub mod scale;
pub mod series;
pub mod snap;
pub mod svg;
pub mod theme;
pub mod tick;
pub mod types;

pub use aggregate::{aggregate, trim_empty_edges};
pub use align::{align, AlignOptions, Alignment, SeriesBins};
pub use axis::Axis;
pub use binning::{bin, Bucket, TimeDomain};
pub use chart::{Chart, Frame};
pub use config::{Capabilities, ChartConfig, ChartConfigBuilder, ChartOptions, EmptySeriesPolicy};
pub use error::{ChartError, ChartResult};
pub use locate::{locate, read_pointer, PointerReadout, SeriesReadout};
pub use scale::{derive_y_scales, ScaleTransform, TimeScale, ValueScale, YScales};
pub use series::{DataSource, SeriesKind, SeriesModel, SeriesSpec};
pub use snap::{snap, snap_pixels, Brush, BrushEvent, BrushResponse, Selection};
pub use theme::Theme;
pub use tick::TickUnit;
pub use types::{DataPoint, Margins, Timestamp};
