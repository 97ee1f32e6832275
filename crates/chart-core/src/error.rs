// File: crates/chart-core/src/error.rs
// Summary: Library error type and result alias.

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no data series configured")]
    NoSeries,

    #[error("canvas is empty: {width}x{height} surface leaves no room inside the margins")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("value decimals must be at most 15, got {0}")]
    InvalidDecimals(u32),

    #[error("{specs} series configured but {sources} data sources given")]
    SeriesMismatch { specs: usize, sources: usize },

    /// Every series was empty after filtering. Recoverable: the render pass is skipped.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A series had no valid points under the skip-render policy. Recoverable.
    #[error("series {index} has no valid points; render skipped")]
    EmptySeries { index: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl ChartError {
    /// Conditions a host should treat as "nothing to draw" rather than a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChartError::EmptyDataset | ChartError::EmptySeries { .. })
    }
}
