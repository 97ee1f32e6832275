// File: crates/chart-core/src/chart.rs
// Summary: Chart struct tying data sources to a validated config; full recompute per pass and SVG output.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, info};

use crate::align::{align, AlignOptions, Alignment};
use crate::config::{Capabilities, ChartConfig};
use crate::error::{ChartError, ChartResult};
use crate::locate::{read_pointer, PointerReadout};
use crate::series::DataSource;
use crate::snap::{Brush, BrushEvent, BrushResponse, Selection};
use crate::svg;
use crate::theme::{self, Theme};

/// Result of one render pass. Never mutated after creation; interactions hold on to the
/// `Arc` they started with.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub alignment: Alignment,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub value_decimals: u32,
}

impl Frame {
    /// Tooltip readout for a pointer at canvas x `px`.
    pub fn pointer(&self, px: f64) -> Option<PointerReadout> {
        read_pointer(&self.alignment, px, self.value_decimals, self.canvas_height)
    }
}

pub struct Chart {
    config: ChartConfig,
    sources: Vec<Box<dyn DataSource>>,
    theme: Theme,
    stale: Rc<Cell<bool>>,
    frame: Option<Arc<Frame>>,
    brush: Option<Brush>,
    selection: Option<Selection>,
}

impl Chart {
    /// Wire `sources` (positional match with `config.series()`) to a chart.
    pub fn new(config: ChartConfig, sources: Vec<Box<dyn DataSource>>) -> ChartResult<Self> {
        if sources.is_empty() {
            return Err(ChartError::NoSeries);
        }
        if sources.len() != config.series().len() {
            return Err(ChartError::SeriesMismatch { specs: config.series().len(), sources: sources.len() });
        }

        let stale = Rc::new(Cell::new(true));
        for source in &sources {
            let flag = Rc::clone(&stale);
            source.subscribe(Box::new(move || flag.set(true)));
        }

        let theme = theme::find(&config.options().theme);
        let brush = config.selectable().then(|| Brush::new(config.tick_unit()));
        Ok(Self { config, sources, theme, stale, frame: None, brush, selection: None })
    }

    pub fn config(&self) -> &ChartConfig { &self.config }

    pub fn capabilities(&self) -> Capabilities { self.config.capabilities() }

    pub fn theme(&self) -> &Theme { &self.theme }

    /// Last frame produced, if the last pass drew anything.
    pub fn frame(&self) -> Option<Arc<Frame>> { self.frame.clone() }

    /// True once any source changed since the last pass.
    pub fn is_stale(&self) -> bool { self.stale.get() }

    /// Recompute everything from the current source data.
    ///
    /// An empty dataset (or an empty series under the skip policy) is not an error here:
    /// the pass produces no frame and returns `Ok(None)`.
    pub fn render(&mut self) -> ChartResult<Option<Arc<Frame>>> {
        self.stale.set(false);
        let data: Vec<_> = self.sources.iter().map(|s| s.data()).collect();
        let opts = AlignOptions::from(&self.config);

        match align(&data, &opts) {
            Ok(alignment) => {
                let frame = Arc::new(Frame {
                    alignment,
                    canvas_width: self.config.canvas_width(),
                    canvas_height: self.config.canvas_height(),
                    value_decimals: self.config.value_decimals(),
                });
                self.frame = Some(Arc::clone(&frame));
                Ok(Some(frame))
            }
            Err(e) if e.is_recoverable() => {
                debug!(reason = %e, "render pass skipped");
                self.frame = None;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Re-render only when a source reported a change. `Ok(None)` means nothing was done
    /// or the new pass had nothing to draw.
    pub fn refresh_if_changed(&mut self) -> ChartResult<Option<Arc<Frame>>> {
        if !self.is_stale() {
            return Ok(None);
        }
        self.render()
    }

    /// Tooltip readout against the latest frame.
    pub fn pointer_move(&self, px: f64) -> Option<PointerReadout> {
        self.frame.as_ref()?.pointer(px)
    }

    pub fn brush(&self) -> Option<&Brush> { self.brush.as_ref() }

    /// Brush access for listener registration and enable/disable.
    pub fn brush_mut(&mut self) -> Option<&mut Brush> { self.brush.as_mut() }

    /// Current committed selection, if any.
    pub fn selection(&self) -> Option<Selection> { self.selection }

    /// Feed a brush gesture. `None` when selection is off, disabled, or nothing is drawn.
    pub fn brush_event(&mut self, event: BrushEvent) -> Option<BrushResponse> {
        let frame = self.frame.as_ref()?;
        let brush = self.brush.as_mut()?;
        let response = brush.handle(event, &frame.alignment.x_scale)?;
        if let BrushResponse::Selected(sel) = response {
            self.selection = Some(sel);
        }
        Some(response)
    }

    /// Run a pass and draw it. `Ok(None)` when the pass was skipped.
    pub fn render_to_svg(&mut self) -> ChartResult<Option<String>> {
        let Some(frame) = self.render()? else { return Ok(None) };
        let selection = self.selection.and_then(|s| s.range());
        svg::render_frame(&frame, &self.config, &self.theme, selection).map(Some)
    }

    /// Render the chart to an SVG file at `output_path`. Returns whether anything was written.
    pub fn render_to_svg_file(&mut self, output_path: impl AsRef<std::path::Path>) -> ChartResult<bool> {
        let Some(doc) = self.render_to_svg()? else { return Ok(false) };
        let path = output_path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, doc)?;
        info!(path = %path.display(), "wrote svg");
        Ok(true)
    }
}
