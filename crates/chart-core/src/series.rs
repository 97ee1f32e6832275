// File: crates/chart-core/src/series.rs
// Summary: Series presentation specs and observable data sources feeding the chart.
// Notes:
// - Sources are pulled in full on every render; the change listener only tells the
//   chart that its last frame is stale.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::DataPoint;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    #[default]
    Line,
    Bar,
}

/// How one series is drawn. Positional match with the chart's data sources.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesSpec {
    pub kind: SeriesKind,
    pub label: Option<String>,
    /// Extra class attribute for the series group.
    pub css_class: String,
    /// Print bucket values next to line markers.
    pub show_values: bool,
    /// Circle marker radius for line series.
    pub marker_radius: Option<f64>,
}

impl SeriesSpec {
    pub fn line() -> Self {
        Self { kind: SeriesKind::Line, ..Self::default() }
    }

    pub fn bar() -> Self {
        Self { kind: SeriesKind::Bar, ..Self::default() }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = css_class.into();
        self
    }

    pub fn with_values(mut self) -> Self {
        self.show_values = true;
        self
    }

    pub fn with_marker(mut self, radius: f64) -> Self {
        self.marker_radius = Some(radius.max(0.0));
        self
    }
}

/// Pull accessor plus change notification for one series.
pub trait DataSource {
    /// Current snapshot of the points, in source order.
    fn data(&self) -> Vec<DataPoint>;
    /// Register a callback fired after every mutation of the underlying data.
    fn subscribe(&self, listener: Box<dyn Fn()>);
}

impl DataSource for Vec<DataPoint> {
    fn data(&self) -> Vec<DataPoint> {
        self.clone()
    }

    fn subscribe(&self, _listener: Box<dyn Fn()>) {}
}

#[derive(Default)]
struct ModelInner {
    points: Vec<DataPoint>,
    listeners: Vec<Rc<dyn Fn()>>,
}

/// Mutable, observable series data. Clones share the same storage.
#[derive(Clone, Default)]
pub struct SeriesModel {
    inner: Rc<RefCell<ModelInner>>,
}

impl SeriesModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<DataPoint>) -> Self {
        let model = Self::new();
        model.inner.borrow_mut().points = points;
        model
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace every point.
    pub fn set(&self, points: Vec<DataPoint>) {
        self.inner.borrow_mut().points = points;
        self.notify();
    }

    pub fn push(&self, point: DataPoint) {
        self.inner.borrow_mut().points.push(point);
        self.notify();
    }

    pub fn extend<I: IntoIterator<Item = DataPoint>>(&self, points: I) {
        self.inner.borrow_mut().points.extend(points);
        self.notify();
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().points.clear();
        self.notify();
    }

    /// Listeners run with the cell released, so they may read, mutate or subscribe.
    fn notify(&self) {
        let listeners = {
            let inner = self.inner.borrow();
            trace!(points = inner.points.len(), listeners = inner.listeners.len(), "series changed");
            inner.listeners.clone()
        };
        for listener in &listeners {
            listener();
        }
    }
}

impl DataSource for SeriesModel {
    fn data(&self) -> Vec<DataPoint> {
        self.inner.borrow().points.clone()
    }

    fn subscribe(&self, listener: Box<dyn Fn()>) {
        self.inner.borrow_mut().listeners.push(Rc::from(listener));
    }
}
