// File: crates/chart-core/src/snap.rs
// Summary: Brush range snapping to tick boundaries and the selection listener contract.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::scale::TimeScale;
use crate::tick::TickUnit;
use crate::types::Timestamp;

/// Outcome of a finished brush gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Selection {
    /// The user removed the selection. Not the same as any range.
    Cleared,
    /// Snapped range; always `start < end`.
    Range { start: Timestamp, end: Timestamp },
}

impl Selection {
    pub fn range(&self) -> Option<(Timestamp, Timestamp)> {
        match *self {
            Selection::Cleared => None,
            Selection::Range { start, end } => Some((start, end)),
        }
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, Selection::Cleared)
    }
}

/// Map a pixel range to domain time and snap both ends to `unit` boundaries.
///
/// Ends are rounded to the nearest boundary. If that leaves nothing (`start >= end`), the
/// raw start is floored and the range is exactly one unit wide from there.
pub fn snap(pixel_range: (f64, f64), x_scale: &TimeScale, unit: TickUnit) -> (Timestamp, Timestamp) {
    let (p0, p1) = (pixel_range.0.min(pixel_range.1), pixel_range.0.max(pixel_range.1));
    let raw_start = x_scale.from_px(p0);
    let raw_end = x_scale.from_px(p1);

    let start = unit.round(raw_start);
    let end = unit.round(raw_end);
    if start < end {
        return (start, end);
    }
    let start = unit.floor(raw_start);
    (start, unit.offset(start, 1))
}

/// Snapped range projected back to pixels, so a dragged handle moves in whole units.
pub fn snap_pixels(pixel_range: (f64, f64), x_scale: &TimeScale, unit: TickUnit) -> (f64, f64) {
    let (start, end) = snap(pixel_range, x_scale, unit);
    (x_scale.to_px(start), x_scale.to_px(end))
}

/// Pointer gesture on the brush, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BrushEvent {
    /// Drag in progress over `(left, right)`.
    Move { selection: (f64, f64) },
    /// Gesture released; `None` when the selection was removed.
    End { selection: Option<(f64, f64)> },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BrushResponse {
    /// Where to redraw the selection handle.
    Moved((f64, f64)),
    /// Final selection, already delivered to listeners.
    Selected(Selection),
}

type SelectListener = Box<dyn FnMut(&Selection)>;

/// X-axis brush. Holds the scale it started with until the gesture ends, so a re-render
/// mid-drag does not shift an in-flight selection.
pub struct Brush {
    unit: TickUnit,
    enabled: bool,
    gesture_scale: Option<TimeScale>,
    listeners: Vec<SelectListener>,
}

impl Brush {
    pub fn new(unit: TickUnit) -> Self {
        Self { unit, enabled: true, gesture_scale: None, listeners: Vec::new() }
    }

    pub fn tick_unit(&self) -> TickUnit { self.unit }

    pub fn on_select<F>(&mut self, listener: F)
    where
        F: FnMut(&Selection) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn enable(&mut self) { self.enabled = true; }

    /// Ignore gestures until re-enabled. Drops any gesture in flight.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.gesture_scale = None;
    }

    pub fn is_enabled(&self) -> bool { self.enabled }

    pub fn in_gesture(&self) -> bool { self.gesture_scale.is_some() }

    /// Feed one gesture event. `current` is the X scale of the latest frame; it is only
    /// used if no gesture is in flight yet.
    pub fn handle(&mut self, event: BrushEvent, current: &TimeScale) -> Option<BrushResponse> {
        if !self.enabled {
            return None;
        }
        let scale = *self.gesture_scale.get_or_insert(*current);
        match event {
            BrushEvent::Move { selection } => {
                Some(BrushResponse::Moved(snap_pixels(selection, &scale, self.unit)))
            }
            BrushEvent::End { selection } => {
                self.gesture_scale = None;
                let result = match selection {
                    Some(px) => {
                        let (start, end) = snap(px, &scale, self.unit);
                        Selection::Range { start, end }
                    }
                    None => Selection::Cleared,
                };
                debug!(?result, listeners = self.listeners.len(), "brush selection");
                for listener in &mut self.listeners {
                    listener(&result);
                }
                Some(BrushResponse::Selected(result))
            }
        }
    }
}

impl fmt::Debug for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Brush")
            .field("unit", &self.unit)
            .field("enabled", &self.enabled)
            .field("in_gesture", &self.gesture_scale.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
