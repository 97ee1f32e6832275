// File: crates/chart-core/src/axis.rs
// Summary: Axis model with titles and tick layouts for the time and value axes.

use crate::scale::{TimeScale, ValueScale};
use crate::tick::TickUnit;
use crate::types::Timestamp;

/// Y ticks requested per axis.
pub const VALUE_TICK_COUNT: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub px: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub title: Option<String>,
    pub ticks: Vec<AxisTick>,
}

impl Axis {
    /// Bottom axis: one tick per unit boundary, labelled per unit.
    pub fn time(scale: &TimeScale, unit: TickUnit, ticks: &[Timestamp], title: Option<&str>) -> Self {
        let fmt = unit.label_format();
        Self {
            title: title.map(str::to_string),
            ticks: ticks
                .iter()
                .map(|t| AxisTick { px: scale.to_px(*t), label: t.format(fmt).to_string() })
                .collect(),
        }
    }

    /// Left axis with round-number ticks.
    pub fn value(scale: &ValueScale, title: Option<&str>) -> Self {
        let values = scale.ticks(VALUE_TICK_COUNT);
        let step = if values.len() > 1 { values[1] - values[0] } else { 1.0 };
        Self {
            title: title.map(str::to_string),
            ticks: values
                .iter()
                .map(|v| AxisTick { px: scale.to_px(*v), label: format_tick(*v, step) })
                .collect(),
        }
    }
}

/// Fixed-point label with just enough decimals to tell neighbouring ticks apart.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 { (-step.log10().floor()) as usize } else { 0 };
    let s = format!("{:.*}", decimals, value);
    // "-0" reads oddly on an axis.
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}
