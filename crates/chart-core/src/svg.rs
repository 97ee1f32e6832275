// File: crates/chart-core/src/svg.rs
// Summary: Thin SVG emitter drawing an aligned frame (axes, line and bar series, brush band).

use std::fmt::Write;

use crate::align::SeriesBins;
use crate::axis::Axis;
use crate::chart::Frame;
use crate::config::ChartConfig;
use crate::error::ChartResult;
use crate::locate::round_value;
use crate::scale::{TimeScale, ValueScale};
use crate::series::{SeriesKind, SeriesSpec};
use crate::theme::Theme;
use crate::types::Timestamp;

/// Height of the brush band drawn over the X axis.
const BRUSH_HEIGHT: f64 = 20.0;
/// Horizontal gap between stacked extra Y axes.
const EXTRA_AXIS_GAP: f64 = 40.0;

/// Render `frame` as a standalone SVG document.
pub fn render_frame(
    frame: &Frame,
    config: &ChartConfig,
    theme: &Theme,
    selection: Option<(Timestamp, Timestamp)>,
) -> ChartResult<String> {
    let mut out = String::new();
    let (w, h) = (config.width(), config.height());
    let m = config.margins();
    let opts = config.options();
    let alignment = &frame.alignment;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid meet">"#
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, theme.background)?;
    writeln!(out, r#"<g class="canvas" transform="translate({},{})">"#, m.left, m.top)?;

    let x_axis = Axis::time(&alignment.x_scale, alignment.tick_unit, &alignment.x_ticks(), opts.x_title.as_deref());
    draw_x_axis(&mut out, &x_axis, frame.canvas_width, frame.canvas_height, theme)?;

    let bar_count = alignment
        .series
        .iter()
        .filter(|s| spec_of(config, s).kind == SeriesKind::Bar)
        .count();
    let mut bar_slot = 0usize;

    for (slot, bins) in alignment.series.iter().enumerate() {
        let Some(y_scale) = alignment.y_scale_for_slot(slot) else { continue };
        let spec = spec_of(config, bins);

        if slot == 0 || !alignment.y_scales.is_shared() {
            let title = if slot == 0 { opts.y_title.as_deref() } else { spec.label.as_deref() };
            let axis = Axis::value(y_scale, title);
            let class = if alignment.y_scales.is_shared() { String::new() } else { spec.css_class.clone() };
            draw_y_axis(&mut out, &axis, slot, &class, frame, opts.y_grid && slot == 0, theme)?;
        }

        let color = theme.series_color(bins.series_index);
        match spec.kind {
            SeriesKind::Line => draw_line_series(&mut out, bins, spec, &alignment.x_scale, y_scale, config.value_decimals(), color)?,
            SeriesKind::Bar => {
                draw_bar_series(&mut out, bins, spec, &alignment.x_scale, y_scale, frame.canvas_height, (bar_slot, bar_count), color, theme)?;
                bar_slot += 1;
            }
        }
    }

    if config.selectable() {
        draw_brush(&mut out, &alignment.x_scale, frame, selection, theme)?;
    }

    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")?;
    Ok(out)
}

fn spec_of<'a>(config: &'a ChartConfig, bins: &SeriesBins) -> &'a SeriesSpec {
    static DEFAULT: std::sync::OnceLock<SeriesSpec> = std::sync::OnceLock::new();
    config
        .series()
        .get(bins.series_index)
        .unwrap_or_else(|| DEFAULT.get_or_init(SeriesSpec::default))
}

fn draw_x_axis(out: &mut String, axis: &Axis, width: f64, height: f64, theme: &Theme) -> ChartResult<()> {
    writeln!(out, r#"<g class="x-axis" transform="translate(0,{height})">"#)?;
    writeln!(out, r#"<line x1="0" y1="0" x2="{width}" y2="0" stroke="{}"/>"#, theme.axis_line)?;
    for t in &axis.ticks {
        writeln!(
            out,
            r#"<g class="tick" transform="translate({},0)"><line y2="6" stroke="{}"/><text y="9" dy="0.71em" text-anchor="middle" font-size="10" fill="{}">{}</text></g>"#,
            t.px,
            theme.axis_line,
            theme.axis_label,
            escape(&t.label)
        )?;
    }
    if let Some(title) = &axis.title {
        writeln!(
            out,
            r#"<text class="xAxisTitle" x="{}" y="35" text-anchor="middle" font-size="14" fill="{}">{}</text>"#,
            width / 2.0,
            theme.axis_label,
            escape(title)
        )?;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

fn draw_y_axis(
    out: &mut String,
    axis: &Axis,
    slot: usize,
    class: &str,
    frame: &Frame,
    grid: bool,
    theme: &Theme,
) -> ChartResult<()> {
    // First axis on the left edge, any further ones stacked along the right edge.
    let (x, dir) = if slot == 0 { (0.0, -1.0) } else { (frame.canvas_width + EXTRA_AXIS_GAP * (slot - 1) as f64, 1.0) };
    let class = if class.is_empty() { "y-axis".to_string() } else { format!("y-axis {class}") };
    writeln!(out, r#"<g class="{}" transform="translate({x},0)">"#, escape(&class))?;
    writeln!(out, r#"<line x1="0" y1="0" x2="0" y2="{}" stroke="{}"/>"#, frame.canvas_height, theme.axis_line)?;
    for t in &axis.ticks {
        let tick_len = if grid { frame.canvas_width } else { 6.0 };
        let (stroke, dash) = if grid { (theme.grid, r#" stroke-dasharray="2,2""#) } else { (theme.axis_line, "") };
        writeln!(
            out,
            r#"<g class="tick" transform="translate(0,{})"><line x2="{}" stroke="{}"{dash}/><text x="{}" dy="0.32em" text-anchor="{}" font-size="12" fill="{}">{}</text></g>"#,
            t.px,
            if grid { tick_len } else { dir * tick_len },
            stroke,
            dir * 9.0,
            if dir < 0.0 { "end" } else { "start" },
            theme.axis_label,
            escape(&t.label)
        )?;
    }
    if let Some(title) = &axis.title {
        writeln!(
            out,
            r#"<text class="yAxisTitle" transform="rotate(-90)" x="{}" y="{}" text-anchor="middle" font-size="14" fill="{}">{}</text>"#,
            -frame.canvas_height / 2.0,
            dir * 25.0,
            theme.axis_label,
            escape(title)
        )?;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

fn draw_line_series(
    out: &mut String,
    bins: &SeriesBins,
    spec: &SeriesSpec,
    x: &TimeScale,
    y: &ValueScale,
    decimals: u32,
    color: &str,
) -> ChartResult<()> {
    writeln!(out, r#"<g class="line-series {}">"#, escape(&spec.css_class))?;
    let mut d = String::new();
    for (i, b) in bins.buckets.iter().enumerate() {
        write!(d, "{}{},{}", if i == 0 { "M" } else { "L" }, x.to_px(b.x0), y.to_px(b.mean))?;
    }
    writeln!(out, r#"<path class="line" d="{d}" fill="none" stroke="{color}" stroke-width="2"/>"#)?;

    if spec.show_values || spec.marker_radius.is_some() {
        for b in &bins.buckets {
            write!(out, r#"<g class="data-point" transform="translate({},{})">"#, x.to_px(b.x0), y.to_px(b.mean))?;
            if let Some(r) = spec.marker_radius {
                write!(out, r#"<circle cx="0" cy="0" r="{r}" fill="{color}"/>"#)?;
            }
            if spec.show_values {
                write!(out, r#"<text dx="0.5em" dy="1.0em" font-size="10">{}</text>"#, round_value(b.mean, decimals))?;
            }
            writeln!(out, "</g>")?;
        }
    }
    writeln!(out, "</g>")?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_bar_series(
    out: &mut String,
    bins: &SeriesBins,
    spec: &SeriesSpec,
    x: &TimeScale,
    y: &ValueScale,
    canvas_height: f64,
    (bar_slot, bar_count): (usize, usize),
    color: &str,
    theme: &Theme,
) -> ChartResult<()> {
    writeln!(out, r#"<g class="graph {}">"#, escape(&spec.css_class))?;
    for b in &bins.buckets {
        // Bars of several series share each bucket side by side; 1px gap per bucket.
        let band = (x.band_px(b) - 1.0).max(0.0);
        let slot_w = band / bar_count.max(1) as f64;
        let top = y.to_px(b.mean);
        let height = (canvas_height - top).max(0.0);
        let label = if b.mean.is_nan() { 0.0 } else { b.mean.floor() };
        writeln!(
            out,
            r#"<g class="bar" transform="translate({},{top})"><rect x="{}" width="{slot_w}" height="{height}" fill="{color}"/><text dy=".75em" y="6" x="{}" text-anchor="middle" font-size="10" fill="{}">{label}</text></g>"#,
            x.to_px(b.x0),
            1.0 + slot_w * bar_slot as f64,
            1.0 + slot_w * (bar_slot as f64 + 0.5),
            theme.bar_label,
        )?;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

fn draw_brush(
    out: &mut String,
    x: &TimeScale,
    frame: &Frame,
    selection: Option<(Timestamp, Timestamp)>,
    theme: &Theme,
) -> ChartResult<()> {
    writeln!(out, r#"<g class="brush" transform="translate(0,{})">"#, frame.canvas_height)?;
    writeln!(
        out,
        r#"<rect class="overlay" x="0" y="0" width="{}" height="{BRUSH_HEIGHT}" fill="none" pointer-events="all" cursor="crosshair"/>"#,
        frame.canvas_width
    )?;
    if let Some((start, end)) = selection {
        let (x0, x1) = (x.to_px(start), x.to_px(end));
        writeln!(
            out,
            r#"<rect class="selection" x="{x0}" y="0" width="{}" height="{BRUSH_HEIGHT}" fill="{}" fill-opacity="0.3" stroke="{}"/>"#,
            (x1 - x0).max(0.0),
            theme.brush,
            theme.brush
        )?;
    }
    writeln!(out, "</g>")?;
    Ok(())
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
