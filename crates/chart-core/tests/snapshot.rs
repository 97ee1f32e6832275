// File: crates/chart-core/tests/snapshot.rs
// Purpose: Golden SVG snapshot harness with bless flow.
// Behavior:
// - Renders a deterministic two-series chart to an SVG string.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares text for exact match.
// - Else, logs a note and skips the byte comparison.
// - The structural checks below run in every mode.

use chrono::{TimeZone, Utc};
use histochart_core::{Chart, ChartConfig, DataPoint, DataSource, SeriesSpec, TickUnit};

fn render_svg() -> String {
    let at = |y: i32, m: u32| Utc.with_ymd_and_hms(y, m, 15, 0, 0, 0).unwrap();
    let temps: Vec<DataPoint> = (1..=12).map(|m| DataPoint::new(at(2021, m), 10.0 + m as f64)).collect();
    let rain: Vec<DataPoint> = (3..=9).map(|m| DataPoint::new(at(2021, m), 40.0 - 2.0 * m as f64)).collect();

    let cfg = ChartConfig::builder()
        .tick_unit(TickUnit::Month)
        .shared_y_axis(false)
        .x_title("Month")
        .y_title("Temperature")
        .y_grid(true)
        .series(SeriesSpec::line().with_class("temp").with_label("Temperature").with_marker(2.5).with_values())
        .series(SeriesSpec::bar().with_class("rain").with_label("Rain"))
        .build()
        .expect("valid config");
    let sources: Vec<Box<dyn DataSource>> = vec![Box::new(temps), Box::new(rain)];
    let mut chart = Chart::new(cfg, sources).expect("chart");
    chart.render_to_svg().expect("render").expect("non-empty frame")
}

/// Shape of the golden chart: twelve monthly temperature buckets and seven rain bars
/// after the empty edge months are trimmed.
fn assert_chart_structure(svg: &str) {
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(!svg.contains("NaN"));
    assert_eq!(svg.matches(r#"class="data-point""#).count(), 12);
    assert_eq!(svg.matches(r#"<circle"#).count(), 12);
    assert_eq!(svg.matches(r#"class="bar""#).count(), 7);
    assert_eq!(svg.matches(r#"class="line""#).count(), 1);
    assert!(svg.contains(r#"class="line-series temp""#));
    assert!(svg.contains(r#"class="graph rain""#));
    assert!(svg.contains(r#"class="y-axis temp""#));
    assert!(svg.contains(r#"class="y-axis rain""#));
    assert!(svg.contains(">Month</text>"));
    assert!(svg.contains(">Temperature</text>"));
}

#[test]
fn golden_two_series_chart() {
    let svg = render_svg();
    assert_chart_structure(&svg);
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("two_series.svg");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &svg).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), svg.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read_to_string(&snap_path).expect("read snapshot");
        assert_eq!(svg, want, "rendered svg differs from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}

#[test]
fn rendering_is_deterministic() {
    assert_eq!(render_svg(), render_svg());
}
