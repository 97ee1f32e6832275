// File: crates/demo/src/main.rs
// Summary: Demo loads one CSV file per series, bins them on a shared time axis and writes an SVG chart.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::Parser;
use histochart_core::{
    Chart, ChartConfig, ChartOptions, DataPoint, DataSource, EmptySeriesPolicy, SeriesSpec, TickUnit, Timestamp,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Bin irregular time series from CSV files and render them as one SVG chart.
#[derive(Parser, Debug)]
#[command(name = "histochart-demo")]
#[command(version)]
struct Args {
    /// CSV inputs, one series per file.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Chart options as JSON; command line flags override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bucket width: millisecond, second, minute, hour, day, week, month or year.
    #[arg(short, long)]
    tick_unit: Option<TickUnit>,

    /// Give every series its own Y axis.
    #[arg(long)]
    independent_y: bool,

    /// Draw series as bars instead of lines.
    #[arg(long)]
    bars: bool,

    /// Decimal places for displayed values.
    #[arg(long)]
    decimals: Option<u32>,

    /// Render the series that have data even if others are empty.
    #[arg(long)]
    filter_empty: bool,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    x_title: Option<String>,

    #[arg(long)]
    y_title: Option<String>,

    /// Theme name (light or dark).
    #[arg(long)]
    theme: Option<String>,

    /// Print the tooltip readout for this canvas x position as JSON.
    #[arg(long)]
    probe: Option<f64>,

    /// Output SVG path.
    #[arg(short, long, default_value = "target/out/histochart.svg")]
    out: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let opts = build_options(&args)?;
    let config = ChartConfig::from_options(opts).context("invalid chart options")?;

    let mut sources: Vec<Box<dyn DataSource>> = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let points = load_series_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
        let valid = points.iter().filter(|p| p.is_valid()).count();
        info!(path = %path.display(), rows = points.len(), valid, "loaded series");
        sources.push(Box::new(points));
    }

    let mut chart = Chart::new(config, sources).context("series in config do not match the inputs")?;
    if chart.render_to_svg_file(&args.out)? {
        println!("Wrote {}", args.out.display());
    } else {
        warn!("nothing to draw; no file written");
        return Ok(());
    }

    if let Some(px) = args.probe {
        match chart.pointer_move(px) {
            Some(readout) => println!("{}", serde_json::to_string_pretty(&readout)?),
            None => warn!(px, "probe hit nothing"),
        }
    }
    Ok(())
}

/// Options from the optional JSON file, with command line overrides applied. When no
/// series are configured, one is created per input file.
fn build_options(args: &Args) -> Result<ChartOptions> {
    let mut opts = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<ChartOptions>(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ChartOptions::default(),
    };

    if let Some(unit) = args.tick_unit {
        opts.tick_unit = unit;
    }
    if args.independent_y {
        opts.shared_y_axis = false;
    }
    if let Some(d) = args.decimals {
        opts.value_decimals = d;
    }
    if args.filter_empty {
        opts.empty_series = EmptySeriesPolicy::FilterEmpty;
    }
    if let Some(w) = args.width {
        opts.width = w;
    }
    if let Some(h) = args.height {
        opts.height = h;
    }
    if args.x_title.is_some() {
        opts.x_title = args.x_title.clone();
    }
    if args.y_title.is_some() {
        opts.y_title = args.y_title.clone();
    }
    if let Some(theme) = &args.theme {
        opts.theme = theme.clone();
    }

    if opts.series.is_empty() {
        opts.series = args
            .inputs
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let base = if args.bars { SeriesSpec::bar() } else { SeriesSpec::line().with_marker(3.0) };
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("series");
                base.with_label(stem).with_class(format!("series-{i}"))
            })
            .collect();
    }
    debug!(?opts, "chart options");
    Ok(opts)
}

/// Load a two-column (time, value) CSV. Unparseable cells become points without `x` or
/// with a NaN `y`; the chart drops those before binning.
fn load_series_csv(path: &Path) -> Result<Vec<DataPoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();
    debug!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.iter().any(|n| *n == h.as_str()));
    let i_time = idx(&["time", "timestamp", "date", "datetime", "x"]).unwrap_or(0);
    let i_value = idx(&["value", "y", "count", "amount", "close"]).unwrap_or(1);

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let x = rec.get(i_time).and_then(parse_time);
        let y = rec
            .get(i_value)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(f64::NAN);
        out.push(DataPoint { x, y });
    }
    Ok(out)
}

/// Accepts RFC 3339, `YYYY-MM-DD[ HH:MM:SS]`, a bare year, or epoch seconds/milliseconds.
fn parse_time(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|ndt| ndt.and_utc());
    }
    let n = s.parse::<i64>().ok()?;
    if s.len() == 4 {
        return Utc.with_ymd_and_hms(n as i32, 1, 1, 0, 0, 0).single();
    }
    if n.abs() > 10_i64.pow(11) {
        Utc.timestamp_millis_opt(n).single()
    } else {
        Utc.timestamp_opt(n, 0).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_time_formats() {
        let day = Utc.with_ymd_and_hms(2021, 3, 4, 0, 0, 0).unwrap();
        assert_eq!(parse_time("2021-03-04"), Some(day));
        assert_eq!(parse_time("2021-03-04T00:00:00Z"), Some(day));
        assert_eq!(parse_time("2021-03-04 00:00:00"), Some(day));
        assert_eq!(parse_time(&day.timestamp().to_string()), Some(day));
        assert_eq!(parse_time(&day.timestamp_millis().to_string()), Some(day));
        assert_eq!(parse_time("2019"), Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).single());
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("soon"), None);
    }
}
