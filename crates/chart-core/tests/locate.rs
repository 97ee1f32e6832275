// File: crates/chart-core/tests/locate.rs
// Purpose: Pointer-to-bucket resolution, cross-series readout and value rounding.

use chrono::{Duration, TimeZone, Utc};
use histochart_core::locate::{round_value, TextAnchor};
use histochart_core::{align, locate, read_pointer, AlignOptions, Bucket, DataPoint, Timestamp};

fn ymd(y: i32, m: u32, d: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn years(from: i32, to: i32) -> Vec<Bucket> {
    (from..to).map(|y| Bucket::new(ymd(y, 1, 1), ymd(y + 1, 1, 1))).collect()
}

/// `x0 + frac * (x1 - x0)` for bucket `b`.
fn at(b: &Bucket, num: i64, den: i64) -> Timestamp {
    let span = (b.x1 - b.x0).num_milliseconds();
    b.x0 + Duration::milliseconds(span * num / den)
}

#[test]
fn midpoint_stays_in_bucket() {
    let buckets = years(2019, 2022);
    assert_eq!(locate(&buckets, at(&buckets[1], 1, 2)), Some(1));
    assert_eq!(locate(&buckets, at(&buckets[1], 1, 10)), Some(1));
}

#[test]
fn closer_to_end_moves_to_next_bucket() {
    let buckets = years(2019, 2022);
    assert_eq!(locate(&buckets, at(&buckets[1], 9, 10)), Some(2));
    // A shared boundary counts as the end of the earlier bucket, then advances.
    assert_eq!(locate(&buckets, ymd(2020, 1, 1)), Some(1));
}

#[test]
fn last_bucket_never_advances_past_the_end() {
    let buckets = years(2019, 2022);
    assert_eq!(locate(&buckets, at(&buckets[2], 9, 10)), Some(2));
    assert_eq!(locate(&buckets, ymd(2022, 1, 1)), Some(2));
}

#[test]
fn out_of_range_times_clamp() {
    let buckets = years(2019, 2022);
    assert_eq!(locate(&buckets, ymd(2010, 1, 1)), Some(0));
    assert_eq!(locate(&buckets, ymd(2030, 1, 1)), Some(2));
    assert_eq!(locate(&[], ymd(2020, 1, 1)), None);
}

#[test]
fn rounding_follows_decimals() {
    assert_eq!(round_value(3.14159, 2), 3.14);
    assert_eq!(round_value(2.5, 0), 3.0);
    assert_eq!(round_value(-2.5, 0), -2.0);
    assert_eq!(round_value(7.0, 3), 7.0);
    assert_eq!(round_value(f64::NAN, 1), 0.0);
}

#[test]
fn readout_maps_buckets_across_trimmed_series() {
    let data = vec![
        vec![
            DataPoint::new(ymd(2018, 7, 1), 1.0),
            DataPoint::new(ymd(2019, 7, 1), 2.0),
            DataPoint::new(ymd(2020, 7, 1), 3.0),
            DataPoint::new(ymd(2021, 7, 1), 4.0),
        ],
        vec![DataPoint::new(ymd(2020, 5, 1), 8.125), DataPoint::new(ymd(2020, 9, 1), 8.125)],
    ];
    let opts = AlignOptions::default();
    let a = align(&data, &opts).unwrap();

    let px = a.x_scale.to_px_exact(ymd(2020, 3, 1));
    let r = read_pointer(&a, px, 2, opts.canvas_height).unwrap();
    assert_eq!(r.bucket_index, 2);
    assert_eq!(r.x0, ymd(2020, 1, 1));
    assert_eq!(r.values.len(), 2);
    assert_eq!(r.values[0].bucket_index, 2);
    assert_eq!(r.values[1].series_index, 1);
    assert_eq!(r.values[1].bucket_index, 0);
    assert_eq!(r.values[1].value, 8.13);

    // The second series trimmed 2019 away, so only the first one reports.
    let px = a.x_scale.to_px_exact(ymd(2019, 3, 1));
    let r = read_pointer(&a, px, 0, opts.canvas_height).unwrap();
    assert_eq!(r.values.len(), 1);
    assert_eq!(r.values[0].value, 2.0);
}

#[test]
fn labels_stay_inside_the_canvas_and_flip_sides() {
    let data = vec![vec![
        DataPoint::new(ymd(2016, 6, 1), 0.0),
        DataPoint::new(ymd(2017, 6, 1), 10.0),
        DataPoint::new(ymd(2018, 6, 1), 5.0),
        DataPoint::new(ymd(2019, 6, 1), 10.0),
    ]];
    let opts = AlignOptions::default();
    let a = align(&data, &opts).unwrap();

    for b in &a.series[0].buckets {
        let r = read_pointer(&a, a.x_scale.to_px_exact(b.x0), 0, opts.canvas_height).unwrap();
        let label = r.values[0].label;
        assert!(label.y >= 20.0 && label.y <= opts.canvas_height - 20.0);
    }

    let first = read_pointer(&a, 0.0, 0, opts.canvas_height).unwrap();
    assert_eq!(first.values[0].label.anchor, TextAnchor::Start);
    let last = read_pointer(&a, opts.canvas_width, 0, opts.canvas_height).unwrap();
    assert_eq!(last.values[0].label.anchor, TextAnchor::End);
}
