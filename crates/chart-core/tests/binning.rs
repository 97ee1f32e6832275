// File: crates/chart-core/tests/binning.rs
// Purpose: Domain derivation, bucket boundaries, point assignment, mean and trimming.

use chrono::{TimeZone, Utc};
use histochart_core::aggregate::{aggregate, mean_y, trim_empty_edges};
use histochart_core::{bin, Bucket, DataPoint, TickUnit, TimeDomain, Timestamp};

fn ymd(y: i32, m: u32, d: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn pt(y: i32, m: u32, d: u32, v: f64) -> DataPoint {
    DataPoint::new(ymd(y, m, d), v)
}

#[test]
fn single_timestamp_domain_is_widened_by_one_unit() {
    let t = Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap();
    let points = vec![DataPoint::new(t, 1.0), DataPoint::new(t, 3.0)];

    let day = TimeDomain::from_points(&points, TickUnit::Day).unwrap();
    assert!(day.start < t && t < day.end);
    assert_eq!(day.end - t, t - day.start);
    assert_eq!((day.end - t).num_milliseconds(), 86_400_000);

    let year = TimeDomain::from_points(&points, TickUnit::Year).unwrap();
    assert_eq!(year.start, Utc.with_ymd_and_hms(2019, 6, 15, 12, 0, 0).unwrap());
    assert_eq!(year.end, Utc.with_ymd_and_hms(2021, 6, 15, 12, 0, 0).unwrap());
}

#[test]
fn domain_spans_all_series_and_ignores_invalid_points() {
    let a = vec![pt(2019, 5, 1, 1.0), pt(2020, 1, 1, 2.0)];
    let b = vec![pt(2018, 2, 1, f64::NAN), pt(2018, 9, 1, 4.0), DataPoint { x: None, y: 1.0 }, pt(2021, 3, 1, 5.0)];
    let dom = TimeDomain::from_points(a.iter().chain(b.iter()), TickUnit::Year).unwrap();
    assert_eq!(dom.start, ymd(2018, 9, 1));
    assert_eq!(dom.end, ymd(2021, 3, 1));

    assert!(TimeDomain::from_points(&[] as &[DataPoint], TickUnit::Year).is_none());
}

#[test]
fn buckets_cover_domain_without_gaps() {
    let dom = TimeDomain::new(ymd(2018, 3, 10), ymd(2021, 8, 1));
    let buckets = bin(&[], &dom, TickUnit::Year);

    assert_eq!(buckets.len(), 4);
    assert_eq!(buckets.first().unwrap().x0, dom.start);
    assert_eq!(buckets.last().unwrap().x1, dom.end);
    for pair in buckets.windows(2) {
        assert_eq!(pair[0].x1, pair[1].x0);
        assert!(pair[0].x0 < pair[0].x1);
    }
    assert!(buckets.iter().all(Bucket::is_empty));
}

#[test]
fn points_land_in_half_open_buckets() {
    let dom = TimeDomain::new(ymd(2018, 3, 10), ymd(2021, 8, 1));
    let points = vec![
        pt(2018, 3, 10, 1.0), // domain start
        pt(2019, 1, 1, 2.0),  // exactly on a boundary: later bucket
        pt(2019, 12, 31, 3.0),
        pt(2021, 8, 1, 4.0),  // domain end: last bucket
        pt(2022, 1, 1, 9.0),  // outside
    ];
    let buckets = bin(&points, &dom, TickUnit::Year);
    let counts: Vec<usize> = buckets.iter().map(Bucket::len).collect();
    assert_eq!(counts, vec![1, 2, 0, 1]);
    assert_eq!(buckets[1].x0, ymd(2019, 1, 1));
}

#[test]
fn unsorted_input_bins_the_same() {
    let dom = TimeDomain::new(ymd(2019, 1, 1), ymd(2019, 4, 1));
    let sorted = vec![pt(2019, 1, 5, 1.0), pt(2019, 2, 5, 2.0), pt(2019, 3, 5, 3.0)];
    let mut shuffled = sorted.clone();
    shuffled.reverse();
    let a = aggregate(bin(&sorted, &dom, TickUnit::Month));
    let b = aggregate(bin(&shuffled, &dom, TickUnit::Month));
    let means = |v: &[Bucket]| v.iter().map(|b| b.mean).collect::<Vec<_>>();
    assert_eq!(means(&a), means(&b));
    assert_eq!(means(&a), vec![1.0, 2.0, 3.0, 0.0]);
}

#[test]
fn mean_of_values_and_zero_for_empty() {
    let mut full = Bucket::new(ymd(2020, 1, 1), ymd(2021, 1, 1));
    full.points = vec![pt(2020, 2, 1, 2.0), pt(2020, 3, 1, 4.0), pt(2020, 4, 1, 6.0)];
    let empty = Bucket::new(ymd(2021, 1, 1), ymd(2022, 1, 1));

    let out = aggregate(vec![full, empty]);
    assert_eq!(out[0].mean, 4.0);
    assert_eq!(out[1].mean, 0.0);
    assert!(!out[1].mean.is_nan());
    assert_eq!(mean_y(&out[1]), 0.0);
}

#[test]
fn trimming_keeps_interior_gaps_and_is_idempotent() {
    let dom = TimeDomain::new(ymd(2015, 1, 1), ymd(2021, 1, 1));
    let points = vec![pt(2017, 6, 1, 1.0), pt(2019, 6, 1, 3.0)];
    let mut buckets = aggregate(bin(&points, &dom, TickUnit::Year));
    assert_eq!(buckets.len(), 7);

    let lead = trim_empty_edges(&mut buckets);
    assert_eq!(lead, 2);
    assert_eq!(buckets.len(), 3);
    assert!(buckets[1].is_empty());

    let once = buckets.clone();
    assert_eq!(trim_empty_edges(&mut buckets), 0);
    assert_eq!(buckets, once);

    let mut all_empty = bin(&[], &dom, TickUnit::Year);
    trim_empty_edges(&mut all_empty);
    assert!(all_empty.is_empty());
}
