//! End-to-end round trips through real files on disk.

use chrono::{TimeZone, Utc};
use num_complex::Complex64;

use rusty_series::{codec, ArraySeries, ListSeries, Sample, SeriesCollection};

#[test]
fn list_to_array_to_disk_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("series.txt");
    let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let list = ListSeries::from_fn("List_1", date, &[0.1, 0.2, 0.3, 0.4, 0.5], |x| {
        Sample::new(x, x * 2.0, x * 4.0)
    });
    let array = list.to_array_series();
    codec::save(&path, &array).unwrap();

    let loaded: ArraySeries<f64> = codec::load(&path).unwrap();
    assert_eq!(loaded, array);

    // The loaded series flattens back to the original sample sequence.
    let samples: Vec<Sample<f64>> = loaded.samples().collect();
    assert_eq!(samples, list.samples);
}

#[test]
fn loaded_series_joins_a_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("member.txt");
    let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let series = ArraySeries::from_fn("FromDisk", date, vec![1.0, 2.0], |x| (x, -x));
    codec::save(&path, &series).unwrap();
    let loaded: ArraySeries<f64> = codec::load(&path).unwrap();

    let mut collection = SeriesCollection::new();
    assert!(collection.add(loaded.clone()));
    // The loaded copy carries the same identity, so a re-add is rejected.
    assert!(!collection.add(loaded));

    assert_eq!(collection.get("FromDisk").unwrap().len(), 2);
    assert_eq!(collection.max_y1_magnitude(), 2.0);
}

#[test]
fn complex_series_round_trip_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("complex.txt");
    let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let series = ArraySeries::from_fn("Cplx", date, vec![0.5, 1.5, 2.5], |x| {
        (Complex64::new(x, -x), Complex64::new(x * 3.0, x * 4.0))
    });
    codec::save(&path, &series).unwrap();

    let loaded: ArraySeries<Complex64> = codec::load(&path).unwrap();
    assert_eq!(loaded, series);
    assert_eq!(loaded.min_max_difference(), series.min_max_difference());
}

#[test]
fn file_written_by_hand_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manual.txt");
    std::fs::write(
        &path,
        "\"Manual\"\n\"2024-05-01T12:00:00Z\"\n[1.0,2.0]\n[10.0,20.0]\n[11.0,22.0]\n",
    )
    .unwrap();

    let loaded: ArraySeries<f64> = codec::load(&path).unwrap();
    assert_eq!(loaded.key, "Manual");
    assert_eq!(loaded.x_nodes, vec![1.0, 2.0]);
    assert_eq!(loaded.values, vec![10.0, 11.0, 20.0, 22.0]);
    assert_eq!(
        loaded.sample_at(1),
        Some(Sample::new(2.0, 20.0, 22.0))
    );
}
