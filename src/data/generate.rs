use chrono::Utc;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::collection::SeriesCollection;
use super::model::{ArraySeries, ListSeries, Sample};

// ---------------------------------------------------------------------------
// Demo-data generation
// ---------------------------------------------------------------------------
//
// Random sources are injected (or built from an explicit seed), never
// pulled from ambient global state, so demo runs are reproducible.

/// An ordered X grid of `count` coordinates: `i * 0.1` plus uniform
/// jitter in `[0, 1)`.
pub fn x_grid(rng: &mut impl Rng, count: usize) -> Vec<f64> {
    (0..count).map(|i| i as f64 * 0.1 + rng.gen::<f64>()).collect()
}

/// A demo collection of `n_array` array-backed and `n_list` list-backed
/// real-valued series over random 5-point grids.
pub fn demo_collection(n_array: usize, n_list: usize, seed: u64) -> SeriesCollection<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut collection = SeriesCollection::new();

    for i in 0..n_array {
        let series = ArraySeries::from_fn(
            format!("Array_{i}"),
            Utc::now(),
            x_grid(&mut rng, 5),
            |x| (x, x * 3.0),
        );
        collection.add(series);
    }
    for i in 0..n_list {
        let series = ListSeries::from_fn(
            format!("List_{i}"),
            Utc::now(),
            &x_grid(&mut rng, 5),
            |x| Sample::new(x, x * 2.0, x * 4.0),
        );
        collection.add(series);
    }
    collection
}

/// Complex-valued counterpart of [`demo_collection`].
pub fn demo_complex_collection(
    n_array: usize,
    n_list: usize,
    seed: u64,
) -> SeriesCollection<Complex64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut collection = SeriesCollection::new();

    for i in 0..n_array {
        let series = ArraySeries::from_fn(
            format!("Array_{i}"),
            Utc::now(),
            x_grid(&mut rng, 5),
            |x| (Complex64::new(x, 0.0), Complex64::new(x * 3.0, 0.0)),
        );
        collection.add(series);
    }
    for i in 0..n_list {
        let series = ListSeries::from_fn(
            format!("List_{i}"),
            Utc::now(),
            &x_grid(&mut rng, 5),
            |x| {
                Sample::new(
                    x,
                    Complex64::new(x, x * 2.0),
                    Complex64::new(x * 3.0, x * 4.0),
                )
            },
        );
        collection.add(series);
    }
    collection
}
