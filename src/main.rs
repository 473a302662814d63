use anyhow::{Context, Result};
use chrono::Utc;
use num_complex::Complex64;

use rusty_series::{codec, generate, ArraySeries, ListSeries, NumberFormat, Sample};

fn main() -> Result<()> {
    env_logger::init();
    let fmt = NumberFormat::new(2);

    println!("=== 1. ListSeries and its conversion ===");
    let xs = [0.1, 0.2, 0.3, 0.4, 0.5];
    let list = ListSeries::from_fn("List_1", Utc::now(), &xs, |x| {
        Sample::new(x, x * 2.0, x * 4.0)
    });
    println!("{}", list.to_long_string(fmt));
    println!("Converted ArraySeries:");
    println!("{}", list.to_array_series().to_long_string(fmt));

    println!("\n=== 2. Indexed access into an ArraySeries ===");
    let array = ArraySeries::from_fn("Array_1", Utc::now(), vec![1.0, 2.0, 3.0, 4.0], |x| {
        (x, x * 3.0)
    });
    match array.sample_at(1) {
        Some(sample) => println!("Sample at index 1: {sample}"),
        None => println!("Sample at index 1: absent"),
    }
    match array.sample_at(10) {
        Some(sample) => println!("Sample at index 10: {sample}"),
        None => println!("Sample at index 10: absent (out of range)"),
    }

    println!("\n=== 3. Random demo collection ===");
    let collection = generate::demo_collection(2, 2, 42);
    println!("{}", collection.to_long_string(fmt));

    println!("\n=== 4. Per-series length and min/max |Y1 - Y2| ===");
    for series in &collection {
        let (min, max) = series.min_max_difference();
        println!(
            "{series}: length = {}, min/max difference = ({}, {})",
            series.len(),
            fmt.f64(min),
            fmt.f64(max)
        );
    }

    println!("\n=== 5. Keyed lookup ===");
    match collection.get("Array_0") {
        Ok(series) => println!("Found: {series}"),
        Err(err) => println!("Error: {err}"),
    }
    match collection.get("NotExists") {
        Ok(series) => println!("Found: {series}"),
        Err(err) => println!("Error: {err}"),
    }

    println!("\n=== 6. Collection-wide aggregates ===");
    println!("All samples in the collection:");
    for sample in collection.samples() {
        println!("{sample}");
    }
    println!("Max |Y1| over all samples: {}", collection.max_y1_magnitude());
    println!("X coordinates shared by two or more series:");
    let repeating = collection.repeating_x_coordinates();
    if repeating.is_empty() {
        println!("(none)");
    } else {
        for x in repeating {
            println!("{x}");
        }
    }

    println!("\n=== 7. Save / load round trip ===");
    let saved = ArraySeries::from_fn("SaveTest", Utc::now(), vec![1.0, 2.0, 3.0], |x| {
        (x, x * 2.0)
    });
    let path = std::env::temp_dir().join("rusty-series-demo.txt");
    codec::save(&path, &saved).with_context(|| format!("saving {}", path.display()))?;
    let loaded: ArraySeries<f64> =
        codec::load(&path).with_context(|| format!("loading {}", path.display()))?;
    println!("Loaded back from {}:", path.display());
    println!("{}", loaded.to_long_string(fmt));

    println!("\n=== 8. Complex-valued series ===");
    let complex = ListSeries::from_fn("Complex_1", Utc::now(), &xs, |x| {
        Sample::new(
            x,
            Complex64::new(x, x * 2.0),
            Complex64::new(x * 3.0, x * 4.0),
        )
    });
    println!("{}", complex.to_long_string(fmt));
    let (min, max) = complex.min_max_difference();
    println!(
        "min/max |Y1 - Y2| = ({}, {})",
        fmt.f64(min),
        fmt.f64(max)
    );

    Ok(())
}
