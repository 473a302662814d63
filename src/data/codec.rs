use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::model::{ArraySeries, Scalar};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Persisted format
// ---------------------------------------------------------------------------
//
// One file per array-backed series: exactly five newline-terminated lines,
// each an independently JSON-encoded value, in this fixed order:
//
//   1. key       – string
//   2. date      – RFC 3339 string
//   3. x nodes   – array of numbers
//   4. y1 values – array (all even-indexed value slots, in node order)
//   5. y2 values – array (all odd-indexed value slots, in node order)
//
// There is no header, version marker or length prefix; the format is
// understood only by this matching writer/reader pair.

/// Write `series` to `path` in the five-line format.
///
/// Any I/O failure aborts the write and is reported; a partial file may
/// remain (no atomic-write guarantee).
pub fn save<N: Scalar>(path: &Path, series: &ArraySeries<N>) -> Result<(), DataError> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    let y1: Vec<N> = series.values.iter().copied().step_by(2).collect();
    let y2: Vec<N> = series.values.iter().copied().skip(1).step_by(2).collect();

    writeln!(w, "{}", encode("key", &series.key)?)?;
    writeln!(w, "{}", encode("date", &series.date)?)?;
    writeln!(w, "{}", encode("x nodes", &series.x_nodes)?)?;
    writeln!(w, "{}", encode("y1 values", &y1)?)?;
    writeln!(w, "{}", encode("y2 values", &y2)?)?;
    w.flush()?;

    info!(
        "saved series '{}' ({} nodes) to {}",
        series.key,
        series.len(),
        path.display()
    );
    Ok(())
}

/// Read an array-backed series back from the five-line format.
///
/// A missing line, a line that fails to decode as its expected type, or
/// a Y-array length mismatch against the x-node count aborts the load
/// with a format error. Numeric ranges are not validated; any finite
/// number is accepted.
pub fn load<N: Scalar>(path: &Path) -> Result<ArraySeries<N>, DataError> {
    let file = File::open(path)?;
    let mut lines = BufReader::new(file).lines();

    let key: String = decode(next_line(&mut lines, 1, "key")?, 1, "key")?;
    let date: DateTime<Utc> = decode(next_line(&mut lines, 2, "date")?, 2, "date")?;
    let x_nodes: Vec<f64> = decode(next_line(&mut lines, 3, "x nodes")?, 3, "x nodes")?;
    let y1: Vec<N> = decode(next_line(&mut lines, 4, "y1 values")?, 4, "y1 values")?;
    let y2: Vec<N> = decode(next_line(&mut lines, 5, "y2 values")?, 5, "y2 values")?;

    if y1.len() != x_nodes.len() {
        return Err(DataError::LengthMismatch {
            axis: 1,
            got: y1.len(),
            expected: x_nodes.len(),
        });
    }
    if y2.len() != x_nodes.len() {
        return Err(DataError::LengthMismatch {
            axis: 2,
            got: y2.len(),
            expected: x_nodes.len(),
        });
    }

    // Re-interleave positionally: values[2i] = y1[i], values[2i+1] = y2[i].
    let mut values = Vec::with_capacity(x_nodes.len() * 2);
    for (a, b) in y1.into_iter().zip(y2) {
        values.push(a);
        values.push(b);
    }

    debug!(
        "loaded series '{key}' ({} nodes) from {}",
        x_nodes.len(),
        path.display()
    );
    Ok(ArraySeries {
        key,
        date,
        x_nodes,
        values,
    })
}

// -- Line helpers --

fn encode<T: Serialize>(field: &'static str, value: &T) -> Result<String, DataError> {
    serde_json::to_string(value).map_err(|source| DataError::Encode { field, source })
}

fn decode<T: DeserializeOwned>(
    text: String,
    line: usize,
    field: &'static str,
) -> Result<T, DataError> {
    serde_json::from_str(&text).map_err(|source| DataError::BadLine { line, field, source })
}

fn next_line(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    line: usize,
    field: &'static str,
) -> Result<String, DataError> {
    match lines.next() {
        Some(result) => Ok(result?),
        None => Err(DataError::MissingLine { line, field }),
    }
}
