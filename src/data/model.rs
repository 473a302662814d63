use std::fmt;
use std::ops::Sub;

use chrono::{DateTime, Utc};
use num_complex::Complex64;
use serde::de::DeserializeOwned;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Scalar – the numeric kind of the dependent values
// ---------------------------------------------------------------------------

/// The numeric kind used for a sample's Y1/Y2 values.
///
/// The two supported kinds are real (`f64`) and complex (`Complex64`)
/// doubles; everything downstream (series, collection, codec) is generic
/// over this choice instead of hard-coding one.
pub trait Scalar:
    Copy + PartialEq + fmt::Debug + fmt::Display + Sub<Output = Self> + Serialize + DeserializeOwned + 'static
{
    /// Absolute value for reals, modulus for complex numbers.
    fn magnitude(self) -> f64;

    /// Fixed-precision rendering for the long-form output.
    fn render(self, decimals: usize) -> String;
}

impl Scalar for f64 {
    fn magnitude(self) -> f64 {
        self.abs()
    }

    fn render(self, decimals: usize) -> String {
        format!("{self:.decimals$}")
    }
}

impl Scalar for Complex64 {
    fn magnitude(self) -> f64 {
        self.norm()
    }

    fn render(self, decimals: usize) -> String {
        let sign = if self.im.is_sign_negative() { '-' } else { '+' };
        format!("{:.decimals$}{sign}{:.decimals$}i", self.re, self.im.abs())
    }
}

// ---------------------------------------------------------------------------
// NumberFormat – how numbers are printed in long-form renderings
// ---------------------------------------------------------------------------

/// Numeric display format for `to_long_string` renderings.
#[derive(Clone, Copy, Debug)]
pub struct NumberFormat {
    /// Digits after the decimal point.
    pub decimals: usize,
}

impl NumberFormat {
    pub fn new(decimals: usize) -> Self {
        Self { decimals }
    }

    pub fn f64(&self, v: f64) -> String {
        format!("{v:.prec$}", prec = self.decimals)
    }

    pub fn scalar<N: Scalar>(&self, v: N) -> String {
        v.render(self.decimals)
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

// ---------------------------------------------------------------------------
// Sample – one (X, Y1, Y2) measurement triple
// ---------------------------------------------------------------------------

/// A single measurement: independent coordinate `x` with dependent
/// values `y1`/`y2`. Immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample<N: Scalar> {
    pub x: f64,
    pub y1: N,
    pub y2: N,
}

impl<N: Scalar> Sample<N> {
    pub fn new(x: f64, y1: N, y2: N) -> Self {
        Self { x, y1, y2 }
    }

    /// `|Y1 - Y2|` for this sample.
    pub fn difference_magnitude(&self) -> f64 {
        (self.y1 - self.y2).magnitude()
    }

    pub fn to_string_with(&self, fmt: NumberFormat) -> String {
        format!(
            "X: {}, Y1: {}, Y2: {}",
            fmt.f64(self.x),
            fmt.scalar(self.y1),
            fmt.scalar(self.y2)
        )
    }
}

impl<N: Scalar> fmt::Display for Sample<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {}, Y1: {}, Y2: {}", self.x, self.y1, self.y2)
    }
}

// ---------------------------------------------------------------------------
// ListSeries – growable sequence of samples
// ---------------------------------------------------------------------------

/// A series backed by a growable, ordered sequence of samples.
///
/// Order is insertion order and is meaningful; duplicate X coordinates
/// are permitted and preserved.
#[derive(Clone, Debug, PartialEq)]
pub struct ListSeries<N: Scalar> {
    pub key: String,
    pub date: DateTime<Utc>,
    pub samples: Vec<Sample<N>>,
}

impl<N: Scalar> ListSeries<N> {
    pub fn new(key: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            date,
            samples: Vec::new(),
        }
    }

    /// Build one sample per coordinate, in order, by applying `f`.
    /// Input coordinates are neither sorted nor deduplicated.
    pub fn from_fn(
        key: impl Into<String>,
        date: DateTime<Utc>,
        xs: &[f64],
        f: impl Fn(f64) -> Sample<N>,
    ) -> Self {
        Self {
            key: key.into(),
            date,
            samples: xs.iter().map(|&x| f(x)).collect(),
        }
    }

    pub fn push(&mut self, sample: Sample<N>) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_at(&self, index: usize) -> Option<Sample<N>> {
        self.samples.get(index).copied()
    }

    /// `(min, max)` of `|Y1 - Y2|` over all samples; `(0, 0)` when the
    /// series holds no samples.
    pub fn min_max_difference(&self) -> (f64, f64) {
        if self.samples.is_empty() {
            return (0.0, 0.0);
        }
        min_max(self.samples.iter().map(Sample::difference_magnitude))
    }

    /// Convert to the array-backed representation by positional copy:
    /// every sample lands at the same index, duplicates retained, and
    /// the result never aliases this series' storage.
    pub fn to_array_series(&self) -> ArraySeries<N> {
        let x_nodes: Vec<f64> = self.samples.iter().map(|s| s.x).collect();
        let mut values = Vec::with_capacity(self.samples.len() * 2);
        for sample in &self.samples {
            values.push(sample.y1);
            values.push(sample.y2);
        }
        ArraySeries {
            key: self.key.clone(),
            date: self.date,
            x_nodes,
            values,
        }
    }

    pub fn to_long_string(&self, fmt: NumberFormat) -> String {
        let mut out = self.to_string();
        for sample in &self.samples {
            out.push('\n');
            out.push_str(&sample.to_string_with(fmt));
        }
        out
    }
}

impl<N: Scalar> fmt::Display for ListSeries<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ListSeries: key = {}, date = {}, count = {}",
            self.key,
            self.date,
            self.samples.len()
        )
    }
}

// ---------------------------------------------------------------------------
// ArraySeries – fixed coordinate array plus interleaved values
// ---------------------------------------------------------------------------

/// A series backed by two fixed arrays: x nodes and interleaved values,
/// where `values[2i]` is Y1 and `values[2i + 1]` is Y2 of node `i`.
///
/// Invariant: `values.len() == 2 * x_nodes.len()`. The constructors
/// maintain it and the codec validates it on load.
#[derive(Clone, Debug, PartialEq)]
pub struct ArraySeries<N: Scalar> {
    pub key: String,
    pub date: DateTime<Utc>,
    pub x_nodes: Vec<f64>,
    pub values: Vec<N>,
}

impl<N: Scalar> ArraySeries<N> {
    pub fn new(key: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            date,
            x_nodes: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from a coordinate array, computing Y1/Y2 per node with `f`.
    pub fn from_fn(
        key: impl Into<String>,
        date: DateTime<Utc>,
        x_nodes: Vec<f64>,
        f: impl Fn(f64) -> (N, N),
    ) -> Self {
        let mut values = Vec::with_capacity(x_nodes.len() * 2);
        for &x in &x_nodes {
            let (y1, y2) = f(x);
            values.push(y1);
            values.push(y2);
        }
        Self {
            key: key.into(),
            date,
            x_nodes,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.x_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_nodes.is_empty()
    }

    /// The sample at `index`, or `None` when `index` is outside
    /// `[0, len)`. Out-of-range access is a normal queryable condition,
    /// not an error.
    pub fn sample_at(&self, index: usize) -> Option<Sample<N>> {
        if index >= self.x_nodes.len() || self.values.len() < 2 * index + 2 {
            return None;
        }
        Some(Sample::new(
            self.x_nodes[index],
            self.values[2 * index],
            self.values[2 * index + 1],
        ))
    }

    /// Restartable iterator over the samples, in node order.
    pub fn samples(&self) -> impl Iterator<Item = Sample<N>> + '_ {
        (0..self.len()).filter_map(move |i| self.sample_at(i))
    }

    /// `(min, max)` of `|Y1 - Y2|` over all nodes; `(0, 0)` when fewer
    /// than 2 value slots exist. The threshold intentionally differs
    /// from the list variant's `count == 0` check.
    pub fn min_max_difference(&self) -> (f64, f64) {
        if self.values.len() < 2 {
            return (0.0, 0.0);
        }
        min_max(self.values.chunks_exact(2).map(|v| (v[0] - v[1]).magnitude()))
    }

    pub fn to_long_string(&self, fmt: NumberFormat) -> String {
        let mut out = self.to_string();
        for sample in self.samples() {
            out.push('\n');
            out.push_str(&sample.to_string_with(fmt));
        }
        out
    }
}

impl<N: Scalar> fmt::Display for ArraySeries<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArraySeries: key = {}, date = {}, count = {}",
            self.key,
            self.date,
            self.x_nodes.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Series – the two representations behind one interface
// ---------------------------------------------------------------------------

/// Either representation of a labeled, dated series.
#[derive(Clone, Debug, PartialEq)]
pub enum Series<N: Scalar> {
    List(ListSeries<N>),
    Array(ArraySeries<N>),
}

impl<N: Scalar> Series<N> {
    pub fn key(&self) -> &str {
        match self {
            Series::List(s) => &s.key,
            Series::Array(s) => &s.key,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Series::List(s) => s.date,
            Series::Array(s) => s.date,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Series::List(s) => s.len(),
            Series::Array(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample_at(&self, index: usize) -> Option<Sample<N>> {
        match self {
            Series::List(s) => s.sample_at(index),
            Series::Array(s) => s.sample_at(index),
        }
    }

    /// Restartable iterator over the samples, in series order.
    pub fn samples(&self) -> impl Iterator<Item = Sample<N>> + '_ {
        (0..self.len()).filter_map(move |i| self.sample_at(i))
    }

    pub fn min_max_difference(&self) -> (f64, f64) {
        match self {
            Series::List(s) => s.min_max_difference(),
            Series::Array(s) => s.min_max_difference(),
        }
    }

    /// Identity line followed by one line per sample, in order.
    pub fn to_long_string(&self, fmt: NumberFormat) -> String {
        match self {
            Series::List(s) => s.to_long_string(fmt),
            Series::Array(s) => s.to_long_string(fmt),
        }
    }
}

impl<N: Scalar> fmt::Display for Series<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Series::List(s) => s.fmt(f),
            Series::Array(s) => s.fmt(f),
        }
    }
}

impl<N: Scalar> From<ListSeries<N>> for Series<N> {
    fn from(s: ListSeries<N>) -> Self {
        Series::List(s)
    }
}

impl<N: Scalar> From<ArraySeries<N>> for Series<N> {
    fn from(s: ArraySeries<N>) -> Self {
        Series::Array(s)
    }
}

// -- Shared min/max scan over difference magnitudes --

fn min_max(diffs: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for d in diffs {
        if d < min {
            min = d;
        }
        if d > max {
            max = d;
        }
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_conversion_preserves_sample_sequence() {
        let xs = [0.1, 0.2, 0.3, 0.4, 0.5];
        let list = ListSeries::from_fn("List_1", date(), &xs, |x| Sample::new(x, x * 2.0, x * 4.0));
        let array = list.to_array_series();

        assert_eq!(array.len(), list.len());
        let flattened: Vec<Sample<f64>> = array.samples().collect();
        assert_eq!(flattened, list.samples);
    }

    #[test]
    fn test_conversion_keeps_duplicate_x_positionally() {
        let mut list: ListSeries<f64> = ListSeries::new("dups", date());
        list.push(Sample::new(2.0, 1.0, 1.0));
        list.push(Sample::new(2.0, 9.0, 9.0));

        let array = list.to_array_series();
        assert_eq!(array.sample_at(0), Some(Sample::new(2.0, 1.0, 1.0)));
        assert_eq!(array.sample_at(1), Some(Sample::new(2.0, 9.0, 9.0)));
    }

    #[test]
    fn test_min_max_difference_empty_is_zero_zero() {
        let list: ListSeries<f64> = ListSeries::new("empty", date());
        assert_eq!(list.min_max_difference(), (0.0, 0.0));

        let array: ArraySeries<f64> = ArraySeries::new("empty", date());
        assert_eq!(array.min_max_difference(), (0.0, 0.0));
    }

    #[test]
    fn test_min_max_difference_single_sample() {
        let mut list: ListSeries<f64> = ListSeries::new("one", date());
        list.push(Sample::new(1.0, 2.0, 7.0));
        assert_eq!(list.min_max_difference(), (5.0, 5.0));

        let array = ArraySeries::from_fn("one", date(), vec![1.0], |_| (2.0, 7.0));
        assert_eq!(array.min_max_difference(), (5.0, 5.0));
    }

    #[test]
    fn test_min_max_difference_scans_all_samples() {
        let array = ArraySeries::from_fn("grid", date(), vec![1.0, 2.0, 3.0], |x| (x, x * 3.0));
        // Differences are 2x: 2, 4, 6.
        assert_eq!(array.min_max_difference(), (2.0, 6.0));
    }

    #[test]
    fn test_indexed_access_out_of_range_is_none() {
        let array = ArraySeries::from_fn("grid", date(), vec![1.0, 2.0, 3.0, 4.0], |x| (x, x));
        assert!(array.sample_at(1).is_some());
        assert_eq!(array.sample_at(10), None);
        assert_eq!(array.sample_at(4), None);
    }

    #[test]
    fn test_complex_magnitude() {
        let sample = Sample::new(0.0, Complex64::new(3.0, 4.0), Complex64::new(0.0, 0.0));
        assert_eq!(sample.difference_magnitude(), 5.0);
        assert_eq!(Complex64::new(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn test_complex_min_max_difference() {
        let list = ListSeries::from_fn("cplx", date(), &[1.0, 2.0], |x| {
            Sample::new(x, Complex64::new(x, x * 2.0), Complex64::new(x * 3.0, x * 4.0))
        });
        // |y1 - y2| = |(-2x, -2x)| = 2x * sqrt(2)
        let (min, max) = list.min_max_difference();
        assert!((min - 2.0 * 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((max - 4.0 * 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_long_string_one_line_per_sample() {
        let list = ListSeries::from_fn("fmt", date(), &[1.0, 2.0], |x| Sample::new(x, x, x * 3.0));
        let text = list.to_long_string(NumberFormat::new(2));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ListSeries: key = fmt"));
        assert_eq!(lines[1], "X: 1.00, Y1: 1.00, Y2: 3.00");
        assert_eq!(lines[2], "X: 2.00, Y1: 2.00, Y2: 6.00");
    }

    #[test]
    fn test_complex_render() {
        let fmt = NumberFormat::new(2);
        assert_eq!(fmt.scalar(Complex64::new(1.0, 2.0)), "1.00+2.00i");
        assert_eq!(fmt.scalar(Complex64::new(-1.5, -0.25)), "-1.50-0.25i");
    }

    #[test]
    fn test_series_enum_dispatch() {
        let list = ListSeries::from_fn("a", date(), &[1.0], |x| Sample::new(x, x, x));
        let series: Series<f64> = list.clone().into();
        assert_eq!(series.key(), "a");
        assert_eq!(series.len(), 1);
        assert_eq!(series.sample_at(0), list.sample_at(0));

        let array: Series<f64> = list.to_array_series().into();
        assert_eq!(array.len(), 1);
        assert_eq!(array.samples().count(), 1);
    }
}
