//! Labeled, dated measurement series of (X, Y1, Y2) samples.
//!
//! A series holds real- or complex-valued samples in one of two
//! interchangeable representations (growable list or fixed parallel
//! arrays), collections enforce (key, date) uniqueness and answer
//! cross-series queries, and array-backed series persist to a fixed
//! five-line JSON-per-line file format.

pub mod data;
pub mod error;

pub use data::codec;
pub use data::collection::SeriesCollection;
pub use data::generate;
pub use data::model::{ArraySeries, ListSeries, NumberFormat, Sample, Scalar, Series};
pub use error::DataError;
