/// Data layer: series model, conversion, persistence, and collection queries.
///
/// Architecture:
/// ```text
///   generator fn / codec::load
///        │
///        ▼
///   ┌──────────────────────┐
///   │ ListSeries │ ArraySeries │  the two Series representations
///   └──────────────────────┘
///        │ to_array_series          │ codec::save (array only)
///        ▼                          ▼
///   ┌──────────────────┐      5 JSON lines on disk
///   │ SeriesCollection │
///   └──────────────────┘
///        │
///        ▼
///   flattened samples → max |Y1|, repeating X coordinates
/// ```
pub mod codec;
pub mod collection;
pub mod generate;
pub mod model;
