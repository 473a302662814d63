use thiserror::Error;

/// Typed failures surfaced by the data layer.
///
/// Keyed-lookup misses and persisted-file problems are recoverable and
/// reported to the immediate caller; nothing here aborts the process.
/// Note that two conditions are deliberately *not* errors: out-of-range
/// indexed access (a plain `None`) and rejected duplicate insertion
/// (a plain `false`).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no series with key '{0}'")]
    KeyNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line} ({field}) is missing")]
    MissingLine { line: usize, field: &'static str },

    #[error("line {line} ({field}) is not valid JSON: {source}")]
    BadLine {
        line: usize,
        field: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to encode {field}: {source}")]
    Encode {
        field: &'static str,
        source: serde_json::Error,
    },

    #[error("y{axis} has {got} values but there are {expected} x nodes")]
    LengthMismatch {
        axis: u8,
        got: usize,
        expected: usize,
    },
}
