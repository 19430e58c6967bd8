use thiserror::Error;

/// Result alias for `glyphtier`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the index, the clustering primitives and the controller.
#[derive(Debug, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Matrix dimension mismatch.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Lookup of an entity that is not in the distance index.
    #[error("unknown entity '{name}'")]
    UnknownEntity {
        /// Name that was looked up.
        name: String,
    },

    /// The same entity name appears twice in the input.
    #[error("duplicate entity '{name}'")]
    DuplicateEntity {
        /// Repeated name.
        name: String,
    },

    /// A matrix cell is negative, NaN or infinite.
    #[error("invalid distance {value} at ({row}, {col})")]
    InvalidDistance {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The value found there.
        value: f64,
    },

    /// Quantile requested over zero samples.
    #[error("quantile requested over an empty sample")]
    EmptySample,

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// An oversized cluster did not shrink when recursed into.
    #[error("recursion stuck at depth {depth} on a cluster of {size} entities")]
    StuckRecursion {
        /// Depth at which the guard fired.
        depth: usize,
        /// Size of the cluster that failed to shrink.
        size: usize,
    },

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON input or a serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
