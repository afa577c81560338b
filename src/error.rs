//! Error types for graph loading and solver construction.
//!
//! Every failure here is fatal for a run. A malformed graph or an
//! out-of-domain parameter is reported before the first iteration starts,
//! and nothing is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fallible crate operations.
pub type Result<T> = std::result::Result<T, AcoError>;

/// Unified error type for loading graphs and configuring solvers.
#[derive(Debug, Error)]
pub enum AcoError {
    /// The graph file could not be read.
    #[error("failed to read graph file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A token in the distance matrix is not a number.
    #[error("line {line}: invalid distance token '{token}'")]
    InvalidToken {
        /// 1-based line (row) number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A row has a different number of columns than the first row.
    #[error("line {line}: expected {expected} distances, found {found}")]
    RaggedRow {
        /// 1-based line (row) number.
        line: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of this row.
        found: usize,
    },

    /// The matrix has a different number of rows than columns.
    #[error("distance matrix is not square: {rows} rows, {columns} columns")]
    NotSquare {
        /// Number of rows read.
        rows: usize,
        /// Number of columns per row.
        columns: usize,
    },

    /// A tour needs at least two towns.
    #[error("graph must have at least 2 towns, got {0}")]
    TooFewTowns(usize),

    /// A distance is negative, NaN or infinite.
    #[error("distance at ({row}, {column}) must be finite and non-negative, got {value}")]
    InvalidDistance {
        /// Row index (0-based).
        row: usize,
        /// Column index (0-based).
        column: usize,
        /// The rejected value.
        value: f64,
    },

    /// The load-time distance offset must be finite and strictly positive.
    #[error("distance offset must be finite and positive, got {0}")]
    InvalidOffset(f64),

    /// A solver parameter is outside its valid domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
