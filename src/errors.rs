//! Error types for the tempora library
//!
//! All fallible operations in this crate return [`Result`] with the single
//! [`Error`] enum below. Batch operations in the `arrays` module capture
//! per-element failures in a validity mask instead of aborting, but
//! whole-array contract violations (shape mismatches, malformed tables)
//! surface here as hard failures.

use thiserror::Error;

/// Main error type for tempora operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A calendar component is out of range (month not in 1-12, day past the
    /// end of the month, week past the last ISO week of the year, ...)
    #[error("invalid calendar date: {0}")]
    InvalidCalendarDate(String),

    /// The input text matches no ISO 8601 grammar alternative
    #[error("unrecognized ISO 8601 format: {0:?}")]
    UnrecognizedFormat(String),

    /// Basic and extended separators are mixed within one value
    #[error("mixed basic and extended separators: {0:?}")]
    FormatMismatch(String),

    /// A truncated form elides leading components and no reference date was
    /// supplied to resolve them
    #[error("ambiguous truncated form {0:?}: no reference date supplied")]
    AmbiguousTruncation(String),

    /// Array shapes are incompatible under singleton broadcasting
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Shape of the left-hand array
        left: Vec<usize>,
        /// Shape of the right-hand array
        right: Vec<usize>,
    },

    /// An instant falls outside the tabulated coverage of a table, requested
    /// by a caller that rejects extrapolation
    #[error("value {value} is outside table coverage ({start}..{end})")]
    OutOfTableRange {
        /// The value that was queried
        value: f64,
        /// Start of tabulated coverage
        start: f64,
        /// End of tabulated coverage
        end: f64,
    },

    /// An injected table violates its ordering invariants
    #[error("invalid table: {0}")]
    InvalidTable(String),
}

/// Result type for tempora operations
pub type Result<T> = std::result::Result<T, Error>;
