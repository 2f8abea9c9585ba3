//! Error types for framers.

use thiserror::Error;

/// Errors produced by frame construction and row/column operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A column label exceeds [`crate::frame::MAX_LABEL_SIZE`] bytes.
    #[error("label '{label}' is longer than {max} bytes")]
    LabelTooLong { label: String, max: usize },

    #[error("column labels cannot be empty")]
    EmptyLabel,

    #[error("duplicate column label: '{0}'")]
    DuplicateLabel(String),

    /// The label does not name any column of the frame.
    #[error("unknown column: '{0}'")]
    UnknownColumn(String),

    #[error("row index {index} out of range for frame with {len} rows")]
    RowOutOfRange { index: usize, len: usize },

    /// A signed (possibly negative) row index that does not resolve to a row.
    #[error("row index {index} out of range for frame with {len} rows")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("length mismatch: expected {expected} values, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// Comparison token not exactly one of `<<`, `<`, `<=`, `==`, `>=`, `>`, `>>`.
    #[error("invalid filter condition: '{0}'")]
    InvalidCondition(String),

    #[error("invalid slice: {0}")]
    InvalidSlice(String),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of an [`Error`], used to pick an exception type at the
/// Python boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A label lookup failed.
    Lookup,
    /// A row index was out of range.
    Index,
    /// Worker threads could not be set up.
    Runtime,
    /// Any other invalid argument.
    Value,
}

impl Error {
    /// Which exception class this error raises in Python.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownColumn(_) => ErrorKind::Lookup,
            Self::RowOutOfRange { .. } | Self::IndexOutOfRange { .. } => ErrorKind::Index,
            Self::ThreadPool(_) => ErrorKind::Runtime,
            Self::LabelTooLong { .. }
            | Self::EmptyLabel
            | Self::DuplicateLabel(_)
            | Self::LengthMismatch { .. }
            | Self::InvalidCondition(_)
            | Self::InvalidSlice(_)
            | Self::ShapeMismatch(_) => ErrorKind::Value,
        }
    }
}
