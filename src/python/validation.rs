//! Validation helpers for the Python boundary.
//!
//! Converts crate errors into Python exceptions and checks arguments that
//! only exist on the Python side.

use pyo3::exceptions::{PyIndexError, PyKeyError, PyRuntimeError, PyValueError};

use crate::error::{Error as FrameError, ErrorKind};

/// Convert a framers Error to the appropriate Python exception.
pub fn to_py_err(e: FrameError, context: &str) -> pyo3::PyErr {
    let msg = format!("{}: {}", context, e);
    match e.kind() {
        ErrorKind::Lookup => PyKeyError::new_err(msg),
        ErrorKind::Index => PyIndexError::new_err(msg),
        ErrorKind::Runtime => PyRuntimeError::new_err(msg),
        ErrorKind::Value => PyValueError::new_err(msg),
    }
}

/// Validate a requested thread count.
pub fn validate_threads(n_threads: usize, max: usize) -> pyo3::PyResult<()> {
    if n_threads > max {
        return Err(PyValueError::new_err(format!(
            "n_threads must be at most {} (got {})",
            max, n_threads
        )));
    }
    Ok(())
}
