//! Conversions between numpy arrays and frames.

use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::validation::to_py_err;
use crate::frame::DataFrame;

/// Copy a 2-D float64 array into a new frame.
pub fn frame_from_numpy(data: PyReadonlyArray2<'_, f64>, labels: Vec<String>) -> PyResult<DataFrame> {
    let array = data.as_array().to_owned();
    DataFrame::new(array, labels).map_err(|e| to_py_err(e, "DataFrame"))
}

/// Build a frame from a mapping of label to 1-D values.
pub fn frame_from_dict(columns: &Bound<'_, PyDict>) -> PyResult<DataFrame> {
    let mut pairs = Vec::with_capacity(columns.len());
    for (key, value) in columns.iter() {
        let label: String = key.extract()?;
        pairs.push((label, extract_column(&value)?));
    }
    DataFrame::from_columns(pairs).map_err(|e| to_py_err(e, "from_dict"))
}

/// Extract column values from a numpy array or any sequence of floats.
pub fn extract_column(obj: &Bound<'_, PyAny>) -> PyResult<Vec<f64>> {
    if let Ok(array) = obj.extract::<PyReadonlyArray1<'_, f64>>() {
        return Ok(array.as_array().to_vec());
    }
    obj.extract::<Vec<f64>>()
}

pub fn column_to_numpy(py: Python<'_>, values: Vec<f64>) -> Bound<'_, PyArray1<f64>> {
    values.into_pyarray(py)
}

/// Copy the whole table into a `(n_rows, n_columns)` array.
pub fn frame_to_numpy<'py>(py: Python<'py>, frame: &DataFrame) -> Bound<'py, PyArray2<f64>> {
    frame.values().to_owned().into_pyarray(py)
}
