//! PyDataFrame class for Python bindings.
//!
//! Exposes [`DataFrame`] with Python indexing: integers select rows, strings
//! select columns and slices select row ranges.

use std::collections::HashMap;

use numpy::{PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PySlice};

use super::conversion::{
    column_to_numpy, extract_column, frame_from_dict, frame_from_numpy, frame_to_numpy,
};
use super::validation::{to_py_err, validate_threads};
use crate::frame::index::{resolve_index, resolve_indices, slice_positions};
use crate::frame::DataFrame;
use crate::parallel::FrameOptions;

/// Upper bound on per-frame worker threads accepted from Python.
const MAX_THREADS: usize = 1024;

/// A table of float64 values indexed by row number and column label.
///
/// Example:
///     >>> df = DataFrame(np.array([[1.0, 0.1], [2.0, 0.2]]), ["mass", "z"])
///     >>> df["mass"]
///     array([1., 2.])
///     >>> df.filter("mass", ">=", 1.5).shape
///     (1, 2)
#[pyclass(name = "DataFrame")]
pub struct PyDataFrame {
    pub(crate) inner: DataFrame,
}

impl PyDataFrame {
    fn wrap(py: Python<'_>, inner: DataFrame) -> PyResult<PyObject> {
        Ok(Py::new(py, Self { inner })?.into_any())
    }

    fn with_threads(inner: DataFrame, n_threads: usize) -> PyResult<Self> {
        validate_threads(n_threads, MAX_THREADS)?;
        let inner = inner
            .with_options(FrameOptions::new().threads(n_threads))
            .map_err(|e| to_py_err(e, "DataFrame"))?;
        Ok(Self { inner })
    }

    fn take_rows(&self, py: Python<'_>, indices: &[usize]) -> PyResult<DataFrame> {
        py.allow_threads(|| self.inner.take(indices))
            .map_err(|e| to_py_err(e, "take"))
    }
}

#[pymethods]
impl PyDataFrame {
    /// Create a frame from a 2-D float64 array and one label per column.
    ///
    /// Args:
    ///     data: array of shape (n_rows, n_columns) (optional)
    ///     labels: column labels; required when data is given
    ///     n_threads: worker threads for row selection (0 = all cores)
    #[new]
    #[pyo3(signature = (data=None, labels=None, n_threads=1))]
    fn new(
        data: Option<PyReadonlyArray2<'_, f64>>,
        labels: Option<Vec<String>>,
        n_threads: usize,
    ) -> PyResult<Self> {
        let inner = match (data, labels) {
            (None, None) => DataFrame::empty(),
            (Some(data), Some(labels)) => frame_from_numpy(data, labels)?,
            (Some(_), None) => {
                return Err(PyValueError::new_err(
                    "DataFrame: labels are required when data is given",
                ))
            }
            (None, Some(labels)) => {
                let columns = labels.into_iter().map(|l| (l, Vec::new()));
                DataFrame::from_columns(columns).map_err(|e| to_py_err(e, "DataFrame"))?
            }
        };
        Self::with_threads(inner, n_threads)
    }

    /// Create a frame from a dict mapping labels to 1-D arrays of equal length.
    #[staticmethod]
    #[pyo3(signature = (columns, n_threads=1))]
    fn from_dict(columns: &Bound<'_, PyDict>, n_threads: usize) -> PyResult<Self> {
        Self::with_threads(frame_from_dict(columns)?, n_threads)
    }

    /// (n_rows, n_columns)
    #[getter]
    fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    /// Worker threads used for row selection.
    #[getter]
    fn n_threads(&self) -> usize {
        self.inner.threads()
    }

    #[setter]
    fn set_n_threads(&mut self, n_threads: usize) -> PyResult<()> {
        validate_threads(n_threads, MAX_THREADS)?;
        let options = self.inner.executor().options().threads(n_threads);
        self.inner
            .set_options(options)
            .map_err(|e| to_py_err(e, "n_threads"))
    }

    /// Column labels in order.
    fn keys(&self) -> Vec<String> {
        self.inner.labels().to_vec()
    }

    fn __len__(&self) -> usize {
        self.inner.n_rows()
    }

    fn __contains__(&self, label: &str) -> bool {
        self.inner.contains(label)
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }

    /// Index the frame.
    ///
    /// str -> column as a numpy array; int -> one-row DataFrame;
    /// slice or list of ints -> DataFrame of the selected rows.
    fn __getitem__(&self, py: Python<'_>, key: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        let len = self.inner.n_rows();

        if let Ok(label) = key.extract::<String>() {
            let column = self
                .inner
                .column(&label)
                .map_err(|e| to_py_err(e, "__getitem__"))?;
            return Ok(column_to_numpy(py, column).into_any().unbind());
        }

        if let Ok(slice) = key.downcast::<PySlice>() {
            let bounds = slice.indices(len as isize)?;
            let indices = slice_positions(bounds.start, bounds.step, bounds.slicelength as usize)
                .map_err(|e| to_py_err(e, "__getitem__"))?;
            return Self::wrap(py, self.take_rows(py, &indices)?);
        }

        if let Ok(index) = key.extract::<isize>() {
            let index = resolve_index(index, len, false).map_err(|e| to_py_err(e, "__getitem__"))?;
            let row = self
                .inner
                .row_frame(index)
                .map_err(|e| to_py_err(e, "__getitem__"))?;
            return Self::wrap(py, row);
        }

        if let Ok(indices) = key.extract::<Vec<isize>>() {
            let indices =
                resolve_indices(&indices, len).map_err(|e| to_py_err(e, "__getitem__"))?;
            return Self::wrap(py, self.take_rows(py, &indices)?);
        }

        Err(PyTypeError::new_err(
            "DataFrame indices must be str, int, slice or a list of ints",
        ))
    }

    /// Assign a column (str key) or a row (int key with a dict of label -> value).
    ///
    /// Assigning to row `len(df)` appends a row; unnamed cells become NaN.
    fn __setitem__(&mut self, key: &Bound<'_, PyAny>, value: &Bound<'_, PyAny>) -> PyResult<()> {
        if let Ok(label) = key.extract::<String>() {
            let values = extract_column(value)?;
            return self
                .inner
                .assign_column(&label, &values)
                .map_err(|e| to_py_err(e, "__setitem__"));
        }

        if let Ok(index) = key.extract::<isize>() {
            let index = resolve_index(index, self.inner.n_rows(), true)
                .map_err(|e| to_py_err(e, "__setitem__"))?;
            let cells: HashMap<String, f64> = value.extract().map_err(|_| {
                PyTypeError::new_err("row assignment requires a dict of label -> float")
            })?;
            let (labels, values): (Vec<String>, Vec<f64>) = cells.into_iter().unzip();
            return self
                .inner
                .assign_row(index, &labels, &values)
                .map_err(|e| to_py_err(e, "__setitem__"));
        }

        Err(PyTypeError::new_err(
            "DataFrame assignment keys must be str (column) or int (row)",
        ))
    }

    /// Copy of one row as a list of floats.
    fn row(&self, index: isize) -> PyResult<Vec<f64>> {
        let index = resolve_index(index, self.inner.n_rows(), false)
            .map_err(|e| to_py_err(e, "row"))?;
        self.inner.row(index).map_err(|e| to_py_err(e, "row"))
    }

    /// Copy of one column as a numpy array.
    fn column<'py>(&self, py: Python<'py>, label: &str) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let column = self.inner.column(label).map_err(|e| to_py_err(e, "column"))?;
        Ok(column_to_numpy(py, column))
    }

    /// Rows at the given indices, in order.
    fn take(&self, py: Python<'_>, indices: Vec<isize>) -> PyResult<Self> {
        let indices = resolve_indices(&indices, self.inner.n_rows())
            .map_err(|e| to_py_err(e, "take"))?;
        Ok(Self {
            inner: self.take_rows(py, &indices)?,
        })
    }

    /// Rows whose `label` value satisfies `value_in_row <condition> value`.
    ///
    /// Args:
    ///     label: column to test
    ///     condition: one of "<<", "<=", "==", ">=", ">>" ("<" and ">" also accepted)
    ///     value: threshold
    fn filter(&self, py: Python<'_>, label: &str, condition: &str, value: f64) -> PyResult<Self> {
        let inner = py
            .allow_threads(|| self.inner.filter_str(label, condition, value))
            .map_err(|e| to_py_err(e, "filter"))?;
        Ok(Self { inner })
    }

    /// `n` distinct rows drawn at random, kept in row order.
    #[pyo3(signature = (n, seed=None))]
    fn sample(&self, py: Python<'_>, n: usize, seed: Option<u64>) -> PyResult<Self> {
        let inner = py
            .allow_threads(|| self.inner.sample(n, seed))
            .map_err(|e| to_py_err(e, "sample"))?;
        Ok(Self { inner })
    }

    /// Copy of the table as an array of shape (n_rows, n_columns).
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        frame_to_numpy(py, &self.inner)
    }
}
