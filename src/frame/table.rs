//! The [`DataFrame`] container: construction, row access and column access.

use std::collections::HashSet;

use ndarray::{Array2, ArrayView1, ArrayView2};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::parallel::{Executor, FrameOptions};

/// Maximum length of a column label, in bytes.
pub const MAX_LABEL_SIZE: usize = 100;

/// A table of `f64` values indexed by row number and by column label.
///
/// Rows are data vectors; columns are the labeled components of each vector.
/// Storage is a row-major `Array2<f64>` of shape `(n_rows, n_columns)`.
///
/// # Example
///
/// ```ignore
/// let df = DataFrame::from_rows(&[vec![1.0, 0.1], vec![2.0, 0.2]], &["mass", "z"])?;
/// let heavy = df.filter("mass", Comparison::Greater, 1.5)?;
/// assert_eq!(heavy.n_rows(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DataFrame {
    pub(super) labels: Vec<String>,
    pub(super) data: Array2<f64>,
    pub(super) executor: Executor,
}

impl Default for DataFrame {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for DataFrame {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels && self.data == other.data
    }
}

impl std::fmt::Display for DataFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DataFrame({} rows x {} columns: [{}])",
            self.n_rows(),
            self.n_columns(),
            self.labels.join(", ")
        )
    }
}

fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(Error::EmptyLabel);
    }
    if label.len() > MAX_LABEL_SIZE {
        return Err(Error::LabelTooLong {
            label: label.to_string(),
            max: MAX_LABEL_SIZE,
        });
    }
    Ok(())
}

fn validate_labels(labels: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        validate_label(label)?;
        if !seen.insert(label.as_str()) {
            return Err(Error::DuplicateLabel(label.clone()));
        }
    }
    Ok(())
}

impl DataFrame {
    /// A frame with no columns and no rows, running on one thread.
    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            data: Array2::zeros((0, 0)),
            executor: Executor::sequential(),
        }
    }

    /// Wrap an existing 2-D array. `labels[j]` names column `j`.
    pub fn new(data: Array2<f64>, labels: Vec<String>) -> Result<Self> {
        if data.ncols() != labels.len() {
            return Err(Error::ShapeMismatch(format!(
                "{} labels for {} columns",
                labels.len(),
                data.ncols()
            )));
        }
        validate_labels(&labels)?;

        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };

        Ok(Self {
            labels,
            data,
            executor: Executor::sequential(),
        })
    }

    /// Build from row vectors, each holding one value per label.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<f64>], labels: &[S]) -> Result<Self> {
        let n_columns = labels.len();
        let mut flat = Vec::with_capacity(rows.len() * n_columns);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_columns {
                return Err(Error::ShapeMismatch(format!(
                    "row {} has {} values, expected {}",
                    i,
                    row.len(),
                    n_columns
                )));
            }
            flat.extend_from_slice(row);
        }

        let data = Array2::from_shape_vec((rows.len(), n_columns), flat)
            .map_err(|e| Error::ShapeMismatch(e.to_string()))?;
        let labels = labels.iter().map(|l| l.as_ref().to_string()).collect();
        Self::new(data, labels)
    }

    /// Build from `(label, values)` pairs. All columns must have the same length.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let (labels, columns): (Vec<String>, Vec<Vec<f64>>) = columns
            .into_iter()
            .map(|(label, values)| (label.into(), values))
            .unzip();

        let n_rows = columns.first().map_or(0, Vec::len);
        if let Some((label, col)) = labels
            .iter()
            .zip(&columns)
            .find(|(_, col)| col.len() != n_rows)
        {
            return Err(Error::ShapeMismatch(format!(
                "column '{}' has {} values, expected {}",
                label,
                col.len(),
                n_rows
            )));
        }

        let data = Array2::from_shape_fn((n_rows, columns.len()), |(i, j)| columns[j][i]);
        Self::new(data, labels)
    }

    /// Replace the execution settings of this frame.
    pub fn with_options(mut self, options: FrameOptions) -> Result<Self> {
        self.set_options(options)?;
        Ok(self)
    }

    /// In-place form of [`with_options`](Self::with_options). On error the
    /// previous settings are kept.
    pub fn set_options(&mut self, options: FrameOptions) -> Result<()> {
        self.executor = options.build()?;
        Ok(())
    }

    /// Shorthand for changing only the thread count (0 = auto-detect).
    pub fn with_threads(self, threads: usize) -> Result<Self> {
        let options = self.executor.options().threads(threads);
        self.with_options(options)
    }

    /// A new frame over `data` with the same labels and executor.
    pub(super) fn derive(&self, data: Array2<f64>) -> Self {
        debug_assert_eq!(data.ncols(), self.labels.len());
        Self {
            labels: self.labels.clone(),
            data,
            executor: self.executor.clone(),
        }
    }

    pub fn threads(&self) -> usize {
        self.executor.threads()
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Number of rows (the sample size).
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns (the dimensionality of each row).
    pub fn n_columns(&self) -> usize {
        self.labels.len()
    }

    /// `(n_rows, n_columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_columns())
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.column_index(label).is_some()
    }

    /// Position of `label` among the columns.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub(super) fn require_column(&self, label: &str) -> Result<usize> {
        self.column_index(label)
            .ok_or_else(|| Error::UnknownColumn(label.to_string()))
    }

    /// Read-only view of the underlying table.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Iterate over rows as views.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> + '_ {
        self.data.rows().into_iter()
    }

    /// Copy of row `index`.
    pub fn row(&self, index: usize) -> Result<Vec<f64>> {
        if index >= self.n_rows() {
            return Err(Error::RowOutOfRange {
                index,
                len: self.n_rows(),
            });
        }
        Ok(self.data.row(index).to_vec())
    }

    /// Row `index` as a one-row frame with the labels preserved.
    pub fn row_frame(&self, index: usize) -> Result<Self> {
        self.take(&[index])
    }

    /// Write `values` into the named cells of row `index`.
    ///
    /// `index == n_rows()` appends a new row; cells it does not name are NaN.
    /// Every label must already be a column; nothing is modified otherwise.
    pub fn assign_row<S: AsRef<str>>(
        &mut self,
        index: usize,
        labels: &[S],
        values: &[f64],
    ) -> Result<()> {
        if labels.len() != values.len() {
            return Err(Error::LengthMismatch {
                expected: labels.len(),
                got: values.len(),
            });
        }
        let columns = labels
            .iter()
            .map(|l| self.require_column(l.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let n_rows = self.n_rows();
        if index > n_rows {
            return Err(Error::RowOutOfRange {
                index,
                len: n_rows,
            });
        }

        if index == n_rows {
            let mut row = vec![f64::NAN; self.n_columns()];
            for (&col, &value) in columns.iter().zip(values) {
                row[col] = value;
            }
            self.data
                .push_row(ArrayView1::from(&row))
                .map_err(|e| Error::ShapeMismatch(e.to_string()))?;
            trace!(row = index, "appended row");
        } else {
            for (&col, &value) in columns.iter().zip(values) {
                self.data[[index, col]] = value;
            }
        }
        Ok(())
    }

    /// Copy of the column named `label`.
    pub fn column(&self, label: &str) -> Result<Vec<f64>> {
        let col = self.require_column(label)?;
        Ok(self.data.column(col).to_vec())
    }

    /// Overwrite the column `label`, or append it if it does not exist.
    ///
    /// A frame with no rows and no columns adopts the length of `values`.
    /// Otherwise `values.len()` must equal [`n_rows`](Self::n_rows).
    pub fn assign_column(&mut self, label: &str, values: &[f64]) -> Result<()> {
        if self.n_rows() == 0 && self.n_columns() == 0 {
            validate_label(label)?;
            self.data = Array2::from_shape_vec((values.len(), 1), values.to_vec())
                .map_err(|e| Error::ShapeMismatch(e.to_string()))?;
            self.labels = vec![label.to_string()];
            debug!(label, rows = values.len(), "initialized frame from column");
            return Ok(());
        }

        if values.len() != self.n_rows() {
            return Err(Error::LengthMismatch {
                expected: self.n_rows(),
                got: values.len(),
            });
        }

        match self.column_index(label) {
            Some(col) => {
                self.data.column_mut(col).assign(&ArrayView1::from(values));
            }
            None => {
                validate_label(label)?;
                self.data
                    .push_column(ArrayView1::from(values))
                    .map_err(|e| Error::ShapeMismatch(e.to_string()))?;
                self.labels.push(label.to_string());
                debug!(label, columns = self.n_columns(), "appended column");
            }
        }
        Ok(())
    }
}
