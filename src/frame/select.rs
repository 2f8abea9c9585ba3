//! Row selection: take, slice, filter and random subsampling.
//!
//! Every selection copies the chosen rows into a new frame that keeps the
//! labels and executor of its source. Large selections run on the frame's
//! thread pool; results do not depend on the thread count.

use ndarray::Array2;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use super::condition::Comparison;
use super::table::DataFrame;
use crate::error::{Error, Result};

/// Random number generator with optional seeding for reproducibility.
#[allow(clippy::option_if_let_else)]
fn get_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Row indices visited by [`DataFrame::slice`].
fn slice_indices(start: usize, stop: usize, step: usize) -> Vec<usize> {
    use std::cmp::Ordering;

    match start.cmp(&stop) {
        Ordering::Less => (start..stop).step_by(step).collect(),
        Ordering::Equal => vec![start],
        Ordering::Greater => ((stop + 1)..=start).rev().step_by(step).collect(),
    }
}

impl DataFrame {
    /// Copy the rows at `indices`, in the given order. Repeats are allowed.
    ///
    /// Fails without producing a partial frame if any index is out of range.
    pub fn take(&self, indices: &[usize]) -> Result<Self> {
        let n_rows = self.n_rows();
        if let Some(&index) = indices.iter().find(|&&i| i >= n_rows) {
            return Err(Error::RowOutOfRange { index, len: n_rows });
        }

        let n_columns = self.n_columns();
        let mut out = vec![0.0f64; indices.len() * n_columns];

        if n_columns > 0 {
            let data = &self.data;
            if self.executor.is_parallel_for(indices.len()) {
                self.executor.install(|| {
                    out.par_chunks_mut(n_columns)
                        .zip(indices.par_iter())
                        .for_each(|(dst, &i)| {
                            for (d, s) in dst.iter_mut().zip(data.row(i)) {
                                *d = *s;
                            }
                        });
                });
            } else {
                for (dst, &i) in out.chunks_mut(n_columns).zip(indices) {
                    for (d, s) in dst.iter_mut().zip(data.row(i)) {
                        *d = *s;
                    }
                }
            }
        }

        let data = Array2::from_shape_vec((indices.len(), n_columns), out)
            .map_err(|e| Error::ShapeMismatch(e.to_string()))?;
        Ok(self.derive(data))
    }

    /// Take rows between `start` and `stop` every `step` rows.
    ///
    /// * `start < stop`: `start, start + step, ...` while `< stop`
    /// * `start == stop`: the single row `start`
    /// * `start > stop`: `start, start - step, ...` while `> stop`
    pub fn slice(&self, start: usize, stop: usize, step: usize) -> Result<Self> {
        if step == 0 {
            return Err(Error::InvalidSlice("step cannot be zero".into()));
        }

        // Bounds are checked before any index list is allocated.
        let n_rows = self.n_rows();
        if start >= n_rows {
            return Err(Error::RowOutOfRange {
                index: start,
                len: n_rows,
            });
        }
        if start < stop {
            let last = start + ((stop - 1 - start) / step) * step;
            if last >= n_rows {
                let first_bad = start + (n_rows - start).div_ceil(step) * step;
                return Err(Error::RowOutOfRange {
                    index: first_bad,
                    len: n_rows,
                });
            }
        }

        self.take(&slice_indices(start, stop, step))
    }

    /// Rows whose value in column `label` satisfies `value_in_row <cmp> value`.
    ///
    /// Row order is preserved. NaN cells never pass.
    pub fn filter(&self, label: &str, cmp: Comparison, value: f64) -> Result<Self> {
        let col = self.require_column(label)?;
        let column = self.data.column(col);

        let keep: Vec<usize> = if self.executor.is_parallel_for(self.n_rows()) {
            self.executor.install(|| {
                (0..column.len())
                    .into_par_iter()
                    .filter(|&i| cmp.holds(column[i], value))
                    .collect()
            })
        } else {
            column
                .iter()
                .enumerate()
                .filter(|&(_, &v)| cmp.holds(v, value))
                .map(|(i, _)| i)
                .collect()
        };

        debug!(
            label,
            condition = %cmp,
            value,
            kept = keep.len(),
            of = self.n_rows(),
            "filtered frame"
        );
        self.take(&keep)
    }

    /// [`filter`](Self::filter) with the condition given as a token such as `"<="`.
    pub fn filter_str(&self, label: &str, condition: &str, value: f64) -> Result<Self> {
        let cmp: Comparison = condition.parse()?;
        self.filter(label, cmp, value)
    }

    /// `n` distinct rows drawn uniformly without replacement, kept in row order.
    ///
    /// # Arguments
    ///
    /// * `n` - Number of rows to draw (at most `n_rows()`)
    /// * `seed` - Optional random seed for reproducibility
    pub fn sample(&self, n: usize, seed: Option<u64>) -> Result<Self> {
        let n_rows = self.n_rows();
        if n > n_rows {
            return Err(Error::RowOutOfRange {
                index: n,
                len: n_rows,
            });
        }

        let mut rng = get_rng(seed);
        let mut picked = rand::seq::index::sample(&mut rng, n_rows, n).into_vec();
        picked.sort_unstable();

        debug!(n, of = n_rows, "sampled frame");
        self.take(&picked)
    }
}
