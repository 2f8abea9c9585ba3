//! Python-style row index arithmetic.
//!
//! Negative indices count from the end of the frame. Slices follow the
//! `(start, step, length)` triple produced by Python's `slice.indices`.

use crate::error::{Error, Result};

/// Resolve a signed index against `len` rows.
///
/// With `allow_end`, `len` itself is accepted; row assignment uses it to append.
pub fn resolve_index(index: isize, len: usize, allow_end: bool) -> Result<usize> {
    let limit = if allow_end { len + 1 } else { len };
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        Some(index.unsigned_abs())
    };

    match resolved {
        Some(i) if i < limit => Ok(i),
        _ => Err(Error::IndexOutOfRange { index, len }),
    }
}

/// Resolve every index, failing on the first that is out of range.
pub fn resolve_indices(indices: &[isize], len: usize) -> Result<Vec<usize>> {
    indices
        .iter()
        .map(|&i| resolve_index(i, len, false))
        .collect()
}

/// Rows visited by a normalized slice: `length` rows from `start` every `step`.
///
/// `start` and `step` are the values Python's `slice.indices` returns, so a
/// negative step walks towards row 0.
pub fn slice_positions(start: isize, step: isize, length: usize) -> Result<Vec<usize>> {
    if step == 0 {
        return Err(Error::InvalidSlice("step cannot be zero".into()));
    }
    (0..length)
        .map(|k| {
            let pos = start + k as isize * step;
            usize::try_from(pos).map_err(|_| Error::IndexOutOfRange {
                index: pos,
                len: length,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_positive_and_negative() {
        assert_eq!(resolve_index(0, 3, false).unwrap(), 0);
        assert_eq!(resolve_index(2, 3, false).unwrap(), 2);
        assert_eq!(resolve_index(-1, 3, false).unwrap(), 2);
        assert_eq!(resolve_index(-3, 3, false).unwrap(), 0);
    }

    #[test]
    fn test_resolve_out_of_range() {
        assert!(matches!(
            resolve_index(3, 3, false),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(matches!(
            resolve_index(-4, 3, false),
            Err(Error::IndexOutOfRange { index: -4, len: 3 })
        ));
        assert!(resolve_index(0, 0, false).is_err());
        assert!(resolve_index(isize::MIN, 3, false).is_err());
    }

    #[test]
    fn test_resolve_end_for_append() {
        assert_eq!(resolve_index(3, 3, true).unwrap(), 3);
        assert_eq!(resolve_index(0, 0, true).unwrap(), 0);
        assert!(resolve_index(4, 3, true).is_err());
        // -1 still names the last existing row, not the append slot
        assert_eq!(resolve_index(-1, 3, true).unwrap(), 2);
    }

    #[test]
    fn test_resolve_indices_stops_at_first_bad() {
        assert_eq!(resolve_indices(&[-1, 0, 1], 4).unwrap(), vec![3, 0, 1]);
        assert!(matches!(
            resolve_indices(&[0, 9, -9], 4),
            Err(Error::IndexOutOfRange { index: 9, len: 4 })
        ));
    }

    #[test]
    fn test_slice_positions() {
        // df[1:5:2] on 6 rows -> slice.indices(6) == (1, 5, 2), length 2
        assert_eq!(slice_positions(1, 2, 2).unwrap(), vec![1, 3]);
        // df[::-1] on 4 rows -> (3, -1, -1), length 4
        assert_eq!(slice_positions(3, -1, 4).unwrap(), vec![3, 2, 1, 0]);
        // df[5:1] -> empty
        assert!(slice_positions(5, 1, 0).unwrap().is_empty());
        assert!(matches!(
            slice_positions(0, 0, 3),
            Err(Error::InvalidSlice(_))
        ));
    }
}
