//! Tests for core frame functionality through the public API.
//!
//! Covers construction, row and column assignment, the selection
//! operations and their error conditions, and thread-count independence.

use framers::{Comparison, DataFrame, Error, FrameOptions, MAX_LABEL_SIZE};
use ndarray::array;

/// A small catalogue of stars: mass, metallicity and age.
fn create_test_frame() -> DataFrame {
    DataFrame::from_rows(
        &[
            vec![0.8, 0.010, 9.5],
            vec![1.0, 0.014, 4.6],
            vec![1.5, 0.020, 2.1],
            vec![2.2, 0.008, 0.9],
            vec![3.0, 0.030, 0.3],
        ],
        &["mass", "z", "age"],
    )
    .unwrap()
}

#[test]
fn test_new_from_array() {
    let data = array![[1.0, 2.0], [3.0, 4.0]];
    let df = DataFrame::new(data, vec!["x".into(), "y".into()]).unwrap();
    assert_eq!(df.shape(), (2, 2));
    assert_eq!(df.column("y").unwrap(), vec![2.0, 4.0]);
}

#[test]
fn test_new_label_count_mismatch() {
    let data = array![[1.0, 2.0]];
    let err = DataFrame::new(data, vec!["x".into()]).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch(_)));
}

#[test]
fn test_label_too_long_message() {
    let long = "m".repeat(MAX_LABEL_SIZE + 5);
    let err = DataFrame::from_columns(vec![(long, vec![1.0])]).unwrap_err();
    assert!(err.to_string().contains("longer than 100 bytes"));
}

#[test]
fn test_row_frame_keeps_labels() {
    let df = create_test_frame();
    let row = df.row_frame(2).unwrap();
    assert_eq!(row.shape(), (1, 3));
    assert_eq!(row.labels(), df.labels());
    assert_eq!(row.row(0).unwrap(), vec![1.5, 0.020, 2.1]);
}

#[test]
fn test_rows_iterator() {
    let df = create_test_frame();
    let masses: Vec<f64> = df.rows().map(|r| r[0]).collect();
    assert_eq!(masses, df.column("mass").unwrap());
}

#[test]
fn test_build_frame_column_by_column() {
    let mut df = DataFrame::empty();
    df.assign_column("mass", &[1.0, 2.0]).unwrap();
    df.assign_column("z", &[0.01, 0.02]).unwrap();
    df.assign_row(2, &["z", "mass"], &[0.03, 3.0]).unwrap();

    assert_eq!(df.shape(), (3, 2));
    assert_eq!(df.row(2).unwrap(), vec![3.0, 0.03]);
    assert!(df.contains("z"));
    assert!(!df.contains("age"));
}

#[test]
fn test_column_unknown_label() {
    let df = create_test_frame();
    let err = df.column("luminosity").unwrap_err();
    assert!(matches!(err, Error::UnknownColumn(ref l) if l == "luminosity"));
}

#[test]
fn test_filter_then_slice() {
    let df = create_test_frame();
    let young = df.filter("age", Comparison::Less, 3.0).unwrap();
    assert_eq!(young.column("mass").unwrap(), vec![1.5, 2.2, 3.0]);

    let reversed = young.slice(2, 0, 1).unwrap();
    assert_eq!(reversed.column("mass").unwrap(), vec![3.0, 2.2]);
}

#[test]
fn test_filter_no_matches_yields_empty_frame() {
    let df = create_test_frame();
    let none = df.filter_str("mass", ">>", 100.0).unwrap();
    assert!(none.is_empty());
    assert_eq!(none.n_columns(), 3);
}

#[test]
fn test_slice_single_row_when_start_equals_stop() {
    let df = create_test_frame();
    let one = df.slice(3, 3, 1).unwrap();
    assert_eq!(one.column("mass").unwrap(), vec![2.2]);
}

#[test]
fn test_slice_out_of_range() {
    let df = create_test_frame();
    assert!(matches!(
        df.slice(3, 9, 1),
        Err(Error::RowOutOfRange { index: 5, len: 5 })
    ));
}

#[test]
fn test_selection_inherits_threads() {
    let df = create_test_frame().with_threads(3).unwrap();
    assert_eq!(df.take(&[0]).unwrap().threads(), 3);
    assert_eq!(df.slice(0, 2, 1).unwrap().threads(), 3);
    assert_eq!(df.sample(2, Some(0)).unwrap().threads(), 3);
}

#[test]
fn test_results_independent_of_thread_count() {
    let n = 20_000;
    let columns = vec![
        ("x", (0..n).map(|i| (i % 97) as f64).collect::<Vec<_>>()),
        ("y", (0..n).map(|i| i as f64 * 0.5).collect()),
    ];
    let seq = DataFrame::from_columns(columns).unwrap();
    let par = seq
        .clone()
        .with_options(FrameOptions::new().threads(4).min_parallel_rows(1))
        .unwrap();

    for cmp in [
        Comparison::Less,
        Comparison::LessEqual,
        Comparison::Equal,
        Comparison::GreaterEqual,
        Comparison::Greater,
    ] {
        assert_eq!(
            seq.filter("x", cmp, 48.0).unwrap(),
            par.filter("x", cmp, 48.0).unwrap(),
            "{cmp}"
        );
    }
    assert_eq!(seq.slice(n - 1, 0, 7).unwrap(), par.slice(n - 1, 0, 7).unwrap());
    assert_eq!(seq.sample(500, Some(9)).unwrap(), par.sample(500, Some(9)).unwrap());
}

#[test]
fn test_sample_rows_come_from_source() {
    let df = create_test_frame();
    let picked = df.sample(3, None).unwrap();
    let source: Vec<Vec<f64>> = df.rows().map(|r| r.to_vec()).collect();
    for row in picked.rows() {
        assert!(source.contains(&row.to_vec()));
    }
}
