//! # framers
//!
//! Labeled, row-indexed tables of `f64` values with parallel row selection.
//!
//! ```ignore
//! use framers::{Comparison, DataFrame};
//!
//! let df = DataFrame::from_columns(vec![
//!     ("mass", vec![0.5, 1.2, 3.4]),
//!     ("z", vec![0.01, 0.02, 0.03]),
//! ])?
//! .with_threads(4)?;
//!
//! let heavy = df.filter("mass", Comparison::GreaterEqual, 1.0)?;
//! let first_two = df.slice(0, 2, 1)?;
//! ```
//!
//! Enable the `python` feature to build the `framers._framers` extension module.

pub mod error;
pub mod frame;
pub mod parallel;

#[cfg(feature = "python")]
pub mod python;

pub use error::{Error, ErrorKind, Result};
pub use frame::{Comparison, DataFrame, MAX_LABEL_SIZE};
pub use parallel::{Executor, FrameOptions};
