//! Labeled tables of `f64` values.
//!
//! A [`DataFrame`] is indexable by row number, giving every component of one
//! data vector, or by column label, giving one component across the sample.

mod condition;
pub mod index;
mod select;
mod table;

pub use condition::Comparison;
pub use table::{DataFrame, MAX_LABEL_SIZE};
