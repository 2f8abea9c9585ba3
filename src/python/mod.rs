//! Python bindings for framers.

pub mod conversion;
pub mod frame;
pub mod module;
pub mod validation;
