//! Python module definition.

use pyo3::prelude::*;

use super::frame;

#[pymodule]
fn _framers(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<frame::PyDataFrame>()?;

    m.add("MAX_LABEL_SIZE", crate::frame::MAX_LABEL_SIZE)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
