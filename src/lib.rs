#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod error;
pub mod affine;
pub mod path;
pub mod proj;
pub mod transform;
pub mod wcs;
#[cfg(feature = "python")]
mod py;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
