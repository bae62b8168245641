use pyo3::prelude::*;

mod transform;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transform::world_to_pixel, m)?)?;
    m.add_function(wrap_pyfunction!(transform::pixel_to_world, m)?)?;
    m.add_function(wrap_pyfunction!(transform::wcs_world2pix, m)?)?;
    m.add_function(wrap_pyfunction!(transform::wcs_pix2world, m)?)?;
    Ok(())
}
