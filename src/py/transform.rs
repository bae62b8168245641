//! PyO3 bindings for the WCS transform pair.

use std::sync::Arc;

use ndarray::Array2;
use numpy::{PyArray2, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::transform::{Transform, WcsPixelToWorld, WcsWorldToPixel};
use crate::wcs::adapter::{from_pairs, to_pairs};
use crate::wcs::{CelestialWcs, Origin, Wcs};

fn load_wcs(header: &str) -> PyResult<Arc<dyn Wcs>> {
    let wcs = CelestialWcs::from_header(header).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(Arc::new(wcs))
}

fn parse_origin(origin: u8) -> PyResult<Origin> {
    Origin::from_index(origin)
        .ok_or_else(|| PyValueError::new_err(format!("origin must be 0 or 1, got {origin}")))
}

/// Project world coordinates to 0-based pixel coordinates.
///
/// Args:
///     coords: (N, 2) array of (lon, lat) in degrees.
///     header: FITS header text describing a 2D celestial WCS.
///
/// Returns:
///     (N, 2) array of (col, row) pixel positions. Points outside the
///     projection domain are NaN.
#[pyfunction]
#[pyo3(signature = (coords, header))]
pub fn world_to_pixel<'py>(
    py: Python<'py>,
    coords: PyReadonlyArray2<'py, f64>,
    header: &str,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let wcs = load_wcs(header)?;
    let input: Array2<f64> = coords.as_array().to_owned();

    let result = py.allow_threads(move || {
        WcsWorldToPixel::new(wcs)
            .transform(input.view())
            .map_err(|e| PyValueError::new_err(e.to_string()))
    })?;

    Ok(PyArray2::from_owned_array(py, result))
}

/// Project 0-based pixel coordinates to world coordinates.
///
/// Args:
///     coords: (N, 2) array of (col, row) pixel positions.
///     header: FITS header text describing a 2D celestial WCS.
///
/// Returns:
///     (N, 2) array of (lon, lat) in degrees.
#[pyfunction]
#[pyo3(signature = (coords, header))]
pub fn pixel_to_world<'py>(
    py: Python<'py>,
    coords: PyReadonlyArray2<'py, f64>,
    header: &str,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let wcs = load_wcs(header)?;
    let input: Array2<f64> = coords.as_array().to_owned();

    let result = py.allow_threads(move || {
        WcsPixelToWorld::new(wcs)
            .transform(input.view())
            .map_err(|e| PyValueError::new_err(e.to_string()))
    })?;

    Ok(PyArray2::from_owned_array(py, result))
}

/// Raw WCS world -> pixel projection with an explicit origin (0 or 1).
#[pyfunction]
#[pyo3(signature = (coords, header, origin=1))]
pub fn wcs_world2pix<'py>(
    py: Python<'py>,
    coords: PyReadonlyArray2<'py, f64>,
    header: &str,
    origin: u8,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let origin = parse_origin(origin)?;
    let wcs = load_wcs(header)?;
    let mut pairs = to_pairs(&coords.as_array()).map_err(|e| PyValueError::new_err(e.to_string()))?;

    py.allow_threads(|| wcs.world_to_pixel(&mut pairs, origin))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(PyArray2::from_owned_array(py, from_pairs(&pairs)))
}

/// Raw WCS pixel -> world projection with an explicit origin (0 or 1).
#[pyfunction]
#[pyo3(signature = (coords, header, origin=1))]
pub fn wcs_pix2world<'py>(
    py: Python<'py>,
    coords: PyReadonlyArray2<'py, f64>,
    header: &str,
    origin: u8,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let origin = parse_origin(origin)?;
    let wcs = load_wcs(header)?;
    let mut pairs = to_pairs(&coords.as_array()).map_err(|e| PyValueError::new_err(e.to_string()))?;

    py.allow_threads(|| wcs.pixel_to_world(&mut pairs, origin))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(PyArray2::from_owned_array(py, from_pairs(&pairs)))
}
