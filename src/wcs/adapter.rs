//! Projection adapter between N×2 point batches in the rendering pipeline's
//! 0-based pixel convention and a [`Wcs`] driven in FITS 1-based convention.

use ndarray::{Array2, ArrayView2};

use crate::error::TransformError;
use crate::wcs::{Origin, Wcs};

/// Project an N×2 batch of (lon, lat) degrees to 0-based pixel coordinates.
pub fn world_to_pixel(wcs: &dyn Wcs, world: ArrayView2<'_, f64>) -> Result<Array2<f64>, TransformError> {
    let mut coords = to_pairs(&world)?;
    wcs.world_to_pixel(&mut coords, Origin::One)?;
    for c in coords.iter_mut() {
        c.0 -= 1.0;
        c.1 -= 1.0;
    }
    Ok(from_pairs(&coords))
}

/// Project an N×2 batch of 0-based pixel coordinates to (lon, lat) degrees.
pub fn pixel_to_world(wcs: &dyn Wcs, pixel: ArrayView2<'_, f64>) -> Result<Array2<f64>, TransformError> {
    let mut coords = to_pairs(&pixel)?;
    for c in coords.iter_mut() {
        c.0 += 1.0;
        c.1 += 1.0;
    }
    wcs.pixel_to_world(&mut coords, Origin::One)?;
    Ok(from_pairs(&coords))
}

/// Check an N×2 batch and copy it into (x, y) pairs.
pub(crate) fn to_pairs(points: &ArrayView2<'_, f64>) -> Result<Vec<(f64, f64)>, TransformError> {
    let (_, cols) = points.dim();
    if cols != 2 {
        return Err(TransformError::ShapeMismatch(format!(
            "expected an N×2 batch, got {:?}",
            points.shape()
        )));
    }
    Ok(points.rows().into_iter().map(|r| (r[0], r[1])).collect())
}

pub(crate) fn from_pairs(coords: &[(f64, f64)]) -> Array2<f64> {
    Array2::from_shape_fn((coords.len(), 2), |(i, j)| {
        if j == 0 { coords[i].0 } else { coords[i].1 }
    })
}
