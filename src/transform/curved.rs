//! Curved (non-affine) transforms between sky-world and pixel coordinates.
//!
//! Both variants hold nothing but a shared reference to the WCS, so
//! inverting one is a cheap construction of the other.

use std::sync::Arc;

use ndarray::{Array2, ArrayView2};

use crate::error::TransformError;
use crate::transform::Transform;
use crate::wcs::{adapter, Wcs};

/// World (lon, lat degrees) -> 0-based pixel (col, row).
#[derive(Clone, Debug)]
pub struct WcsWorldToPixel {
    wcs: Arc<dyn Wcs>,
}

impl WcsWorldToPixel {
    pub fn new(wcs: Arc<dyn Wcs>) -> Self {
        Self { wcs }
    }

    pub fn wcs(&self) -> &Arc<dyn Wcs> {
        &self.wcs
    }

    /// Typed inverse sharing the same WCS.
    pub fn inverse(&self) -> WcsPixelToWorld {
        WcsPixelToWorld::new(Arc::clone(&self.wcs))
    }
}

impl Transform for WcsWorldToPixel {
    // Spherical projection couples both axes
    fn is_separable(&self) -> bool {
        false
    }

    fn transform(&self, points: ArrayView2<'_, f64>) -> Result<Array2<f64>, TransformError> {
        adapter::world_to_pixel(self.wcs.as_ref(), points)
    }

    fn inverted(&self) -> Result<Box<dyn Transform>, TransformError> {
        Ok(Box::new(self.inverse()))
    }
}

/// 0-based pixel (col, row) -> world (lon, lat degrees).
#[derive(Clone, Debug)]
pub struct WcsPixelToWorld {
    wcs: Arc<dyn Wcs>,
}

impl WcsPixelToWorld {
    pub fn new(wcs: Arc<dyn Wcs>) -> Self {
        Self { wcs }
    }

    pub fn wcs(&self) -> &Arc<dyn Wcs> {
        &self.wcs
    }

    /// Typed inverse sharing the same WCS.
    pub fn inverse(&self) -> WcsWorldToPixel {
        WcsWorldToPixel::new(Arc::clone(&self.wcs))
    }
}

impl Transform for WcsPixelToWorld {
    fn is_separable(&self) -> bool {
        false
    }

    fn transform(&self, points: ArrayView2<'_, f64>) -> Result<Array2<f64>, TransformError> {
        adapter::pixel_to_world(self.wcs.as_ref(), points)
    }

    fn inverted(&self) -> Result<Box<dyn Transform>, TransformError> {
        Ok(Box::new(self.inverse()))
    }
}
