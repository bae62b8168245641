//! World Coordinate System definitions.
//!
//! The transform pair only needs "something that projects batches of points
//! between world and pixel space under a chosen origin convention"; that is
//! the [`Wcs`] trait. [`CelestialWcs`] is the native implementation for 2D
//! celestial images.

pub mod adapter;
pub mod celestial;
pub mod params;

use std::fmt;

use crate::error::ProjError;

pub use celestial::CelestialWcs;
pub use params::WcsParams;

/// Pixel-coordinate origin convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// First pixel centre is at 0 (array indexing, rendering pipelines).
    Zero,
    /// First pixel centre is at 1 (FITS).
    One,
}

impl Origin {
    /// Coordinate of the first pixel centre.
    pub fn offset(self) -> f64 {
        match self {
            Origin::Zero => 0.0,
            Origin::One => 1.0,
        }
    }

    /// Parse the numeric convention (`0` or `1`) used by FITS tooling.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Origin::Zero),
            1 => Some(Origin::One),
            _ => None,
        }
    }
}

/// A projection between sky-world coordinates (longitude, latitude in
/// degrees) and pixel coordinates.
///
/// Implementations must be immutable after construction; a single instance
/// is shared read-only by every transform built on it.
pub trait Wcs: Send + Sync + fmt::Debug {
    /// Batch world -> pixel, in place. Pixel outputs follow `origin`.
    fn world_to_pixel(&self, coords: &mut [(f64, f64)], origin: Origin) -> Result<(), ProjError>;

    /// Batch pixel -> world, in place. Pixel inputs follow `origin`.
    fn pixel_to_world(&self, coords: &mut [(f64, f64)], origin: Origin) -> Result<(), ProjError>;
}
