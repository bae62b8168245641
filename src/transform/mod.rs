//! The 2D transform contract shared by curved (WCS) and affine transforms,
//! and the composition machinery a rendering pipeline uses to chain them.

pub mod affine;
pub mod composite;
pub mod curved;

use std::fmt;

use ndarray::{Array2, ArrayView2};

use crate::affine::Affine;
use crate::error::TransformError;
use crate::path::Path;

pub use composite::CompositeTransform;
pub use curved::{WcsPixelToWorld, WcsWorldToPixel};

/// 1-D linear map `v' = scale * v + offset`, one axis of a separable transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisMap {
    pub scale: f64,
    pub offset: f64,
}

impl AxisMap {
    pub fn apply(&self, v: f64) -> f64 {
        self.scale * v + self.offset
    }

    /// Apply `self` first, then `next`.
    pub fn then(&self, next: &AxisMap) -> AxisMap {
        AxisMap {
            scale: next.scale * self.scale,
            offset: next.scale * self.offset + next.offset,
        }
    }
}

/// A mapping of 2D point batches from one coordinate space to another.
pub trait Transform: Send + Sync + fmt::Debug {
    fn input_dims(&self) -> usize {
        2
    }

    fn output_dims(&self) -> usize {
        2
    }

    /// Whether each output coordinate depends on only one input coordinate.
    fn is_separable(&self) -> bool;

    fn is_affine(&self) -> bool {
        false
    }

    /// Map an N×2 batch. The output has the same shape as the input.
    fn transform(&self, points: ArrayView2<'_, f64>) -> Result<Array2<f64>, TransformError>;

    /// Map the vertices of `path`, carrying its codes through unchanged.
    fn transform_path(&self, path: &Path) -> Result<Path, TransformError> {
        path.with_vertices(self.transform(path.vertices())?)
    }

    /// The transform mapping outputs back to inputs.
    fn inverted(&self) -> Result<Box<dyn Transform>, TransformError>;

    /// The equivalent affine matrix, for transforms that are affine.
    fn as_affine(&self) -> Option<Affine> {
        None
    }

    /// Per-axis decomposition `(x map, y map)`. Only separable transforms
    /// may return `Some`.
    fn split_axes(&self) -> Option<(AxisMap, AxisMap)> {
        None
    }
}

impl Transform for Box<dyn Transform> {
    fn input_dims(&self) -> usize {
        (**self).input_dims()
    }

    fn output_dims(&self) -> usize {
        (**self).output_dims()
    }

    fn is_separable(&self) -> bool {
        (**self).is_separable()
    }

    fn is_affine(&self) -> bool {
        (**self).is_affine()
    }

    fn transform(&self, points: ArrayView2<'_, f64>) -> Result<Array2<f64>, TransformError> {
        (**self).transform(points)
    }

    fn transform_path(&self, path: &Path) -> Result<Path, TransformError> {
        (**self).transform_path(path)
    }

    fn inverted(&self) -> Result<Box<dyn Transform>, TransformError> {
        (**self).inverted()
    }

    fn as_affine(&self) -> Option<Affine> {
        (**self).as_affine()
    }

    fn split_axes(&self) -> Option<(AxisMap, AxisMap)> {
        (**self).split_axes()
    }
}

/// Chain `first` then `second`. Two affine transforms fuse into one matrix.
pub fn compose(
    first: Box<dyn Transform>,
    second: Box<dyn Transform>,
) -> Result<Box<dyn Transform>, TransformError> {
    if let (Some(a), Some(b)) = (first.as_affine(), second.as_affine()) {
        return Ok(Box::new(a.then(&b)));
    }
    Ok(Box::new(CompositeTransform::new(first, second)?))
}

/// Chaining helpers for concrete transform types.
pub trait TransformExt: Transform + Sized + 'static {
    /// Apply `self`, then `next`.
    fn followed_by<T: Transform + 'static>(
        self,
        next: T,
    ) -> Result<CompositeTransform, TransformError> {
        CompositeTransform::new(Box::new(self), Box::new(next))
    }

    /// Apply `self`, then the affine `affine` (typically data -> display).
    fn compose(self, affine: Affine) -> Result<CompositeTransform, TransformError> {
        self.followed_by(affine)
    }
}

impl<T: Transform + Sized + 'static> TransformExt for T {}
