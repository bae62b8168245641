//! Chained transforms.

use ndarray::{Array2, ArrayView2};

use crate::affine::Affine;
use crate::error::TransformError;
use crate::transform::{AxisMap, Transform};

/// `first`, then `second`.
///
/// A chain made only of affine parts runs as one fused matrix. Anything
/// containing a curved part runs stage by stage and is never split per axis.
#[derive(Debug)]
pub struct CompositeTransform {
    first: Box<dyn Transform>,
    second: Box<dyn Transform>,
}

impl CompositeTransform {
    pub fn new(first: Box<dyn Transform>, second: Box<dyn Transform>) -> Result<Self, TransformError> {
        if first.output_dims() != second.input_dims() {
            return Err(TransformError::ShapeMismatch(format!(
                "cannot chain a {}-D output into a {}-D input",
                first.output_dims(),
                second.input_dims()
            )));
        }
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &dyn Transform {
        self.first.as_ref()
    }

    pub fn second(&self) -> &dyn Transform {
        self.second.as_ref()
    }
}

impl Transform for CompositeTransform {
    fn input_dims(&self) -> usize {
        self.first.input_dims()
    }

    fn output_dims(&self) -> usize {
        self.second.output_dims()
    }

    fn is_separable(&self) -> bool {
        self.first.is_separable() && self.second.is_separable()
    }

    fn is_affine(&self) -> bool {
        self.first.is_affine() && self.second.is_affine()
    }

    fn transform(&self, points: ArrayView2<'_, f64>) -> Result<Array2<f64>, TransformError> {
        if let Some(fused) = self.as_affine() {
            return fused.transform(points);
        }
        let mid = self.first.transform(points)?;
        self.second.transform(mid.view())
    }

    fn inverted(&self) -> Result<Box<dyn Transform>, TransformError> {
        let first = self.second.inverted()?;
        let second = self.first.inverted()?;
        Ok(Box::new(CompositeTransform::new(first, second)?))
    }

    fn as_affine(&self) -> Option<Affine> {
        let a = self.first.as_affine()?;
        let b = self.second.as_affine()?;
        Some(a.then(&b))
    }

    fn split_axes(&self) -> Option<(AxisMap, AxisMap)> {
        let (ax, ay) = self.first.split_axes()?;
        let (bx, by) = self.second.split_axes()?;
        Some((ax.then(&bx), ay.then(&by)))
    }
}
