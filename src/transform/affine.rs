//! The pipeline's affine transforms under the common transform contract.

use ndarray::{Array2, ArrayView2};

use crate::affine::Affine;
use crate::error::TransformError;
use crate::transform::{AxisMap, Transform};
use crate::wcs::adapter::{from_pairs, to_pairs};

impl Transform for Affine {
    fn is_separable(&self) -> bool {
        self.is_axis_aligned()
    }

    fn is_affine(&self) -> bool {
        true
    }

    fn transform(&self, points: ArrayView2<'_, f64>) -> Result<Array2<f64>, TransformError> {
        let mut coords = to_pairs(&points)?;
        for c in coords.iter_mut() {
            *c = self.forward(c.0, c.1);
        }
        Ok(from_pairs(&coords))
    }

    fn inverted(&self) -> Result<Box<dyn Transform>, TransformError> {
        Ok(Box::new(self.inverse()?))
    }

    fn as_affine(&self) -> Option<Affine> {
        Some(*self)
    }

    fn split_axes(&self) -> Option<(AxisMap, AxisMap)> {
        if !self.is_axis_aligned() {
            return None;
        }
        Some((
            AxisMap {
                scale: self.a,
                offset: self.c,
            },
            AxisMap {
                scale: self.e,
                offset: self.f,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_batch_matches_forward() {
        let aff = Affine::new(0.5, 0.1, 3.0, -0.2, 2.0, -7.0);
        let pts = array![[0.0, 0.0], [1.0, 2.0], [-4.0, 8.5]];
        let out = Transform::transform(&aff, pts.view()).unwrap();
        for (i, row) in pts.rows().into_iter().enumerate() {
            let (x, y) = aff.forward(row[0], row[1]);
            assert_relative_eq!(out[(i, 0)], x);
            assert_relative_eq!(out[(i, 1)], y);
        }
    }

    #[test]
    fn test_separable_split() {
        let aff = Affine::new(2.0, 0.0, 1.0, 0.0, -3.0, 5.0);
        assert!(aff.is_separable());
        let (mx, my) = aff.split_axes().unwrap();
        let (x, y) = aff.forward(4.0, 6.0);
        assert_relative_eq!(mx.apply(4.0), x);
        assert_relative_eq!(my.apply(6.0), y);
    }

    #[test]
    fn test_rotation_not_split() {
        let aff = Affine::rotation_deg(30.0);
        assert!(!aff.is_separable());
        assert!(aff.split_axes().is_none());
    }

    #[test]
    fn test_inverted() {
        let aff = Affine::new(2.0, 0.0, 1.0, 0.0, 4.0, -2.0);
        let inv = aff.inverted().unwrap();
        let out = inv.transform(array![[5.0, 14.0]].view()).unwrap();
        assert_relative_eq!(out[(0, 0)], 2.0);
        assert_relative_eq!(out[(0, 1)], 4.0);
    }

    #[test]
    fn test_singular_inverted_errors() {
        let err = Affine::scale(0.0, 1.0).inverted().unwrap_err();
        assert!(matches!(err, TransformError::Affine(_)));
    }
}
