//! Piecewise paths: a vertex batch plus optional drawing codes.

use ndarray::{Array2, ArrayView2};

use crate::error::TransformError;

/// Drawing instruction attached to a path vertex.
///
/// Discriminants follow the usual renderer numbering so codes can be passed
/// through as raw bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PathCode {
    Stop = 0,
    MoveTo = 1,
    LineTo = 2,
    /// Quadratic Bézier; one control point then the end point.
    Curve3 = 3,
    /// Cubic Bézier; two control points then the end point.
    Curve4 = 4,
    ClosePoly = 79,
}

impl PathCode {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Stop),
            1 => Some(Self::MoveTo),
            2 => Some(Self::LineTo),
            3 => Some(Self::Curve3),
            4 => Some(Self::Curve4),
            79 => Some(Self::ClosePoly),
            _ => None,
        }
    }
}

/// An immutable path. When `codes` is absent the path is a polyline: the
/// first vertex is a move-to and every following vertex a line-to.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    vertices: Array2<f64>,
    codes: Option<Vec<PathCode>>,
}

impl Path {
    pub fn new(vertices: Array2<f64>, codes: Option<Vec<PathCode>>) -> Result<Self, TransformError> {
        let (rows, cols) = vertices.dim();
        if cols != 2 {
            return Err(TransformError::ShapeMismatch(format!(
                "path vertices must be N×2, got {:?}",
                vertices.shape()
            )));
        }
        if let Some(codes) = &codes {
            if codes.len() != rows {
                return Err(TransformError::ShapeMismatch(format!(
                    "path has {rows} vertices but {} codes",
                    codes.len()
                )));
            }
        }
        Ok(Self { vertices, codes })
    }

    /// Polyline through `points`.
    pub fn polyline(points: &[(f64, f64)]) -> Self {
        Self {
            vertices: crate::wcs::adapter::from_pairs(points),
            codes: None,
        }
    }

    pub fn vertices(&self) -> ArrayView2<'_, f64> {
        self.vertices.view()
    }

    pub fn codes(&self) -> Option<&[PathCode]> {
        self.codes.as_deref()
    }

    pub fn len(&self) -> usize {
        self.vertices.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Codes with the implicit polyline codes filled in.
    pub fn resolved_codes(&self) -> Vec<PathCode> {
        match &self.codes {
            Some(codes) => codes.clone(),
            None => (0..self.len())
                .map(|i| if i == 0 { PathCode::MoveTo } else { PathCode::LineTo })
                .collect(),
        }
    }

    /// A new path with the same codes and replacement vertices.
    pub fn with_vertices(&self, vertices: Array2<f64>) -> Result<Self, TransformError> {
        if vertices.nrows() != self.len() {
            return Err(TransformError::ShapeMismatch(format!(
                "replacement has {} vertices, path has {}",
                vertices.nrows(),
                self.len()
            )));
        }
        Self::new(vertices, self.codes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_polyline_codes() {
        let path = Path::polyline(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(path.len(), 3);
        assert!(path.codes().is_none());
        assert_eq!(
            path.resolved_codes(),
            vec![PathCode::MoveTo, PathCode::LineTo, PathCode::LineTo]
        );
    }

    #[test]
    fn test_explicit_codes() {
        let codes = vec![
            PathCode::MoveTo,
            PathCode::Curve3,
            PathCode::Curve3,
            PathCode::ClosePoly,
        ];
        let path = Path::new(
            array![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0], [0.0, 0.0]],
            Some(codes.clone()),
        )
        .unwrap();
        assert_eq!(path.codes(), Some(codes.as_slice()));
        assert_eq!(path.resolved_codes(), codes);
    }

    #[test]
    fn test_code_count_mismatch() {
        let err = Path::new(array![[0.0, 0.0], [1.0, 1.0]], Some(vec![PathCode::MoveTo])).unwrap_err();
        assert!(matches!(err, TransformError::ShapeMismatch(_)));
    }

    #[test]
    fn test_bad_vertex_shape() {
        let err = Path::new(Array2::zeros((3, 3)), None).unwrap_err();
        assert!(matches!(err, TransformError::ShapeMismatch(_)));
    }

    #[test]
    fn test_with_vertices_keeps_codes() {
        let path = Path::new(
            array![[0.0, 0.0], [1.0, 1.0]],
            Some(vec![PathCode::MoveTo, PathCode::LineTo]),
        )
        .unwrap();
        let moved = path.with_vertices(array![[5.0, 5.0], [6.0, 6.0]]).unwrap();
        assert_eq!(moved.codes(), path.codes());
        assert_eq!(path.vertices(), array![[0.0, 0.0], [1.0, 1.0]]);
        assert!(path.with_vertices(Array2::zeros((3, 2))).is_err());
    }

    #[test]
    fn test_code_from_u8() {
        for code in [
            PathCode::Stop,
            PathCode::MoveTo,
            PathCode::LineTo,
            PathCode::Curve3,
            PathCode::Curve4,
            PathCode::ClosePoly,
        ] {
            assert_eq!(PathCode::from_u8(code as u8), Some(code));
        }
        assert_eq!(PathCode::from_u8(5), None);
    }

    #[test]
    fn test_empty_path() {
        let path = Path::polyline(&[]);
        assert!(path.is_empty());
        assert!(path.resolved_codes().is_empty());
    }
}
