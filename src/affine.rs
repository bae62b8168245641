use crate::error::TransformError;

/// A 2D affine transform in the rendering pipeline's own coordinate spaces.
///
/// Maps (x, y) to (x', y'):
///   x' = a * x + b * y + c
///   y' = d * x + e * y + f
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, tx, 0.0, 1.0, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotation_deg(angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self::new(cos, -sin, 0.0, sin, cos, 0.0)
    }

    /// Create from a `(a, b, c, d, e, f)` tuple.
    pub fn from_tuple(t: (f64, f64, f64, f64, f64, f64)) -> Self {
        Self::new(t.0, t.1, t.2, t.3, t.4, t.5)
    }

    pub fn to_tuple(&self) -> (f64, f64, f64, f64, f64, f64) {
        (self.a, self.b, self.c, self.d, self.e, self.f)
    }

    /// Apply the transform to a single point.
    pub fn forward(&self, x: f64, y: f64) -> (f64, f64) {
        let xo = self.a * x + self.b * y + self.c;
        let yo = self.d * x + self.e * y + self.f;
        (xo, yo)
    }

    /// Compose: apply `self` first, then `next`.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            a: next.a * self.a + next.b * self.d,
            b: next.a * self.b + next.b * self.e,
            c: next.a * self.c + next.b * self.f + next.c,
            d: next.d * self.a + next.e * self.d,
            e: next.d * self.b + next.e * self.e,
            f: next.d * self.c + next.e * self.f + next.f,
        }
    }

    /// True when x' depends only on x and y' only on y.
    pub fn is_axis_aligned(&self) -> bool {
        self.b == 0.0 && self.d == 0.0
    }

    /// Inverse transform. Fails when the linear part is singular relative to
    /// its own magnitude, so milliarcsecond scales still invert.
    pub fn inverse(&self) -> Result<Affine, TransformError> {
        let det = self.a * self.e - self.b * self.d;
        let norm = self.a.hypot(self.b) * self.d.hypot(self.e);
        if !det.is_finite() || det.abs() <= norm * f64::EPSILON {
            return Err(TransformError::Affine(format!(
                "affine {:?} is not invertible (det = {det:e})",
                self.to_tuple()
            )));
        }
        let linear = Affine::new(
            self.e / det,
            -self.b / det,
            0.0,
            -self.d / det,
            self.a / det,
            0.0,
        );
        // Undo the offset, then the linear part
        Ok(Affine::translation(-self.c, -self.f).then(&linear))
    }
}
