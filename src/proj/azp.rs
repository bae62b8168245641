//! Zenithal perspective (AZP) projection.
//!
//! The point of projection sits μ sphere radii from the centre, and the plane
//! of projection may be tilted by γ about the x axis (`PV2_1 = μ`,
//! `PV2_2 = γ` in degrees).

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::proj::Projection;

/// Slack allowed when rounding puts asin arguments just outside [-1, 1].
const TOL: f64 = 1e-13;

#[derive(Clone, Copy, Debug)]
pub struct Azp {
    mu: f64,
    // Precomputed
    cos_g: f64,
    sin_g: f64,
    tan_g: f64,
    /// Lowest native latitude on the visible side, radians.
    theta_min: f64,
}

impl Azp {
    pub fn new(mu: f64, gamma_deg: f64) -> Result<Self, ProjError> {
        if mu == -1.0 {
            return Err(ProjError::InvalidParameter(
                "AZP requires mu != -1".into(),
            ));
        }
        let (sin_g, cos_g) = gamma_deg.to_radians().sin_cos();
        if cos_g.abs() < 1e-12 {
            return Err(ProjError::InvalidParameter(
                "AZP requires gamma != +-90".into(),
            ));
        }
        let theta_min = if mu.abs() > 1.0 {
            (-1.0 / mu).asin()
        } else {
            -FRAC_PI_2
        };
        Ok(Self {
            mu,
            cos_g,
            sin_g,
            tan_g: sin_g / cos_g,
            theta_min,
        })
    }
}

impl Projection for Azp {
    fn forward(&self, phi: f64, theta: f64) -> Result<(f64, f64), ProjError> {
        if theta < self.theta_min {
            return Err(ProjError::OutOfDomain("AZP point on the far side"));
        }
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();

        let denom = self.mu + sin_t + cos_t * cos_p * self.tan_g;
        if denom.abs() < f64::EPSILON {
            return Err(ProjError::OutOfDomain("AZP diverges"));
        }
        let r = ((self.mu + 1.0) * cos_t / denom).to_degrees();
        Ok((r * sin_p, -r * cos_p / self.cos_g))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let yc = y * self.cos_g;
        let r = x.hypot(yc);
        if r == 0.0 {
            return Ok((0.0, FRAC_PI_2));
        }
        let phi = x.atan2(-yc);

        let q = (self.mu + 1.0).to_degrees() + y * self.sin_g;
        if q == 0.0 {
            return Err(ProjError::OutOfDomain("AZP diverges"));
        }
        let s = r / q;
        let mut t = s * self.mu / (s * s + 1.0).sqrt();
        if t.abs() > 1.0 {
            if t.abs() > 1.0 + TOL {
                return Err(ProjError::OutOfDomain("AZP boundary exceeded"));
            }
            t = t.signum();
        }
        let psi = 1.0_f64.atan2(s);
        let omega = t.asin();

        // Two solutions; keep the one nearest the native pole
        let mut a = psi - omega;
        let mut b = psi + omega + std::f64::consts::PI;
        if a > FRAC_PI_2 {
            a -= 2.0 * std::f64::consts::PI;
        }
        if b > FRAC_PI_2 {
            b -= 2.0 * std::f64::consts::PI;
        }
        Ok((phi, a.max(b)))
    }

    fn code(&self) -> &'static str {
        "AZP"
    }
}
