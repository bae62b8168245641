//! Common helpers for zenithal projection math (polar intermediate coordinates,
//! spherical rotation between celestial and native frames).

use std::f64::consts::FRAC_PI_2;

/// Native radius R(θ) (radians) and native longitude φ → intermediate (x, y) in degrees.
pub fn radial_to_xy(r_theta: f64, phi: f64) -> (f64, f64) {
    let r = r_theta.to_degrees();
    let (sin_phi, cos_phi) = phi.sin_cos();
    (r * sin_phi, -r * cos_phi)
}

/// Intermediate (x, y) in degrees → (φ, R) with R in radians.
///
/// At the origin φ is undefined and returned as 0.
pub fn xy_to_polar(x: f64, y: f64) -> (f64, f64) {
    let r = x.hypot(y);
    if r == 0.0 {
        return (0.0, 0.0);
    }
    (x.atan2(-y), r.to_radians())
}

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_lon(lon: f64) -> f64 {
    let l = lon.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if l >= 360.0 { 0.0 } else { l }
}

/// Rotation between celestial (α, δ) and native spherical (φ, θ) coordinates.
///
/// All angles are stored in radians.
#[derive(Clone, Copy, Debug)]
pub struct SphericalRotation {
    alpha_p: f64,
    delta_p: f64,
    phi_p: f64,
    sin_dp: f64,
    cos_dp: f64,
}

impl SphericalRotation {
    /// Rotation for a zenithal projection (θ₀ = 90°): the native pole is the
    /// reference point itself. `lonpole` is φ_p in degrees.
    pub fn zenithal(crval1: f64, crval2: f64, lonpole: f64) -> Self {
        let delta_p = crval2.to_radians();
        let (sin_dp, cos_dp) = delta_p.sin_cos();
        Self {
            alpha_p: crval1.to_radians(),
            delta_p,
            phi_p: lonpole.to_radians(),
            sin_dp,
            cos_dp,
        }
    }

    /// Default LONPOLE (degrees): 0 when δ₀ ≥ θ₀, otherwise 180.
    pub fn default_lonpole(crval2: f64, theta0: f64) -> f64 {
        if crval2 >= theta0 { 0.0 } else { 180.0 }
    }

    /// Celestial (α, δ) radians → native (φ, θ) radians.
    pub fn to_native(&self, alpha: f64, delta: f64) -> (f64, f64) {
        let (sin_d, cos_d) = delta.sin_cos();
        let (sin_da, cos_da) = (alpha - self.alpha_p).sin_cos();

        let x = -cos_d * sin_da;
        let y = sin_d * self.cos_dp - cos_d * self.sin_dp * cos_da;
        let z = sin_d * self.sin_dp + cos_d * self.cos_dp * cos_da;
        // asin(z) loses half its digits as z -> 1, i.e. right at the reference point
        (self.phi_p + x.atan2(y), z.atan2(x.hypot(y)))
    }

    /// Native (φ, θ) radians → celestial (α, δ) radians.
    pub fn to_celestial(&self, phi: f64, theta: f64) -> (f64, f64) {
        if theta >= FRAC_PI_2 {
            return (self.alpha_p, self.delta_p);
        }
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_dphi, cos_dphi) = (phi - self.phi_p).sin_cos();

        let x = -cos_t * sin_dphi;
        let y = sin_t * self.cos_dp - cos_t * self.sin_dp * cos_dphi;
        let z = sin_t * self.sin_dp + cos_t * self.cos_dp * cos_dphi;
        (self.alpha_p + x.atan2(y), z.atan2(x.hypot(y)))
    }
}
