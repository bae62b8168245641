//! Zenithal (azimuthal) projections with a fixed radial function R(θ).
//!
//! TAN (gnomonic), SIN (orthographic), ARC (equidistant), STG (stereographic)
//! and ZEA (equal area). All share θ₀ = 90° and differ only in R(θ).

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::proj::common::{radial_to_xy, xy_to_polar};
use crate::proj::Projection;

/// Gnomonic projection. Undefined for θ ≤ 0.
#[derive(Clone, Copy, Debug)]
pub struct Tan;

impl Projection for Tan {
    fn forward(&self, phi: f64, theta: f64) -> Result<(f64, f64), ProjError> {
        if theta <= 0.0 {
            return Err(ProjError::OutOfDomain("TAN undefined for theta <= 0"));
        }
        let (sin_t, cos_t) = theta.sin_cos();
        Ok(radial_to_xy(cos_t / sin_t, phi))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let (phi, r) = xy_to_polar(x, y);
        Ok((phi, 1.0_f64.atan2(r)))
    }

    fn code(&self) -> &'static str {
        "TAN"
    }
}

/// Orthographic projection (without the slant terms). Only the near hemisphere
/// is visible.
#[derive(Clone, Copy, Debug)]
pub struct Sin;

impl Projection for Sin {
    fn forward(&self, phi: f64, theta: f64) -> Result<(f64, f64), ProjError> {
        if theta < 0.0 {
            return Err(ProjError::OutOfDomain("SIN undefined for theta < 0"));
        }
        Ok(radial_to_xy(theta.cos(), phi))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let (phi, r) = xy_to_polar(x, y);
        if r > 1.0 {
            return Err(ProjError::OutOfDomain("SIN boundary exceeded"));
        }
        Ok((phi, r.acos()))
    }

    fn code(&self) -> &'static str {
        "SIN"
    }
}

/// Zenithal equidistant projection.
#[derive(Clone, Copy, Debug)]
pub struct Arc;

impl Projection for Arc {
    fn forward(&self, phi: f64, theta: f64) -> Result<(f64, f64), ProjError> {
        Ok(radial_to_xy(FRAC_PI_2 - theta, phi))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let (phi, r) = xy_to_polar(x, y);
        if r > std::f64::consts::PI {
            return Err(ProjError::OutOfDomain("ARC beyond the antipode"));
        }
        Ok((phi, FRAC_PI_2 - r))
    }

    fn code(&self) -> &'static str {
        "ARC"
    }
}

/// Stereographic projection. Diverges at θ = -90°.
#[derive(Clone, Copy, Debug)]
pub struct Stg;

impl Projection for Stg {
    fn forward(&self, phi: f64, theta: f64) -> Result<(f64, f64), ProjError> {
        let (sin_t, cos_t) = theta.sin_cos();
        let denom = 1.0 + sin_t;
        if denom <= f64::EPSILON {
            return Err(ProjError::OutOfDomain("STG diverges at theta = -90"));
        }
        Ok(radial_to_xy(2.0 * cos_t / denom, phi))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let (phi, r) = xy_to_polar(x, y);
        Ok((phi, FRAC_PI_2 - 2.0 * (r / 2.0).atan()))
    }

    fn code(&self) -> &'static str {
        "STG"
    }
}

/// Zenithal equal-area projection.
#[derive(Clone, Copy, Debug)]
pub struct Zea;

impl Projection for Zea {
    fn forward(&self, phi: f64, theta: f64) -> Result<(f64, f64), ProjError> {
        let r = (2.0 * (1.0 - theta.sin())).max(0.0).sqrt();
        Ok(radial_to_xy(r, phi))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let (phi, r) = xy_to_polar(x, y);
        let half = r / 2.0;
        if half > 1.0 {
            return Err(ProjError::OutOfDomain("ZEA boundary exceeded"));
        }
        Ok((phi, FRAC_PI_2 - 2.0 * half.asin()))
    }

    fn code(&self) -> &'static str {
        "ZEA"
    }
}
