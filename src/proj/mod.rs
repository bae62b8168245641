pub mod azp;
pub mod common;
pub mod zenithal;

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use crate::error::ProjError;
use crate::proj::azp::Azp;
use crate::proj::zenithal::{Arc, Sin, Stg, Tan, Zea};

/// Trait for spherical projections between native spherical coordinates and
/// intermediate world coordinates.
pub trait Projection: Send + Sync + fmt::Debug {
    /// Forward: native (phi_rad, theta_rad) -> intermediate (x_deg, y_deg)
    fn forward(&self, phi: f64, theta: f64) -> Result<(f64, f64), ProjError>;

    /// Inverse: intermediate (x_deg, y_deg) -> native (phi_rad, theta_rad)
    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError>;

    /// Three-letter FITS projection code (e.g. "TAN").
    fn code(&self) -> &'static str;

    /// Native latitude of the reference point, radians.
    fn theta0(&self) -> f64 {
        FRAC_PI_2
    }
}

/// Projection parameters carried by `PV2_m` keywords.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProjParams {
    pub pv2_1: Option<f64>,
    pub pv2_2: Option<f64>,
}

/// Split a celestial `CTYPEi` value ("RA---TAN", "GLON-AZP", ...) into its
/// axis name and projection code.
pub fn split_ctype(ctype: &str) -> Result<(&str, &str), ProjError> {
    let ctype = ctype.trim();
    if ctype.len() < 8 || !ctype.is_ascii() {
        return Err(ProjError::UnknownProjection(format!(
            "CTYPE '{ctype}' is not a celestial axis"
        )));
    }
    let axis = ctype[..4].trim_end_matches('-');
    let code = ctype[5..].trim_end();
    // Distortion suffixes ("RA---TAN-SIP") are not supported
    if code.len() != 3 {
        return Err(ProjError::UnknownProjection(format!(
            "unsupported projection in CTYPE '{ctype}'"
        )));
    }
    Ok((axis, code))
}

/// Build a native projection from its FITS code.
pub fn from_code(code: &str, params: &ProjParams) -> Result<Box<dyn Projection>, ProjError> {
    match code.to_ascii_uppercase().as_str() {
        "TAN" => Ok(Box::new(Tan)),
        "SIN" => Ok(Box::new(Sin)),
        "ARC" => Ok(Box::new(Arc)),
        "STG" => Ok(Box::new(Stg)),
        "ZEA" => Ok(Box::new(Zea)),
        "AZP" => Ok(Box::new(Azp::new(
            params.pv2_1.unwrap_or(0.0),
            params.pv2_2.unwrap_or(0.0),
        )?)),
        other => Err(ProjError::UnknownProjection(other.to_string())),
    }
}
