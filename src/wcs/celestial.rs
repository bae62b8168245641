//! Native celestial WCS: linear pixel stage, zenithal projection, spherical
//! rotation.
//!
//! pixel (FITS, 1-based) --CRPIX, CD--> intermediate (x, y) deg
//!     --projection--> native (phi, theta) --rotation--> celestial (lon, lat)

use crate::error::ProjError;
use crate::proj::common::{normalize_lon, SphericalRotation};
use crate::proj::{self, ProjParams, Projection};
use crate::wcs::params::WcsParams;
use crate::wcs::{Origin, Wcs};

/// A 2D celestial WCS built from header keywords.
///
/// Points outside the projection's valid domain project to `(NaN, NaN)`
/// rather than failing the batch.
#[derive(Debug)]
pub struct CelestialWcs {
    /// Reference pixel, FITS 1-based.
    crpix: (f64, f64),
    crval: (f64, f64),
    cd: [[f64; 2]; 2],
    cd_inv: [[f64; 2]; 2],
    projection: Box<dyn Projection>,
    rotation: SphericalRotation,
    naxis: Option<(u64, u64)>,
    /// Longitude axis is the second pixel axis ("DEC--TAN", "RA---TAN").
    swapped: bool,
}

impl CelestialWcs {
    pub fn new(params: &WcsParams) -> Result<Self, ProjError> {
        let (axis1, code1) = proj::split_ctype(&params.ctype1)?;
        let (axis2, code2) = proj::split_ctype(&params.ctype2)?;
        if code1 != code2 {
            return Err(ProjError::InvalidParameter(format!(
                "CTYPE1 and CTYPE2 use different projections ({code1} vs {code2})"
            )));
        }
        let swapped = is_latitude_axis(axis1);
        if swapped == is_latitude_axis(axis2) {
            return Err(ProjError::InvalidParameter(format!(
                "expected one longitude and one latitude axis, got {axis1} and {axis2}"
            )));
        }

        let projection = proj::from_code(
            code1,
            &ProjParams {
                pv2_1: params.pv2_1,
                pv2_2: params.pv2_2,
            },
        )?;

        let cd = params.cd_matrix()?;
        let det = cd[0][0] * cd[1][1] - cd[0][1] * cd[1][0];
        if det.abs() < f64::MIN_POSITIVE {
            return Err(ProjError::InvalidParameter(
                "CD matrix is singular".into(),
            ));
        }
        let cd_inv = [
            [cd[1][1] / det, -cd[0][1] / det],
            [-cd[1][0] / det, cd[0][0] / det],
        ];

        // Keywords describe the header's axis order; internally lon comes first
        let (crval_lon, crval_lat) = if swapped {
            (params.crval2, params.crval1)
        } else {
            (params.crval1, params.crval2)
        };
        let theta0 = projection.theta0().to_degrees();
        let lonpole = params
            .lonpole
            .unwrap_or_else(|| SphericalRotation::default_lonpole(crval_lat, theta0));
        let rotation = SphericalRotation::zenithal(crval_lon, crval_lat, lonpole);

        let naxis = params.naxis1.zip(params.naxis2);

        log::debug!(
            "built {} WCS: crpix=({}, {}) crval=({}, {}) lonpole={}",
            projection.code(),
            params.crpix1,
            params.crpix2,
            params.crval1,
            params.crval2,
            lonpole
        );

        Ok(Self {
            crpix: (params.crpix1, params.crpix2),
            crval: (params.crval1, params.crval2),
            cd,
            cd_inv,
            projection,
            rotation,
            naxis,
            swapped,
        })
    }

    pub fn from_header(header: &str) -> Result<Self, ProjError> {
        Self::new(&WcsParams::from_header(header)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ProjError> {
        Self::new(&WcsParams::from_json(json)?)
    }

    pub fn projection_code(&self) -> &'static str {
        self.projection.code()
    }

    /// Reference pixel in FITS (1-based) convention.
    pub fn reference_pixel(&self) -> (f64, f64) {
        self.crpix
    }

    /// Reference world coordinate in header axis order.
    pub fn reference_world(&self) -> (f64, f64) {
        self.crval
    }

    /// Image dimensions (NAXIS1, NAXIS2), when the header declares them.
    pub fn image_dimensions(&self) -> Option<(u64, u64)> {
        self.naxis
    }

    /// FITS pixel (1-based) -> (lon, lat) degrees in header axis order.
    fn pix2world_one(&self, px: f64, py: f64) -> Result<(f64, f64), ProjError> {
        let dx = px - self.crpix.0;
        let dy = py - self.crpix.1;
        let x = self.cd[0][0] * dx + self.cd[0][1] * dy;
        let y = self.cd[1][0] * dx + self.cd[1][1] * dy;
        let (x, y) = if self.swapped { (y, x) } else { (x, y) };

        let (phi, theta) = self.projection.inverse(x, y)?;
        let (alpha, delta) = self.rotation.to_celestial(phi, theta);
        let lon = normalize_lon(alpha.to_degrees());
        let lat = delta.to_degrees();
        Ok(if self.swapped { (lat, lon) } else { (lon, lat) })
    }

    /// (lon, lat) degrees in header axis order -> FITS pixel (1-based).
    fn world2pix_one(&self, w1: f64, w2: f64) -> Result<(f64, f64), ProjError> {
        let (lon, lat) = if self.swapped { (w2, w1) } else { (w1, w2) };
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ProjError::OutOfDomain("latitude outside [-90, 90]"));
        }
        let (phi, theta) = self.rotation.to_native(lon.to_radians(), lat.to_radians());
        let (x, y) = self.projection.forward(phi, theta)?;
        let (x, y) = if self.swapped { (y, x) } else { (x, y) };

        let dx = self.cd_inv[0][0] * x + self.cd_inv[0][1] * y;
        let dy = self.cd_inv[1][0] * x + self.cd_inv[1][1] * y;
        Ok((dx + self.crpix.0, dy + self.crpix.1))
    }
}

impl Wcs for CelestialWcs {
    fn world_to_pixel(&self, coords: &mut [(f64, f64)], origin: Origin) -> Result<(), ProjError> {
        let shift = 1.0 - origin.offset();
        for c in coords.iter_mut() {
            *c = match self.world2pix_one(c.0, c.1) {
                Ok((px, py)) => (px - shift, py - shift),
                Err(e) => {
                    log::trace!("world ({}, {}) not projectable: {e}", c.0, c.1);
                    (f64::NAN, f64::NAN)
                }
            };
        }
        Ok(())
    }

    fn pixel_to_world(&self, coords: &mut [(f64, f64)], origin: Origin) -> Result<(), ProjError> {
        let shift = 1.0 - origin.offset();
        for c in coords.iter_mut() {
            *c = match self.pix2world_one(c.0 + shift, c.1 + shift) {
                Ok(w) => w,
                Err(e) => {
                    log::trace!("pixel ({}, {}) not projectable: {e}", c.0, c.1);
                    (f64::NAN, f64::NAN)
                }
            };
        }
        Ok(())
    }
}

fn is_latitude_axis(axis: &str) -> bool {
    axis == "DEC" || axis.ends_with("LAT")
}
