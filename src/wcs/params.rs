//! WCS keyword set, loadable from JSON or from FITS header cards.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::ProjError;

/// Celestial WCS keywords of a 2D image header.
///
/// Field names map to the upper-case FITS keywords (`crpix1` <-> `CRPIX1`,
/// `cd1_2` <-> `CD1_2`). Unknown keywords are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct WcsParams {
    pub naxis1: Option<u64>,
    pub naxis2: Option<u64>,

    pub ctype1: String,
    pub ctype2: String,

    pub crpix1: f64,
    pub crpix2: f64,
    pub crval1: f64,
    pub crval2: f64,

    pub cdelt1: Option<f64>,
    pub cdelt2: Option<f64>,
    pub crota2: Option<f64>,

    pub cd1_1: Option<f64>,
    pub cd1_2: Option<f64>,
    pub cd2_1: Option<f64>,
    pub cd2_2: Option<f64>,

    pub pc1_1: Option<f64>,
    pub pc1_2: Option<f64>,
    pub pc2_1: Option<f64>,
    pub pc2_2: Option<f64>,

    pub lonpole: Option<f64>,
    pub pv2_1: Option<f64>,
    pub pv2_2: Option<f64>,
}

impl WcsParams {
    /// Parse from a JSON object of FITS keywords.
    pub fn from_json(json: &str) -> Result<Self, ProjError> {
        serde_json::from_str(json).map_err(map_serde_error)
    }

    /// Parse from FITS header text.
    ///
    /// Accepts either newline-separated cards or a contiguous block of
    /// 80-character cards. Parsing stops at `END`.
    pub fn from_header(header: &str) -> Result<Self, ProjError> {
        let cards: Vec<&str> = if header.contains('\n') {
            header.lines().collect()
        } else {
            header
                .as_bytes()
                .chunks(80)
                .map(|c| std::str::from_utf8(c).map_err(|e| ProjError::Header(e.to_string())))
                .collect::<Result<_, _>>()?
        };

        let mut keywords = Map::new();
        for card in cards {
            let card = card.trim_end_matches('\r');
            let key = card.get(..8.min(card.len())).unwrap_or("").trim();
            if key == "END" {
                break;
            }
            if key.is_empty() || key == "COMMENT" || key == "HISTORY" {
                continue;
            }
            let Some((key, rest)) = card.split_once('=') else {
                log::warn!("ignoring header card without value: {card:?}");
                continue;
            };
            let key = key.trim().to_ascii_uppercase();
            if let Some(value) = parse_value(rest)? {
                keywords.insert(key, value);
            }
        }

        serde_json::from_value(Value::Object(keywords)).map_err(map_serde_error)
    }

    /// The linear transformation matrix (degrees per pixel), resolved from
    /// `CDi_j`, `PCi_j` x `CDELTi`, or `CDELTi` + `CROTA2`, in that order.
    pub fn cd_matrix(&self) -> Result<[[f64; 2]; 2], ProjError> {
        if let (Some(c11), Some(c12), Some(c21), Some(c22)) =
            (self.cd1_1, self.cd1_2, self.cd2_1, self.cd2_2)
        {
            return Ok([[c11, c12], [c21, c22]]);
        }
        // A partial CD matrix defaults missing terms to zero
        if self.cd1_1.is_some() || self.cd2_2.is_some() {
            return Ok([
                [self.cd1_1.unwrap_or(0.0), self.cd1_2.unwrap_or(0.0)],
                [self.cd2_1.unwrap_or(0.0), self.cd2_2.unwrap_or(0.0)],
            ]);
        }

        let cdelt1 = self
            .cdelt1
            .ok_or_else(|| ProjError::MissingKeyword("CDELT1 or CD1_1".into()))?;
        let cdelt2 = self
            .cdelt2
            .ok_or_else(|| ProjError::MissingKeyword("CDELT2 or CD2_2".into()))?;

        let has_pc = self.pc1_1.is_some()
            || self.pc1_2.is_some()
            || self.pc2_1.is_some()
            || self.pc2_2.is_some();
        if has_pc {
            let pc = [
                [self.pc1_1.unwrap_or(1.0), self.pc1_2.unwrap_or(0.0)],
                [self.pc2_1.unwrap_or(0.0), self.pc2_2.unwrap_or(1.0)],
            ];
            return Ok([
                [cdelt1 * pc[0][0], cdelt1 * pc[0][1]],
                [cdelt2 * pc[1][0], cdelt2 * pc[1][1]],
            ]);
        }

        let (sin_r, cos_r) = self.crota2.unwrap_or(0.0).to_radians().sin_cos();
        Ok([
            [cdelt1 * cos_r, -cdelt2 * sin_r],
            [cdelt1 * sin_r, cdelt2 * cos_r],
        ])
    }
}

/// Turn the value part of a card (after `=`) into JSON. Logical and complex
/// values are dropped; no WCS keyword we read uses them.
fn parse_value(rest: &str) -> Result<Option<Value>, ProjError> {
    let rest = rest.trim_start();

    if let Some(quoted) = rest.strip_prefix('\'') {
        // '' is an escaped quote inside a FITS string
        let mut out = String::new();
        let mut chars = quoted.chars().peekable();
        loop {
            match chars.next() {
                Some('\'') if chars.peek() == Some(&'\'') => {
                    chars.next();
                    out.push('\'');
                }
                Some('\'') => break,
                Some(c) => out.push(c),
                None => {
                    return Err(ProjError::Header(format!(
                        "unterminated string value: {rest}"
                    )));
                }
            }
        }
        return Ok(Some(Value::String(out.trim_end().to_string())));
    }

    let raw = rest.split('/').next().unwrap_or("").trim();
    if raw.is_empty() || raw == "T" || raw == "F" || raw.starts_with('(') {
        return Ok(None);
    }

    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Some(Value::Number(Number::from(i))));
    }
    let normalized = raw.replace(['D', 'd'], "E");
    let f = normalized
        .parse::<f64>()
        .map_err(|_| ProjError::Header(format!("unparseable value: {raw}")))?;
    Number::from_f64(f)
        .map(|n| Some(Value::Number(n)))
        .ok_or_else(|| ProjError::Header(format!("non-finite value: {raw}")))
}

fn map_serde_error(e: serde_json::Error) -> ProjError {
    let msg = e.to_string();
    // serde reports "missing field `CRPIX1` at ..." for absent mandatory keywords
    match msg.strip_prefix("missing field `") {
        Some(rest) => ProjError::MissingKeyword(rest.split('`').next().unwrap_or(rest).to_string()),
        None => ProjError::Header(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER: &str = "\
SIMPLE  =                    T / conforms to FITS standard
BITPIX  =                  -32
NAXIS   =                    2
NAXIS1  =                  192
NAXIS2  =                  192
CTYPE1  = 'RA---AZP'           / projection
CTYPE2  = 'DEC--AZP'
CRPIX1  =   -2.5680000000E+02
CRPIX2  =    2.5730000000E+02
CRVAL1  =    0.0000000000E+00
CRVAL2  =   -9.0000000000E+01
CDELT1  =        -6.666666667D-02
CDELT2  =         6.666666667D-02
LONPOLE =                  180
PV2_1   =                  2.0
PV2_2   =                 30.0
OBJECT  = 'O''Brien field'
COMMENT a free-form comment = with an equals sign
END
CRPIX1  = 999.0";

    #[test]
    fn test_from_header() {
        let p = WcsParams::from_header(HEADER).unwrap();
        assert_eq!(p.naxis1, Some(192));
        assert_eq!(p.ctype1, "RA---AZP");
        assert_eq!(p.ctype2, "DEC--AZP");
        assert_relative_eq!(p.crpix1, -256.8);
        assert_relative_eq!(p.crval2, -90.0);
        assert_relative_eq!(p.cdelt1.unwrap(), -6.666666667e-2);
        assert_eq!(p.lonpole, Some(180.0));
        assert_eq!(p.pv2_1, Some(2.0));
        assert_eq!(p.pv2_2, Some(30.0));
    }

    #[test]
    fn test_from_header_fixed_width_cards() {
        let cards = [
            "CTYPE1  = 'RA---TAN'",
            "CTYPE2  = 'DEC--TAN'",
            "CRPIX1  = 10.0",
            "CRPIX2  = 20.0",
            "CRVAL1  = 30.0",
            "CRVAL2  = 40.0",
            "CD1_1   = -0.001",
            "CD2_2   = 0.001",
            "END",
        ];
        let block: String = cards.iter().map(|c| format!("{c:<80}")).collect();
        let p = WcsParams::from_header(&block).unwrap();
        assert_relative_eq!(p.crpix2, 20.0);
        assert_eq!(p.cd1_1, Some(-0.001));
        assert_eq!(p.cd1_2, None);
    }

    #[test]
    fn test_missing_keyword() {
        let err = WcsParams::from_header("CTYPE1  = 'RA---TAN'\nCTYPE2  = 'DEC--TAN'\n").unwrap_err();
        assert!(matches!(err, ProjError::MissingKeyword(ref k) if k.starts_with("CRPIX")), "{err}");
    }

    #[test]
    fn test_bad_value() {
        let err = WcsParams::from_header("CRPIX1  = abc\n").unwrap_err();
        assert!(matches!(err, ProjError::Header(_)));
    }

    #[test]
    fn test_from_json() {
        let p = WcsParams::from_json(
            r#"{"CTYPE1": "RA---TAN", "CTYPE2": "DEC--TAN",
                "CRPIX1": 101, "CRPIX2": 101, "CRVAL1": 180.0, "CRVAL2": 0.0,
                "CDELT1": -0.0002777777778, "CDELT2": 0.0002777777778}"#,
        )
        .unwrap();
        assert_relative_eq!(p.crpix1, 101.0);
        assert_eq!(p.naxis1, None);
    }

    #[test]
    fn test_cd_matrix_from_cdelt_and_crota() {
        let p = WcsParams {
            cdelt1: Some(-2.0),
            cdelt2: Some(2.0),
            crota2: Some(90.0),
            ..Default::default()
        };
        let cd = p.cd_matrix().unwrap();
        assert_relative_eq!(cd[0][0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(cd[0][1], -2.0, epsilon = 1e-12);
        assert_relative_eq!(cd[1][0], -2.0, epsilon = 1e-12);
        assert_relative_eq!(cd[1][1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cd_matrix_from_pc() {
        let p = WcsParams {
            cdelt1: Some(2.0),
            cdelt2: Some(3.0),
            pc1_2: Some(0.5),
            ..Default::default()
        };
        assert_eq!(p.cd_matrix().unwrap(), [[2.0, 1.0], [0.0, 3.0]]);
    }

    #[test]
    fn test_cd_matrix_missing_scale() {
        let p = WcsParams::default();
        assert!(matches!(p.cd_matrix(), Err(ProjError::MissingKeyword(_))));
    }
}
