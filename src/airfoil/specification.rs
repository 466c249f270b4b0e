use crate::airfoil::naca::{Naca4Digit, EXPLICIT_CODE};
use crate::airfoil::wageningen::{WageningenOptions, WageningenSection};
use crate::airfoil::Foil;
use crate::errors::FoilError;
use serde::{Deserialize, Serialize};

fn closed_by_default() -> bool {
    true
}

/// Plain-data description of a foil, as read from a configuration document. Nothing is checked
/// until `build` is called.
///
/// ```json
/// {"family": "naca4", "code": "2412"}
/// {"family": "wageningen", "blade_count": 4, "expanded_area_ratio": 0.7, "radius_fraction": 0.6}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum FoilSpecification {
    Naca4 {
        /// A 4-digit code, or "xxxx" (or nothing) to use the explicit parameters below
        #[serde(default)]
        code: Option<String>,

        #[serde(default)]
        m: f64,

        #[serde(default)]
        p: f64,

        #[serde(default)]
        t: f64,

        #[serde(default = "closed_by_default")]
        trailing_edge_closed: bool,
    },

    Wageningen {
        blade_count: u32,
        expanded_area_ratio: f64,
        radius_fraction: f64,

        #[serde(default)]
        options: WageningenOptions,
    },
}

impl FoilSpecification {
    pub fn from_json(text: &str) -> Result<FoilSpecification, FoilError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, FoilError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validates the description and builds the foil, fitting any splines it needs
    pub fn build(&self) -> Result<Box<dyn Foil>, FoilError> {
        match self {
            FoilSpecification::Naca4 {
                code,
                m,
                p,
                t,
                trailing_edge_closed,
            } => {
                let foil = match code.as_deref() {
                    Some(c) if !c.trim().eq_ignore_ascii_case(EXPLICIT_CODE) => {
                        Naca4Digit::from_code(c, *trailing_edge_closed)?
                    }
                    _ => Naca4Digit::new(*m, *p, *t, *trailing_edge_closed)?,
                };
                Ok(Box::new(foil))
            }
            FoilSpecification::Wageningen {
                blade_count,
                expanded_area_ratio,
                radius_fraction,
                options,
            } => Ok(Box::new(WageningenSection::new(
                *blade_count,
                *expanded_area_ratio,
                *radius_fraction,
                options.clone(),
            )?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::wageningen::KrTable;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test]
    fn test_naca_code() {
        let spec = FoilSpecification::from_json(r#"{"family": "naca4", "code": "2412"}"#).unwrap();
        let foil = spec.build().unwrap();
        assert_eq!("NACA4_0.020_0.400_0.120", foil.name());
        assert!(foil.trailing_edge_closed());
    }

    #[test_case(r#"{"family": "naca4", "code": "xxxx", "m": 0.04, "p": 0.4, "t": 0.15}"#)]
    #[test_case(r#"{"family": "naca4", "code": "XXXX", "m": 0.04, "p": 0.4, "t": 0.15}"#)]
    #[test_case(r#"{"family": "naca4", "m": 0.04, "p": 0.4, "t": 0.15}"#)]
    fn test_naca_explicit(text: &str) {
        let foil = FoilSpecification::from_json(text).unwrap().build().unwrap();
        assert_eq!("NACA4_0.040_0.400_0.150", foil.name());
    }

    #[test]
    fn test_naca_open_trailing_edge() {
        let text = r#"{"family": "naca4", "code": "0012", "trailing_edge_closed": false}"#;
        let foil = FoilSpecification::from_json(text).unwrap().build().unwrap();
        assert!(!foil.trailing_edge_closed());
    }

    #[test]
    fn test_wageningen() {
        let text = r#"{
            "family": "wageningen",
            "blade_count": 4,
            "expanded_area_ratio": 0.7,
            "radius_fraction": 0.6,
            "options": {"kr_table": "drawing_derived", "leading_edge_thickness_ratio": 0.1}
        }"#;
        let spec = FoilSpecification::from_json(text).unwrap();
        match &spec {
            FoilSpecification::Wageningen { options, .. } => {
                assert_eq!(KrTable::DrawingDerived, options.kr_table);
                assert_relative_eq!(0.1, options.leading_edge_thickness_ratio);
                assert_eq!(0.0, options.trailing_edge_thickness_ratio);
            }
            _ => panic!("expected a Wageningen specification"),
        }

        let foil = spec.build().unwrap();
        assert_eq!("B4_70_rR=0.60", foil.name());
        assert!(!foil.leading_edge_closed());
    }

    #[test]
    fn test_round_trip_keeps_family() {
        let spec = FoilSpecification::Wageningen {
            blade_count: 3,
            expanded_area_ratio: 0.5,
            radius_fraction: 0.4,
            options: WageningenOptions::default(),
        };
        let text = spec.to_json().unwrap();
        assert!(text.contains(r#""family":"wageningen""#));
        assert_eq!(spec, FoilSpecification::from_json(&text).unwrap());
    }

    #[test_case(r#"{"family": "naca4", "code": "23012"}"#)]
    #[test_case(r#"{"family": "naca4", "m": 0.04, "p": 0.4}"#)]
    #[test_case(r#"{"family": "wageningen", "blade_count": 1, "expanded_area_ratio": 0.7, "radius_fraction": 0.6}"#)]
    #[test_case(r#"{"family": "wageningen", "blade_count": 4, "expanded_area_ratio": 0.7, "radius_fraction": 1.2}"#)]
    fn test_invalid_specification(text: &str) {
        let spec = FoilSpecification::from_json(text).unwrap();
        assert!(matches!(spec.build(), Err(FoilError::InvalidSpecification(_))));
    }

    #[test_case(r#"{"family": "joukowski"}"#)]
    #[test_case(r#"{"family": "wageningen", "blade_count": 4}"#)]
    #[test_case("not json")]
    fn test_unreadable(text: &str) {
        assert!(matches!(
            FoilSpecification::from_json(text),
            Err(FoilError::Config(_))
        ));
    }
}
