use crate::airfoil::{CamberThickness, EdgeTangents, Foil};
use crate::errors::FoilError;
use std::fmt::{Display, Formatter};

const A0: f64 = 0.2969;
const A1: f64 = -0.126;
const A2: f64 = -0.3516;
const A3: f64 = 0.2843;
const A4_CLOSED: f64 = -0.1036;
const A4_OPEN: f64 = -0.1015;

/// Placeholder code meaning that m, p and t are given explicitly
pub const EXPLICIT_CODE: &str = "xxxx";

/// A NACA 4-digit airfoil of the form MPTT, where M is the maximum camber P is the location of
/// the maximum camber, and TT is the maximum thickness of the airfoil as a fraction of the chord.
/// For example, a NACA 2412 airfoil has a 2% camber at 40% of the chord and a max thickness which
/// is 12% of the chord length.
///
/// The chord is normalized to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct Naca4Digit {
    m: f64,
    p: f64,
    t: f64,
    trailing_edge_closed: bool,
}

impl Naca4Digit {
    /// Create a new NACA 4 digit foil.
    ///
    /// # Arguments
    ///
    /// * `max_camber` - The max camber as a fraction, for example on a NACA 2412 this value should
    /// be set to 0.02
    ///
    /// * `max_camber_chord` - The location of the max camber as a fraction of chord length. For
    /// example on a NACA 2412 this values should be 0.4. A value of 0.0 makes the foil symmetric.
    ///
    /// * `t_max` - the maximum thickness of the airfoil as a fraction of the chord length. For
    /// instance, on a NACA 2412 t_max should be 0.12
    ///
    /// * `trailing_edge_closed` - selects the x⁴ coefficient which brings the thickness to zero
    /// at x = 1
    pub fn new(
        max_camber: f64,
        max_camber_chord: f64,
        t_max: f64,
        trailing_edge_closed: bool,
    ) -> Result<Naca4Digit, FoilError> {
        if !(0.0..1.0).contains(&max_camber) {
            return Err(FoilError::invalid(format!(
                "NACA max camber must be in [0, 1), got {}",
                max_camber
            )));
        }
        if !(0.0..1.0).contains(&max_camber_chord) {
            return Err(FoilError::invalid(format!(
                "NACA max camber location must be in [0, 1), got {}",
                max_camber_chord
            )));
        }
        if !(t_max > 0.0 && t_max <= 1.0) {
            return Err(FoilError::invalid(format!(
                "NACA max thickness must be in (0, 1], got {}",
                t_max
            )));
        }

        Ok(Naca4Digit {
            m: max_camber,
            p: max_camber_chord,
            t: t_max,
            trailing_edge_closed,
        })
    }

    /// Parses a 4-digit code such as "2412": m = 2/100, p = 4/10, t = 12/100.
    pub fn from_code(code: &str, trailing_edge_closed: bool) -> Result<Naca4Digit, FoilError> {
        let code = code.trim();
        if code.eq_ignore_ascii_case(EXPLICIT_CODE) {
            return Err(FoilError::invalid(
                "NACA code xxxx carries no parameters, give m, p and t instead",
            ));
        }
        if code.len() == 5 && code.chars().all(|c| c.is_ascii_digit()) {
            return Err(FoilError::invalid(format!(
                "NACA 5-digit codes are not supported ({})",
                code
            )));
        }

        let digits: Vec<u32> = code.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != 4 || code.len() != 4 {
            return Err(FoilError::invalid(format!(
                "'{}' is not a NACA 4-digit code",
                code
            )));
        }

        let m = digits[0] as f64 / 100.0;
        let p = digits[1] as f64 / 10.0;
        let t = (digits[2] * 10 + digits[3]) as f64 / 100.0;
        Naca4Digit::new(m, p, t, trailing_edge_closed)
    }

    /// Same as `from_code` with the code given as an integer, so 12 is the NACA 0012
    pub fn from_number(code: u32, trailing_edge_closed: bool) -> Result<Naca4Digit, FoilError> {
        Naca4Digit::from_code(&format!("{:04}", code), trailing_edge_closed)
    }

    pub fn max_camber(&self) -> f64 {
        self.m
    }

    pub fn max_camber_chord(&self) -> f64 {
        self.p
    }

    pub fn max_thickness(&self) -> f64 {
        self.t
    }

    fn is_symmetric(&self) -> bool {
        self.p < 1e-6
    }

    /// Coefficient of the camber parabola on the side of x
    fn camber_coefficient(&self, x: f64) -> f64 {
        if x <= self.p {
            self.m / self.p.powi(2)
        } else {
            self.m / (1.0 - self.p).powi(2)
        }
    }

    fn a4(&self) -> f64 {
        if self.trailing_edge_closed {
            A4_CLOSED
        } else {
            A4_OPEN
        }
    }
}

impl CamberThickness for Naca4Digit {
    fn camber(&self, x: f64) -> f64 {
        if self.is_symmetric() {
            0.0
        } else if x <= self.p {
            self.camber_coefficient(x) * (2.0 * self.p * x - x.powi(2))
        } else {
            self.camber_coefficient(x) * ((1.0 - 2.0 * self.p) + 2.0 * self.p * x - x.powi(2))
        }
    }

    fn camber_slope(&self, x: f64) -> f64 {
        if self.is_symmetric() {
            0.0
        } else {
            2.0 * self.camber_coefficient(x) * (self.p - x)
        }
    }

    fn camber_curvature(&self, x: f64) -> f64 {
        if self.is_symmetric() {
            0.0
        } else {
            let slope = self.camber_slope(x);
            -2.0 * self.camber_coefficient(x) / (1.0 + slope * slope).powf(1.5)
        }
    }

    fn thickness(&self, x: f64) -> f64 {
        (self.t / 0.2)
            * (A0 * x.sqrt() + A1 * x + A2 * x.powi(2) + A3 * x.powi(3) + self.a4() * x.powi(4))
    }

    /// Singular at x = 0
    fn thickness_slope(&self, x: f64) -> f64 {
        (self.t / 0.2)
            * (A0 / (2.0 * x.sqrt())
                + A1
                + 2.0 * A2 * x
                + 3.0 * A3 * x.powi(2)
                + 4.0 * self.a4() * x.powi(3))
    }
}

impl Foil for Naca4Digit {
    fn name(&self) -> String {
        format!("NACA4_{:.3}_{:.3}_{:.3}", self.m, self.p, self.t)
    }

    fn suction_x(&self, x: f64) -> f64 {
        self.offset_suction(x).x
    }

    fn suction_y(&self, x: f64) -> f64 {
        self.offset_suction(x).y
    }

    fn pressure_x(&self, x: f64) -> f64 {
        self.offset_pressure(x).x
    }

    fn pressure_y(&self, x: f64) -> f64 {
        self.offset_pressure(x).y
    }

    fn leading_edge_tangent(&self) -> EdgeTangents {
        self.camber_leading_tangents()
    }

    fn trailing_edge_tangent(&self) -> EdgeTangents {
        self.camber_trailing_tangents()
    }

    fn leading_edge_closed(&self) -> bool {
        true
    }

    fn trailing_edge_closed(&self) -> bool {
        self.trailing_edge_closed
    }
}

impl Display for Naca4Digit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "NACA 4 digits : {}", self.name())?;
        writeln!(f, "m={}", self.m)?;
        writeln!(f, "p={}", self.p)?;
        writeln!(f, "t={}", self.t)?;
        if self.trailing_edge_closed {
            write!(f, "Closed Trailing Edge")
        } else {
            write!(f, "Open Trailing Edge")
        }
    }
}
