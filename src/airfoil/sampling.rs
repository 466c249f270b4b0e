use crate::airfoil::Foil;
use crate::algorithms::linspace;
use crate::errors::FoilError;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt::{Display, Formatter};

/// Intervals narrower than this are not split any further by the adaptive sampling
const MIN_INTERVAL: f64 = 1e-10;

/// Stations the adaptive sampling starts from
const SEED_COUNT: usize = 5;

/// How chord fractions are distributed for an evenly spaced parameter t in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    /// x = t
    #[default]
    Linear,

    /// x = 1 - cos(πt/2), dense at the leading edge
    Cosine,

    /// x = 1 - √(1 - t), spreading out toward the trailing edge
    Sqrt,
}

impl Spacing {
    pub fn chord_fraction(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Spacing::Linear => t,
            Spacing::Cosine => 1.0 - (FRAC_PI_2 * t).cos(),
            Spacing::Sqrt => 1.0 - (1.0 - t).sqrt(),
        }
    }

    /// Short name used in exported file names
    pub fn label(self) -> &'static str {
        match self {
            Spacing::Linear => "linear",
            Spacing::Cosine => "cos",
            Spacing::Sqrt => "sqrt",
        }
    }
}

impl Display for Spacing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Suction,
    Pressure,
}

impl Side {
    pub fn point<F: Foil + ?Sized>(self, foil: &F, x: f64) -> Point2<f64> {
        match self {
            Side::Suction => foil.suction_point(x),
            Side::Pressure => foil.pressure_point(x),
        }
    }
}

/// `n` chord fractions from 0.0 to 1.0 (or the reverse), both ends included exactly
pub fn chord_fractions(n: usize, leading_to_trailing: bool, spacing: Spacing) -> Vec<f64> {
    let mut fractions: Vec<f64> = linspace(0.0, 1.0, n)
        .into_iter()
        .map(|t| spacing.chord_fraction(t))
        .collect();
    if !leading_to_trailing {
        fractions.reverse();
    }
    fractions
}

pub fn side_points<F: Foil + ?Sized>(
    foil: &F,
    side: Side,
    n: usize,
    leading_to_trailing: bool,
    spacing: Spacing,
) -> Vec<Point2<f64>> {
    chord_fractions(n, leading_to_trailing, spacing)
        .into_iter()
        .map(|x| side.point(foil, x))
        .collect()
}

/// Distance from `p` to the line through `a` and `b`
pub fn deviation(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> f64 {
    let d = b - a;
    let length = d.norm();
    if length <= f64::EPSILON {
        return (p - a).norm();
    }
    let v = p - a;
    (d.x * v.y - d.y * v.x).abs() / length
}

/// Adaptively picks chord fractions for one side, from the leading to the trailing edge. An
/// interval is split at its middle until the middle point deviates from the straight line between
/// the points at the interval's ends by less than `tol` (1e-6 when not given).
pub fn adaptive_chord_fractions<F: Foil + ?Sized>(
    foil: &F,
    side: Side,
    tol: Option<f64>,
) -> Result<Vec<f64>, FoilError> {
    let tol_value = tol.unwrap_or(1e-6);
    if !(tol_value > 0.0) {
        return Err(FoilError::invalid(format!(
            "sampling tolerance must be positive, got {}",
            tol_value
        )));
    }

    let mut fractions = chord_fractions(SEED_COUNT, true, Spacing::Cosine);
    let mut points: Vec<Point2<f64>> = fractions.iter().map(|x| side.point(foil, *x)).collect();

    let mut index: usize = 0;
    while index < points.len() - 1 {
        let x0 = fractions[index];
        let x1 = fractions[index + 1];

        let x = (x0 + x1) / 2.0;
        let p = side.point(foil, x);
        if x1 - x0 <= MIN_INTERVAL || deviation(&points[index], &points[index + 1], &p) < tol_value
        {
            index += 1;
        } else {
            fractions.insert(index + 1, x);
            points.insert(index + 1, p);
        }
    }

    Ok(fractions)
}

/// The points at `adaptive_chord_fractions`
pub fn adaptive_side_points<F: Foil + ?Sized>(
    foil: &F,
    side: Side,
    tol: Option<f64>,
) -> Result<Vec<Point2<f64>>, FoilError> {
    let fractions = adaptive_chord_fractions(foil, side, tol)?;
    Ok(fractions.into_iter().map(|x| side.point(foil, x)).collect())
}
