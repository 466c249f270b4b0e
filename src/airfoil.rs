use crate::airfoil::sampling::{Side, Spacing};
use ncollide2d::na::{Point2, Unit, Vector2};
use serde::Serialize;
use std::fmt::Display;

pub mod export;
pub mod naca;
pub mod sampling;
pub mod specification;
pub mod wageningen;

pub type UnitVec2 = Unit<Vector2<f64>>;

/// A pair of unit vectors at one edge of a foil, one for each side
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeTangents {
    #[serde(serialize_with = "crate::serialize::unit_vector")]
    pub pressure: UnitVec2,

    #[serde(serialize_with = "crate::serialize::unit_vector")]
    pub suction: UnitVec2,
}

impl EdgeTangents {
    /// Normalizes both directions. Neither may be the zero vector.
    pub fn new(pressure: Vector2<f64>, suction: Vector2<f64>) -> EdgeTangents {
        EdgeTangents {
            pressure: Unit::new_normalize(pressure),
            suction: Unit::new_normalize(suction),
        }
    }

    /// Both sides share the same direction, which is the case at every leading edge
    pub fn shared(direction: Vector2<f64>) -> EdgeTangents {
        let v = Unit::new_normalize(direction);
        EdgeTangents {
            pressure: v,
            suction: v,
        }
    }

    /// Trailing edge tangents of a foil given as y(x) offsets on each side: the suction side
    /// points toward the wake, the pressure side back toward the leading edge.
    pub fn from_side_slopes(pressure_slope: f64, suction_slope: f64) -> EdgeTangents {
        EdgeTangents::new(
            -Vector2::new(1.0, pressure_slope),
            Vector2::new(1.0, suction_slope),
        )
    }

    /// The flat layout used by drafting tools: `[px, py, sx, sy]`
    pub fn to_array(&self) -> [f64; 4] {
        [
            self.pressure.x,
            self.pressure.y,
            self.suction.x,
            self.suction.y,
        ]
    }
}

/// A Foil is anything which can report the position of its suction and pressure surfaces at a
/// chord fraction x, where 0.0 is the leading edge and 1.0 the trailing edge. Queries outside of
/// [0, 1] are not meaningful.
///
/// Implementations are built once and are read-only afterwards, so a foil can be sampled from
/// several threads at once.
pub trait Foil: Display {
    /// Canonical name, also used as header and file name of exported coordinates
    fn name(&self) -> String;

    fn suction_x(&self, x: f64) -> f64;
    fn suction_y(&self, x: f64) -> f64;
    fn pressure_x(&self, x: f64) -> f64;
    fn pressure_y(&self, x: f64) -> f64;

    /// Tangents at x = 0. Both vectors are always identical.
    fn leading_edge_tangent(&self) -> EdgeTangents;

    /// Tangents at x = 1, the pressure side pointing toward the leading edge and the suction
    /// side toward the wake
    fn trailing_edge_tangent(&self) -> EdgeTangents;

    fn leading_edge_closed(&self) -> bool {
        (self.suction_point(0.0) - self.pressure_point(0.0)).norm() <= CLOSED_EDGE_TOL
    }

    fn trailing_edge_closed(&self) -> bool {
        (self.suction_point(1.0) - self.pressure_point(1.0)).norm() <= CLOSED_EDGE_TOL
    }

    fn suction_point(&self, x: f64) -> Point2<f64> {
        Point2::new(self.suction_x(x), self.suction_y(x))
    }

    fn pressure_point(&self, x: f64) -> Point2<f64> {
        Point2::new(self.pressure_x(x), self.pressure_y(x))
    }

    fn suction_side_points(
        &self,
        n: usize,
        leading_to_trailing: bool,
        spacing: Spacing,
    ) -> Vec<Point2<f64>> {
        sampling::side_points(self, Side::Suction, n, leading_to_trailing, spacing)
    }

    fn pressure_side_points(
        &self,
        n: usize,
        leading_to_trailing: bool,
        spacing: Spacing,
    ) -> Vec<Point2<f64>> {
        sampling::side_points(self, Side::Pressure, n, leading_to_trailing, spacing)
    }
}

/// Gap between the two sides below which an edge counts as closed
const CLOSED_EDGE_TOL: f64 = 1e-9;

/// A CamberThickness foil is described by a mean camber line y = yc(x) and a half thickness
/// yt(x) laid off on both sides along the normal of the camber line. The surfaces and the edge
/// tangents follow from those two functions and their derivatives.
pub trait CamberThickness {
    fn camber(&self, x: f64) -> f64;
    fn camber_slope(&self, x: f64) -> f64;
    fn camber_curvature(&self, x: f64) -> f64;

    /// Half thickness, the distance from the camber line to either surface
    fn thickness(&self, x: f64) -> f64;
    fn thickness_slope(&self, x: f64) -> f64;

    /// Distance between the two surfaces measured across the camber line
    fn full_thickness(&self, x: f64) -> f64 {
        2.0 * self.thickness(x)
    }

    /// Unit normal of the camber line, pointing toward the suction side
    fn camber_normal(&self, x: f64) -> Vector2<f64> {
        let slope = self.camber_slope(x);
        Vector2::new(-slope, 1.0) / (1.0 + slope * slope).sqrt()
    }

    fn offset_suction(&self, x: f64) -> Point2<f64> {
        Point2::new(x, self.camber(x)) + self.camber_normal(x) * self.thickness(x)
    }

    fn offset_pressure(&self, x: f64) -> Point2<f64> {
        Point2::new(x, self.camber(x)) - self.camber_normal(x) * self.thickness(x)
    }

    /// At the leading edge the thickness slope is singular, so both sides take the camber normal
    fn camber_leading_tangents(&self) -> EdgeTangents {
        EdgeTangents::shared(Vector2::new(-self.camber_slope(0.0), 1.0))
    }

    /// Tangents at x = 1 from the derivative of the offset curves, decomposed along the camber
    /// direction and its normal. The curvature of the camber line turns the normal as it moves
    /// along the chord, which shrinks the tangential part on the suction side by `1 - v` and grows
    /// it on the pressure side by `1 + v`, where `v = curvature * thickness`.
    fn camber_trailing_tangents(&self) -> EdgeTangents {
        let v = self.camber_curvature(1.0) * self.thickness(1.0);
        let slope = self.camber_slope(1.0);
        let dyt = self.thickness_slope(1.0);
        let along = Vector2::new(1.0, slope);
        let normal = self.camber_normal(1.0);

        EdgeTangents::new(
            -(along * (1.0 + v) - normal * dyt),
            along * (1.0 - v) + normal * dyt,
        )
    }
}
