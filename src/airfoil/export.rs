use crate::airfoil::sampling::Spacing;
use crate::airfoil::{EdgeTangents, Foil};
use crate::errors::FoilError;
use ncollide2d::na::Point2;
use serde::Serialize;
use std::io::Write;

/// A foil sampled for a drafting tool: both sides ordered from the leading to the trailing edge,
/// plus the edge tangents the tool needs to close the outline smoothly.
#[derive(Debug, Clone, Serialize)]
pub struct FoilOutline {
    pub name: String,

    #[serde(serialize_with = "crate::serialize::points")]
    pub suction: Vec<Point2<f64>>,

    #[serde(serialize_with = "crate::serialize::points")]
    pub pressure: Vec<Point2<f64>>,

    pub leading_edge: EdgeTangents,
    pub trailing_edge: EdgeTangents,
}

impl FoilOutline {
    pub fn from_foil<F: Foil + ?Sized>(foil: &F, npoints: usize, spacing: Spacing) -> FoilOutline {
        FoilOutline {
            name: foil.name(),
            suction: foil.suction_side_points(npoints, true, spacing),
            pressure: foil.pressure_side_points(npoints, true, spacing),
            leading_edge: foil.leading_edge_tangent(),
            trailing_edge: foil.trailing_edge_tangent(),
        }
    }

    /// One closed loop: the pressure side from the trailing to the leading edge, then the suction
    /// side back to the trailing edge. A shared leading edge point appears only once.
    pub fn to_outer_contour(&self) -> Vec<Point2<f64>> {
        let mut result: Vec<Point2<f64>> = self.pressure.iter().rev().cloned().collect();
        let shared = match (result.last(), self.suction.first()) {
            (Some(a), Some(b)) => (a - b).norm() <= f64::EPSILON,
            _ => false,
        };
        let skip = if shared { 1 } else { 0 };
        result.extend(self.suction.iter().skip(skip).cloned());
        result
    }

    pub fn to_json(&self) -> Result<String, FoilError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// File name of an exported coordinate file, `{name}_n{npoints}_space{spacing}.txt`
pub fn flat_file_name<F: Foil + ?Sized>(foil: &F, npoints: usize, spacing: Spacing) -> String {
    format!("{}_n{}_space{}.txt", foil.name(), npoints, spacing.label())
}

/// Writes the coordinates in the plain layout read by XFoil: the name, a comment with the point
/// count, the pressure side from the trailing to the leading edge and then the suction side from
/// the leading to the trailing edge, one `x y` pair per line.
pub fn write_flat_file<F: Foil + ?Sized, W: Write>(
    foil: &F,
    npoints: usize,
    spacing: Spacing,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "{}", foil.name())?;
    writeln!(out, "# Using npoints = {}", npoints)?;

    let pressure = foil.pressure_side_points(npoints, false, spacing);
    let suction = foil.suction_side_points(npoints, true, spacing);
    for p in pressure.iter().chain(suction.iter()) {
        writeln!(out, "{:12.9} {:12.9} ", p.x, p.y)?;
    }
    Ok(())
}
