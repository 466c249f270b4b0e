use super::{basis_functions, coefficient_count, find_span, second_difference_penalty};
use crate::errors::FoilError;
use itertools::izip;
use ncollide2d::na::{DMatrix, DVector};

/// A tensor-product B-spline surface z(x, y) fitted by penalized least squares to scattered or
/// quasi-gridded data.
#[derive(Debug, Clone)]
pub struct Spline2D {
    knots_x: Vec<f64>,
    knots_y: Vec<f64>,
    degree_x: usize,
    degree_y: usize,
    /// Coefficient (i, j) is stored at `i * ny + j`
    coefs: Vec<f64>,
}

impl Spline2D {
    /// Fits a surface through the points (xs[i], ys[i], zs[i]).
    ///
    /// The knots in each direction are placed on evenly spaced quantiles of the distinct
    /// coordinates. The system is always lightly regularized so that knot spans without data do
    /// not make it singular; `smoothing` adds on top of that a second-difference penalty in both
    /// directions.
    pub fn fit(
        xs: &[f64],
        ys: &[f64],
        zs: &[f64],
        degree_x: usize,
        degree_y: usize,
        smoothing: f64,
    ) -> Result<Self, FoilError> {
        if xs.len() != ys.len() || xs.len() != zs.len() {
            return Err(FoilError::degenerate("surface data arrays differ in length"));
        }
        if degree_x == 0 || degree_y == 0 {
            return Err(FoilError::degenerate("surface degrees must be at least 1"));
        }
        if !(smoothing >= 0.0 && smoothing.is_finite()) {
            return Err(FoilError::degenerate(format!(
                "smoothing factor must be finite and non-negative, got {}",
                smoothing
            )));
        }
        if izip!(xs, ys, zs).any(|(x, y, z)| !(x.is_finite() && y.is_finite() && z.is_finite())) {
            return Err(FoilError::degenerate("surface data contains non-finite values"));
        }

        let count = xs.len();
        let knots_x = quantile_knots(xs, degree_x, count)?;
        let knots_y = quantile_knots(ys, degree_y, count)?;
        let nx = coefficient_count(&knots_x, degree_x);
        let ny = coefficient_count(&knots_y, degree_y);
        let nc = nx * ny;

        let mut normal = DMatrix::<f64>::zeros(nc, nc);
        let mut rhs = DVector::<f64>::zeros(nc);
        for (&x, &y, &z) in izip!(xs, ys, zs) {
            let sx = find_span(&knots_x, degree_x, x);
            let sy = find_span(&knots_y, degree_y, y);
            let bx = basis_functions(&knots_x, sx, degree_x, x);
            let by = basis_functions(&knots_y, sy, degree_y, y);

            let mut entries = Vec::with_capacity(bx.len() * by.len());
            for (i, u) in bx.iter().enumerate() {
                for (j, v) in by.iter().enumerate() {
                    entries.push(((sx - degree_x + i) * ny + (sy - degree_y + j), u * v));
                }
            }

            for &(r, a) in entries.iter() {
                rhs[r] += a * z;
                for &(c, b) in entries.iter() {
                    normal[(r, c)] += a * b;
                }
            }
        }

        let scale = (normal.trace() / nc as f64).max(f64::EPSILON);
        let ridge = 1e-9 * scale;
        let penalty = second_difference_penalty(nx).kronecker(&DMatrix::identity(ny, ny))
            + DMatrix::identity(nx, nx).kronecker(&second_difference_penalty(ny));
        let system = normal
            + penalty * (smoothing + ridge)
            + DMatrix::identity(nc, nc) * (ridge * 1e-3);

        let coefs = system.lu().solve(&rhs).ok_or_else(|| {
            FoilError::degenerate(format!("singular surface system for {} points", count))
        })?;

        Ok(Spline2D {
            knots_x,
            knots_y,
            degree_x,
            degree_y,
            coefs: coefs.iter().cloned().collect(),
        })
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let ny = coefficient_count(&self.knots_y, self.degree_y);
        let sx = find_span(&self.knots_x, self.degree_x, x);
        let sy = find_span(&self.knots_y, self.degree_y, y);
        let bx = basis_functions(&self.knots_x, sx, self.degree_x, x);
        let by = basis_functions(&self.knots_y, sy, self.degree_y, y);

        let mut value = 0.0;
        for (i, u) in bx.iter().enumerate() {
            let row = (sx - self.degree_x + i) * ny;
            for (j, v) in by.iter().enumerate() {
                value += u * v * self.coefs[row + sy - self.degree_y + j];
            }
        }
        value
    }
}

/// Clamped knot vector for one direction of a surface fit. The number of coefficients is capped
/// by both the number of distinct coordinates and roughly the square root of the point count.
fn quantile_knots(values: &[f64], degree: usize, count: usize) -> Result<Vec<f64>, FoilError> {
    let mut distinct = values.to_vec();
    distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    distinct.dedup_by(|a, b| (*a - *b).abs() <= 1e-12);

    if distinct.len() < degree + 1 {
        return Err(FoilError::degenerate(format!(
            "degree {} surface needs {} distinct coordinates, got {}",
            degree,
            degree + 1,
            distinct.len()
        )));
    }

    let cap = (count as f64).sqrt().ceil() as usize + degree;
    let coefs = distinct.len().min(cap).max(degree + 1);
    let interior = coefs - degree - 1;
    let last = distinct.len() - 1;
    let (lo, hi) = (distinct[0], distinct[last]);

    let mut knots = vec![lo; degree + 1];
    for j in 1..=interior {
        let index = (j as f64 * last as f64 / (interior + 1) as f64).round() as usize;
        let k = distinct[index];
        if k > *knots.last().unwrap_or(&lo) && k < hi {
            knots.push(k);
        }
    }
    knots.extend(std::iter::repeat(hi).take(degree + 1));
    Ok(knots)
}
