//! Numerical leaves used to turn the tabulated foil data into smooth functions: B-spline curves
//! and surfaces (interpolating or smoothed), and a plain bilinear table lookup.
//!
//! The B-spline kernels follow the algorithms of Piegl & Tiller, "The NURBS Book", with the
//! smoothing formulated as a P-spline (Eilers & Marx 1996): a second-difference penalty on the
//! coefficients weighted by the user's smoothing factor.

use crate::algorithms::preceding_index_search;
use ncollide2d::na::DMatrix;

pub mod linear2;
pub mod spline1;
pub mod spline2;

pub use linear2::LinearInterp2D;
pub use spline1::Spline1D;
pub use spline2::Spline2D;

/// Number of coefficients carried by a knot vector of the given degree
fn coefficient_count(knots: &[f64], degree: usize) -> usize {
    knots.len() - degree - 1
}

/// Finds the knot span `i` (with `knots[i] <= x < knots[i+1]`) used to evaluate a spline at x.
/// Values outside the domain return the first or last span, which makes evaluation continue the
/// boundary polynomial.
fn find_span(knots: &[f64], degree: usize, x: f64) -> usize {
    let n = coefficient_count(knots, degree);
    let index = preceding_index_search(&knots[degree..=n], x);
    degree + index.min(n - 1 - degree)
}

/// Evaluates the `degree + 1` non-vanishing basis functions of the span. The entry `j` of the
/// result belongs to coefficient `span - degree + j`.
fn basis_functions(knots: &[f64], span: usize, degree: usize, x: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }

    n
}

/// Knot vector for interpolation through every abscissa. The ends are clamped (repeated
/// `degree + 1` times). Odd degrees put the interior knots on the data, even degrees between
/// them, which leaves exactly as many coefficients as points.
fn interpolation_knots(xs: &[f64], degree: usize) -> Vec<f64> {
    let n = xs.len();
    let mut knots = vec![xs[0]; degree + 1];
    if degree % 2 == 1 {
        let h = (degree + 1) / 2;
        knots.extend_from_slice(&xs[h..n - h]);
    } else {
        let h = degree / 2;
        knots.extend((h..n - h - 1).map(|i| 0.5 * (xs[i] + xs[i + 1])));
    }
    knots.extend(std::iter::repeat(xs[n - 1]).take(degree + 1));
    knots
}

/// Gram matrix `DᵀD` of the second-difference operator over `n` coefficients
fn second_difference_penalty(n: usize) -> DMatrix<f64> {
    let mut p = DMatrix::<f64>::zeros(n, n);
    if n < 3 {
        return p;
    }

    for row in 0..n - 2 {
        let d = [(row, 1.0), (row + 1, -2.0), (row + 2, 1.0)];
        for &(i, a) in d.iter() {
            for &(j, b) in d.iter() {
                p[(i, j)] += a * b;
            }
        }
    }
    p
}
