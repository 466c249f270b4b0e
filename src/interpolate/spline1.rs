use super::{
    basis_functions, coefficient_count, find_span, interpolation_knots, second_difference_penalty,
};
use crate::algorithms::is_strictly_increasing;
use crate::errors::FoilError;
use ncollide2d::na::{DMatrix, DVector};

/// A univariate B-spline y(x) built once from a table and queried many times.
///
/// Evaluation outside the fitted domain continues the boundary polynomial. Nothing is clamped
/// here; callers that need a bounded value must clamp the argument themselves.
#[derive(Debug, Clone)]
pub struct Spline1D {
    knots: Vec<f64>,
    coefs: Vec<f64>,
    degree: usize,
}

impl Spline1D {
    /// Fits a spline of the given degree through (xs, ys).
    ///
    /// # Arguments
    ///
    /// * `xs` - strictly increasing abscissae, at least `degree + 1` of them
    ///
    /// * `ys` - ordinates, same length as `xs`
    ///
    /// * `degree` - polynomial degree of the pieces, 1 or more (the tables use 3 and 5)
    ///
    /// * `smoothing` - 0.0 interpolates every point. A positive value trades fidelity for a
    /// smaller second difference of the coefficients; the larger, the smoother.
    pub fn fit(xs: &[f64], ys: &[f64], degree: usize, smoothing: f64) -> Result<Self, FoilError> {
        check_input(xs, ys, degree)?;
        if !(smoothing >= 0.0 && smoothing.is_finite()) {
            return Err(FoilError::degenerate(format!(
                "smoothing factor must be finite and non-negative, got {}",
                smoothing
            )));
        }

        let knots = interpolation_knots(xs, degree);
        let n = xs.len();
        let mut collocation = DMatrix::<f64>::zeros(n, n);
        for (row, &x) in xs.iter().enumerate() {
            let span = find_span(&knots, degree, x);
            for (j, v) in basis_functions(&knots, span, degree, x).into_iter().enumerate() {
                collocation[(row, span - degree + j)] = v;
            }
        }
        let values = DVector::from_column_slice(ys);

        let solution = if smoothing == 0.0 {
            collocation.lu().solve(&values)
        } else {
            let bt = collocation.transpose();
            let normal = &bt * &collocation + second_difference_penalty(n) * smoothing;
            normal.lu().solve(&(bt * values))
        };

        let coefs = solution.ok_or_else(|| {
            FoilError::degenerate(format!("singular spline system for {} points", n))
        })?;

        Ok(Spline1D {
            knots,
            coefs: coefs.iter().cloned().collect(),
            degree,
        })
    }

    /// Interpolating spline, the same as `fit` with no smoothing
    pub fn interpolate(xs: &[f64], ys: &[f64], degree: usize) -> Result<Self, FoilError> {
        Self::fit(xs, ys, degree, 0.0)
    }

    /// Interpolating cubic spline with prescribed first derivatives at both ends
    pub fn interpolate_clamped(
        xs: &[f64],
        ys: &[f64],
        slopes: (f64, f64),
    ) -> Result<Self, FoilError> {
        const DEGREE: usize = 3;
        check_input(xs, ys, 1)?;

        let n = xs.len();
        let mut knots = vec![xs[0]; DEGREE + 1];
        knots.extend_from_slice(&xs[1..n - 1]);
        knots.extend(std::iter::repeat(xs[n - 1]).take(DEGREE + 1));
        let m = coefficient_count(&knots, DEGREE);

        let mut system = DMatrix::<f64>::zeros(m, m);
        let mut rhs = DVector::<f64>::zeros(m);

        // On clamped ends the slope only involves the two outermost coefficients
        let d0 = DEGREE as f64 / (knots[DEGREE + 1] - knots[1]);
        system[(0, 0)] = -d0;
        system[(0, 1)] = d0;
        rhs[0] = slopes.0;

        for (row, &x) in xs.iter().enumerate() {
            let span = find_span(&knots, DEGREE, x);
            for (j, v) in basis_functions(&knots, span, DEGREE, x).into_iter().enumerate() {
                system[(row + 1, span - DEGREE + j)] = v;
            }
            rhs[row + 1] = ys[row];
        }

        let d1 = DEGREE as f64 / (knots[m - 1 + DEGREE] - knots[m - 1]);
        system[(m - 1, m - 2)] = -d1;
        system[(m - 1, m - 1)] = d1;
        rhs[m - 1] = slopes.1;

        let coefs = system.lu().solve(&rhs).ok_or_else(|| {
            FoilError::degenerate(format!("singular clamped spline system for {} points", n))
        })?;

        Ok(Spline1D {
            knots,
            coefs: coefs.iter().cloned().collect(),
            degree: DEGREE,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The interval the spline was fitted over
    pub fn domain(&self) -> (f64, f64) {
        let n = self.coefs.len();
        (self.knots[self.degree], self.knots[n])
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let span = find_span(&self.knots, self.degree, x);
        basis_functions(&self.knots, span, self.degree, x)
            .iter()
            .enumerate()
            .map(|(j, b)| b * self.coefs[span - self.degree + j])
            .sum()
    }

    /// Value of the derivative of the given order at x. Orders above the degree are zero.
    pub fn derivative(&self, order: usize, x: f64) -> f64 {
        if order == 0 {
            return self.evaluate(x);
        }
        if order > self.degree {
            return 0.0;
        }

        let mut spline = self.differentiated();
        for _ in 1..order {
            spline = spline.differentiated();
        }
        spline.evaluate(x)
    }

    /// Definite integral from a to b
    pub fn integral(&self, a: f64, b: f64) -> f64 {
        let primitive = self.antiderivative();
        primitive.evaluate(b) - primitive.evaluate(a)
    }

    fn differentiated(&self) -> Spline1D {
        let k = self.degree;
        let t = &self.knots;
        let coefs = self
            .coefs
            .windows(2)
            .enumerate()
            .map(|(i, c)| {
                let width = t[i + k + 1] - t[i + 1];
                if width > 0.0 {
                    k as f64 * (c[1] - c[0]) / width
                } else {
                    0.0
                }
            })
            .collect();

        Spline1D {
            knots: t[1..t.len() - 1].to_vec(),
            coefs,
            degree: k - 1,
        }
    }

    fn antiderivative(&self) -> Spline1D {
        let k = self.degree;
        let t = &self.knots;

        let mut knots = Vec::with_capacity(t.len() + 2);
        knots.push(t[0]);
        knots.extend_from_slice(t);
        knots.push(t[t.len() - 1]);

        let mut coefs = Vec::with_capacity(self.coefs.len() + 1);
        let mut acc = 0.0;
        coefs.push(acc);
        for (i, c) in self.coefs.iter().enumerate() {
            acc += c * (t[i + k + 1] - t[i]) / (k + 1) as f64;
            coefs.push(acc);
        }

        Spline1D {
            knots,
            coefs,
            degree: k + 1,
        }
    }
}

fn check_input(xs: &[f64], ys: &[f64], degree: usize) -> Result<(), FoilError> {
    if degree == 0 {
        return Err(FoilError::degenerate("spline degree must be at least 1"));
    }
    if xs.len() != ys.len() {
        return Err(FoilError::degenerate(format!(
            "{} abscissae but {} ordinates",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < degree + 1 {
        return Err(FoilError::degenerate(format!(
            "degree {} needs at least {} points, got {}",
            degree,
            degree + 1,
            xs.len()
        )));
    }
    if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
        return Err(FoilError::degenerate("spline input contains non-finite values"));
    }
    if !is_strictly_increasing(xs) {
        return Err(FoilError::degenerate("abscissae are not strictly increasing"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn sample() -> (Vec<f64>, Vec<f64>) {
        let xs: Vec<f64> = (0..9).map(|i| 0.2 + 0.1 * i as f64).collect();
        let ys = xs.iter().map(|x| (3.0 * x).sin()).collect();
        (xs, ys)
    }

    #[test_case(1)]
    #[test_case(2)]
    #[test_case(3)]
    #[test_case(4)]
    #[test_case(5)]
    fn test_interpolates_data(degree: usize) {
        let (xs, ys) = sample();
        let s = Spline1D::interpolate(&xs, &ys, degree).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(*y, s.evaluate(*x), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_reproduces_polynomial_of_its_degree() {
        let xs: Vec<f64> = (0..7).map(|i| i as f64 * 0.5).collect();
        let f = |x: f64| 1.0 - 2.0 * x + 0.5 * x.powi(3);
        let ys: Vec<f64> = xs.iter().map(|x| f(*x)).collect();
        let s = Spline1D::interpolate(&xs, &ys, 3).unwrap();

        assert_relative_eq!(f(1.25), s.evaluate(1.25), epsilon = 1e-10);
        assert_relative_eq!(-2.0 + 1.5 * 1.25 * 1.25, s.derivative(1, 1.25), epsilon = 1e-9);
        assert_relative_eq!(3.0 * 1.25, s.derivative(2, 1.25), epsilon = 1e-8);
        assert_relative_eq!(3.0, s.derivative(3, 2.2), epsilon = 1e-8);
        assert_eq!(0.0, s.derivative(4, 2.2));

        // Extrapolation continues the same cubic
        assert_relative_eq!(f(3.5), s.evaluate(3.5), epsilon = 1e-8);
    }

    #[test]
    fn test_integral_of_quintic_fit() {
        let xs: Vec<f64> = (0..9).map(|i| i as f64 * 0.125).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
        let s = Spline1D::interpolate(&xs, &ys, 5).unwrap();
        assert_relative_eq!(1.0 / 3.0, s.integral(0.0, 1.0), epsilon = 1e-10);
        assert_relative_eq!((0.5f64.powi(3) - 0.25f64.powi(3)) / 3.0, s.integral(0.25, 0.5), epsilon = 1e-10);
    }

    #[test]
    fn test_clamped_end_slopes() {
        let xs = [0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
        let ys = [0.35, 0.355, 0.389, 0.443, 0.486, 0.5];
        let s = Spline1D::interpolate_clamped(&xs, &ys, (0.0, 0.0)).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(*y, s.evaluate(*x), epsilon = 1e-10);
        }
        assert_relative_eq!(0.0, s.derivative(1, 0.4), epsilon = 1e-10);
        assert_relative_eq!(0.0, s.derivative(1, 0.9), epsilon = 1e-10);
    }

    #[test]
    fn test_smoothing_flattens() {
        let xs: Vec<f64> = (0..20).map(|i| i as f64 * 0.05).collect();
        let ys: Vec<f64> = xs
            .iter()
            .enumerate()
            .map(|(i, x)| x + if i % 2 == 0 { 0.05 } else { -0.05 })
            .collect();
        let rough = Spline1D::fit(&xs, &ys, 3, 0.0).unwrap();
        let smooth = Spline1D::fit(&xs, &ys, 3, 100.0).unwrap();

        let wiggle = |s: &Spline1D| -> f64 {
            xs.iter().map(|x| (s.evaluate(*x) - x).abs()).fold(0.0, f64::max)
        };
        assert!(wiggle(&smooth) < 0.5 * wiggle(&rough));
    }

    #[test]
    fn test_domain() {
        let (xs, ys) = sample();
        let s = Spline1D::interpolate(&xs, &ys, 5).unwrap();
        let (a, b) = s.domain();
        assert_relative_eq!(0.2, a, epsilon = 1e-12);
        assert_relative_eq!(1.0, b, epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_points() {
        let r = Spline1D::interpolate(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0], 5);
        assert!(matches!(r, Err(FoilError::DegenerateInput(_))));
    }

    #[test]
    fn test_not_increasing() {
        let r = Spline1D::interpolate(&[0.0, 1.0, 1.0, 2.0], &[0.0, 1.0, 0.0, 1.0], 1);
        assert!(matches!(r, Err(FoilError::DegenerateInput(_))));
    }

    #[test]
    fn test_length_mismatch() {
        let r = Spline1D::interpolate(&[0.0, 1.0, 2.0], &[0.0, 1.0], 1);
        assert!(matches!(r, Err(FoilError::DegenerateInput(_))));
    }
}
