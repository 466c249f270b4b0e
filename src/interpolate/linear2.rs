use crate::algorithms::{bracket, is_strictly_increasing};
use crate::errors::FoilError;

/// Bilinear lookup in a rectangular table. Queries outside the table use the nearest boundary
/// row/column instead of extrapolating, so regions with no data cannot produce excursions.
#[derive(Debug, Clone)]
pub struct LinearInterp2D {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// One row per entry of `ys`, each with one value per entry of `xs`
    values: Vec<Vec<f64>>,
}

impl LinearInterp2D {
    pub fn new(xs: &[f64], ys: &[f64], values: Vec<Vec<f64>>) -> Result<Self, FoilError> {
        if xs.len() < 2 || ys.len() < 2 {
            return Err(FoilError::degenerate("a bilinear table needs at least 2x2 entries"));
        }
        if !is_strictly_increasing(xs) || !is_strictly_increasing(ys) {
            return Err(FoilError::degenerate("bilinear table axes must be strictly increasing"));
        }
        if values.len() != ys.len() || values.iter().any(|row| row.len() != xs.len()) {
            return Err(FoilError::degenerate(format!(
                "bilinear table values must be {}x{}",
                ys.len(),
                xs.len()
            )));
        }

        Ok(LinearInterp2D {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            values,
        })
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let bx = bracket(&self.xs, x);
        let by = bracket(&self.ys, y);

        let r0 = &self.values[by.i];
        let r1 = &self.values[by.i + 1];
        let v0 = r0[bx.i] * (1.0 - bx.f) + r0[bx.i + 1] * bx.f;
        let v1 = r1[bx.i] * (1.0 - bx.f) + r1[bx.i + 1] * bx.f;
        v0 * (1.0 - by.f) + v1 * by.f
    }

    /// Evaluates every x of a row at a single y
    pub fn row_at(&self, xs: &[f64], y: f64) -> Vec<f64> {
        xs.iter().map(|x| self.evaluate(*x, y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn sample() -> LinearInterp2D {
        LinearInterp2D::new(
            &[0.0, 1.0, 2.0],
            &[10.0, 20.0],
            vec![vec![0.0, 1.0, 2.0], vec![10.0, 11.0, 12.0]],
        )
        .unwrap()
    }

    #[test_case(0.0, 10.0, 0.0)]
    #[test_case(1.5, 10.0, 1.5)]
    #[test_case(0.5, 15.0, 5.5)]
    #[test_case(2.0, 20.0, 12.0)]
    fn test_inside(x: f64, y: f64, e: f64) {
        assert_relative_eq!(e, sample().evaluate(x, y), epsilon = 1e-12);
    }

    #[test_case(-1.0, 10.0, 0.0)]
    #[test_case(3.0, 15.0, 7.0)]
    #[test_case(1.0, 0.0, 1.0)]
    #[test_case(1.0, 50.0, 11.0)]
    fn test_outside_clamps(x: f64, y: f64, e: f64) {
        assert_relative_eq!(e, sample().evaluate(x, y), epsilon = 1e-12);
    }

    #[test]
    fn test_bad_shape() {
        let r = LinearInterp2D::new(&[0.0, 1.0], &[0.0, 1.0], vec![vec![0.0, 1.0]]);
        assert!(matches!(r, Err(FoilError::DegenerateInput(_))));
    }
}
