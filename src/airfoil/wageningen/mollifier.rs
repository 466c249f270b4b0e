use crate::errors::FoilError;

/// Fraction of the full value reached at the transition distance
const TRANSITION_LEVEL: f64 = 0.95;

/// The Weibull cumulative distribution `W(x) = 1 - exp(-(x/l)^k)`, used to fade the thickness in
/// from zero at the leading edge. `W` is 0 at x = 0 and increases monotonically to 1.
///
/// A small shape `k` gives a near step (the thickness jumps up just past the edge), `k` near 1 a
/// gentle ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullMollifier {
    length: f64,
    shape: f64,
}

impl WeibullMollifier {
    /// Builds the mollifier which reaches 95% at `x0`, i.e. `l = x0 / (-ln 0.05)^(1/k)`
    pub fn from_transition(x0: f64, shape: f64) -> Result<WeibullMollifier, FoilError> {
        if !(x0 > 0.0 && x0.is_finite()) {
            return Err(FoilError::invalid(format!(
                "mollifier transition distance must be positive, got {}",
                x0
            )));
        }
        if !(shape > 0.0 && shape.is_finite()) {
            return Err(FoilError::invalid(format!(
                "mollifier shape must be positive, got {}",
                shape
            )));
        }

        let length = x0 / (-(1.0 - TRANSITION_LEVEL).ln()).powf(1.0 / shape);
        Ok(WeibullMollifier { length, shape })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn value(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            1.0 - (-(x / self.length).powf(self.shape)).exp()
        }
    }

    /// dW/dx, which is unbounded at x = 0 when k < 1. Returns 0 for x <= 0.
    pub fn derivative(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let u = (x / self.length).powf(self.shape);
        self.shape / x * u * (-u).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(0.1, 0.5)]
    #[test_case(0.1, 0.8)]
    #[test_case(0.05, 1.0)]
    #[test_case(0.2, 2.0)]
    fn test_reaches_transition_level(x0: f64, k: f64) {
        let w = WeibullMollifier::from_transition(x0, k).unwrap();
        assert_relative_eq!(0.95, w.value(x0), epsilon = 1e-12);
        assert_eq!(0.0, w.value(0.0));
        assert!(w.value(1.0) > 0.95);
    }

    #[test_case(0.01)]
    #[test_case(0.1)]
    #[test_case(0.5)]
    fn test_derivative(x: f64) {
        let w = WeibullMollifier::from_transition(0.1, 0.5).unwrap();
        let h = 1e-7;
        let d = (w.value(x + h) - w.value(x - h)) / (2.0 * h);
        assert_relative_eq!(d, w.derivative(x), max_relative = 1e-5);
    }

    #[test]
    fn test_monotone() {
        let w = WeibullMollifier::from_transition(0.1, 0.5).unwrap();
        let mut last = 0.0;
        for i in 1..200 {
            let v = w.value(i as f64 / 200.0);
            assert!(v > last);
            last = v;
        }
    }

    #[test_case(0.0, 0.5)]
    #[test_case(0.1, 0.0)]
    #[test_case(-0.1, 0.5)]
    #[test_case(0.1, f64::INFINITY)]
    fn test_invalid(x0: f64, k: f64) {
        assert!(WeibullMollifier::from_transition(x0, k).is_err());
    }
}
