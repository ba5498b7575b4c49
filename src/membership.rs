use num::{Float, ToPrimitive};

use crate::error::{Error, Result};

/// A piecewise-linear membership function.
///
/// Values can only be built through [`MembershipFunction::triangular`] and
/// [`MembershipFunction::trapezoidal`] (or the `TryFrom` array impls), which
/// guarantee the breakpoints are ordered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MembershipFunction<F = f64> {
    /// Rises from 0 at `a` to 1 at `b`, falls back to 0 at `c`
    Triangular { a: F, b: F, c: F },
    /// Rises from 0 at `a` to 1 at `b`, holds 1 until `c`, falls to 0 at `d`
    Trapezoidal { a: F, b: F, c: F, d: F },
}

impl<F: Float> MembershipFunction<F> {
    pub fn triangular(a: F, b: F, c: F) -> Result<Self> {
        // Negated so that NaN breakpoints are rejected too
        if !(a <= b && b <= c) {
            return Err(invalid("triangular", &[a, b, c]));
        }

        Ok(Self::Triangular { a, b, c })
    }

    pub fn trapezoidal(a: F, b: F, c: F, d: F) -> Result<Self> {
        if !(a <= b && b <= c && c <= d) {
            return Err(invalid("trapezoidal", &[a, b, c, d]));
        }

        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Degree of membership of `x`, always within [0, 1].
    ///
    /// A ramp whose two bounding breakpoints coincide is a vertical step: it
    /// has no interpolated region and the peak (or plateau) takes over at that
    /// point.
    pub fn eval(&self, x: F) -> F {
        let degree = match *self {
            Self::Triangular { a, b, c } => {
                if x == b {
                    F::one()
                } else if a < b && a <= x && x < b {
                    (x - a) / (b - a)
                } else if b < c && b < x && x <= c {
                    (c - x) / (c - b)
                } else {
                    F::zero()
                }
            },
            Self::Trapezoidal { a, b, c, d } => {
                if b <= x && x <= c {
                    F::one()
                } else if a < b && a <= x && x < b {
                    (x - a) / (b - a)
                } else if c < d && c < x && x <= d {
                    (d - x) / (d - c)
                } else {
                    F::zero()
                }
            },
        };

        degree.max(F::zero()).min(F::one())
    }

    /// Evaluates every sample point, preserving order and length
    pub fn eval_all(&self, xs: impl IntoIterator<Item = F>) -> Vec<F> {
        xs.into_iter().map(|x| self.eval(x)).collect()
    }

    /// The closed interval outside of which the degree is exactly zero
    pub fn support(&self) -> (F, F) {
        match *self {
            Self::Triangular { a, c, .. } => (a, c),
            Self::Trapezoidal { a, d, .. } => (a, d),
        }
    }

    /// The closed interval on which the degree is exactly one
    pub fn core(&self) -> (F, F) {
        match *self {
            Self::Triangular { b, .. } => (b, b),
            Self::Trapezoidal { b, c, .. } => (b, c),
        }
    }

    pub fn breakpoints(&self) -> Vec<F> {
        match *self {
            Self::Triangular { a, b, c } => vec![a, b, c],
            Self::Trapezoidal { a, b, c, d } => vec![a, b, c, d],
        }
    }
}

impl<F: Float> TryFrom<[F; 3]> for MembershipFunction<F> {
    type Error = Error;

    fn try_from([a, b, c]: [F; 3]) -> Result<Self> {
        Self::triangular(a, b, c)
    }
}

impl<F: Float> TryFrom<[F; 4]> for MembershipFunction<F> {
    type Error = Error;

    fn try_from([a, b, c, d]: [F; 4]) -> Result<Self> {
        Self::trapezoidal(a, b, c, d)
    }
}

/// Triangular membership of every sample, after validating `params`
pub fn trimf<F: Float>(xs: &[F], params: [F; 3]) -> Result<Vec<F>> {
    let mf = MembershipFunction::try_from(params)?;

    Ok(mf.eval_all(xs.iter().copied()))
}

/// Trapezoidal membership of every sample, after validating `params`
pub fn trapmf<F: Float>(xs: &[F], params: [F; 4]) -> Result<Vec<F>> {
    let mf = MembershipFunction::try_from(params)?;

    Ok(mf.eval_all(xs.iter().copied()))
}

fn invalid<F: ToPrimitive + Copy>(shape: &'static str, params: &[F]) -> Error {
    Error::InvalidParameters {
        shape,
        params: params.iter().map(|p| p.to_f64().unwrap_or(f64::NAN)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(a: f64, b: f64, c: f64) -> MembershipFunction {
        MembershipFunction::triangular(a, b, c).unwrap()
    }

    fn trap(a: f64, b: f64, c: f64, d: f64) -> MembershipFunction {
        MembershipFunction::trapezoidal(a, b, c, d).unwrap()
    }

    #[test]
    fn test_triangular_degenerate_left() {
        let mf = tri(0., 0., 5.);

        assert_eq!(mf.eval(0.), 1.);
        assert_eq!(mf.eval(5.), 0.);
        assert_eq!(mf.eval(2.5), 0.5);
        assert_eq!(mf.eval(-0.1), 0.);
    }

    #[test]
    fn test_triangular_degenerate_right() {
        let mf = tri(5., 10., 10.);

        assert_eq!(mf.eval(10.), 1.);
        assert_eq!(mf.eval(7.5), 0.5);
        assert_eq!(mf.eval(5.), 0.);
        assert_eq!(mf.eval(10.5), 0.);
    }

    #[test]
    fn test_triangular_single_point() {
        let mf = tri(3., 3., 3.);

        assert_eq!(mf.eval(3.), 1.);
        assert_eq!(mf.eval(2.999), 0.);
        assert_eq!(mf.eval(3.001), 0.);
    }

    #[test]
    fn test_trapezoidal() {
        let mf = trap(0., 0., 20., 40.);

        assert_eq!(mf.eval(0.), 1.);
        assert_eq!(mf.eval(10.), 1.);
        assert_eq!(mf.eval(30.), 0.5);
        assert_eq!(mf.eval(40.), 0.);

        let mf = trap(20., 40., 60., 80.);

        assert_eq!(mf.eval(30.), 0.5);
        assert_eq!(mf.eval(50.), 1.);
        assert_eq!(mf.eval(70.), 0.5);
        assert_eq!(mf.eval(40.), 1.);
        assert_eq!(mf.eval(60.), 1.);
        assert_eq!(mf.eval(19.), 0.);
        assert_eq!(mf.eval(81.), 0.);
    }

    #[test]
    fn test_trapezoidal_right_shoulder() {
        let mf = trap(120., 160., 200., 200.);

        assert_eq!(mf.eval(200.), 1.);
        assert_eq!(mf.eval(140.), 0.5);
        assert_eq!(mf.eval(200.5), 0.);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            MembershipFunction::triangular(5., 0., 10.),
            Err(Error::InvalidParameters { shape: "triangular", .. })
        ));
        assert!(matches!(
            MembershipFunction::trapezoidal(0., 10., 5., 20.),
            Err(Error::InvalidParameters { shape: "trapezoidal", .. })
        ));
        assert!(MembershipFunction::triangular(0., f64::NAN, 1.).is_err());
        assert!(trimf(&[0., 1.], [2., 1., 0.]).is_err());
        assert!(trapmf(&[0., 1.], [0., 1., 2., 1.]).is_err());
    }

    #[test]
    fn test_nan_sample_is_zero() {
        assert_eq!(tri(0., 1., 2.).eval(f64::NAN), 0.);
        assert_eq!(trap(0., 1., 2., 3.).eval(f64::NAN), 0.);
    }

    #[test]
    fn test_eval_all_preserves_length() {
        let xs: Vec<f64> = (0..=100).map(f64::from).collect();
        let ys = trimf(&xs, [25., 50., 75.]).unwrap();

        assert_eq!(ys.len(), xs.len());
        assert_eq!(ys[50], 1.);
        assert_eq!(ys[25], 0.);
        assert_eq!(ys[30], 0.2);

        let ys = trapmf(&xs, [15., 35., 65., 85.]).unwrap();

        assert_eq!(ys.len(), xs.len());
        assert_eq!(ys[25], 0.5);
        assert_eq!(ys[50], 1.);
        assert_eq!(ys[75], 0.5);
    }

    #[test]
    fn test_shape_properties() {
        let shapes = [
            tri(0., 0., 25.),
            tri(0., 25., 50.),
            tri(75., 100., 100.),
            tri(10., 10., 10.),
            trap(0., 0., 20., 40.),
            trap(20., 40., 60., 80.),
            trap(60., 80., 120., 140.),
            trap(120., 160., 200., 200.),
        ];
        let xs: Vec<f64> = (-40..=480).map(|i| f64::from(i) * 0.5).collect();

        for mf in shapes {
            let (lo, hi) = mf.support();
            let (peak_lo, peak_hi) = mf.core();
            let ys = mf.eval_all(xs.iter().copied());

            for (&x, &y) in xs.iter().zip(&ys) {
                assert!((0. ..=1.).contains(&y), "{mf:?} at {x} gave {y}");

                if x < lo || x > hi {
                    assert_eq!(y, 0., "{mf:?} at {x}");
                }
                if peak_lo <= x && x <= peak_hi {
                    assert_eq!(y, 1., "{mf:?} at {x}");
                }
            }

            assert_eq!(mf.eval(peak_lo), 1.);
            assert_eq!(mf.eval(peak_hi), 1.);

            // Non-decreasing up to the core, non-increasing after it
            for (pair, window) in xs.windows(2).zip(ys.windows(2)) {
                if pair[1] <= peak_lo {
                    assert!(window[0] <= window[1], "{mf:?} rising at {:?}", pair);
                }
                if pair[0] >= peak_hi {
                    assert!(window[0] >= window[1], "{mf:?} falling at {:?}", pair);
                }
            }
        }
    }

    #[test]
    fn test_f32() {
        let mf = MembershipFunction::<f32>::triangular(0., 0.5, 1.).unwrap();

        assert_eq!(mf.eval(0.5), 1.);
        assert_eq!(mf.eval(0.25), 0.5);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(
            MembershipFunction::<f64>::try_from([1., 2., 3.]).unwrap(),
            MembershipFunction::Triangular { a: 1., b: 2., c: 3. }
        );
        assert_eq!(
            MembershipFunction::<f64>::try_from([1., 2., 3., 4.]).unwrap().breakpoints(),
            vec![1., 2., 3., 4.]
        );
    }
}
