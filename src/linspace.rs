use num::Float;

/// Evenly spaced samples over a closed interval, like `numpy.linspace`
pub struct Linspace<F = f64> {
    start: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub fn new(min: F, max: F, n: usize) -> Self {
        let step = match F::from(n.saturating_sub(1)) {
            Some(num_steps) if n > 1 => (max - min) / num_steps,
            _ => F::zero(),
        };

        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }

    /// Samples `min..=max` every `step`. The last sample lands on `max` only
    /// when the interval is a whole multiple of `step`; otherwise the samples
    /// are respaced evenly over the full interval.
    ///
    /// Returns `None` when the sample count does not fit in a `usize`.
    pub fn with_step(min: F, max: F, step: F) -> Option<Self> {
        let num = Self::step_count(min, max, step)?;

        Some(Self::new(min, max, num))
    }

    /// Number of samples [`Linspace::with_step`] produces
    pub fn step_count(min: F, max: F, step: F) -> Option<usize> {
        // floor is closest approx to what python does for int() conversion. But at least one edgecase exists
        // where the decimals are really long: int(4.999999999999999999) == 5
        ((max - min) / step).floor().to_usize()?.checked_add(1)
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            None
        } else {
            // Calculate the value just like numpy.linspace does
            let i = F::from(self.index)?;
            self.index += 1;
            Some(self.start + self.step * i)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let xs: Vec<f64> = Linspace::new(0., 1., 5).collect();

    assert_eq!(xs, vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(2., 3., 1).collect::<Vec<f64>>(), vec![2.]);
    assert_eq!(Linspace::<f64>::new(2., 3., 0).count(), 0);
}

#[test]
fn test_linspace_with_step() {
    let xs: Vec<f64> = Linspace::with_step(0., 10., 1.).unwrap().collect();

    assert_eq!(xs.len(), 11);
    assert_eq!(xs[0], 0.);
    assert_eq!(xs[10], 10.);
    assert_eq!(Linspace::with_step(0., 60., 1.).unwrap().len(), 61);
    assert_eq!(Linspace::with_step(0., 100., 0.5).unwrap().len(), 201);
}

#[test]
fn test_step_count_out_of_range() {
    assert_eq!(Linspace::step_count(0., 10., 1e-300), None);
    assert_eq!(Linspace::step_count(0., 10., f64::NAN), None);
    assert!(Linspace::with_step(0., 10., 1e-300).is_none());
    assert_eq!(Linspace::step_count(0., 10., 0.25), Some(41));
}
