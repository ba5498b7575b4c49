use num::Float;

/// Similar to numpy.interp
pub(crate) fn interp<F: Float>(x_input: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    x_input
        .into_iter()
        .map(|x| {
            let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (coords.first(), coords.last()) else {
                return F::nan();
            };

            // Base cases
            if x <= x_first {
                return y_first;
            }
            if x >= x_last {
                return y_last;
            }

            for window in coords.windows(2) {
                let (x1, y1) = window[0];
                let (x2, y2) = window[1];

                // Actual interpolation
                if x1 <= x && x <= x2 {
                    if x2 == x1 {
                        return y2;
                    }

                    return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
                }
            }

            // Only reachable for NaN samples
            F::nan()
        })
        .collect()
}

/// Row-major dense matrix
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<F = f64> {
    data: Vec<F>,
    shape: (usize, usize),
}

impl<F: Copy> Matrix<F> {
    pub fn new(data: Vec<F>, shape: (usize, usize)) -> Self {
        debug_assert_eq!(data.len(), shape.0 * shape.1);

        Self { data, shape }
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn get(&self, row: usize, col: usize) -> Option<F> {
        if row >= self.shape.0 || col >= self.shape.1 {
            return None;
        }

        self.data.get(row * self.shape.1 + col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[F]> {
        // chunks panics on zero
        self.data.chunks(self.shape.1.max(1)).take(self.shape.0)
    }

    pub fn as_slice(&self) -> &[F] {
        &self.data
    }
}

/// Similar to numpy.meshgrid with the default `xy` indexing: both matrices
/// have shape `(y.len(), x.len())`.
pub fn meshgrid<F: Copy>(x: &[F], y: &[F]) -> (Matrix<F>, Matrix<F>) {
    let shape = (y.len(), x.len());
    let xx = y.iter().flat_map(|_| x.iter().copied()).collect();
    let yy = y.iter().flat_map(|&yv| x.iter().map(move |_| yv)).collect();

    (Matrix::new(xx, shape), Matrix::new(yy, shape))
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);
}

#[test]
fn test_meshgrid() {
    let (xx, yy) = meshgrid(&[1., 2., 3.], &[10., 20.]);

    assert_eq!(xx.shape(), (2, 3));
    assert_eq!(xx.as_slice(), &[1., 2., 3., 1., 2., 3.]);
    assert_eq!(yy.as_slice(), &[10., 10., 10., 20., 20., 20.]);
    assert_eq!(yy.get(1, 2), Some(20.));
    assert_eq!(yy.get(2, 0), None);
    assert_eq!(xx.rows().count(), 2);
}
