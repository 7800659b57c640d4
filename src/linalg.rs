//! Dense vector and matrix helpers used by the forward and backward passes.

use num_traits::Float;

/// Returns the dot product of `x` and `y`.
pub fn dot<T: Float>(x: &[T], y: &[T]) -> T {
    x.iter()
        .zip(y)
        .fold(T::zero(), |sum, (&a, &b)| sum + a * b)
}

/// Scales `x` by `alpha` in place.
pub fn scal<T: Float>(alpha: T, x: &mut [T]) {
    for v in x {
        *v = alpha * *v;
    }
}

/// Computes `y += alpha * x` in place.
pub fn axpy<T: Float>(alpha: T, x: &[T], y: &mut [T]) {
    for (v, &a) in y.iter_mut().zip(x) {
        *v = alpha * a + *v;
    }
}

/// A row-major matrix stored in a single buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Float> Matrix<T> {
    /// Returns a `rows` by `cols` matrix filled with `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Returns a `rows` by `cols` matrix of zeroes.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }

    /// Returns a matrix whose entries are produced by `f(row, col)`, filled in row-major order.
    pub fn from_fn<F: FnMut(usize, usize) -> T>(rows: usize, cols: usize, mut f: F) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }

        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Returns the entries in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_dot() {
        assert_approx_eq!(32.0, dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]));
        assert_eq!(0.0, dot::<f64>(&[], &[]));
    }

    #[test]
    fn test_scal_axpy() {
        let mut x = [1.0, -2.0, 0.5];
        scal(2.0, &mut x);
        assert_eq!([2.0, -4.0, 1.0], x);

        let mut y = [1.0, 1.0, 1.0];
        axpy(0.5, &x, &mut y);
        assert_eq!([2.0, -1.0, 1.5], y);
    }

    #[test]
    fn test_matrix() {
        let mut m = Matrix::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
        assert_eq!((2, 3), m.shape());
        assert_eq!(2, m.rows());
        assert_eq!(&[3.0, 4.0, 5.0], m.row(1));

        m.row_mut(0)[2] = 10.0;
        assert_eq!(&[0.0, 1.0, 10.0, 3.0, 4.0, 5.0], m.as_slice());

        assert_eq!(Matrix::filled(1, 2, 0.0), Matrix::zeros(1, 2));
    }
}
