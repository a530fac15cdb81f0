//! Dense column-major matrix.
//!
//! Columns are contiguous, which is the natural layout for frame matrices:
//! column `t` holds frame `t` and can be handed to an FFT as a plain slice.

use rustfft::num_complex::Complex64;

use crate::error::{DspError, DspResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// A single-column matrix holding `column`.
    pub fn from_column(column: Vec<T>) -> Self {
        Self {
            rows: column.len(),
            cols: 1,
            data: column,
        }
    }
}

impl<T> Matrix<T> {
    /// Builds a matrix from column-major data.
    pub fn from_columns(rows: usize, cols: usize, data: Vec<T>) -> DspResult<Self> {
        if data.len() != rows * cols {
            return Err(DspError::invalid_param(
                "data",
                format!(
                    "expected {} elements for a {}x{} matrix, got {}",
                    rows * cols,
                    rows,
                    cols,
                    data.len()
                ),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(col * self.rows + row)
        } else {
            None
        }
    }

    pub fn column(&self, col: usize) -> &[T] {
        &self.data[col * self.rows..(col + 1) * self.rows]
    }

    pub fn columns(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.rows.max(1)).take(self.cols)
    }

    pub fn columns_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
        let cols = self.cols;
        self.data.chunks_exact_mut(self.rows.max(1)).take(cols)
    }

    /// Elements in column-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Applies `f` element-wise, keeping the shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl Matrix<Complex64> {
    /// Matrix-vector product `self @ x` for a real vector `x`.
    pub fn apply(&self, x: &[f64]) -> DspResult<Vec<Complex64>> {
        if x.len() != self.cols {
            return Err(DspError::invalid_param(
                "x",
                format!(
                    "length {} does not match a {}x{} matrix",
                    x.len(),
                    self.rows,
                    self.cols
                ),
            ));
        }
        let mut out = vec![Complex64::new(0.0, 0.0); self.rows];
        for (column, &xn) in self.columns().zip(x) {
            for (acc, &w) in out.iter_mut().zip(column) {
                *acc += w * xn;
            }
        }
        Ok(out)
    }
}
