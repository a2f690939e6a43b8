use std::fmt;
use std::ops::{Index, IndexMut};

use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// Row and column counts of a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of elements, or `None` if `rows * cols` overflows.
    pub fn len(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Dense matrix stored in row-major order.
///
/// `data.len() == rows * cols` always holds, so a `3x0` matrix keeps its row
/// count even though it has no elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

/// Reserve room for exactly `rows * cols` elements without aborting on
/// exhaustion.
pub(crate) fn try_buffer<T>(rows: usize, cols: usize) -> Result<Vec<T>, MatrixError> {
    let len = Shape::new(rows, cols)
        .len()
        .ok_or(MatrixError::Allocation { rows, cols })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| MatrixError::Allocation { rows, cols })?;
    Ok(data)
}

impl<T> Matrix<T> {
    pub fn from_shape_vec<S: Into<Shape>>(shape: S, data: Vec<T>) -> Result<Self, MatrixError> {
        let Shape { rows, cols } = shape.into();
        if Shape::new(rows, cols).len() != Some(data.len()) {
            return Err(MatrixError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, MatrixError> {
        Self::from_shape_vec((rows, cols), data)
    }

    /// The 0x0 matrix.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        assert!(row < self.rows, "row index out of bounds");
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Iterate over the rows as slices; yields `nrows()` items even when
    /// `ncols() == 0`.
    pub fn rows(&self) -> Rows<'_, T> {
        Rows {
            data: &self.data,
            cols: self.cols,
            next: 0,
            rows: self.rows,
        }
    }

    /// Combine two equally shaped matrices element by element.
    pub fn zip_map<U, V, F>(&self, other: &Matrix<U>, mut f: F) -> Result<Matrix<V>, MatrixError>
    where
        F: FnMut(&T, &U) -> V,
    {
        debug_assert_eq!(self.shape(), other.shape());
        let mut data = try_buffer(self.rows, self.cols)?;
        data.extend(self.data.iter().zip(other.data.iter()).map(|(a, b)| f(a, b)));
        Ok(Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

}

impl<T> Matrix<T>
where
    T: Clone + Zero,
{
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let mut data = try_buffer(rows, cols)?;
        data.resize(rows * cols, T::zero());
        Ok(Self { data, rows, cols })
    }
}

/// Row iterator returned by [`Matrix::rows`].
pub struct Rows<'a, T> {
    data: &'a [T],
    cols: usize,
    next: usize,
    rows: usize,
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.rows {
            return None;
        }
        let start = self.next * self.cols;
        self.next += 1;
        Some(&self.data[start..start + self.cols])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rows - self.next;
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for Rows<'_, T> {}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (c, value) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
