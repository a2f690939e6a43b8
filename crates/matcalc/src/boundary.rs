//! Conversion between the caller-facing array-of-rows form and [`Matrix`].
//!
//! Both directions copy every element: a decoded matrix holds no reference
//! into the caller's rows, and an encoded result shares no storage with the
//! matrix it came from.
use serde::{Deserialize, Serialize};

use crate::error::MatrixError;
use crate::math::matrix::try_buffer;
use crate::math::{Matrix, Shape};

/// Matrix as exchanged with callers: a sequence of equally long rows.
///
/// There is no explicit shape field; it is inferred from the row lengths.
/// Zero rows is a valid empty matrix.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalMatrix(Vec<Vec<f64>>);

impl ExternalMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self(rows)
    }

    pub fn nrows(&self) -> usize {
        self.0.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.0
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.0
    }

    /// Shape implied by the first row, without checking the others.
    pub fn declared_shape(&self) -> Shape {
        Shape::new(self.0.len(), self.0.first().map_or(0, Vec::len))
    }
}

impl From<Vec<Vec<f64>>> for ExternalMatrix {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self(rows)
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for ExternalMatrix {
    fn from(rows: [[f64; C]; R]) -> Self {
        Self(rows.iter().map(|row| row.to_vec()).collect())
    }
}

/// Nullable wire form of an [`ExternalMatrix`].
///
/// Loosely typed callers (e.g. JSON) may send `null` for the whole matrix or
/// for individual rows; such input is rejected with
/// [`MatrixError::NullInput`] when converted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireMatrix(pub Option<Vec<Option<Vec<f64>>>>);

impl TryFrom<WireMatrix> for ExternalMatrix {
    type Error = MatrixError;

    fn try_from(wire: WireMatrix) -> Result<Self, Self::Error> {
        let rows = wire.0.ok_or(MatrixError::NullInput { row: None })?;
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| row.ok_or(MatrixError::NullInput { row: Some(i) }))
            .collect::<Result<Vec<_>, _>>()
            .map(ExternalMatrix)
    }
}

impl From<ExternalMatrix> for WireMatrix {
    fn from(external: ExternalMatrix) -> Self {
        WireMatrix(Some(external.0.into_iter().map(Some).collect()))
    }
}

/// Check that every row has the same length as the first one.
pub fn validate(external: &ExternalMatrix) -> Result<Shape, MatrixError> {
    let shape = external.declared_shape();
    for (row, values) in external.rows().iter().enumerate().skip(1) {
        if values.len() != shape.cols {
            return Err(MatrixError::Shape {
                row,
                expected: shape.cols,
                found: values.len(),
            });
        }
    }
    Ok(shape)
}

/// Copy an [`ExternalMatrix`] into a freshly allocated row-major [`Matrix`].
///
/// All rows are validated before the buffer is reserved.
pub fn decode(external: &ExternalMatrix) -> Result<Matrix<f64>, MatrixError> {
    let shape = validate(external)?;
    if shape.rows == 0 {
        return Ok(Matrix::empty());
    }

    let mut data = try_buffer(shape.rows, shape.cols)?;
    for row in external.rows() {
        data.extend_from_slice(row);
    }
    log::trace!("decoded {} matrix", shape);

    Matrix::from_shape_vec(shape, data)
}

/// Copy a [`Matrix`] out into a freshly allocated [`ExternalMatrix`].
pub fn encode(matrix: &Matrix<f64>) -> Result<ExternalMatrix, MatrixError> {
    let shape = matrix.shape();
    let alloc_err = || MatrixError::Allocation {
        rows: shape.rows,
        cols: shape.cols,
    };

    let mut rows: Vec<Vec<f64>> = Vec::new();
    rows.try_reserve_exact(shape.rows).map_err(|_| alloc_err())?;
    for values in matrix.rows() {
        let mut row = Vec::new();
        row.try_reserve_exact(shape.cols).map_err(|_| alloc_err())?;
        row.extend_from_slice(values);
        rows.push(row);
    }
    log::trace!("encoded {} matrix", shape);

    Ok(ExternalMatrix(rows))
}
