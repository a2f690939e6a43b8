//! Elementwise addition/subtraction and the matrix product.
//!
//! Each operation checks operand shapes before touching any element, so a
//! mismatch never produces a partial result.
use std::fmt;
use std::str::FromStr;

use num_traits::Num;
use serde::{Deserialize, Serialize};

use crate::error::MatrixError;
use crate::math::matrix::try_buffer;
use crate::math::{Matrix, Shape};

/// Supported binary operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Multiply];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
        }
    }

    pub(crate) fn noun(&self) -> &'static str {
        match self {
            Operation::Add => "addition",
            Operation::Subtract => "subtraction",
            Operation::Multiply => "multiplication",
        }
    }

    /// Shape of `lhs <op> rhs`, or `None` if the operands are incompatible.
    pub fn result_shape(&self, lhs: Shape, rhs: Shape) -> Option<Shape> {
        match self {
            Operation::Add | Operation::Subtract if lhs == rhs => Some(lhs),
            Operation::Multiply if lhs.cols == rhs.rows => Some(Shape::new(lhs.rows, rhs.cols)),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" | "+" => Ok(Operation::Add),
            "subtract" | "sub" | "-" => Ok(Operation::Subtract),
            "multiply" | "mul" | "*" => Ok(Operation::Multiply),
            _ => Err(format!(
                "Unknown operation: {}. Expected one of add (+), subtract (-), multiply (*)",
                s
            )),
        }
    }
}

/// Validate operand shapes for `op` without looking at any data.
pub fn check_compatible(op: Operation, lhs: Shape, rhs: Shape) -> Result<Shape, MatrixError> {
    op.result_shape(lhs, rhs)
        .ok_or(MatrixError::DimensionMismatch { op, lhs, rhs })
}

pub fn add<T>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, MatrixError>
where
    T: Num + Copy,
{
    check_compatible(Operation::Add, a.shape(), b.shape())?;
    a.zip_map(b, |&x, &y| x + y)
}

pub fn subtract<T>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, MatrixError>
where
    T: Num + Copy,
{
    check_compatible(Operation::Subtract, a.shape(), b.shape())?;
    a.zip_map(b, |&x, &y| x - y)
}

/// Compute `C = A * B`.
///
/// Each `C[i][j]` is accumulated over `k` in ascending order. An inner
/// dimension of zero yields an all-zero `a.rows x b.cols` result.
pub fn multiply<T>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, MatrixError>
where
    T: Num + Copy,
{
    let shape = check_compatible(Operation::Multiply, a.shape(), b.shape())?;

    let mut c_values = try_buffer(shape.rows, shape.cols)?;
    for a_row in a.rows() {
        let start = c_values.len();
        c_values.resize(start + shape.cols, T::zero());
        let c_row = &mut c_values[start..];
        for (&a_val, b_row) in a_row.iter().zip(b.rows()) {
            for (c, &b_val) in c_row.iter_mut().zip(b_row) {
                *c = *c + a_val * b_val;
            }
        }
    }

    Matrix::from_shape_vec(shape, c_values)
}

/// Dispatch `op` on two decoded operands.
pub fn apply<T>(op: Operation, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>, MatrixError>
where
    T: Num + Copy,
{
    match op {
        Operation::Add => add(a, b),
        Operation::Subtract => subtract(a, b),
        Operation::Multiply => multiply(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: usize, cols: usize, data: Vec<f64>) -> Matrix<f64> {
        Matrix::new(rows, cols, data).unwrap()
    }

    #[test]
    fn test_add_and_subtract() {
        let a = m(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        let b = m(2, 2, vec![5.0, 6.0, 7.0, 8.0]);
        assert_eq!(add(&a, &b).unwrap().as_slice(), &[6.0, 8.0, 10.0, 12.0]);
        assert_eq!(subtract(&a, &b).unwrap().as_slice(), &[-4.0, -4.0, -4.0, -4.0]);
    }

    #[test]
    fn test_multiply_square() {
        let a = m(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        let b = m(2, 2, vec![5.0, 6.0, 7.0, 8.0]);
        let c = multiply(&a, &b).unwrap();
        assert_eq!(c.shape(), Shape::new(2, 2));
        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_multiply_rectangular() {
        // (2x3) * (3x1)
        let a = m(2, 3, vec![1.0, 0.0, 2.0, -1.0, 3.0, 1.0]);
        let b = m(3, 1, vec![3.0, 2.0, 1.0]);
        let c = multiply(&a, &b).unwrap();
        assert_eq!(c.shape(), Shape::new(2, 1));
        assert_eq!(c.as_slice(), &[5.0, 4.0]);
    }

    #[test]
    fn test_multiply_empty_inner_dimension_is_zero() {
        let a = m(2, 0, vec![]);
        let b = m(0, 3, vec![]);
        let c = multiply(&a, &b).unwrap();
        assert_eq!(c.shape(), Shape::new(2, 3));
        assert!(c.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(c.as_slice().len(), 6);
    }

    #[test]
    fn test_empty_operands_propagate() {
        let e: Matrix<f64> = Matrix::empty();
        assert_eq!(add(&e, &e).unwrap().shape(), Shape::new(0, 0));
        assert_eq!(multiply(&e, &e).unwrap().shape(), Shape::new(0, 0));

        let r0 = m(3, 0, vec![]);
        assert_eq!(subtract(&r0, &r0).unwrap().shape(), Shape::new(3, 0));
        // (0x2) * (2x4)
        let a = m(0, 2, vec![]);
        let b = m(2, 4, vec![0.0; 8]);
        assert_eq!(multiply(&a, &b).unwrap().shape(), Shape::new(0, 4));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = m(1, 2, vec![1.0, 2.0]);
        let b = m(1, 3, vec![1.0, 2.0, 3.0]);
        assert_eq!(
            add(&a, &b).unwrap_err(),
            MatrixError::DimensionMismatch {
                op: Operation::Add,
                lhs: Shape::new(1, 2),
                rhs: Shape::new(1, 3),
            }
        );
        assert!(matches!(
            subtract(&a, &b),
            Err(MatrixError::DimensionMismatch {
                op: Operation::Subtract,
                ..
            })
        ));
        assert!(matches!(
            multiply(&a, &a),
            Err(MatrixError::DimensionMismatch {
                op: Operation::Multiply,
                ..
            })
        ));
    }

    #[test]
    fn test_integer_matrices() {
        let a = Matrix::new(1, 2, vec![2i64, 3]).unwrap();
        let b = Matrix::new(2, 1, vec![4i64, 5]).unwrap();
        assert_eq!(apply(Operation::Multiply, &a, &b).unwrap().as_slice(), &[23]);
    }

    #[test]
    fn test_operation_parsing() {
        assert_eq!("add".parse::<Operation>().unwrap(), Operation::Add);
        assert_eq!(" + ".parse::<Operation>().unwrap(), Operation::Add);
        assert_eq!("SUB".parse::<Operation>().unwrap(), Operation::Subtract);
        assert_eq!("*".parse::<Operation>().unwrap(), Operation::Multiply);
        assert!("divide".parse::<Operation>().is_err());

        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
            assert_eq!(op.symbol().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_check_compatible_on_shapes_alone() {
        assert_eq!(
            check_compatible(Operation::Multiply, Shape::new(4, 3), Shape::new(3, 7)).unwrap(),
            Shape::new(4, 7)
        );
        assert!(check_compatible(Operation::Add, Shape::new(4, 3), Shape::new(3, 4)).is_err());
    }
}
