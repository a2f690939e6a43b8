//! Dense matrix container used internally by every operation.
//!
//! `Matrix<T>` owns a contiguous row-major buffer whose length always equals
//! `rows * cols`; `Shape` is the `(rows, cols)` pair used in error reports.
pub mod matrix;

pub use matrix::{Matrix, Rows, Shape};
