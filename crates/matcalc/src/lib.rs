//! matcalc: dense matrix addition, subtraction and multiplication behind a
//! validated array-of-rows boundary.
//!
//! Callers hand over matrices as nested rows ([`boundary::ExternalMatrix`]).
//! Each call decodes both operands into a contiguous [`math::Matrix`], checks
//! that their shapes suit the operation, computes, and encodes the result back
//! into nested rows. Failures come back as a typed [`error::MatrixError`];
//! nothing panics across the boundary.
//!
//! ```
//! use matcalc::boundary::ExternalMatrix;
//! use matcalc::calculator;
//!
//! let a = ExternalMatrix::from([[1.0, 2.0], [3.0, 4.0]]);
//! let b = ExternalMatrix::from([[5.0, 6.0], [7.0, 8.0]]);
//! let c = calculator::multiply(&a, &b).unwrap();
//! assert_eq!(c, ExternalMatrix::from([[19.0, 22.0], [43.0, 50.0]]));
//! ```
pub mod boundary;
pub mod calculator;
pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod math;
pub mod ops;

pub use boundary::{ExternalMatrix, WireMatrix};
pub use error::{ErrorKind, MatrixError};
pub use ops::Operation;
