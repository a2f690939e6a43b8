//! Reading and writing matrix files.
pub mod matrix_file;

pub use matrix_file::{read_matrix, read_matrix_as, write_matrix, write_matrix_to};
