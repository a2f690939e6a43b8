//! Command line front end for `matcalc`.
//!
//! Matrices are read from JSON, CSV or TSV files, combined with one of the
//! library's operations, and written back out or printed as a grid.
pub mod calc;
pub mod cli;
