//! Text helpers for hosts that collect matrices from typed input and show
//! results to a person.
use anyhow::{anyhow, bail, Result};

use crate::boundary::ExternalMatrix;
use crate::math::Shape;

/// Parse a dimension string such as `"3x4"`, `"3 X 4"` or `"3*4"`.
///
/// Both parts must be positive integers.
pub fn parse_dimensions(input: &str) -> Result<Shape> {
    let parts: Vec<&str> = input.trim().split(['x', 'X', '*']).collect();
    if parts.len() != 2 {
        bail!(
            "Invalid dimensions format '{}'. Use 'rows x cols' (e.g., 3x4).",
            input
        );
    }

    let rows: usize = parts[0]
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid row count '{}' in '{}'", parts[0].trim(), input))?;
    let cols: usize = parts[1]
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid column count '{}' in '{}'", parts[1].trim(), input))?;

    if rows == 0 || cols == 0 {
        bail!("Dimensions must be positive, got {}x{}", rows, cols);
    }
    Ok(Shape::new(rows, cols))
}

/// Parse a single matrix cell.
pub fn parse_cell(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("Invalid number: empty cell");
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| anyhow!("Invalid number: {}", trimmed))
}

/// Parse a grid of text cells into an [`ExternalMatrix`], reporting the
/// position of the first bad cell.
pub fn parse_grid<S: AsRef<str>>(cells: &[Vec<S>]) -> Result<ExternalMatrix> {
    let mut rows = Vec::with_capacity(cells.len());
    for (r, row) in cells.iter().enumerate() {
        let mut values = Vec::with_capacity(row.len());
        for (c, cell) in row.iter().enumerate() {
            let value = parse_cell(cell.as_ref())
                .map_err(|e| anyhow!("Cell ({}, {}): {}", r, c, e))?;
            values.push(value);
        }
        rows.push(values);
    }
    Ok(ExternalMatrix::new(rows))
}

/// Finite values use `precision` decimal places; NaN and infinities are
/// printed as-is.
pub fn format_value(value: f64, precision: usize) -> String {
    if value.is_finite() {
        format!("{:.*}", precision, value)
    } else {
        value.to_string()
    }
}

/// Render a matrix as a grid with right-aligned columns, one row per line.
pub fn format_matrix(matrix: &ExternalMatrix, precision: usize) -> String {
    if matrix.nrows() == 0 {
        return String::from("[]");
    }

    let cells: Vec<Vec<String>> = matrix
        .rows()
        .iter()
        .map(|row| row.iter().map(|&v| format_value(v, precision)).collect())
        .collect();

    let ncols = cells.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..ncols)
        .map(|c| {
            cells
                .iter()
                .filter_map(|row| row.get(c))
                .map(String::len)
                .max()
                .unwrap_or(0)
        })
        .collect();

    cells
        .iter()
        .map(|row| {
            let body = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
                .collect::<Vec<_>>()
                .join("  ");
            format!("[{}]", body)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("3x4").unwrap(), Shape::new(3, 4));
        assert_eq!(parse_dimensions(" 2 X 5 ").unwrap(), Shape::new(2, 5));
        assert_eq!(parse_dimensions("1*1").unwrap(), Shape::new(1, 1));

        assert!(parse_dimensions("3").is_err());
        assert!(parse_dimensions("3x4x5").is_err());
        assert!(parse_dimensions("ax4").is_err());
        assert!(parse_dimensions("0x4").is_err());
        assert!(parse_dimensions("-1x4").is_err());
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell(" -1.5 ").unwrap(), -1.5);
        assert_eq!(parse_cell("1e3").unwrap(), 1000.0);
        assert!(parse_cell("").is_err());
        assert!(parse_cell("-").is_err());
        let err = parse_cell("abc").unwrap_err();
        assert_eq!(err.to_string(), "Invalid number: abc");
    }

    #[test]
    fn test_parse_grid_reports_position() {
        let grid = vec![vec!["1", "2"], vec!["3", "x"]];
        let err = parse_grid(&grid).unwrap_err();
        assert!(err.to_string().starts_with("Cell (1, 1)"));

        let grid = vec![vec!["1", "2"], vec!["3", "4"]];
        assert_eq!(
            parse_grid(&grid).unwrap(),
            ExternalMatrix::from([[1.0, 2.0], [3.0, 4.0]])
        );
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1.0 / 3.0, 2), "0.33");
        assert_eq!(format_value(12.0, 0), "12");
        assert_eq!(format_value(f64::NAN, 2), "NaN");
        assert_eq!(format_value(f64::NEG_INFINITY, 2), "-inf");
    }

    #[test]
    fn test_format_matrix_aligns_columns() {
        let m = ExternalMatrix::from([[1.0, -20.5], [300.0, 4.0]]);
        assert_eq!(format_matrix(&m, 1), "[  1.0  -20.5]\n[300.0    4.0]");
        assert_eq!(format_matrix(&ExternalMatrix::default(), 2), "[]");
        assert_eq!(
            format_matrix(&ExternalMatrix::new(vec![vec![], vec![]]), 2),
            "[]\n[]"
        );
    }
}
