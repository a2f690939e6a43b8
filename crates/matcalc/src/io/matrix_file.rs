//! Matrix files: JSON arrays of rows, or headerless CSV/TSV.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::boundary::{ExternalMatrix, WireMatrix};
use crate::config::{DisplayConfig, OutputFormat};
use crate::format::{format_matrix, parse_grid};

/// Read a matrix, choosing the format from the file extension.
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<ExternalMatrix> {
    let format = OutputFormat::from_path(&path).ok_or_else(|| {
        anyhow!(
            "Cannot infer matrix format from file name (expected .json, .csv or .tsv): {}",
            path.as_ref().display()
        )
    })?;
    read_matrix_as(path, format)
}

/// Read a matrix in an explicit format.
///
/// Rows are not required to have equal length here; jagged input is
/// rejected later, when the matrix is decoded.
pub fn read_matrix_as<P: AsRef<Path>>(path: P, format: OutputFormat) -> Result<ExternalMatrix> {
    match format {
        OutputFormat::Json => read_json(&path),
        OutputFormat::Csv | OutputFormat::Tsv => {
            read_delimited(&path, format.delimiter().unwrap_or(b','))
        }
        OutputFormat::Text => bail!(
            "Text grids are output only and cannot be read: {}",
            path.as_ref().display()
        ),
    }
}

fn read_json<P: AsRef<Path>>(path: P) -> Result<ExternalMatrix> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read matrix file: {}", path.as_ref().display()))?;
    let wire: WireMatrix = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse matrix JSON: {}", path.as_ref().display()))?;
    let matrix = ExternalMatrix::try_from(wire)
        .with_context(|| format!("Invalid matrix in {}", path.as_ref().display()))?;
    Ok(matrix)
}

fn read_delimited<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<ExternalMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(&path)
        .with_context(|| format!("Failed to open matrix file: {}", path.as_ref().display()))?;

    let mut cells: Vec<Vec<String>> = Vec::new();
    for (r, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("Failed to read row {} of {}", r, path.as_ref().display())
        })?;
        // A row without columns is written as a single empty field.
        if record.len() == 1 && record[0].is_empty() {
            cells.push(Vec::new());
        } else {
            cells.push(record.iter().map(str::to_string).collect());
        }
    }
    let rows = parse_grid(&cells)
        .with_context(|| format!("Invalid matrix in {}", path.as_ref().display()))?;

    log::debug!(
        "Read {} rows from {}",
        rows.nrows(),
        path.as_ref().display()
    );
    Ok(rows)
}

/// Write a matrix to `path` in `format`.
pub fn write_matrix<P: AsRef<Path>>(
    path: P,
    matrix: &ExternalMatrix,
    format: OutputFormat,
    display: &DisplayConfig,
) -> Result<()> {
    check_representable(matrix, format)?;
    let file = File::create(&path)
        .with_context(|| format!("Failed to create output file: {}", path.as_ref().display()))?;
    let mut writer = BufWriter::new(file);
    write_matrix_to(&mut writer, matrix, format, display)
        .with_context(|| format!("Failed to write matrix to {}", path.as_ref().display()))?;
    writer.flush()?;
    Ok(())
}

/// JSON has no NaN or infinity, so such values are refused rather than
/// written as `null`. CSV, TSV and text keep them.
fn check_representable(matrix: &ExternalMatrix, format: OutputFormat) -> Result<()> {
    if format != OutputFormat::Json {
        return Ok(());
    }
    for (r, row) in matrix.rows().iter().enumerate() {
        if let Some(c) = row.iter().position(|v| !v.is_finite()) {
            bail!(
                "Cell ({}, {}) is {}, which JSON cannot represent; write CSV or TSV instead",
                r,
                c,
                row[c]
            );
        }
    }
    Ok(())
}

/// Write a matrix to any writer, e.g. stdout.
///
/// JSON, CSV and TSV keep full precision; only `Text` applies
/// `display.precision`.
pub fn write_matrix_to<W: Write>(
    mut writer: W,
    matrix: &ExternalMatrix,
    format: OutputFormat,
    display: &DisplayConfig,
) -> Result<()> {
    check_representable(matrix, format)?;
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut writer, matrix)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let mut csv_writer = csv::WriterBuilder::new()
                .delimiter(format.delimiter().unwrap_or(b','))
                .has_headers(false)
                .flexible(true)
                .from_writer(&mut writer);
            for row in matrix.rows() {
                csv_writer.write_record(row.iter().map(|v| v.to_string()))?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Text => {
            writeln!(writer, "{}", format_matrix(matrix, display.precision))?;
        }
    }
    Ok(())
}
