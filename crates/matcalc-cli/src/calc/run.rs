use std::io;

use anyhow::{Context, Result};

use matcalc::boundary::{encode, ExternalMatrix};
use matcalc::calculator;
use matcalc::config::{DisplayConfig, OutputFormat};
use matcalc::format::parse_dimensions;
use matcalc::io::{read_matrix, write_matrix, write_matrix_to};
use matcalc::math::Matrix;

use crate::calc::input::CalculateConfig;

/// Read both operands, run the configured operation and emit the result.
pub fn run_calculation(config: &CalculateConfig) -> Result<ExternalMatrix> {
    let a = read_matrix(&config.matrix_a)
        .with_context(|| format!("Failed to load matrix A from {}", config.matrix_a))?;
    let b = read_matrix(&config.matrix_b)
        .with_context(|| format!("Failed to load matrix B from {}", config.matrix_b))?;

    log::info!(
        "[matcalc] {} {} {} ({} {} {})",
        config.matrix_a,
        config.operation.symbol(),
        config.matrix_b,
        a.declared_shape(),
        config.operation.symbol(),
        b.declared_shape()
    );

    let result = calculator::calculate(config.operation, &a, &b)?;
    emit(
        &result,
        config.output_file.as_deref(),
        config.resolved_format(),
        &config.display(),
    )?;

    log::info!(
        "[matcalc] Completed {} with a {} result",
        config.operation,
        result.declared_shape()
    );
    Ok(result)
}

/// Write an all-zero matrix of `dimensions` (e.g. `"3x4"`).
pub fn write_template(
    dimensions: &str,
    output_file: Option<&str>,
    format: Option<OutputFormat>,
) -> Result<ExternalMatrix> {
    let shape = parse_dimensions(dimensions)?;
    let template = encode(&Matrix::<f64>::zeros(shape.rows, shape.cols)?)?;

    let format = format.unwrap_or_else(|| match output_file {
        Some(path) => OutputFormat::from_path(path).unwrap_or(OutputFormat::Json),
        None => OutputFormat::Csv,
    });
    emit(&template, output_file, format, &DisplayConfig::default())?;
    log::info!("[matcalc] Wrote {} template", shape);
    Ok(template)
}

fn emit(
    matrix: &ExternalMatrix,
    output_file: Option<&str>,
    format: OutputFormat,
    display: &DisplayConfig,
) -> Result<()> {
    match output_file {
        Some(path) => write_matrix(path, matrix, format, display),
        None => write_matrix_to(io::stdout().lock(), matrix, format, display),
    }
}
