use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use matcalc::config::{DisplayConfig, OutputFormat};
use matcalc::Operation;

use crate::calc::util::validate_matrix_file;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalculateConfig {
    pub version: String,
    pub operation: Operation,
    pub matrix_a: String,
    pub matrix_b: String,
    pub output_file: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub precision: usize,
}

impl Default for CalculateConfig {
    fn default() -> Self {
        CalculateConfig {
            version: clap::crate_version!().to_string(),
            operation: Operation::Add,
            matrix_a: String::new(),
            matrix_b: String::new(),
            output_file: None,
            output_format: None,
            precision: DisplayConfig::default().precision,
        }
    }
}

impl CalculateConfig {
    /// Load a configuration file, then apply the `run` subcommand overrides.
    pub fn from_arguments(config_path: &PathBuf, matches: &ArgMatches) -> Result<Self> {
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let partial: serde_json::Value = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        let mut config = CalculateConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Config Invalid value for '{}', using default: {:?}",
                            stringify!($field), config.$field
                        );
                    }
                } else {
                    log::warn!(
                        "Config Missing field '{}', using default: {:?}",
                        stringify!($field), config.$field
                    );
                }
            };
        }

        load_or_default!(operation);
        load_or_default!(matrix_a);
        load_or_default!(matrix_b);
        load_or_default!(output_file);
        load_or_default!(output_format);
        load_or_default!(precision);

        if let Some(operation) = matches.get_one::<String>("operation") {
            config.operation = Operation::from_str(operation).map_err(anyhow::Error::msg)?;
        }
        if let Some(matrix_a) = matches.get_one::<String>("matrix_a") {
            config.matrix_a = matrix_a.clone();
        }
        if let Some(matrix_b) = matches.get_one::<String>("matrix_b") {
            config.matrix_b = matrix_b.clone();
        }
        config.apply_output_overrides(matches)?;
        config.validate()?;

        Ok(config)
    }

    /// Build a configuration from the `add`, `subtract` or `multiply`
    /// subcommands.
    pub fn from_operation(operation: Operation, matches: &ArgMatches) -> Result<Self> {
        let mut config = CalculateConfig {
            operation,
            ..CalculateConfig::default()
        };
        if let Some(matrix_a) = matches.get_one::<String>("matrix_a") {
            config.matrix_a = matrix_a.clone();
        }
        if let Some(matrix_b) = matches.get_one::<String>("matrix_b") {
            config.matrix_b = matrix_b.clone();
        }
        config.apply_output_overrides(matches)?;
        config.validate()?;

        Ok(config)
    }

    fn apply_output_overrides(&mut self, matches: &ArgMatches) -> Result<()> {
        if let Some(output_file) = matches.get_one::<String>("output_file") {
            self.output_file = Some(output_file.clone());
        }
        if let Some(format) = matches.get_one::<String>("format") {
            self.output_format = Some(OutputFormat::from_str(format).map_err(anyhow::Error::msg)?);
        }
        if let Some(precision) = matches.get_one::<usize>("precision") {
            self.precision = *precision;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        validate_matrix_file(&self.matrix_a).context("Invalid matrix_a")?;
        validate_matrix_file(&self.matrix_b).context("Invalid matrix_b")?;
        Ok(())
    }

    /// Explicit format, else the output file's extension, else JSON for
    /// files and a text grid for stdout.
    pub fn resolved_format(&self) -> OutputFormat {
        if let Some(format) = self.output_format {
            return format;
        }
        match &self.output_file {
            Some(path) => OutputFormat::from_path(path).unwrap_or(OutputFormat::Json),
            None => OutputFormat::Text,
        }
    }

    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            precision: self.precision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_cli;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("matcalc_cli_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_from_arguments_with_overrides() {
        let a = temp_path("cfg_a.csv");
        let b = temp_path("cfg_b.json");
        let other = temp_path("cfg_other.tsv");
        fs::write(&a, "1,2\n").unwrap();
        fs::write(&b, "[[3.0],[4.0]]").unwrap();
        fs::write(&other, "1\t2\n").unwrap();

        let config_path = temp_path("config.json");
        let config_json = serde_json::json!({
            "operation": "multiply",
            "matrix_a": a.to_str().unwrap(),
            "matrix_b": b.to_str().unwrap(),
            "precision": "not a number",
        });
        fs::write(&config_path, config_json.to_string()).unwrap();

        let matches = build_cli()
            .try_get_matches_from([
                "matcalc",
                "run",
                config_path.to_str().unwrap(),
                "-a",
                other.to_str().unwrap(),
                "-o",
                "result.tsv",
            ])
            .unwrap();
        let (_, run_matches) = matches.subcommand().unwrap();
        let config = CalculateConfig::from_arguments(&config_path, run_matches).unwrap();

        assert_eq!(config.operation, Operation::Multiply);
        assert_eq!(config.matrix_a, other.to_str().unwrap());
        assert_eq!(config.matrix_b, b.to_str().unwrap());
        assert_eq!(config.precision, 2);
        assert_eq!(config.resolved_format(), OutputFormat::Tsv);

        for path in [a, b, other, config_path] {
            fs::remove_file(path).ok();
        }
    }

    #[test]
    fn test_from_arguments_rejects_missing_matrix() {
        let config_path = temp_path("config_missing.json");
        fs::write(&config_path, r#"{"operation": "add", "matrix_a": "nope.csv"}"#).unwrap();
        let matches = build_cli()
            .try_get_matches_from(["matcalc", "run", config_path.to_str().unwrap()])
            .unwrap();
        let (_, run_matches) = matches.subcommand().unwrap();
        assert!(CalculateConfig::from_arguments(&config_path, run_matches).is_err());
        fs::remove_file(config_path).ok();
    }

    #[test]
    fn test_resolved_format_defaults() {
        let mut config = CalculateConfig::default();
        assert_eq!(config.resolved_format(), OutputFormat::Text);
        config.output_file = Some("out.unknown".to_string());
        assert_eq!(config.resolved_format(), OutputFormat::Json);
        config.output_format = Some(OutputFormat::Csv);
        assert_eq!(config.resolved_format(), OutputFormat::Csv);
    }
}
