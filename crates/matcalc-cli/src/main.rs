use anyhow::Result;
use clap::ArgMatches;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use matcalc::config::OutputFormat;
use matcalc::Operation;
use matcalc_cli::calc::input::CalculateConfig;
use matcalc_cli::calc::run;
use matcalc_cli::cli::build_cli;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATCALC_LOG", "error,matcalc=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", sub_m)) => handle_run(sub_m),
        Some(("template", sub_m)) => handle_template(sub_m),
        Some((name, sub_m)) => {
            let operation = Operation::from_str(name).map_err(anyhow::Error::msg)?;
            handle_operation(operation, sub_m)
        }
        None => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let config_path: &PathBuf = matches.get_one("config").unwrap();
    log::info!("[matcalc] Calculating from config: {:?}", config_path);

    let params = CalculateConfig::from_arguments(config_path, matches)?;
    execute(&params)
}

fn handle_operation(operation: Operation, matches: &ArgMatches) -> Result<()> {
    let params = CalculateConfig::from_operation(operation, matches)?;
    execute(&params)
}

fn execute(params: &CalculateConfig) -> Result<()> {
    match run::run_calculation(params) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Calculation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_template(matches: &ArgMatches) -> Result<()> {
    let dimensions: &String = matches.get_one("dimensions").unwrap();
    let output_file = matches.get_one::<String>("output_file").map(String::as_str);
    let format = matches
        .get_one::<String>("format")
        .map(|f| OutputFormat::from_str(f))
        .transpose()
        .map_err(anyhow::Error::msg)?;

    match run::write_template(dimensions, output_file, format) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Template failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
