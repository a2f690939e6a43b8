use std::path::PathBuf;

use clap::{Arg, Command, ValueHint};

const FORMATS: [&str; 4] = ["json", "csv", "tsv", "text"];

fn output_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("output_file")
            .short('o')
            .long("output_file")
            .help("File the result is written to. Prints a text grid to stdout when omitted.")
            .value_parser(clap::builder::NonEmptyStringValueParser::new())
            .value_hint(ValueHint::FilePath),
    )
    .arg(
        Arg::new("format")
            .short('f')
            .long("format")
            .help("Output format. Inferred from the output file extension by default.")
            .value_parser(FORMATS),
    )
    .arg(
        Arg::new("precision")
            .short('p')
            .long("precision")
            .help("Decimal places used by the text format")
            .value_parser(clap::value_parser!(usize)),
    )
}

fn operation_command(name: &'static str, about: &'static str) -> Command {
    output_args(
        Command::new(name)
            .about(about)
            .arg(
                Arg::new("matrix_a")
                    .help("Left operand (*.json, *.csv or *.tsv)")
                    .required(true)
                    .value_parser(clap::builder::NonEmptyStringValueParser::new())
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                Arg::new("matrix_b")
                    .help("Right operand (*.json, *.csv or *.tsv)")
                    .required(true)
                    .value_parser(clap::builder::NonEmptyStringValueParser::new())
                    .value_hint(ValueHint::FilePath),
            ),
    )
}

/// Build the `matcalc` command line.
pub fn build_cli() -> Command {
    Command::new("matcalc")
        .version(clap::crate_version!())
        .author("matcalc developers")
        .about("matcalc - dense matrix addition, subtraction and multiplication")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(operation_command("add", "Add two matrices of equal shape"))
        .subcommand(operation_command(
            "subtract",
            "Subtract the second matrix from the first",
        ))
        .subcommand(operation_command(
            "multiply",
            "Multiply two matrices (A.cols must equal B.rows)",
        ))
        .subcommand(output_args(
            Command::new("run")
                .about("Run a calculation described by a JSON configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to calculation configuration file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("matrix_a")
                        .short('a')
                        .long("matrix_a")
                        .help("Left operand. Overrides the file in the configuration.")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("matrix_b")
                        .short('b')
                        .long("matrix_b")
                        .help("Right operand. Overrides the file in the configuration.")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("operation")
                        .long("operation")
                        .help("Operation to run. Overrides the operation in the configuration.")
                        .value_parser(["add", "subtract", "multiply"]),
                ),
        ))
        .subcommand(
            Command::new("template")
                .about("Write an all-zero matrix of the given dimensions, ready to be filled in")
                .arg(
                    Arg::new("dimensions")
                        .help("Dimensions as ROWSxCOLS, e.g. 3x4")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output_file")
                        .help("File the template is written to. Prints to stdout when omitted.")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Output format. Inferred from the output file extension by default.")
                        .value_parser(FORMATS),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
}
