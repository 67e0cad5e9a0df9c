//! `gconf` command-line interface.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use gconf_compiler::{check, compile_to_result, CompileOptions, OutputFormat, DEFAULT_INDENT};
use gconf_types::{CompileErrors, GconfError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `GCONF_LOG=debug`.
const LOG_ENV: &str = "GCONF_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "gconf",
    version,
    about = "Compile global constant declarations into an XML or JSON document"
)]
struct Cli {
    /// Source file to compile
    #[arg(short, long)]
    input: PathBuf,

    /// Output document format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Xml)]
    format: OutputFormat,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Spaces per nesting level (XML)
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    indent: usize,

    /// Only validate the source; print nothing on success
    #[arg(long)]
    check: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}", describe(.0))]
    Compile(CompileErrors),
}

fn describe(errors: &CompileErrors) -> String {
    match errors.first_error() {
        Some(e) => render(e),
        None => "compilation failed".to_string(),
    }
}

/// `file:line:col: Ecode [category] message`, plus a hint line when there is
/// one.
fn render(diagnostic: &GconfError) -> String {
    let mut text = format!("{}:{diagnostic}", diagnostic.file);
    if let Some(hint) = &diagnostic.suggestion {
        text.push_str("\n  help: ");
        text.push_str(hint);
    }
    text
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let source = fs::read_to_string(&cli.input).map_err(|source| CliError::Read {
        path: cli.input.clone(),
        source,
    })?;
    let name = cli.input.display().to_string();

    if cli.check {
        let diagnostics = check(&source, &name);
        report_warnings(&diagnostics);
        return if diagnostics.has_errors() {
            Err(CliError::Compile(diagnostics))
        } else {
            Ok(())
        };
    }

    let options = CompileOptions {
        format: cli.format,
        indent: cli.indent,
    };
    let result = compile_to_result(&source, &name, &options);
    report_warnings(&result.errors);
    let Some(document) = result.output else {
        return Err(CliError::Compile(result.errors));
    };

    match &cli.output {
        Some(path) => fs::write(path, document).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            print!("{document}");
            Ok(())
        }
    }
}

fn report_warnings(diagnostics: &CompileErrors) {
    for warning in &diagnostics.warnings {
        eprintln!("Warning: {}", render(warning));
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
