mod args;
mod driver_error;

use anyhow::Context;
use args::Args;
use clap::Parser;
use cpq::{codegen, lexer, parser, Diagnostic};
use driver_error::DriverError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SIGNATURE: &str = "CPL to Quad compiler by Nof Shabtay.";
const SOURCE_EXTENSION: &str = "ou";
const OUTPUT_EXTENSION: &str = "qud";

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("cpq=debug"),
        _ => EnvFilter::new("cpq=trace"),
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn check_extension(input: &Path) -> Result<(), DriverError> {
    if input.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
        Ok(())
    } else {
        let name = input.to_string_lossy().to_string();
        Err(DriverError::BadExtension(name))
    }
}

fn report<E: Into<Diagnostic>>(errors: Vec<E>) -> Result<(), DriverError> {
    let count = errors.len();
    for err in errors {
        eprintln!("{}", err.into());
    }
    if count == 0 {
        Ok(())
    } else {
        Err(DriverError::CompilationFailed(count))
    }
}

fn lex(source: &str) {
    for token in lexer::tokenize(source) {
        println!("{token}");
    }
}

fn parse(source: &str) -> Result<(), DriverError> {
    let (program, errors) = parser::parse(source);
    println!("{program:#?}");
    report(errors)
}

fn gen_quad(source: &str) -> Result<(), DriverError> {
    let (program, parse_errors) = parser::parse(source);
    let (quad, codegen_errors) = codegen::generate(&program);
    print!("{quad}");

    let diagnostics: Vec<Diagnostic> = parse_errors
        .into_iter()
        .map(Diagnostic::from)
        .chain(codegen_errors.into_iter().map(Diagnostic::from))
        .collect();
    report(diagnostics)
}

fn output_path(args: &Args) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| args.input.with_extension(OUTPUT_EXTENSION))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    eprintln!("{SIGNATURE}");

    check_extension(&args.input)?;
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot open input file {}", args.input.display()))?;

    if args.lex {
        lex(&source);
        return Ok(());
    }

    if args.parse {
        return Ok(parse(&source)?);
    }

    if args.codegen {
        return Ok(gen_quad(&source)?);
    }

    let compilation = cpq::compile(&source);
    report(compilation.diagnostics)?;

    let out_file = output_path(&args);
    fs::write(&out_file, format!("{}\n{SIGNATURE}", compilation.output))
        .with_context(|| format!("cannot write {}", out_file.display()))?;
    tracing::info!(output = %out_file.display(), "QUAD written");

    Ok(())
}
