use clap::Parser;
use std::path::PathBuf;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(version, about = "CPL to QUAD compiler", long_about = None)]
pub struct Args {
    /// Stop after lexing and print the tokens
    #[arg(long, group = "stage")]
    pub lex: bool,

    /// Stop after parsing and print the AST
    #[arg(long, group = "stage")]
    pub parse: bool,

    /// Stop after code generation and print QUAD with symbolic labels
    #[arg(long, group = "stage")]
    pub codegen: bool,

    /// Where to write the QUAD program [default: <INPUT> with a .qud extension]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log more (-v debug, -vv trace); RUST_LOG is used otherwise
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// CPL source file
    pub input: PathBuf,
}
