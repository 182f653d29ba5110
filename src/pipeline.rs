use crate::codegen::{self, CodegenError};
use crate::parser::{self, ParseError};
use std::fmt;

/// Any diagnostic produced while compiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Parse(ParseError),
    Codegen(CodegenError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "ParseError: {e}"),
            Self::Codegen(e) => write!(f, "CodegenError: {e}"),
        }
    }
}

impl std::error::Error for Diagnostic {}

impl From<ParseError> for Diagnostic {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<CodegenError> for Diagnostic {
    fn from(e: CodegenError) -> Self {
        Self::Codegen(e)
    }
}

/// Result of [`compile`].
///
/// `output` is only a valid QUAD program when `diagnostics` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Compiles CPL `source` to QUAD.
///
/// Code generation runs even when parsing reported errors, so semantic
/// problems are collected in the same pass. Syntax diagnostics come first.
pub fn compile(source: &str) -> Compilation {
    let (program, parse_errors) = parser::parse(source);
    tracing::debug!(
        declarations = program.declarations.len(),
        statements = program.body.statements.len(),
        errors = parse_errors.len(),
        "parsed"
    );

    let (labelled, codegen_errors) = codegen::generate(&program);
    let output = codegen::finalize(&labelled);
    tracing::debug!(lines = output.lines().count(), "labels resolved");

    let diagnostics = parse_errors
        .into_iter()
        .map(Diagnostic::from)
        .chain(codegen_errors.into_iter().map(Diagnostic::from))
        .collect();

    Compilation {
        output,
        diagnostics,
    }
}
