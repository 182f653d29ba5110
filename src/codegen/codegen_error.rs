use crate::ast::Identifier;
use crate::lexer::Position;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InnerCodegenError {
    #[error("undefined variable {0}")]
    UndefinedVariable(Identifier),
    #[error("variable {0} already defined")]
    AlreadyDefined(Identifier),
    #[error("cannot assign float value to int variable {0}")]
    FloatToInt(Identifier),
    #[error("switch expression must be an integer")]
    NonIntegerSwitch,
    #[error("break statement must be inside a while loop or a switch case")]
    BreakOutsideLoop,
}

/// Semantic diagnostic with the position of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{inner} at {pos}")]
pub struct CodegenError {
    pub inner: InnerCodegenError,
    pub pos: Position,
}

impl InnerCodegenError {
    pub fn at(self, pos: Position) -> CodegenError {
        CodegenError { inner: self, pos }
    }
}
