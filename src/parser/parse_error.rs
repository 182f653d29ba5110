use crate::lexer::{Position, Token};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InnerParseError {
    #[error("found '{found}', expected {}", alternatives(.expected))]
    ExpectedButGot {
        expected: Vec<&'static str>,
        found: String,
    },
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("{0} is not a number")]
    BadNumber(String),
    #[error("{0} is not an int")]
    BadCaseValue(String),
}

/// Syntax diagnostic with the position it was reported at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{inner} at {pos}")]
pub struct ParseError {
    pub inner: InnerParseError,
    pub pos: Position,
}

impl ParseError {
    /// `found` did not match any of `expected`.
    pub fn expected(expected: &[&'static str], found: &Token) -> Self {
        InnerParseError::ExpectedButGot {
            expected: expected.to_vec(),
            found: found.lexeme.clone(),
        }
        .at(found.pos)
    }
}

impl InnerParseError {
    pub fn at(self, pos: Position) -> ParseError {
        ParseError { inner: self, pos }
    }
}

fn alternatives(expected: &[&str]) -> String {
    expected
        .iter()
        .map(|e| format!("'{e}'"))
        .collect::<Vec<_>>()
        .join(" or ")
}
