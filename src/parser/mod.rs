//! Recursive descent parser for CPL.
//!
//! The parser does not stop at the first syntax error. A missing token is
//! reported and parsing goes on as if it had been there; a sub-tree that could
//! not be built is left as `None` in the AST. Only `type` consumes a token on
//! failure, which keeps declaration lists from looping.

mod cursor;
mod parse_error;

use crate::ast::*;
use crate::lexer::{Position, Token, TokenKind};
use cursor::Cursor;
pub use parse_error::{InnerParseError, ParseError};

const RELOPS: &[&str] = &["==", "!=", "<", ">", "<=", ">="];

impl TryFrom<&Token> for Operator {
    type Error = InnerParseError;
    fn try_from(token: &Token) -> Result<Self, InnerParseError> {
        match (token.kind, token.lexeme.as_str()) {
            (TokenKind::Addop, "+") => Ok(Operator::Add),
            (TokenKind::Addop, "-") => Ok(Operator::Subtract),
            (TokenKind::Mulop, "*") => Ok(Operator::Multiply),
            (TokenKind::Mulop, "/") => Ok(Operator::Divide),
            (TokenKind::Relop, "==") => Ok(Operator::EqualTo),
            (TokenKind::Relop, "!=") => Ok(Operator::NotEqualTo),
            (TokenKind::Relop, ">") => Ok(Operator::GreaterThan),
            (TokenKind::Relop, "<") => Ok(Operator::LessThan),
            (TokenKind::Relop, ">=") => Ok(Operator::GreaterThanOrEqualTo),
            (TokenKind::Relop, "<=") => Ok(Operator::LessThanOrEqualTo),
            _ => Err(InnerParseError::UnexpectedToken(token.lexeme.clone())),
        }
    }
}

/// Parses a whole program, returning the (possibly partial) AST together with
/// every syntax diagnostic in the order it was found.
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    let mut cursor = Cursor::new(source);
    let program = parse_program(&mut cursor);
    (program, cursor.into_errors())
}

fn parse_program(cursor: &mut Cursor) -> Program {
    let pos = cursor.pos();
    let declarations = parse_declarations(cursor);
    let body = parse_block(cursor);
    cursor.expect(TokenKind::Eof);

    Program {
        declarations,
        body,
        pos,
    }
}

fn parse_declarations(cursor: &mut Cursor) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    while cursor.is(TokenKind::Identifier) {
        declarations.push(parse_declaration(cursor));
    }
    declarations
}

fn parse_declaration(cursor: &mut Cursor) -> Declaration {
    let pos = cursor.pos();
    let names = parse_idlist(cursor);
    cursor.expect(TokenKind::Colon);
    let data_type = parse_type(cursor);
    cursor.expect(TokenKind::Semicolon);

    Declaration {
        names,
        data_type,
        pos,
    }
}

fn parse_type(cursor: &mut Cursor) -> DataType {
    match cursor.next_if(&[TokenKind::Int, TokenKind::Float]) {
        Some(token) if token.is(TokenKind::Int) => DataType::Integer,
        Some(_) => DataType::Float,
        None => {
            let skipped = cursor.bump();
            cursor.add_error(ParseError::expected(&["int", "float"], &skipped));
            DataType::Unknown
        }
    }
}

fn parse_identifier(cursor: &mut Cursor) -> Option<Identifier> {
    cursor.expect(TokenKind::Identifier).map(|t| t.lexeme)
}

fn parse_idlist(cursor: &mut Cursor) -> Vec<Identifier> {
    let mut names = Vec::new();
    names.extend(parse_identifier(cursor));
    while cursor.next_if(&[TokenKind::Comma]).is_some() {
        names.extend(parse_identifier(cursor));
    }
    names
}

fn parse_block(cursor: &mut Cursor) -> Block {
    let pos = cursor.pos();
    let opened = cursor.expect(TokenKind::OpenCurly).is_some();
    let statements = parse_statements(cursor);

    // a stray } is only worth reporting if we saw its {
    if opened {
        cursor.expect(TokenKind::CloseCurly);
    } else {
        cursor.next_if(&[TokenKind::CloseCurly]);
    }

    Block { statements, pos }
}

/// Parses statements until the lookahead cannot start one.
fn parse_statements(cursor: &mut Cursor) -> Vec<Statement> {
    std::iter::from_fn(|| parse_statement(cursor)).collect()
}

fn parse_statement(cursor: &mut Cursor) -> Option<Statement> {
    let kind = cursor.peek_kind();
    if !kind.starts_statement() {
        return None;
    }

    let statement = match kind {
        TokenKind::Identifier => Statement::Assignment(parse_assignment(cursor)),
        TokenKind::Input => Statement::Input(parse_input(cursor)),
        TokenKind::Output => Statement::Output(parse_output(cursor)),
        TokenKind::If => Statement::If(parse_if(cursor)),
        TokenKind::While => Statement::While(parse_while(cursor)),
        TokenKind::Switch => Statement::Switch(parse_switch(cursor)),
        TokenKind::Break => Statement::Break(parse_break(cursor)),
        _ => Statement::Block(parse_block(cursor)),
    };
    Some(statement)
}

fn parse_assignment(cursor: &mut Cursor) -> Assignment {
    let pos = cursor.pos();
    let variable = parse_identifier(cursor).unwrap_or_default();
    cursor.expect(TokenKind::Assign);

    let cast_type = if cursor.next_if(&[TokenKind::StaticCast]).is_some() {
        cursor.expect(TokenKind::OpenParanth);
        let cast_type = parse_type(cursor);
        cursor.expect(TokenKind::CloseParanth);
        cast_type
    } else {
        DataType::Unknown
    };

    let value = parse_exp(cursor);
    cursor.expect(TokenKind::Semicolon);

    Assignment {
        variable,
        value,
        cast_type,
        pos,
    }
}

fn parse_input(cursor: &mut Cursor) -> Input {
    let pos = cursor.bump().pos;
    cursor.expect(TokenKind::OpenParanth);
    let variable = parse_identifier(cursor);
    cursor.expect(TokenKind::CloseParanth);
    cursor.expect(TokenKind::Semicolon);

    Input { variable, pos }
}

fn parse_output(cursor: &mut Cursor) -> Output {
    let pos = cursor.bump().pos;
    cursor.expect(TokenKind::OpenParanth);
    let value = parse_exp(cursor);
    cursor.expect(TokenKind::CloseParanth);
    cursor.expect(TokenKind::Semicolon);

    Output { value, pos }
}

fn parse_condition(cursor: &mut Cursor) -> Option<BoolExp> {
    cursor.expect(TokenKind::OpenParanth);
    let condition = parse_boolexp(cursor);
    cursor.expect(TokenKind::CloseParanth);
    condition
}

fn parse_if(cursor: &mut Cursor) -> If {
    let pos = cursor.bump().pos;
    let condition = parse_condition(cursor);
    let then = parse_statement(cursor).map(Box::new);

    let els = if cursor.expect(TokenKind::Else).is_some() {
        parse_statement(cursor).map(Box::new)
    } else {
        None
    };

    If {
        condition,
        then,
        els,
        pos,
    }
}

fn parse_while(cursor: &mut Cursor) -> While {
    let pos = cursor.bump().pos;
    let condition = parse_condition(cursor);
    let body = parse_statement(cursor).map(Box::new);

    While {
        condition,
        body,
        pos,
    }
}

fn parse_switch(cursor: &mut Cursor) -> Switch {
    let pos = cursor.bump().pos;
    cursor.expect(TokenKind::OpenParanth);
    let selector = parse_exp(cursor);
    cursor.expect(TokenKind::CloseParanth);
    cursor.expect(TokenKind::OpenCurly);

    let mut cases = Vec::new();
    while cursor.is(TokenKind::Case) {
        cases.push(parse_case(cursor));
    }

    cursor.expect(TokenKind::KwDefault);
    cursor.expect(TokenKind::Colon);
    let default = parse_statements(cursor);
    cursor.expect(TokenKind::CloseCurly);

    Switch {
        selector,
        cases,
        default,
        pos,
    }
}

fn parse_case(cursor: &mut Cursor) -> Case {
    let pos = cursor.bump().pos;
    let value = match cursor.expect(TokenKind::Num) {
        Some(token) => token.lexeme.parse::<i64>().unwrap_or_else(|_| {
            let err = InnerParseError::BadCaseValue(token.lexeme.clone());
            cursor.add_error(err.at(Position::default()));
            0
        }),
        None => 0,
    };
    cursor.expect(TokenKind::Colon);
    let body = parse_statements(cursor);

    Case { value, body, pos }
}

fn parse_break(cursor: &mut Cursor) -> Position {
    let pos = cursor.bump().pos;
    cursor.expect(TokenKind::Semicolon);
    pos
}

fn parse_boolexp(cursor: &mut Cursor) -> Option<BoolExp> {
    let mut result = parse_boolterm(cursor);
    while let Some(token) = cursor.next_if(&[TokenKind::LogicalOr]) {
        let rhs = parse_boolterm(cursor);
        result = result
            .zip(rhs)
            .map(|(lhs, rhs)| BoolExp::or(lhs, rhs, token.pos));
    }
    result
}

fn parse_boolterm(cursor: &mut Cursor) -> Option<BoolExp> {
    let mut result = parse_boolfactor(cursor);
    while let Some(token) = cursor.next_if(&[TokenKind::LogicalAnd]) {
        let rhs = parse_boolfactor(cursor);
        result = result
            .zip(rhs)
            .map(|(lhs, rhs)| BoolExp::and(lhs, rhs, token.pos));
    }
    result
}

fn parse_boolfactor(cursor: &mut Cursor) -> Option<BoolExp> {
    let pos = cursor.pos();
    if cursor.next_if(&[TokenKind::LogicalNot]).is_some() {
        cursor.expect(TokenKind::OpenParanth);
        let value = parse_boolexp(cursor);
        cursor.expect(TokenKind::CloseParanth);
        return value.map(|value| BoolExp::not(value, pos));
    }

    let lhs = parse_exp(cursor);
    let op = parse_operator(cursor, TokenKind::Relop, RELOPS);
    let rhs = parse_exp(cursor);
    Some(BoolExp::compare(op?, lhs?, rhs?, pos))
}

fn parse_operator(
    cursor: &mut Cursor,
    kind: TokenKind,
    expected: &[&'static str],
) -> Option<Operator> {
    let token = cursor.expect_any(&[kind], expected)?;
    match Operator::try_from(&token) {
        Ok(op) => Some(op),
        Err(err) => {
            cursor.add_error(err.at(token.pos));
            None
        }
    }
}

fn parse_exp(cursor: &mut Cursor) -> Option<Exp> {
    let mut result = parse_term(cursor);
    while cursor.is(TokenKind::Addop) {
        let pos = cursor.pos();
        let op = parse_operator(cursor, TokenKind::Addop, &["+", "-"]);
        let rhs = parse_term(cursor);
        result = match (op, result, rhs) {
            (Some(op), Some(lhs), Some(rhs)) => Some(Exp::arithmetic(op, lhs, rhs, pos)),
            _ => None,
        };
    }
    result
}

fn parse_term(cursor: &mut Cursor) -> Option<Exp> {
    let mut result = parse_factor(cursor);
    while cursor.is(TokenKind::Mulop) {
        let pos = cursor.pos();
        let op = parse_operator(cursor, TokenKind::Mulop, &["*", "/"]);
        let rhs = parse_factor(cursor);
        result = match (op, result, rhs) {
            (Some(op), Some(lhs), Some(rhs)) => Some(Exp::arithmetic(op, lhs, rhs, pos)),
            _ => None,
        };
    }
    result
}

fn parse_factor(cursor: &mut Cursor) -> Option<Exp> {
    match cursor.peek_kind() {
        TokenKind::OpenParanth => {
            cursor.bump();
            let exp = parse_exp(cursor);
            cursor.expect(TokenKind::CloseParanth);
            exp
        }
        TokenKind::Identifier => {
            let token = cursor.bump();
            Some(Exp::var(token.lexeme, token.pos))
        }
        TokenKind::Num => Some(parse_number(cursor)),
        _ => {
            cursor.unexpected(&["(", "ID", "NUM"]);
            None
        }
    }
}

/// A literal containing `.` is a float, anything else an integer.
fn parse_number(cursor: &mut Cursor) -> Exp {
    let Token { lexeme, pos, .. } = cursor.bump();
    let bad_number = |cursor: &mut Cursor| {
        let err = InnerParseError::BadNumber(lexeme.clone());
        cursor.add_error(err.at(Position::default()));
    };

    if lexeme.contains('.') {
        let value = lexeme.parse::<f64>().unwrap_or_else(|_| {
            bad_number(cursor);
            0.0
        });
        Exp::float(value, pos)
    } else {
        let value = lexeme.parse::<i64>().unwrap_or_else(|_| {
            bad_number(cursor);
            0
        });
        Exp::int(value, pos)
    }
}
