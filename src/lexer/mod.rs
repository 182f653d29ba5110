//! Lexical scanner for CPL.
//!
//! The scanner is lazy: [`Scanner::scan`] produces one [`Token`] per call and
//! keeps returning [`TokenKind::Eof`] once the input is exhausted. Malformed
//! input never stops it; anything it cannot classify becomes a
//! [`TokenKind::Illegal`] token that the parser reports.

mod cursor;
mod token;

#[cfg(test)]
mod lexer_tests;

use cursor::Cursor;
pub use token::{Position, Token, TokenKind};

/// Maximum length of a CPL identifier.
pub const MAX_IDENTIFIER_LENGTH: usize = 9;

#[derive(Clone)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
}

#[inline]
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

#[inline]
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[inline]
fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    pub fn scan(&mut self) -> Token {
        let token = self.scan_token();
        tracing::trace!(kind = %token.kind, lexeme = %token.lexeme, pos = %token.pos, "scanned");
        token
    }

    /// Pushes back the last character read, so the next [`scan`](Scanner::scan)
    /// starts from it.
    ///
    /// Token level lookahead belongs to the parser.
    pub fn unscan(&mut self) {
        self.cursor.untake();
    }

    fn scan_token(&mut self) -> Token {
        let (mut c, mut pos) = self.cursor.take();

        loop {
            match c {
                Some('/') => {
                    if self.cursor.take_if(|c| c == '*').is_none() {
                        break;
                    }
                    if !self.skip_comment() {
                        return Token::new(TokenKind::Illegal, "", pos);
                    }
                }
                Some(c) if is_whitespace(c) => (),
                _ => break,
            }
            (c, pos) = self.cursor.take();
        }

        let Some(c) = c else {
            return Token::new(TokenKind::Eof, "EOF", pos);
        };

        match c {
            'a'..='z' | 'A'..='Z' => self.scan_identifier(c, pos),
            '0'..='9' => self.scan_number(c, pos),
            '>' | '<' => self.scan_mchar(c, '=', TokenKind::Relop, TokenKind::Relop, pos),
            '=' => self.scan_mchar(c, '=', TokenKind::Relop, TokenKind::Assign, pos),
            '!' => self.scan_mchar(c, '=', TokenKind::Relop, TokenKind::LogicalNot, pos),
            '|' => self.scan_mchar(c, '|', TokenKind::LogicalOr, TokenKind::Illegal, pos),
            '&' => self.scan_mchar(c, '&', TokenKind::LogicalAnd, TokenKind::Illegal, pos),
            _ => Token::new(single_char_kind(c), c, pos),
        }
    }

    /// Scans `first second` as `double`, or `first` alone as `single` if the
    /// next character is anything else.
    fn scan_mchar(
        &mut self,
        first: char,
        second: char,
        double: TokenKind,
        single: TokenKind,
        pos: Position,
    ) -> Token {
        match self.cursor.take_if(|c| c == second) {
            Some(second) => Token::new(double, format!("{first}{second}"), pos),
            None => Token::new(single, first, pos),
        }
    }

    fn scan_identifier(&mut self, first: char, pos: Position) -> Token {
        let mut buf = String::from(first);
        while let Some(c) = self.cursor.take_if(is_identifier_char) {
            buf.push(c);
        }

        if let Some(keyword) = TokenKind::keyword(&buf) {
            return Token::new(keyword, buf, pos);
        }

        let kind = if buf.len() <= MAX_IDENTIFIER_LENGTH && !buf.contains('_') {
            TokenKind::Identifier
        } else {
            TokenKind::Illegal
        };
        Token::new(kind, buf, pos)
    }

    fn scan_number(&mut self, first: char, pos: Position) -> Token {
        let mut buf = String::from(first);
        while let Some(c) = self.cursor.take_if(is_number_char) {
            buf.push(c);
        }
        Token::new(TokenKind::Num, buf, pos)
    }

    /// Skips the rest of a `/* ... */` comment. Returns `false` if the input
    /// ends before the comment is closed.
    fn skip_comment(&mut self) -> bool {
        loop {
            match self.cursor.take().0 {
                None => return false,
                Some('*') => loop {
                    match self.cursor.take().0 {
                        Some('/') => return true,
                        Some('*') => (),
                        None => return false,
                        Some(_) => break,
                    }
                },
                Some(_) => (),
            }
        }
    }
}

fn single_char_kind(c: char) -> TokenKind {
    match c {
        '+' | '-' => TokenKind::Addop,
        '*' | '/' => TokenKind::Mulop,
        ';' => TokenKind::Semicolon,
        '(' => TokenKind::OpenParanth,
        ')' => TokenKind::CloseParanth,
        '{' => TokenKind::OpenCurly,
        '}' => TokenKind::CloseCurly,
        ',' => TokenKind::Comma,
        ':' => TokenKind::Colon,
        _ => TokenKind::Illegal,
    }
}

/// Scans the whole source, including the trailing [`TokenKind::Eof`] token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan();
        let eof = token.is(TokenKind::Eof);
        tokens.push(token);
        if eof {
            return tokens;
        }
    }
}
