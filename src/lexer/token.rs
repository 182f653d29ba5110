use std::fmt;

/// Zero-based line and column of a character in the source text.
///
/// Displayed one-based, the way diagnostics report it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, char {}", self.line + 1, self.column + 1)
    }
}

/// Token with the lexeme it was scanned from and its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub pos: Position,
}

/// Basic token type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// anything the scanner could not classify
    Illegal,
    /// end of input
    Eof,
    /// (
    OpenParanth,
    /// )
    CloseParanth,
    /// {
    OpenCurly,
    /// }
    CloseCurly,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// :
    Colon,
    /// =
    Assign,
    /// break keyword
    Break,
    /// case keyword
    Case,
    /// "default" keyword
    KwDefault,
    /// else keyword
    Else,
    /// float keyword
    Float,
    /// if keyword
    If,
    /// input keyword
    Input,
    /// int keyword
    Int,
    /// output keyword
    Output,
    /// static_cast keyword
    StaticCast,
    /// switch keyword
    Switch,
    /// while keyword
    While,
    /// == != < > <= >=
    Relop,
    /// + -
    Addop,
    /// * /
    Mulop,
    /// ||
    LogicalOr,
    /// &&
    LogicalAnd,
    /// !
    LogicalNot,
    /// variable names
    Identifier,
    /// integer and floating point literals
    Num,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, pos: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            pos,
        }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl TokenKind {
    pub fn keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "break" => Self::Break,
            "case" => Self::Case,
            "default" => Self::KwDefault,
            "else" => Self::Else,
            "float" => Self::Float,
            "if" => Self::If,
            "input" => Self::Input,
            "int" => Self::Int,
            "output" => Self::Output,
            "static_cast" => Self::StaticCast,
            "switch" => Self::Switch,
            "while" => Self::While,
            _ => return None,
        };
        Some(kind)
    }

    /// Tokens that may begin a statement.
    #[inline]
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::Input
                | Self::Output
                | Self::If
                | Self::While
                | Self::Switch
                | Self::Break
                | Self::OpenCurly
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::OpenParanth => "(",
            Self::CloseParanth => ")",
            Self::OpenCurly => "{",
            Self::CloseCurly => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Assign => "=",
            Self::Break => "break",
            Self::Case => "case",
            Self::KwDefault => "default",
            Self::Else => "else",
            Self::Float => "float",
            Self::If => "if",
            Self::Input => "input",
            Self::Int => "int",
            Self::Output => "output",
            Self::StaticCast => "static_cast",
            Self::Switch => "switch",
            Self::While => "while",
            Self::Relop => "RELOP",
            Self::Addop => "ADDOP",
            Self::Mulop => "MULOP",
            Self::LogicalOr => "||",
            Self::LogicalAnd => "&&",
            Self::LogicalNot => "!",
            Self::Identifier => "ID",
            Self::Num => "NUM",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.kind, self.lexeme, self.pos)
    }
}
