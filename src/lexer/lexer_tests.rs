use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

fn single(source: &str) -> Token {
    Scanner::new(source).scan()
}

#[test]
fn test_basic1() {
    let expected = vec![
        TokenKind::Identifier,
        TokenKind::Colon,
        TokenKind::Int,
        TokenKind::Semicolon,
        TokenKind::OpenCurly,
        TokenKind::Output,
        TokenKind::OpenParanth,
        TokenKind::Identifier,
        TokenKind::CloseParanth,
        TokenKind::Semicolon,
        TokenKind::CloseCurly,
        TokenKind::Eof,
    ];
    assert_eq!(expected, kinds("x: int; { output(x); }"));
}

#[test]
fn test_keywords() {
    let expected = vec![
        TokenKind::Break,
        TokenKind::Case,
        TokenKind::KwDefault,
        TokenKind::Else,
        TokenKind::Float,
        TokenKind::If,
        TokenKind::Input,
        TokenKind::Int,
        TokenKind::Output,
        TokenKind::StaticCast,
        TokenKind::Switch,
        TokenKind::While,
        TokenKind::Eof,
    ];
    let source = "break case default else float if input int output static_cast switch while";
    assert_eq!(expected, kinds(source));
}

#[test]
fn test_identifier_length() {
    let nine = single("abcdefgh9");
    assert_eq!(TokenKind::Identifier, nine.kind);
    assert_eq!("abcdefgh9", nine.lexeme);

    let ten = single("abcdefghij");
    assert_eq!(TokenKind::Illegal, ten.kind);
    assert_eq!("abcdefghij", ten.lexeme);
}

#[test]
fn test_identifier_underscore() {
    assert_eq!(TokenKind::Illegal, single("a_b").kind);
    assert_eq!(TokenKind::Illegal, single("x_").kind);
    // keywords are matched before the underscore rule
    assert_eq!(TokenKind::StaticCast, single("static_cast").kind);
}

#[test]
fn test_float_number() {
    let token = single("12.5");
    assert_eq!(TokenKind::Num, token.kind);
    assert_eq!("12.5", token.lexeme);
}

#[test]
fn test_number_with_many_dots() {
    let tokens = tokenize("1.2.3;");
    assert_eq!(TokenKind::Num, tokens[0].kind);
    assert_eq!("1.2.3", tokens[0].lexeme);
    assert_eq!(TokenKind::Semicolon, tokens[1].kind);
}

#[test]
fn test_comment_skipped() {
    let token = single("/* a * b */x");
    assert_eq!(TokenKind::Identifier, token.kind);
    assert_eq!("x", token.lexeme);
    assert_eq!(Position::new(0, 11), token.pos);
}

#[test]
fn test_comment_with_star_runs() {
    let token = single("/*** a **/y");
    assert_eq!(TokenKind::Identifier, token.kind);
    assert_eq!("y", token.lexeme);
}

#[test]
fn test_unterminated_comment() {
    let tokens = tokenize("x /* never closed *");
    assert_eq!(TokenKind::Identifier, tokens[0].kind);
    assert_eq!(TokenKind::Illegal, tokens[1].kind);
    assert_eq!("", tokens[1].lexeme);
    assert_eq!(Position::new(0, 2), tokens[1].pos);
}

#[test]
fn test_relops() {
    let tokens = tokenize(">= > <= < == != =");
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(vec![">=", ">", "<=", "<", "==", "!=", "=", "EOF"], lexemes);
    assert!(tokens[..6].iter().all(|t| t.is(TokenKind::Relop)));
    assert_eq!(TokenKind::Assign, tokens[6].kind);
}

#[test]
fn test_relop_pushback() {
    let tokens = tokenize(">x");
    assert_eq!(TokenKind::Relop, tokens[0].kind);
    assert_eq!(">", tokens[0].lexeme);
    assert_eq!(TokenKind::Identifier, tokens[1].kind);
    assert_eq!("x", tokens[1].lexeme);
    assert_eq!(Position::new(0, 1), tokens[1].pos);
}

#[test]
fn test_logical_operators() {
    let expected = vec![
        TokenKind::LogicalOr,
        TokenKind::LogicalAnd,
        TokenKind::LogicalNot,
        TokenKind::Illegal,
        TokenKind::Illegal,
        TokenKind::Eof,
    ];
    assert_eq!(expected, kinds("|| && ! | &"));
}

#[test]
fn test_arithmetic_operators() {
    let tokens = tokenize("a+b-c*d/e");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        vec![
            TokenKind::Identifier,
            TokenKind::Addop,
            TokenKind::Identifier,
            TokenKind::Addop,
            TokenKind::Identifier,
            TokenKind::Mulop,
            TokenKind::Identifier,
            TokenKind::Mulop,
            TokenKind::Identifier,
            TokenKind::Eof,
        ],
        kinds
    );
}

#[test]
fn test_bad_atsign() {
    let tokens = tokenize("x = 0@1;");
    assert_eq!(TokenKind::Illegal, tokens[3].kind);
    assert_eq!("@", tokens[3].lexeme);
}

#[test]
fn test_positions() {
    let tokens = tokenize("a\n  b\r\nc\rd");
    let positions: Vec<_> = tokens.iter().map(|t| t.pos).collect();
    assert_eq!(
        vec![
            Position::new(0, 0),
            Position::new(1, 2),
            Position::new(2, 0),
            Position::new(3, 0),
            Position::new(3, 1),
        ],
        positions
    );
}

#[test]
fn test_eof_is_idempotent() {
    let mut scanner = Scanner::new("x ");
    assert_eq!(TokenKind::Identifier, scanner.scan().kind);
    let first = scanner.scan();
    let second = scanner.scan();
    assert_eq!(TokenKind::Eof, first.kind);
    assert_eq!("EOF", first.lexeme);
    assert_eq!(first, second);
}

#[test]
fn test_unscan_after_identifier() {
    let mut scanner = Scanner::new("ab c");
    assert_eq!(Token::new(TokenKind::Identifier, "ab", Position::new(0, 0)), scanner.scan());

    scanner.unscan();
    assert_eq!(Token::new(TokenKind::Identifier, "b", Position::new(0, 1)), scanner.scan());
    assert_eq!(Token::new(TokenKind::Identifier, "c", Position::new(0, 3)), scanner.scan());
    assert_eq!(TokenKind::Eof, scanner.scan().kind);
}

#[test]
fn test_unscan_after_operator() {
    let mut scanner = Scanner::new(">=1");
    assert_eq!(">=", scanner.scan().lexeme);

    scanner.unscan();
    assert_eq!(Token::new(TokenKind::Assign, "=", Position::new(0, 1)), scanner.scan());
    assert_eq!(Token::new(TokenKind::Num, "1", Position::new(0, 2)), scanner.scan());
}

#[test]
fn test_tokenize_stops_after_eof() {
    let tokens = tokenize("x\n");
    assert_eq!(2, tokens.len());
    assert_eq!(Token::new(TokenKind::Eof, "EOF", Position::new(1, 0)), tokens[1]);
    assert_eq!(vec![TokenKind::Eof], kinds(""));
}
