use cpq::{compile, Diagnostic};
use std::collections::HashSet;

fn program(name: &str) -> String {
    let path = format!("{}/tests/programs/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {path}: {e}"))
}

/// Asserts that `quad` is a finished QUAD program: no label definitions,
/// no symbolic operands, a final HALT and every jump inside the program.
fn assert_resolved(quad: &str) {
    let lines: Vec<&str> = quad.lines().collect();
    assert_eq!(Some(&"HALT"), lines.last());
    for line in &lines {
        assert!(!line.ends_with(':'), "label left in output: {line}");
        assert!(!line.contains('@'), "unresolved operand: {line}");

        let mut tokens = line.split(' ');
        if let Some("JUMP" | "JMPZ") = tokens.next() {
            let target: usize = tokens.next().and_then(|t| t.parse().ok()).expect("jump target");
            assert!((1..=lines.len()).contains(&target), "jump out of range: {line}");
        }
    }
}

#[test]
fn test_straight_line() {
    let compilation = compile("x:int; { x = 5; output(x); }");
    assert!(compilation.is_ok());
    assert_eq!("IASN x 5\nIPRT x\nHALT\n", compilation.output);
}

#[test]
fn test_while_labels_resolved() {
    let compilation = compile("i: int; { while (i < 10) i = i + 1; }");
    assert!(compilation.is_ok());
    let expected = "\
ILSS _t1 i 10
JMPZ 6 _t1
IADD _t2 i 1
IASN i _t2
JUMP 1
HALT
";
    assert_eq!(expected, compilation.output);
}

#[test]
fn test_programs_compile() {
    for name in ["minmax.ou", "average.ou"] {
        let compilation = compile(&program(name));
        assert!(compilation.is_ok(), "{name}: {:?}", compilation.diagnostics);
        assert_resolved(&compilation.output);
    }
}

#[test]
fn test_average_uses_both_types() {
    let output = compile(&program("average.ou")).output;
    let opcodes: HashSet<&str> = output.lines().filter_map(|l| l.split(' ').next()).collect();
    for opcode in ["RADD", "RDIV", "RTOI", "ITOR", "INQL", "RPRT", "IINP"] {
        assert!(opcodes.contains(opcode), "missing {opcode}");
    }
}

#[test]
fn test_semantic_errors_collected() {
    let compilation = compile(&program("errors.ou"));
    assert!(!compilation.is_ok());
    let messages: Vec<String> = compilation.diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(
        vec![
            "CodegenError: variable a already defined at line 2, char 1",
            "CodegenError: cannot assign float value to int variable a at line 4, char 5",
            "CodegenError: undefined variable b at line 5, char 12",
            "CodegenError: break statement must be inside a while loop or a switch case at line 6, char 5",
        ],
        messages
    );
}

#[test]
fn test_parse_errors_come_first() {
    let compilation = compile("x: int { y = 1; }");
    let kinds: Vec<bool> = compilation
        .diagnostics
        .iter()
        .map(|d| matches!(d, Diagnostic::Parse(_)))
        .collect();
    assert_eq!(vec![true, false], kinds);
    assert_eq!(
        "ParseError: found '{', expected ';' at line 1, char 8",
        compilation.diagnostics[0].to_string()
    );
    assert_eq!(
        "CodegenError: undefined variable y at line 1, char 10",
        compilation.diagnostics[1].to_string()
    );
}

#[test]
fn test_top_level_break() {
    let compilation = compile("{ break; }");
    assert_eq!(1, compilation.diagnostics.len());
    assert!(matches!(compilation.diagnostics[0], Diagnostic::Codegen(_)));
    assert_eq!("HALT\n", compilation.output);
}

#[test]
fn test_deterministic() {
    let source = program("minmax.ou");
    assert_eq!(compile(&source), compile(&source));
}
