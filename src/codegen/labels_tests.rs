use super::*;
use crate::parser::parse;

#[test]
fn test_forward_jump() {
    assert_eq!("JUMP 2\nHALT\n", finalize("JUMP @1\n@1:\nHALT\n"));
}

#[test]
fn test_while_loop() {
    let labelled = "\
@1:
ILSS _t1 i 10
JMPZ @2 _t1
IADD _t2 i 1
IASN i _t2
JUMP @1
@2:
HALT
";
    let expected = "\
ILSS _t1 i 10
JMPZ 6 _t1
IADD _t2 i 1
IASN i _t2
JUMP 1
HALT
";
    assert_eq!(expected, finalize(labelled));
}

#[test]
fn test_label_prefix_not_rewritten() {
    let labelled = "JUMP @10\nJUMP @1\n@1:\nIPRT 1\n@10:\nHALT\n";
    assert_eq!("JUMP 4\nJUMP 3\nIPRT 1\nHALT\n", finalize(labelled));
}

#[test]
fn test_consecutive_labels() {
    let labelled = "@1:\n@2:\nHALT\nJUMP @1\nJUMP @2\n";
    assert_eq!("HALT\nJUMP 1\nJUMP 1\n", finalize(labelled));
}

#[test]
fn test_without_labels_unchanged() {
    let quad = "IASN x 5\nIPRT x\nHALT\n";
    assert_eq!(quad, finalize(quad));
    assert_eq!("", finalize(""));
}

#[test]
fn test_unreferenced_label_removed() {
    assert_eq!("IPRT 1\nHALT\n", finalize("IPRT 1\n@7:\nHALT\n"));
}

#[test]
fn test_jump_targets_resolved() {
    let source = "\
a: int; b: float;
{
    input(a);
    while (a > 0) {
        switch (a) {
            case 1: output(1); break;
            case 2: b = a / 2;
            default: if (b < a) output(b); else break;
        }
        a = a - 1;
    }
}";
    let (program, _) = parse(source);
    let (quads, errors) = generate_quads(&program);
    assert!(errors.is_empty());

    let labelled: String = quads.iter().map(|q| format!("{q}\n")).collect();
    let resolved = finalize(&labelled);
    let lines: Vec<&str> = resolved.lines().collect();

    // every label maps to the instruction emitted right after it
    let mut expected_targets = HashMap::new();
    let mut line = 0;
    for quad in &quads {
        match quad {
            Quad::Label(label) => {
                expected_targets.insert(*label, line + 1);
            }
            _ => line += 1,
        }
    }
    assert_eq!(line, lines.len());

    for (quad, text) in quads.iter().filter(|q| !matches!(q, Quad::Label(_))).zip(&lines) {
        let target = match quad {
            Quad::Jump(target) | Quad::JumpIfZero { target, .. } => target,
            _ => {
                assert!(!text.contains('@'));
                continue;
            }
        };
        let resolved_target = expected_targets[target].to_string();
        assert_eq!(Some(resolved_target.as_str()), text.split(' ').nth(1));
    }
    assert!(lines.iter().all(|l| !l.ends_with(':')));
}
