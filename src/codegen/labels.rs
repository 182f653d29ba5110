use std::collections::HashMap;

/// Resolves symbolic labels in QUAD text to 1-based line numbers.
///
/// A line of the form `<label>:` defines a label for the instruction that
/// follows it. Definition lines are removed and every operand equal to a
/// defined label is replaced by that instruction's line number in the
/// resulting text. Operands are matched as whole tokens, so `@1` is never
/// rewritten inside `@10`. The first definition of a label wins.
pub fn finalize(quad: &str) -> String {
    let lines: Vec<&str> = quad.split('\n').collect();

    let mut targets: HashMap<&str, usize> = HashMap::new();
    let mut removed = 0;
    for (i, line) in lines.iter().enumerate() {
        if let Some(label) = label_definition(line) {
            targets.entry(label).or_insert(i - removed + 1);
            removed += 1;
        }
    }
    tracing::trace!(labels = targets.len(), "resolving labels");

    lines
        .iter()
        .filter(|line| label_definition(line).is_none())
        .map(|line| {
            line.split(' ')
                .map(|token| {
                    targets
                        .get(token)
                        .map_or_else(|| token.to_owned(), usize::to_string)
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn label_definition(line: &str) -> Option<&str> {
    let label = line.strip_suffix(':')?;
    let valid = !label.is_empty() && !label.contains(char::is_whitespace);
    valid.then_some(label)
}
