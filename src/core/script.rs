//! Script text normalization

/// Dedent and trim a multi-line script.
///
/// Leading and trailing blank lines are dropped. The smallest leading
/// whitespace width over the remaining non-blank lines is removed from every
/// line, and whitespace-only lines become empty.
pub fn normalize_script(script: &str) -> String {
    let lines: Vec<&str> = script.lines().collect();

    let first = lines.iter().position(|line| !is_blank(line));
    let last = lines.iter().rposition(|line| !is_blank(line));
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return String::new(),
    };
    let lines = &lines[first..=last];

    let min_indent = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| indent_width(line))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                strip_chars(line, min_indent)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Number of whitespace characters before the first non-whitespace one
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn strip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}
