//! Text scan of `\frac{..}{..}` literals, including fractions nested inside
//! a numerator or denominator.

use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionInfo {
    pub has_fraction: bool,
    pub fraction_count: usize,
    pub has_nested_fraction: bool,
    /// 0 without fractions, 1 for a plain `\frac`, 2 for a fraction inside one
    pub nested_level: usize,
}

const COMMANDS: [&str; 3] = ["\\frac", "\\dfrac", "\\tfrac"];

/// Earliest fraction command: (start, end of command name).
fn next_command(text: &str) -> Option<(usize, usize)> {
    COMMANDS
        .iter()
        .filter_map(|cmd| text.find(cmd).map(|start| (start, start + cmd.len())))
        .min_by_key(|&(start, _)| start)
}

/// Split `{inner}rest` after optional leading whitespace.
pub(crate) fn brace_group(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if !text.starts_with('{') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&text[1..i], &text[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Fraction count and deepest nesting within `text`. Descent stops once
/// `depth_left` runs out.
fn scan(text: &str, depth_left: usize) -> (usize, usize) {
    let mut count = 0;
    let mut level = 0;
    let mut rest = text;

    while let Some((_, after)) = next_command(rest) {
        count += 1;
        let tail = &rest[after..];
        let Some((numer, tail)) = brace_group(tail) else {
            level = level.max(1);
            rest = tail;
            continue;
        };
        let (denom, tail) = brace_group(tail).unwrap_or(("", tail));

        let (inner_count, inner_level) = if depth_left == 0 {
            (0, 0)
        } else {
            let (nc, nl) = scan(numer, depth_left - 1);
            let (dc, dl) = scan(denom, depth_left - 1);
            (nc + dc, nl.max(dl))
        };
        count += inner_count;
        level = level.max(inner_level + 1);
        rest = tail;
    }
    (count, level)
}

pub fn analyze_fractions(input: &str, max_depth: usize) -> FractionInfo {
    let (fraction_count, nested_level) = scan(input, max_depth);
    FractionInfo {
        has_fraction: fraction_count > 0,
        fraction_count,
        has_nested_fraction: nested_level > 1,
        nested_level,
    }
}
