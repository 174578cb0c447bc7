//! Parenthesis nesting profile.

use serde::Serialize;

/// A matched `(`/`)` pair by byte offset. Outermost pairs have depth 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BracketPair {
    pub open: usize,
    pub close: usize,
    pub depth: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketInfo {
    /// Every `(` has a `)` and no `)` comes first
    pub balanced: bool,
    pub max_depth: usize,
    /// Text inside the leftmost of the deepest pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub innermost: Option<String>,
    pub pairs: Vec<BracketPair>,
}

impl BracketInfo {
    pub fn has_brackets(&self) -> bool {
        !self.pairs.is_empty()
    }
}

pub fn analyze_brackets(input: &str) -> BracketInfo {
    let mut stack = Vec::new();
    let mut pairs = Vec::new();
    let mut balanced = true;

    for (i, c) in input.char_indices() {
        match c {
            '(' => stack.push(i),
            ')' => match stack.pop() {
                Some(open) => pairs.push(BracketPair {
                    open,
                    close: i,
                    depth: stack.len() + 1,
                }),
                None => balanced = false,
            },
            _ => {}
        }
    }
    if !stack.is_empty() {
        balanced = false;
    }
    pairs.sort_by_key(|p| p.open);

    let max_depth = pairs.iter().map(|p| p.depth).max().unwrap_or(0);
    let innermost = pairs
        .iter()
        .find(|p| p.depth == max_depth)
        .map(|p| input[p.open + 1..p.close].to_string());

    BracketInfo {
        balanced,
        max_depth,
        innermost,
        pairs,
    }
}
