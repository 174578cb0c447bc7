//! Expression analysis for the status panel.
//!
//! Shape questions (type, like terms, variables) are answered on the parsed
//! tree and its flattened polynomial. Surface questions (fraction literals,
//! bracket nesting, radical and pi symbols) are answered on the raw text.

pub mod brackets;
pub mod fractions;

use std::collections::{BTreeSet, HashSet};

use algex_ast::{BinOp, Expr};
use serde::Serialize;

use crate::flatten::{collect_raw_terms, flatten};
use crate::options::EngineOptions;
use crate::polynomial::{Polynomial, Term};
use crate::transform::parse;

pub use brackets::{analyze_brackets, BracketInfo, BracketPair};
pub use fractions::{analyze_fractions, FractionInfo};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionType {
    Constant,
    /// No variables, but written with fractions, decimals or division
    Numerical,
    Monomial,
    Polynomial,
    /// Could not be parsed or flattened
    Unknown,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableInfo {
    pub has_variables: bool,
    pub count: usize,
    pub list: Vec<String>,
}

impl VariableInfo {
    fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let list: Vec<String> = names
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            has_variables: !list.is_empty(),
            count: list.len(),
            list,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrationalInfo {
    pub has_sqrt: bool,
    pub has_pi: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub expression_type: ExpressionType,
    pub has_like_terms: bool,
    pub fractions: FractionInfo,
    pub brackets: BracketInfo,
    pub irrational: IrrationalInfo,
    pub variables: VariableInfo,
    /// Why the expression could not be classified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Decide the type from the flattened polynomial; the tree and raw text only
/// separate `numerical` from `constant`.
pub fn classify(input: &str, tree: &Expr, poly: &Polynomial) -> ExpressionType {
    if !poly.variables().is_empty() {
        return if poly.len() == 1 {
            ExpressionType::Monomial
        } else {
            ExpressionType::Polynomial
        };
    }
    let written_as_fraction = input.contains("\\frac")
        || input.contains('.')
        || tree.any(&|e| {
            matches!(e, Expr::Binary(BinOp::Div, _, _))
                || matches!(e, Expr::Number(r) if !r.is_integer())
        });
    let non_integer = poly.as_constant().is_some_and(|c| !c.is_integer());
    if written_as_fraction || non_integer {
        ExpressionType::Numerical
    } else {
        ExpressionType::Constant
    }
}

/// At least two terms share a monomial.
pub fn has_like_terms(terms: &[Term]) -> bool {
    let mut seen = HashSet::new();
    terms.iter().any(|t| !seen.insert(&t.monomial))
}

/// A product/quotient chain with at least one index to simplify. Sums never
/// qualify; `\sqrt` counts as an index only when `with_sqrt` is set.
pub fn is_index_chain(tree: &Expr, with_sqrt: bool) -> bool {
    let has_sum = tree.any(&|e| match e {
        Expr::Binary(BinOp::Add | BinOp::Sub, _, _) => true,
        Expr::Sqrt(_) => !with_sqrt,
        _ => false,
    });
    !has_sum && tree.any(&|e| matches!(e, Expr::Power(..) | Expr::Sqrt(_)))
}

/// Bases an index chain keeps apart: variables and integer literals above 1.
pub fn index_bases(tree: &Expr) -> BTreeSet<String> {
    fn walk(expr: &Expr, out: &mut BTreeSet<String>) {
        match expr {
            Expr::Variable(name) => {
                out.insert(name.clone());
            }
            Expr::Number(r) => {
                if r.is_integer() && !r.is_negative() && !r.is_zero() && !r.is_one() {
                    out.insert(r.to_latex());
                }
            }
            Expr::Binary(_, l, r) => {
                walk(l, out);
                walk(r, out);
            }
            Expr::Power(inner, _) | Expr::Negate(inner) | Expr::Group(inner) | Expr::Sqrt(inner) => {
                walk(inner, out)
            }
        }
    }
    let mut out = BTreeSet::new();
    walk(tree, &mut out);
    out
}

pub fn analyze_irrationals(input: &str) -> IrrationalInfo {
    IrrationalInfo {
        has_sqrt: input.contains("\\sqrt") || input.contains('√'),
        has_pi: input.contains("\\pi") || input.contains('π'),
    }
}

fn tree_variables<'a>(expr: &'a Expr, out: &mut Vec<&'a str>) {
    match expr {
        Expr::Variable(name) => out.push(name),
        Expr::Number(_) => {}
        Expr::Binary(_, l, r) => {
            tree_variables(l, out);
            tree_variables(r, out);
        }
        Expr::Power(inner, _) | Expr::Negate(inner) | Expr::Group(inner) | Expr::Sqrt(inner) => {
            tree_variables(inner, out)
        }
    }
}

/// Full report. Never fails: unparseable input yields `Unknown` plus the
/// reason, while the text-level analyzers still run.
pub fn analyze(input: &str, options: &EngineOptions) -> AnalysisReport {
    let fractions = analyze_fractions(input, options.max_depth);
    let brackets = analyze_brackets(input);
    let irrational = analyze_irrationals(input);

    let tree = match parse(input, options) {
        Ok(tree) => tree,
        Err(err) => {
            return AnalysisReport {
                expression_type: ExpressionType::Unknown,
                has_like_terms: false,
                fractions,
                brackets,
                irrational,
                variables: VariableInfo::default(),
                error: Some(err.to_string()),
            }
        }
    };

    let like_terms = collect_raw_terms(&tree, options)
        .map(|terms| has_like_terms(&terms))
        .unwrap_or(false);

    match flatten(&tree, options) {
        Ok(poly) => AnalysisReport {
            expression_type: classify(input, &tree, &poly),
            has_like_terms: like_terms,
            fractions,
            brackets,
            irrational,
            variables: VariableInfo::from_names(poly.variables()),
            error: None,
        },
        Err(err) => {
            tracing::debug!(%err, "analysis could not flatten input");
            let mut names = Vec::new();
            tree_variables(&tree, &mut names);
            AnalysisReport {
                expression_type: ExpressionType::Unknown,
                has_like_terms: like_terms,
                fractions,
                brackets,
                irrational,
                variables: VariableInfo::from_names(names),
                error: Some(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(input: &str) -> AnalysisReport {
        analyze(input, &EngineOptions::default())
    }

    #[test]
    fn test_classify() {
        assert_eq!(report("7").expression_type, ExpressionType::Constant);
        assert_eq!(report("2+3\\times4").expression_type, ExpressionType::Constant);
        assert_eq!(report("\\frac{4}{2}").expression_type, ExpressionType::Numerical);
        assert_eq!(report("0.5+1").expression_type, ExpressionType::Numerical);
        assert_eq!(report("6\\div4").expression_type, ExpressionType::Numerical);
        assert_eq!(report("3x^{2}").expression_type, ExpressionType::Monomial);
        assert_eq!(report("x+x").expression_type, ExpressionType::Monomial);
        assert_eq!(report("x+1").expression_type, ExpressionType::Polynomial);
        assert_eq!(report("x-x").expression_type, ExpressionType::Constant);
    }

    #[test]
    fn test_like_terms() {
        assert!(report("3x+2y-x").has_like_terms);
        assert!(!report("3x+2y").has_like_terms);
        assert!(report("2x(x+3)+x").has_like_terms);
    }

    #[test]
    fn test_variables() {
        let v = report("b^{2}+a c-c").variables;
        assert!(v.has_variables);
        assert_eq!(v.count, 3);
        assert_eq!(v.list, vec!["a", "b", "c"]);
        assert!(!report("\\frac{1}{2}").variables.has_variables);
    }

    #[test]
    fn test_unknown_keeps_text_analysis() {
        let r = report("\\sqrt{2}x+\\frac{1}{3}");
        assert_eq!(r.expression_type, ExpressionType::Unknown);
        assert!(r.irrational.has_sqrt);
        assert!(r.fractions.has_fraction);
        assert_eq!(r.variables.list, vec!["x"]);
        assert!(r.error.is_some());

        let r = report("2\\pi r");
        assert_eq!(r.expression_type, ExpressionType::Unknown);
        assert!(r.irrational.has_pi);
    }

    #[test]
    fn test_brackets_in_report() {
        let r = report("3(2(a+1)-a)");
        assert_eq!(r.brackets.max_depth, 2);
        assert_eq!(r.brackets.innermost.as_deref(), Some("a+1"));
    }

    #[test]
    fn test_index_chain_shape() {
        let tree = |s: &str| parse(s, &EngineOptions::default()).unwrap();
        assert!(is_index_chain(&tree("x^{3}\\times x^{2}\\div x"), false));
        assert!(!is_index_chain(&tree("x^{2}+x"), false));
        assert!(!is_index_chain(&tree("x\\times y"), true));
        assert!(!is_index_chain(&tree("\\sqrt{x}\\times x^{2}"), false));
        assert!(is_index_chain(&tree("\\sqrt{x}\\times x^{2}"), true));

        let bases = index_bases(&tree("2^{3}\\times\\frac{1}{2}\\times x\\times1"));
        assert_eq!(bases.into_iter().collect::<Vec<_>>(), vec!["2", "x"]);
    }
}
