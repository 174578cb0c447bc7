use proptest::prelude::*;

/// Monomial suffixes in surface syntax, including the empty (constant) one.
const MONOMIALS: &[&str] = &["", "x", "y", "a", "xy", "x^{2}", "a^{2}b", "y^{3}"];

pub fn arb_term() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (1u32..10, prop::sample::select(MONOMIALS))
            .prop_map(|(c, m)| format!("{c}{m}")),
        1 => (1u32..10, 2u32..10, prop::sample::select(MONOMIALS))
            .prop_map(|(n, d, m)| format!("\\frac{{{n}}}{{{d}}}{m}")),
    ]
}

/// Flat sum of 1..6 signed terms.
pub fn arb_sum() -> impl Strategy<Value = String> {
    prop::collection::vec((any::<bool>(), arb_term()), 1..6).prop_map(|terms| {
        let mut out = String::new();
        for (i, (negative, term)) in terms.into_iter().enumerate() {
            if negative {
                out.push('-');
            } else if i > 0 {
                out.push('+');
            }
            out.push_str(&term);
        }
        out
    })
}

/// Sums, bracketed products and small powers of sums.
pub fn arb_expression() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_sum(),
        (arb_term(), arb_sum()).prop_map(|(t, s)| format!("{t}({s})")),
        (arb_sum(), arb_sum()).prop_map(|(a, b)| format!("({a})({b})")),
        (arb_sum(), 0u32..3).prop_map(|(a, e)| format!("({a})^{{{e}}}")),
    ]
}

/// Plain-text fraction `n/d` with a non-zero denominator.
pub fn arb_plain_fraction() -> impl Strategy<Value = (i64, i64)> {
    (0i64..50, 1i64..50)
}
