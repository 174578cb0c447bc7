use algex_engine::transform::{combine, expand, normalize, number_calculate, to_polynomial};
use algex_engine::{EngineOptions, Rational};
use proptest::prelude::*;

mod strategies;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_combine_is_idempotent(s in strategies::arb_sum()) {
        let opts = EngineOptions::default();
        let once = combine(&s, &opts).unwrap();
        let twice = combine(&once, &opts).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_render_round_trip(s in strategies::arb_expression()) {
        let opts = EngineOptions::default();
        let poly = to_polynomial(&s, &opts).unwrap();
        let rendered = expand(&s, &opts).unwrap();
        let reparsed = to_polynomial(&rendered, &opts).unwrap();
        prop_assert_eq!(poly, reparsed, "rendered as {}", rendered);
    }

    #[test]
    fn test_terms_strictly_ordered(s in strategies::arb_expression()) {
        let poly = to_polynomial(&s, &EngineOptions::default()).unwrap();
        prop_assert!(poly.is_canonical());
        for pair in poly.terms().windows(2) {
            prop_assert!(pair[0].monomial < pair[1].monomial);
        }
    }

    #[test]
    fn test_normalize_is_stable(s in strategies::arb_expression()) {
        let opts = EngineOptions::default();
        let once = normalize(&s, &opts).unwrap();
        prop_assert_eq!(normalize(&once, &opts).unwrap(), once);
    }

    #[test]
    fn test_number_calculate_matches_rational(
        (a, b) in strategies::arb_plain_fraction(),
        (c, d) in strategies::arb_plain_fraction(),
    ) {
        let expected = (Rational::new(a, b).unwrap() + Rational::new(c, d).unwrap()).to_latex();
        let got = number_calculate(&format!("{a}/{b} + {c}/{d}"), &EngineOptions::default()).unwrap();
        prop_assert_eq!(got, expected);
    }
}
