//! Worked-solution snapshots.
//!
//! When the step wording changes intentionally:
//! ```bash
//! cargo insta test -p algex_engine --test solver_snapshots --accept
//! ```

use algex_engine::{solve, Solution};

/// One line per step, deterministic for snapshots.
fn format_solution(solution: &Solution) -> String {
    let mut lines = vec![format!("archetype: {}", solution.archetype)];
    for (i, step) in solution.steps.iter().enumerate() {
        let mut line = format!("{}. {}: {}", i + 1, step.description, step.operation);
        if let Some(result) = &step.result {
            line.push_str(&format!(" => {result}"));
        }
        lines.push(line);
    }
    if let Some(answer) = &solution.final_answer {
        lines.push(format!("answer: {answer}"));
    }
    lines.join("\n")
}

fn solve_and_format(input: &str) -> String {
    match solve(input) {
        Ok(solution) => format_solution(&solution),
        Err(e) => format!("ERROR: {e}"),
    }
}

#[test]
fn snapshot_fraction_reduction() {
    insta::assert_snapshot!(solve_and_format("\\frac{16}{24}"), @r###"
    archetype: fraction-reduction
    1. Write down the fraction: \frac{16}{24}
    2. Find the greatest common divisor of numerator and denominator: \gcd(16, 24) => 8
    3. Divide numerator and denominator by the greatest common divisor: \frac{16\div8}{24\div8} => \frac{2}{3}
    4. Write the reduced fraction: \frac{16}{24}=\frac{2}{3} => \frac{2}{3}
    answer: \frac{2}{3}
    "###);
}

#[test]
fn snapshot_already_reduced() {
    insta::assert_snapshot!(solve_and_format("\\frac{5}{9}"), @r###"
    archetype: fraction-reduction
    1. The fraction is already in lowest terms: \frac{5}{9} => \frac{5}{9}
    answer: \frac{5}{9}
    "###);
}

#[test]
fn snapshot_unrecognized() {
    insta::assert_snapshot!(solve_and_format("x^{2}+1"), @"ERROR: unrecognized problem type");
}
