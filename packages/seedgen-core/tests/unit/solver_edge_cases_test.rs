//! Solver edge cases
//!
//! 64-bit signed semantics at the boundaries, exclusion chains, bitmask
//! interaction with bounds, and backend selection.

use pretty_assertions::assert_eq;

use seedgen_core::features::solver::SolverError;
use seedgen_core::{
    build_solver, ConstraintSolver, ExecutionPath, NativeSolver, Predicate, SolvedAssignment,
    SolverKind, SolverResult,
};

fn solve(predicates: Vec<Predicate>) -> SolverResult {
    NativeSolver::new()
        .solve_path(&ExecutionPath::new(0, predicates))
        .unwrap()
}

fn witness(predicates: Vec<Predicate>, variable: &str) -> i64 {
    let path = ExecutionPath::new(0, predicates);
    let assignment = NativeSolver::new()
        .solve_path(&path)
        .unwrap()
        .into_assignment()
        .expect("path should be satisfiable");
    assert!(assignment.satisfies(&path));
    assignment.get(variable).unwrap()
}

#[test]
fn test_contradiction_is_unsat() {
    let result = solve(vec![Predicate::equal("X", 5), Predicate::not_equal("X", 5)]);
    assert_eq!(result, SolverResult::Unsat);
}

#[test]
fn test_strict_bound_never_returns_boundary() {
    assert_eq!(witness(vec![Predicate::greater("Len", 0)], "Len"), 1);
    assert_eq!(witness(vec![Predicate::greater("Len", 1499)], "Len"), 1500);
}

#[test]
fn test_boundaries_of_i64() {
    assert_eq!(solve(vec![Predicate::less("X", i64::MIN)]), SolverResult::Unsat);
    assert_eq!(solve(vec![Predicate::greater("X", i64::MAX)]), SolverResult::Unsat);
    assert_eq!(witness(vec![Predicate::greater_or_equal("X", i64::MAX)], "X"), i64::MAX);
    assert_eq!(witness(vec![Predicate::less_or_equal("X", i64::MIN)], "X"), i64::MIN);
}

#[test]
fn test_negative_only_domain_picks_least() {
    assert_eq!(witness(vec![Predicate::less_or_equal("X", -10)], "X"), i64::MIN);
    assert_eq!(
        witness(
            vec![Predicate::less_or_equal("X", -10), Predicate::greater_or_equal("X", -20)],
            "X"
        ),
        -20
    );
}

#[test]
fn test_exclusion_chain() {
    let predicates = vec![
        Predicate::non_null("P"),
        Predicate::not_equal("P", 1),
        Predicate::not_equal("P", 2),
        Predicate::not_equal("P", 4),
    ];
    assert_eq!(witness(predicates, "P"), 3);
}

#[test]
fn test_mask_with_exclusion() {
    let predicates = vec![Predicate::bitmask_set("F", 0x6), Predicate::not_equal("F", 2)];
    assert_eq!(witness(predicates, "F"), 3);
}

#[test]
fn test_mask_above_upper_bound_uses_sign_bit() {
    let predicates = vec![Predicate::bitmask_set("F", 0x80), Predicate::less("F", 0x80)];
    assert_eq!(witness(predicates, "F"), i64::MIN | 0x80);

    let mut bounded = vec![Predicate::bitmask_set("F", 0x80), Predicate::less("F", 0x80)];
    bounded.push(Predicate::greater_or_equal("F", 0));
    assert_eq!(solve(bounded), SolverResult::Unsat);
}

#[test]
fn test_sign_bit_mask() {
    assert_eq!(witness(vec![Predicate::bitmask_set("F", i64::MIN)], "F"), i64::MIN);
}

#[test]
fn test_variables_are_independent() {
    let path = ExecutionPath::new(
        3,
        vec![
            Predicate::greater("Len", 20),
            Predicate::non_null("This"),
            Predicate::less_or_equal("Hdr", 60),
            Predicate::bitmask_set("OpFlags", 0x10),
        ],
    );
    let assignment = NativeSolver::new()
        .solve_path(&path)
        .unwrap()
        .into_assignment()
        .unwrap();

    let expected: SolvedAssignment = [
        ("Hdr".to_string(), 0),
        ("Len".to_string(), 21),
        ("OpFlags".to_string(), 0x10),
        ("This".to_string(), 1),
    ]
    .into_iter()
    .collect();
    assert_eq!(assignment, expected);
}

#[test]
fn test_one_unsat_variable_sinks_path() {
    let result = solve(vec![
        Predicate::greater("Len", 0),
        Predicate::less("Hdr", 5),
        Predicate::greater("Hdr", 5),
    ]);
    assert_eq!(result, SolverResult::Unsat);
}

#[test]
fn test_native_backend_selected_by_default() {
    let solver = build_solver(SolverKind::default(), 0).unwrap();
    assert_eq!(solver.name(), "native");
}

#[cfg(not(feature = "z3"))]
#[test]
fn test_z3_unavailable_without_feature() {
    let err = build_solver(SolverKind::Z3, 1000).err().unwrap();
    assert!(matches!(err, SolverError::Unavailable(_)));
    assert!(err.is_fatal());
}

#[cfg(feature = "z3")]
#[test]
fn test_z3_agrees_with_native_on_satisfiability() {
    let z3 = build_solver(SolverKind::Z3, 5000).unwrap();
    let native = NativeSolver::new();
    let cases = vec![
        vec![Predicate::equal("X", 5), Predicate::not_equal("X", 5)],
        vec![Predicate::non_null("P"), Predicate::greater("Len", 0)],
        vec![Predicate::bitmask_set("F", 0x80), Predicate::less("F", 0x80)],
        vec![
            Predicate::bitmask_set("F", 0x80),
            Predicate::less("F", 0x80),
            Predicate::greater_or_equal("F", 0),
        ],
        vec![Predicate::less_or_equal("H", 60), Predicate::greater("H", 59)],
    ];

    for predicates in cases {
        let path = ExecutionPath::new(0, predicates);
        let a = native.solve_path(&path).unwrap();
        let b = z3.solve_path(&path).unwrap();
        assert_eq!(a.is_sat(), b.is_sat(), "disagreement on {}", path);
        if let Some(assignment) = b.assignment() {
            assert!(assignment.satisfies(&path));
        }
    }
}
