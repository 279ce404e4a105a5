//! Extraction edge cases
//!
//! Textual guard recovery is best-effort; these pin down exactly what it
//! does and does not pick up.

use pretty_assertions::assert_eq;

use seedgen_core::features::extraction::{
    ConstraintExtractor, ExtractionMiss, InMemorySourceCorpus,
};
use seedgen_core::{Origin, PredicateKind};

fn wrap(body: &str) -> String {
    format!("EFI_STATUS\nTarget (IN UINTN Len)\n{{\n{}\n}}\n", body)
}

fn guards(source: &str) -> Vec<(String, PredicateKind, Option<i64>)> {
    ConstraintExtractor::new()
        .extract(source, "Target")
        .predicates
        .iter()
        .map(|p| (p.variable().to_string(), p.kind(), p.operand()))
        .collect()
}

fn g(variable: &str, kind: PredicateKind, operand: Option<i64>) -> (String, PredicateKind, Option<i64>) {
    (variable.to_string(), kind, operand)
}

#[test]
fn test_else_if_counts_as_guard() {
    let source = wrap("  if (Len < 4) {\n    return 1;\n  } else if (Len > 10) {\n    return 2;\n  }");
    assert_eq!(
        guards(&source),
        vec![
            g("Len", PredicateKind::Less, Some(4)),
            g("Len", PredicateKind::Greater, Some(10)),
        ]
    );
}

#[test]
fn test_one_line_can_yield_two_predicates() {
    let source = wrap("  if (Buf == NULL) { if (Len > 0) { return; } }");
    assert_eq!(
        guards(&source),
        vec![
            g("Buf", PredicateKind::NonNull, None),
            g("Len", PredicateKind::Greater, Some(0)),
        ]
    );
}

#[test]
fn test_logical_and_is_not_a_bit_test() {
    let source = wrap("  if (P != NULL && Len > 0) {\n  }");
    assert_eq!(guards(&source), vec![g("P", PredicateKind::NonNull, None)]);
}

#[test]
fn test_macro_mask_is_parse_skip() {
    let outcome = ConstraintExtractor::new().extract(
        &wrap("  if (Flags & FLAG_ENABLED) {\n  }\n  if (Len != 0) {\n  }"),
        "Target",
    );
    assert!(outcome.miss.is_none());
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].literal, "FLAG_ENABLED");
    assert_eq!(outcome.predicates.len(), 1);
    assert_eq!(outcome.predicates[0].kind(), PredicateKind::NotEqual);
}

#[test]
fn test_symbolic_bound_is_ignored() {
    let outcome = ConstraintExtractor::new().extract(&wrap("  if (Len > MAX_LEN) {\n  }"), "Target");
    assert!(outcome.predicates.is_empty());
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_literal_forms() {
    let source = wrap(
        "  if (A >= 64U) {}\n  if (B < -5) {}\n  if (C == 0xFFFFFFFFFFFFFFFF) {}\n  if(D>0x10){}\n  if (E <= 0X7fffffffffffffff) {}",
    );
    assert_eq!(
        guards(&source),
        vec![
            g("A", PredicateKind::GreaterOrEqual, Some(64)),
            g("B", PredicateKind::Less, Some(-5)),
            g("C", PredicateKind::Equal, Some(-1)),
            g("D", PredicateKind::Greater, Some(16)),
            g("E", PredicateKind::LessOrEqual, Some(i64::MAX)),
        ]
    );
}

#[test]
fn test_oversized_literal_is_parse_skip() {
    let outcome = ConstraintExtractor::new()
        .extract(&wrap("  if (Len > 0x1FFFFFFFFFFFFFFFF) {}\n  if (Len > 0x) {}"), "Target");
    assert!(outcome.predicates.is_empty());
    assert_eq!(outcome.skipped.len(), 2);
}

#[test]
fn test_loops_are_not_guards() {
    let source = wrap("  while (Len > 0) {\n    Len--;\n  }\n  for (i = 0; i < 4; i++) {}");
    assert!(guards(&source).is_empty());
}

#[test]
fn test_unbalanced_braces_miss() {
    let outcome = ConstraintExtractor::new()
        .extract("void Target (void)\n{\n  if (Len > 0) {\n    return;\n", "Target");
    assert_eq!(outcome.miss, Some(ExtractionMiss::UnbalancedBraces));
    assert!(outcome.predicates.is_empty());
}

#[test]
fn test_function_not_found_miss() {
    let outcome = ConstraintExtractor::new().extract(&wrap("  if (Len > 0) {}"), "Other");
    assert_eq!(outcome.miss, Some(ExtractionMiss::FunctionNotFound));
}

#[test]
fn test_name_must_be_whole_word() {
    let source = "void UdpTarget (int x)\n{\n  if (x > 1) {}\n}\n\nvoid Target (int y)\n{\n  if (y > 2) {}\n}\n";
    assert_eq!(guards(source), vec![g("y", PredicateKind::Greater, Some(2))]);
}

#[test]
fn test_origin_lines_are_body_relative() {
    let outcome = ConstraintExtractor::new()
        .extract(&wrap("  Work ();\n  if (Len > 0) {}\n\n  if (Len < 9) {}"), "Target");
    let origins: Vec<&Origin> = outcome.predicates.iter().map(|p| p.origin()).collect();
    assert_eq!(origins, vec![&Origin::at("Target", 2), &Origin::at("Target", 4)]);
}

#[test]
fn test_extraction_is_idempotent() {
    let source = wrap("  if (P == NULL) {}\n  if ((F & 0x8) != 0) {}\n  if (Len >= 3) {}");
    let extractor = ConstraintExtractor::new();
    assert_eq!(extractor.extract(&source, "Target"), extractor.extract(&source, "Target"));
}

#[test]
fn test_corpus_skips_prototype_only_unit() {
    let corpus = InMemorySourceCorpus::new()
        .with_unit("api.h", "EFI_STATUS Target (IN UINTN Len);\n")
        .with_unit("impl.c", wrap("  if (Len > 7) {}").as_str());

    let outcome = ConstraintExtractor::new().extract_from_corpus(&corpus, "Target");
    assert!(outcome.miss.is_none());
    assert_eq!(outcome.unit.as_deref(), Some("impl.c"));
    assert_eq!(outcome.predicates.len(), 1);
}

#[test]
fn test_corpus_reports_most_specific_miss() {
    let corpus = InMemorySourceCorpus::new()
        .with_unit("api.h", "EFI_STATUS Target (IN UINTN Len);\n")
        .with_unit("broken.c", "void Target (void)\n{\n  if (x) {\n");

    let outcome = ConstraintExtractor::new().extract_from_corpus(&corpus, "Target");
    assert_eq!(outcome.miss, Some(ExtractionMiss::UnbalancedBraces));
    assert!(outcome.unit.is_none());
}
