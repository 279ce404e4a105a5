//! Engine benchmarks
//!
//! Hot paths of one function's pipeline:
//! - Extraction over a synthetic body with N guards
//! - Single-flip enumeration
//! - Native solve of every enumerated path
//! - Encoding one assignment

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use seedgen_core::{
    ArgumentDescriptor, ConstraintExtractor, ConstraintSolver, FunctionManifest, InputEncoder,
    NativeSolver, SingleFlipEnumerator, SolvedAssignment,
};

fn synthetic_source(guards: usize) -> String {
    let mut src = String::from("EFI_STATUS\nTarget (IN VOID *This, IN UINT32 Len, IN UINT16 Flags)\n{\n");
    for i in 0..guards {
        match i % 3 {
            0 => src.push_str(&format!("  if (Len{} > {}) {{\n    return 1;\n  }}\n", i, i * 7)),
            1 => src.push_str(&format!("  if ((Flags{} & 0x{:x}) != 0) {{\n    Mode++;\n  }}\n", i, 1u64 << (i % 16))),
            _ => src.push_str(&format!("  if (Ptr{} == NULL) {{\n    return 2;\n  }}\n", i)),
        }
    }
    src.push_str("  return 0;\n}\n");
    src
}

// ============================================================================
// Extraction
// ============================================================================

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let extractor = ConstraintExtractor::new();

    for guards in [10usize, 100, 1000] {
        let source = synthetic_source(guards);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(guards), &source, |b, source| {
            b.iter(|| black_box(extractor.extract(source, "Target")));
        });
    }

    group.finish();
}

// ============================================================================
// Enumeration + solving
// ============================================================================

fn bench_enumerate_and_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_and_solve");
    let extractor = ConstraintExtractor::new();
    let solver = NativeSolver::new();

    for guards in [10usize, 100] {
        let predicates = extractor
            .extract(&synthetic_source(guards), "Target")
            .into_predicates();
        let enumerator = SingleFlipEnumerator::new(guards + 1);

        group.bench_with_input(BenchmarkId::from_parameter(guards), &predicates, |b, predicates| {
            b.iter(|| {
                let solved = enumerator
                    .enumerate(predicates)
                    .iter()
                    .filter(|path| solver.solve_path(path).map(|r| r.is_sat()).unwrap_or(false))
                    .count();
                black_box(solved)
            });
        });
    }

    group.finish();
}

// ============================================================================
// Encoding
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let manifest = FunctionManifest::new(
        "Target",
        (0..64)
            .map(|i| ArgumentDescriptor::input(format!("a{}", i), if i % 2 == 0 { "UINT64" } else { "UINT16" }))
            .collect(),
    );
    let assignment: SolvedAssignment = (0..64)
        .filter(|i| i % 5 != 0)
        .map(|i| (format!("a{}", i), i as i64 * 31))
        .collect();
    let encoder = InputEncoder::default();

    c.bench_function("encode_64_args", |b| {
        b.iter(|| black_box(encoder.encode(&assignment, &manifest)));
    });
}

criterion_group!(benches, bench_extraction, bench_enumerate_and_solve, bench_encode);
criterion_main!(benches);
