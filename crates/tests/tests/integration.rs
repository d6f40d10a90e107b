//! Integration tests for end-to-end body ordering.
//!
//! These tests verify the full pipeline:
//! Body elements → Graph → Canonical order → Render plan

use wdlfmt_plan::{assemble, Error};
use wdlfmt_tests::{call, conditional, decl, scatter, section_body, shape};

/// A realistic workflow body: reference prep, two alignment calls, a
/// coverage decl fed by both, and a scatter whose body nests a
/// conditional.
///
/// Verifies ordering, declaration batching, and structural nesting in a
/// single pass.
#[test]
fn test_full_workflow_body() {
    let per_sample = vec![
        decl("threshold", &[]),
        call("genotype", &["threshold"]),
        conditional(
            "if-deep",
            &["genotype"],
            "depth > threshold",
            vec![call("refine", &[])],
        ),
    ];

    let body = vec![
        call("align_tumor", &["ref_index"]),
        decl("ref_index", &[]),
        call("align_normal", &["ref_index"]),
        decl("coverage", &["align_tumor", "align_normal"]),
        scatter("scatter-samples", &["coverage"], "s", "samples", per_sample),
    ];

    let plan = assemble(&body).unwrap();

    assert_eq!(
        shape(&plan),
        [
            "decls[ref_index]",
            "call[align_tumor]",
            "call[align_normal]",
            "decls[coverage]",
            "section[scatter-samples]",
        ]
    );

    let inner = section_body(&plan, 4);
    assert_eq!(
        shape(inner),
        ["decls[threshold]", "call[genotype]", "section[if-deep]"]
    );

    let innermost = section_body(inner, 2);
    assert_eq!(shape(innermost), ["call[refine]"]);
}

/// Independent elements of different kinds order by kind rank first,
/// regardless of the order the document supplied them in.
#[test]
fn test_kind_rank_orders_independent_elements() {
    let body = vec![
        scatter("scatter-1", &[], "s", "samples", vec![decl("x", &[])]),
        call("fetch", &[]),
        decl("version", &[]),
    ];

    let plan = assemble(&body).unwrap();
    assert_eq!(
        shape(&plan),
        ["decls[version]", "call[fetch]", "section[scatter-1]"]
    );
}

/// Two assemblies of the same input must produce bit-identical plans,
/// including across serialization.
#[test]
fn test_plans_are_bit_identical() {
    let body = vec![
        decl("ref_index", &[]),
        call("align_tumor", &["ref_index"]),
        call("align_normal", &["ref_index"]),
        conditional(
            "if-qc",
            &["align_tumor"],
            "run_qc",
            vec![decl("qc_threshold", &[]), call("qc", &["qc_threshold"])],
        ),
    ];

    let first = assemble(&body).unwrap();
    let second = assemble(&body).unwrap();
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

/// A nested body assembles exactly as it would as a top-level scope.
#[test]
fn test_nested_scope_matches_top_level_assembly() {
    let inner = vec![
        decl("threshold", &[]),
        call("genotype", &["threshold"]),
        decl("ratio", &["genotype"]),
    ];

    let standalone = assemble(&inner).unwrap();

    let nested = assemble(&[conditional("if-1", &[], "flag", inner)]).unwrap();
    assert_eq!(section_body(&nested, 0), &standalone);
}

/// Reordering two mutually independent declarations flips only their
/// relative position; dependents are unaffected.
#[test]
fn test_independent_reordering_moves_in_lockstep() {
    let forward = assemble(&[
        decl("x", &[]),
        decl("y", &[]),
        call("use_both", &["x", "y"]),
    ])
    .unwrap();
    let reversed = assemble(&[
        decl("y", &[]),
        decl("x", &[]),
        call("use_both", &["x", "y"]),
    ])
    .unwrap();

    assert_eq!(shape(&forward), ["decls[x y]", "call[use_both]"]);
    assert_eq!(shape(&reversed), ["decls[y x]", "call[use_both]"]);
}

/// Dependencies on identities outside the scope (or never defined at
/// all) are pruned: each scope is ordered against its own graph only.
#[test]
fn test_out_of_scope_dependencies_are_pruned() {
    let body = vec![
        decl("ref_index", &[]),
        scatter(
            "scatter-1",
            &["ref_index"],
            "s",
            "samples",
            // "ref_index" is defined in the outer scope, not here
            vec![call("align", &["ref_index"])],
        ),
    ];

    let plan = assemble(&body).unwrap();
    assert_eq!(shape(&plan), ["decls[ref_index]", "section[scatter-1]"]);
    assert_eq!(shape(section_body(&plan, 1)), ["call[align]"]);
}

/// A cycle buried two sections deep aborts the whole assembly.
#[test]
fn test_cycle_in_deep_scope_aborts_assembly() {
    let innermost = vec![decl("a", &["b"]), decl("b", &["a"])];
    let body = vec![conditional(
        "if-outer",
        &[],
        "flag",
        vec![scatter("scatter-inner", &[], "s", "samples", innermost)],
    )];

    let err = assemble(&body).unwrap_err();
    match err {
        Error::Cycle { path } => {
            assert_eq!(path.first(), path.last());
            assert!(path.len() >= 3);
        }
        other => panic!("expected cycle error, got {other:?}"),
    }
}

/// A duplicated identity in a nested scope aborts the whole assembly.
#[test]
fn test_duplicate_in_nested_scope_aborts_assembly() {
    let body = vec![scatter(
        "scatter-1",
        &[],
        "s",
        "samples",
        vec![call("align", &[]), call("align", &[])],
    )];

    let err = assemble(&body).unwrap_err();
    assert!(matches!(err, Error::DuplicateNode(id) if id.as_str() == "align"));
}
