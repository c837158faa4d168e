mod common;
use category_syntax::*;
use common::*;

#[test]
fn every_serializer_shape_is_recognized() {
    let cases = [
        ("Category=Smoke", vec!["Smoke"], vec![]),
        ("Category!=Smoke", vec![], vec!["Smoke"]),
        ("Category=Smoke|Category=DbApi", vec!["DbApi", "Smoke"], vec![]),
        ("Category!=Smoke&Category!=DbApi", vec![], vec!["DbApi", "Smoke"]),
        (
            "(Category=Smoke|Category=DbApi)&Category!=Registration",
            vec!["DbApi", "Smoke"],
            vec!["Registration"],
        ),
        (
            "Category=Smoke&(Category!=DbApi&Category!=Registration)",
            vec!["Smoke"],
            vec!["DbApi", "Registration"],
        ),
    ];

    for (expression, included, excluded) in cases {
        assert_eq!(included_of(expression), included, "{expression}");
        assert_eq!(excluded_of(expression), excluded, "{expression}");
    }
}

#[test]
fn legacy_flat_ampersand_lists_are_recognized() {
    // Drafts produced before grouping existed joined every atom with `&`.
    let expression = "Category=Smoke&Category=DbApi&Category!=VetsList";
    assert_eq!(included_of(expression), ["DbApi", "Smoke"]);
    assert_eq!(excluded_of(expression), ["VetsList"]);
}

#[test]
fn conflicting_atoms_resolve_to_include() {
    selection_is(
        "(Category=Smoke|Category=DbApi)&Category!=Smoke",
        "Smoke",
        Some(Selection::Included),
    );
    selection_is(
        "Category!=DbApi&Category!=DbApi|Category=DbApi",
        "DbApi",
        Some(Selection::Included),
    );
}

#[test]
fn unrelated_fields_are_ignored() {
    let parsed = parse("Priority=1&Owner!=bob&Category=Smoke");
    assert_eq!(parsed.len(), 1);
    selection_is("Priority=1&Owner!=bob", "bob", None);
}

#[test]
fn atoms_need_no_separator() {
    // Matching is purely textual.
    let parsed = parse("Category=SmokeCategory!=DbApi");
    assert_eq!(parsed.get("SmokeCategory"), Some(Selection::Included));
    assert!(!parsed.contains("DbApi"));
}

#[test]
fn malformed_text_never_fails() {
    for expression in ["(((", "Category!==Smoke", "&&||", "Category=(Smoke)", "="] {
        assert!(parse(expression).is_empty(), "{expression}");
    }
}

#[test]
fn output_is_sorted_and_distinct() {
    let parsed = parse("Category=b&Category=a&Category=b&Category!=C");
    let listed: Vec<_> = parsed.names().map(CategoryName::as_str).collect();
    assert_eq!(listed, ["C", "a", "b"]);
}
