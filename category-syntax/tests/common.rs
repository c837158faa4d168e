#![allow(dead_code)]
//! Shared helpers for `category-syntax` integration tests.

use category_syntax::*;

pub fn name(text: &str) -> CategoryName {
    CategoryName::new(text).unwrap()
}

pub fn names(texts: &[&str]) -> Vec<CategoryName> {
    texts.iter().map(|text| name(text)).collect()
}

/// Builds a sorted state out of include and exclude lists and serializes it.
pub fn render(included: &[&str], excluded: &[&str]) -> String {
    let state = sorted_state(included, excluded);
    serialize(state.iter().map(|(name, state)| (name, *state)))
}

pub fn sorted_state(included: &[&str], excluded: &[&str]) -> Vec<(CategoryName, TriState)> {
    let mut state: Vec<_> = included
        .iter()
        .map(|text| (name(text), TriState::Included))
        .chain(excluded.iter().map(|text| (name(text), TriState::Excluded)))
        .collect();
    state.sort_by(|a, b| a.0.cmp(&b.0));
    state
}

/// Renders `included`/`excluded` in exactly the given order, no sorting.
pub fn render_in_order(included: &[&str], excluded: &[&str]) -> String {
    let included = names(included);
    let excluded = names(excluded);
    serialize(
        included
            .iter()
            .map(|name| (name, TriState::Included))
            .chain(excluded.iter().map(|name| (name, TriState::Excluded))),
    )
}

pub fn included_of(expression: &str) -> Vec<String> {
    parse(expression)
        .included()
        .map(|name| name.as_str().to_string())
        .collect()
}

pub fn excluded_of(expression: &str) -> Vec<String> {
    parse(expression)
        .excluded()
        .map(|name| name.as_str().to_string())
        .collect()
}

pub fn selection_is(expression: &str, category: &str, expected: Option<Selection>) {
    assert_eq!(
        parse(expression).get(category),
        expected,
        "{category} in {expression:?}"
    );
}
