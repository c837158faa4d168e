//! Per-category tri-state backing one filter editing session.
use category_syntax::{CategoryName, FilterExpr, ParsedFilter, Selection, TriState, serialize};
use std::collections::BTreeMap;

/// Sorted mapping from every visible category to its current state.
///
/// Rows are the union of the catalog and whatever the host expression
/// mentioned, so nothing the page already filters on disappears from view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryState {
    entries: BTreeMap<CategoryName, TriState>,
}

impl CategoryState {
    /// Merges the catalog with a parsed expression. Parsed names win over the
    /// catalog's implicit `Neutral`.
    pub fn build<'a>(
        catalog: impl IntoIterator<Item = &'a CategoryName>,
        parsed: &ParsedFilter,
    ) -> Self {
        let mut entries: BTreeMap<_, _> = catalog
            .into_iter()
            .map(|name| (name.clone(), TriState::Neutral))
            .collect();
        for (name, selection) in parsed.iter() {
            entries.insert(name.clone(), selection.into());
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<TriState> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set(&mut self, name: CategoryName, state: TriState) {
        self.entries.insert(name, state);
    }

    /// Include and exclude are mutually exclusive: selecting one replaces
    /// the other.
    pub fn toggle(&mut self, name: CategoryName, selection: Selection) {
        self.set(name, selection.into());
    }

    /// Applies raw checkbox-style flags, resolving "both" to `Included`.
    pub fn set_flags(&mut self, name: CategoryName, include: bool, exclude: bool) {
        self.set(name, TriState::from_flags(include, exclude));
    }

    /// Returns `false` when `name` has no row.
    pub fn clear(&mut self, name: &str) -> bool {
        match self.entries.get_mut(name) {
            Some(state) => {
                *state = TriState::Neutral;
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) {
        self.entries
            .values_mut()
            .for_each(|state| *state = TriState::Neutral);
    }

    /// Adds a neutral row unless one already exists.
    pub fn insert_neutral(&mut self, name: CategoryName) {
        self.entries.entry(name).or_default();
    }

    pub fn remove(&mut self, name: &str) -> Option<TriState> {
        self.entries.remove(name)
    }

    /// Drops neutral rows that `keep` rejects. Rows with an active selection
    /// always stay.
    pub fn retain_neutral(&mut self, mut keep: impl FnMut(&CategoryName) -> bool) {
        self.entries
            .retain(|name, state| !state.is_neutral() || keep(name));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryName, TriState)> {
        self.entries.iter().map(|(name, &state)| (name, state))
    }

    pub fn expr(&self) -> FilterExpr {
        FilterExpr::from_selections(self.iter())
    }

    pub fn serialize(&self) -> String {
        serialize(self.iter())
    }
}
