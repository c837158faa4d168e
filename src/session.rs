use crate::state::CategoryState;
use category_catalog::{AddRejected, Catalog, KeyValueStore};
use category_syntax::{CategoryName, InvalidCategoryName, Selection, TriState, parse};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// One editing session of the category filter.
///
/// Created when the filter panel opens and dropped when it closes. Every
/// command mutates the state synchronously and recomputes the draft, so
/// [`draft`](Self::draft) always equals the serialized state.
pub struct FilterSession<S> {
    catalog: Catalog<S>,
    state: CategoryState,
    draft: String,
}

/// A rendered row: what the panel shows for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    pub name: &'a CategoryName,
    pub state: TriState,
    /// `false` for categories only known from the host expression.
    pub in_catalog: bool,
}

impl<S: KeyValueStore> FilterSession<S> {
    /// Loads the catalog and seeds the rows from the host page's committed
    /// expression.
    pub fn open(catalog: Catalog<S>, host_expression: &str) -> Self {
        let mut session = Self {
            catalog,
            state: CategoryState::default(),
            draft: String::new(),
        };
        session.refresh(host_expression);
        session
    }

    /// Rebuilds every row from storage and `host_expression`, discarding
    /// uncommitted edits.
    pub fn refresh(&mut self, host_expression: &str) {
        self.catalog.load();
        let parsed = parse(host_expression);
        self.state = CategoryState::build(self.catalog.names(), &parsed);
        info!(
            rows = self.state.len(),
            mentioned = parsed.len(),
            "Filter session refreshed"
        );
        self.redraft();
    }

    /// Includes or excludes `name`, creating its row if needed.
    pub fn toggle_category(
        &mut self,
        name: &str,
        selection: Selection,
    ) -> Result<&str, SessionError> {
        let name = CategoryName::new(name)?;
        debug!(%name, ?selection, "toggle category");
        self.state.toggle(name, selection);
        Ok(self.redraft())
    }

    pub fn clear_category(&mut self, name: &str) -> Result<&str, SessionError> {
        let name = CategoryName::new(name)?;
        if !self.state.clear(name.as_str()) {
            return Err(SessionError::UnknownCategory(name));
        }
        debug!(%name, "clear category");
        Ok(self.redraft())
    }

    pub fn clear_all(&mut self) -> &str {
        self.state.clear_all();
        debug!("clear all categories");
        self.redraft()
    }

    /// Adds `name` to the catalog and shows it as a neutral row.
    pub fn add_category(&mut self, name: &str) -> Result<CategoryName, AddRejected> {
        let name = self.catalog.add(name)?;
        self.state.insert_neutral(name.clone());
        self.redraft();
        Ok(name)
    }

    /// Removes `name` from the catalog. Its row goes away too unless it
    /// currently carries a selection. Returns whether anything changed.
    pub fn delete_category(&mut self, name: &str) -> bool {
        let removed_from_catalog = self.catalog.delete(name);
        let removed_row = match self.state.get(name) {
            Some(TriState::Neutral) => self.state.remove(name).is_some(),
            _ => false,
        };
        self.redraft();
        removed_from_catalog || removed_row
    }

    /// Resets the catalog to the defaults. Neutral rows outside the defaults
    /// disappear; selections are kept.
    pub fn restore_defaults(&mut self) {
        self.catalog.restore_defaults();
        let catalog = &self.catalog;
        self.state.retain_neutral(|name| catalog.contains(name.as_str()));
        for name in self.catalog.names() {
            self.state.insert_neutral(name.clone());
        }
        self.redraft();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The string handed to the host page's filter field.
    pub fn commit(&self) -> String {
        info!(filter = %self.draft, "Committing category filter");
        self.draft.clone()
    }

    /// Commits hand-edited filter text as-is. The rows and the generated
    /// draft are left alone; raw text is never parsed back into row state.
    pub fn commit_text(&self, text: &str) -> String {
        let text = text.trim();
        info!(filter = %text, "Committing edited category filter");
        text.to_string()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.state.iter().map(move |(name, state)| Row {
            name,
            state,
            in_catalog: self.catalog.contains(name.as_str()),
        })
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            draft: &self.draft,
            rows: self
                .rows()
                .map(|row| RowSnapshot {
                    name: row.name.as_str(),
                    state: row.state.as_str(),
                    in_catalog: row.in_catalog,
                })
                .collect(),
        }
    }

    pub fn state(&self) -> &CategoryState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    /// Ends the session, handing the catalog back to the caller.
    pub fn close(self) -> Catalog<S> {
        self.catalog
    }

    fn redraft(&mut self) -> &str {
        self.draft = self.state.serialize();
        debug!(draft = %self.draft, "draft updated");
        &self.draft
    }
}

/// Serializable view of a session for rendering layers outside the process.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub draft: &'a str,
    pub rows: Vec<RowSnapshot<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RowSnapshot<'a> {
    pub name: &'a str,
    pub state: &'static str,
    pub in_catalog: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    InvalidName(InvalidCategoryName),
    UnknownCategory(CategoryName),
}

impl From<InvalidCategoryName> for SessionError {
    fn from(error: InvalidCategoryName) -> Self {
        SessionError::InvalidName(error)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidName(error) => write!(f, "{error}"),
            SessionError::UnknownCategory(name) => write!(f, "no category named \"{name}\""),
        }
    }
}

impl std::error::Error for SessionError {}
