use crate::KeyValueStore;
use anyhow::{Context, Result};
use category_syntax::{CategoryName, InvalidCategoryName};
use std::{collections::BTreeSet, fmt};
use tracing::{debug, info, warn};

/// Well-known key the catalog is stored under, as a JSON array of strings.
pub const CATALOG_KEY: &str = "category-filter.catalog";

/// Seed used on first use and after [`Catalog::restore_defaults`].
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "TrackAccreditation",
    "ProductionOnly",
    "Smoke",
    "PostLayoffReport",
    "Registration",
    "Production",
    "DbApi",
    "PublicApi",
    "VetsList",
];

pub fn default_categories() -> BTreeSet<CategoryName> {
    DEFAULT_CATEGORIES
        .iter()
        .filter_map(|name| CategoryName::new(name).ok())
        .collect()
}

/// The user-editable universe of category names.
///
/// The in-memory set is authoritative for the lifetime of the value; writes to
/// the store are best-effort and a failing store only costs persistence.
pub struct Catalog<S> {
    store: S,
    names: BTreeSet<CategoryName>,
    loaded: bool,
}

impl<S: KeyValueStore> Catalog<S> {
    pub fn open(store: S) -> Self {
        let mut catalog = Self {
            store,
            names: BTreeSet::new(),
            loaded: false,
        };
        catalog.load();
        catalog
    }

    /// Re-reads the persisted set, seeding the store with the defaults when the
    /// key is absent. Unreadable or corrupt data never touches the store: the
    /// first load falls back to the defaults, later loads keep the current set.
    pub fn load(&mut self) -> &BTreeSet<CategoryName> {
        let names = match self.read_persisted() {
            Ok(Some(names)) => names,
            Ok(None) => {
                info!("Category catalog not found, seeding defaults");
                let names = default_categories();
                persist(&mut self.store, &names);
                names
            }
            Err(error) if self.loaded => {
                warn!(?error, "Category catalog unreadable, keeping current set");
                return &self.names;
            }
            Err(error) => {
                warn!(?error, "Category catalog unreadable, using defaults");
                default_categories()
            }
        };
        self.names = names;
        self.loaded = true;
        debug!(count = self.names.len(), "category catalog loaded");
        &self.names
    }

    fn read_persisted(&self) -> Result<Option<BTreeSet<CategoryName>>> {
        let Some(raw) = self
            .store
            .get(CATALOG_KEY)
            .context("Failed to read category catalog")?
        else {
            return Ok(None);
        };
        let entries: Vec<String> =
            serde_json::from_str(&raw).context("Failed to decode category catalog")?;
        let mut names = BTreeSet::new();
        for entry in entries {
            match CategoryName::new(&entry) {
                Ok(name) => {
                    names.insert(name);
                }
                Err(error) => warn!(%error, "Skipping persisted category"),
            }
        }
        Ok(Some(names))
    }

    /// Replaces the whole set and writes it out.
    pub fn save(&mut self, names: BTreeSet<CategoryName>) {
        self.names = names;
        persist(&mut self.store, &self.names);
    }

    /// Adds a trimmed, validated name. On rejection the catalog is unchanged
    /// and the error's `Display` is the notice to show the user.
    pub fn add(&mut self, text: &str) -> Result<CategoryName, AddRejected> {
        let name = CategoryName::new(text).map_err(|error| {
            if error.text.is_empty() {
                AddRejected::Empty
            } else {
                AddRejected::InvalidName(error)
            }
        })?;
        if self.names.contains(&name) {
            info!(%name, "Category already exists");
            return Err(AddRejected::AlreadyExists(name));
        }
        self.names.insert(name.clone());
        persist(&mut self.store, &self.names);
        info!(%name, "Category added");
        Ok(name)
    }

    /// Removes `name` if present. Returns whether anything changed.
    pub fn delete(&mut self, name: &str) -> bool {
        if !self.names.remove(name) {
            return false;
        }
        persist(&mut self.store, &self.names);
        info!(%name, "Category deleted");
        true
    }

    /// Drops the persisted catalog so the next [`load`](Self::load) reseeds.
    pub fn restore_defaults(&mut self) {
        if let Err(error) = self
            .store
            .remove(CATALOG_KEY)
            .context("Failed to clear category catalog")
        {
            warn!(?error, "Restoring default categories");
        }
        self.names = default_categories();
        info!("Category catalog restored to defaults");
    }

    pub fn names(&self) -> &BTreeSet<CategoryName> {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn persist<S: KeyValueStore>(store: &mut S, names: &BTreeSet<CategoryName>) {
    let result = serde_json::to_string(&names.iter().map(CategoryName::as_str).collect::<Vec<_>>())
        .context("Failed to encode category catalog")
        .and_then(|encoded| {
            store
                .set(CATALOG_KEY, &encoded)
                .context("Failed to write category catalog")
        });
    if let Err(error) = result {
        warn!(?error, "Category catalog not persisted");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddRejected {
    Empty,
    AlreadyExists(CategoryName),
    InvalidName(InvalidCategoryName),
}

impl fmt::Display for AddRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddRejected::Empty => write!(f, "Category name is empty"),
            AddRejected::AlreadyExists(name) => write!(f, "Category \"{name}\" already exists"),
            AddRejected::InvalidName(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for AddRejected {}
