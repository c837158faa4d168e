//! # Category filter expression syntax
//!
//! `category-syntax` owns the tiny boolean language a test-run trigger accepts
//! for its category filter: `Category=<name>` / `Category!=<name>` atoms glued
//! together with `&`, `|` and (only where needed) parentheses.
//!
//! Two directions are supported:
//! - [`parse`] scans an existing expression and reports, per category, whether
//!   it is included or excluded.
//! - [`serialize`] turns a per-category tri-state back into the canonical,
//!   minimally parenthesized expression.
//!
//! ## Example
//! ```
//! use category_syntax::{parse, serialize, Selection, TriState};
//!
//! let parsed = parse("(Category=Smoke|Category=DbApi)&Category!=Registration");
//! assert_eq!(parsed.len(), 3);
//! assert_eq!(parsed.get("Smoke"), Some(Selection::Included));
//! assert_eq!(parsed.get("Registration"), Some(Selection::Excluded));
//!
//! // ParsedFilter iterates in sorted order, so the canonical form may differ
//! // from the input while keeping the same classification.
//! let text = serialize(parsed.iter().map(|(name, selection)| (name, TriState::from(selection))));
//! assert_eq!(text, "(Category=DbApi|Category=Smoke)&Category!=Registration");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::{borrow::Borrow, collections::BTreeMap, fmt};

/// Field name every atom filters on.
pub const FIELD: &str = "Category";

/// Matches both atom forms anywhere in the text. Group 1 is the optional `!`,
/// group 2 the category name.
static ATOM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Category(!?)=([A-Za-z0-9]+)").unwrap());

/// Extracts every category referenced by `expression`.
///
/// The scan is pattern based: grouping and `|`/`&` structure are ignored and
/// any text that is not an atom is skipped. When the same name shows up both
/// as an include and as an exclude, the include wins.
///
/// ```
/// use category_syntax::{parse, Selection};
///
/// let parsed = parse("Category!=Smoke&Category=Smoke&garbage&Category!=DbApi");
/// assert_eq!(parsed.get("Smoke"), Some(Selection::Included));
/// assert_eq!(parsed.get("DbApi"), Some(Selection::Excluded));
/// assert!(parse("   ").is_empty());
/// ```
pub fn parse(expression: &str) -> ParsedFilter {
    let mut selections = BTreeMap::new();
    for captures in ATOM_PATTERN.captures_iter(expression) {
        let selection = if captures[1].is_empty() {
            Selection::Included
        } else {
            Selection::Excluded
        };
        // The pattern only admits `[A-Za-z0-9]+`, so this never drops a match.
        let Ok(name) = CategoryName::new(&captures[2]) else {
            continue;
        };
        match selection {
            Selection::Included => {
                selections.insert(name, Selection::Included);
            }
            Selection::Excluded => {
                selections.entry(name).or_insert(Selection::Excluded);
            }
        }
    }
    ParsedFilter { selections }
}

/// Renders the canonical expression for `selections`.
///
/// Neutral entries are skipped. The order of the iterator is kept inside each
/// clause, so callers pass their sorted state to get a stable result.
///
/// ```
/// use category_syntax::{serialize, CategoryName, TriState};
///
/// let smoke = CategoryName::new("Smoke").unwrap();
/// let db_api = CategoryName::new("DbApi").unwrap();
/// let text = serialize([(&smoke, TriState::Included), (&db_api, TriState::Excluded)]);
/// assert_eq!(text, "Category=Smoke&Category!=DbApi");
/// assert_eq!(serialize([(&smoke, TriState::Neutral)]), "");
/// ```
pub fn serialize<'a, I>(selections: I) -> String
where
    I: IntoIterator<Item = (&'a CategoryName, TriState)>,
{
    FilterExpr::from_selections(selections).to_string()
}

/// A validated category token (`[A-Za-z0-9]+`, case-sensitive).
///
/// Ordering is plain byte-wise string ordering, which is the order rows and
/// atoms are presented in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Trims surrounding whitespace and validates the remaining text.
    ///
    /// ```
    /// use category_syntax::CategoryName;
    ///
    /// assert_eq!(CategoryName::new("  Smoke ").unwrap().as_str(), "Smoke");
    /// assert!(CategoryName::new("").is_err());
    /// assert!(CategoryName::new("Db Api").is_err());
    /// assert!(CategoryName::new("Db-Api").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self, InvalidCategoryName> {
        let trimmed = text.trim();
        if is_valid_name(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(InvalidCategoryName {
                text: trimmed.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets ordered maps keyed by `CategoryName` be queried with a plain `&str`.
impl Borrow<str> for CategoryName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CategoryName {
    type Error = InvalidCategoryName;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

/// Returns `true` when `text` is a complete category token.
pub fn is_valid_name(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCategoryName {
    pub text: String,
}

impl fmt::Display for InvalidCategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "category name is empty")
        } else {
            write!(
                f,
                "`{}` is not a valid category name (letters and digits only)",
                self.text
            )
        }
    }
}

impl std::error::Error for InvalidCategoryName {}

/// Which atom form mentioned a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    /// `Category=<name>`.
    Included,
    /// `Category!=<name>`.
    Excluded,
}

impl Selection {
    /// Comparison operator used by the atom.
    pub fn operator(self) -> &'static str {
        match self {
            Selection::Included => "=",
            Selection::Excluded => "!=",
        }
    }

    /// Operator joining several atoms of this kind inside one clause.
    ///
    /// Includes are alternatives (`|`), excludes must all hold (`&`).
    pub fn joiner(self) -> char {
        match self {
            Selection::Included => '|',
            Selection::Excluded => '&',
        }
    }
}

/// Per-category state while a filter is being edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TriState {
    Included,
    Excluded,
    #[default]
    Neutral,
}

impl TriState {
    /// Collapses a pair of include/exclude flags into one state. Both flags set
    /// is normalized to `Included`.
    ///
    /// ```
    /// use category_syntax::TriState;
    /// assert_eq!(TriState::from_flags(true, true), TriState::Included);
    /// assert_eq!(TriState::from_flags(false, true), TriState::Excluded);
    /// assert_eq!(TriState::from_flags(false, false), TriState::Neutral);
    /// ```
    pub fn from_flags(include: bool, exclude: bool) -> Self {
        match (include, exclude) {
            (true, _) => TriState::Included,
            (false, true) => TriState::Excluded,
            (false, false) => TriState::Neutral,
        }
    }

    pub fn selection(self) -> Option<Selection> {
        match self {
            TriState::Included => Some(Selection::Included),
            TriState::Excluded => Some(Selection::Excluded),
            TriState::Neutral => None,
        }
    }

    pub fn is_neutral(self) -> bool {
        matches!(self, TriState::Neutral)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TriState::Included => "included",
            TriState::Excluded => "excluded",
            TriState::Neutral => "neutral",
        }
    }
}

impl From<Selection> for TriState {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Included => TriState::Included,
            Selection::Excluded => TriState::Excluded,
        }
    }
}

impl From<Option<Selection>> for TriState {
    fn from(selection: Option<Selection>) -> Self {
        selection.map_or(TriState::Neutral, TriState::from)
    }
}

/// Result of [`parse`]: one entry per distinct category, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFilter {
    selections: BTreeMap<CategoryName, Selection>,
}

impl ParsedFilter {
    pub fn get(&self, name: &str) -> Option<Selection> {
        self.selections.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selections.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryName, Selection)> {
        self.selections.iter().map(|(name, &selection)| (name, selection))
    }

    pub fn names(&self) -> impl Iterator<Item = &CategoryName> {
        self.selections.keys()
    }

    pub fn included(&self) -> impl Iterator<Item = &CategoryName> {
        self.with_selection(Selection::Included)
    }

    pub fn excluded(&self) -> impl Iterator<Item = &CategoryName> {
        self.with_selection(Selection::Excluded)
    }

    fn with_selection(&self, wanted: Selection) -> impl Iterator<Item = &CategoryName> {
        self.iter()
            .filter(move |&(_, selection)| selection == wanted)
            .map(|(name, _)| name)
    }
}

impl IntoIterator for ParsedFilter {
    type Item = (CategoryName, Selection);
    type IntoIter = std::collections::btree_map::IntoIter<CategoryName, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.into_iter()
    }
}

/// Same-operator group of atoms. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub selection: Selection,
    pub names: Vec<CategoryName>,
}

impl Clause {
    fn write(&self, f: &mut fmt::Formatter<'_>, grouped: bool) -> fmt::Result {
        let parenthesize = grouped && self.names.len() > 1;
        if parenthesize {
            f.write_str("(")?;
        }
        for (idx, name) in self.names.iter().enumerate() {
            if idx > 0 {
                write!(f, "{}", self.selection.joiner())?;
            }
            write!(f, "{FIELD}{}{name}", self.selection.operator())?;
        }
        if parenthesize {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Canonical shape of a serialized filter: an optional OR-group of includes
/// followed by an optional AND-group of excludes.
///
/// The [`Display`](fmt::Display) impl is the serializer. A clause with several
/// atoms is wrapped in parentheses only when the other clause is present too,
/// since that is the only time it is combined with a different operator.
///
/// ```
/// use category_syntax::{CategoryName, FilterExpr, TriState};
///
/// let names: Vec<_> = ["DbApi", "Registration", "Smoke"]
///     .iter()
///     .map(|name| CategoryName::new(name).unwrap())
///     .collect();
/// let expr = FilterExpr::from_selections([
///     (&names[0], TriState::Excluded),
///     (&names[1], TriState::Excluded),
///     (&names[2], TriState::Included),
/// ]);
/// assert_eq!(
///     expr.to_string(),
///     "Category=Smoke&(Category!=DbApi&Category!=Registration)"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpr {
    pub include: Option<Clause>,
    pub exclude: Option<Clause>,
}

impl FilterExpr {
    /// Partitions non-neutral entries into the include and exclude clauses,
    /// keeping iteration order within each.
    pub fn from_selections<'a, I>(selections: I) -> Self
    where
        I: IntoIterator<Item = (&'a CategoryName, TriState)>,
    {
        let mut included = Vec::new();
        let mut excluded = Vec::new();
        for (name, state) in selections {
            match state {
                TriState::Included => included.push(name.clone()),
                TriState::Excluded => excluded.push(name.clone()),
                TriState::Neutral => {}
            }
        }
        Self {
            include: clause(Selection::Included, included),
            exclude: clause(Selection::Excluded, excluded),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }
}

fn clause(selection: Selection, names: Vec<CategoryName>) -> Option<Clause> {
    (!names.is_empty()).then_some(Clause { selection, names })
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grouped = self.include.is_some() && self.exclude.is_some();
        if let Some(include) = &self.include {
            include.write(f, grouped)?;
        }
        if let Some(exclude) = &self.exclude {
            if grouped {
                f.write_str("&")?;
            }
            exclude.write(f, grouped)?;
        }
        Ok(())
    }
}
