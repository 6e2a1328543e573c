//! # Filter Clauses
//!
//! Typed predicates built from the string-keyed filter map. Keys use dot
//! notation for relations on the wire (`city.name`) and are rewritten to
//! the store's traversal syntax (`city__name`) here.

use std::collections::BTreeMap;
use std::fmt;

/// Separator the store uses to follow a relation
pub const RELATION_SEPARATOR: &str = "__";

/// Marker that turns a clause into a null check
const ISNULL_MARKER: &str = "isnull";

/// Raw filter map, field path to comparison value
pub type FilterClauses = BTreeMap<String, String>;

/// A field path in the store's relation traversal syntax
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// Rewrite dot notation (`a.b`) to traversal syntax (`a__b`)
    pub fn from_dotted(raw: &str) -> Self {
        Self(raw.replace('.', RELATION_SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> Vec<&str> {
        self.0.split(RELATION_SEPARATOR).collect()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Predicate handed to the store. All predicates are ANDed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Field equals the value, read as the field's type
    Equals { path: FieldPath, value: String },

    /// Field is null when `flag`, not null otherwise
    IsNull { path: FieldPath, flag: bool },
}

impl Predicate {
    /// Build the predicate for one `key:value` clause
    pub fn from_clause(key: &str, value: &str) -> Self {
        let path = FieldPath::from_dotted(key);
        if path.as_str().contains(ISNULL_MARKER) {
            Predicate::IsNull {
                path: strip_isnull_marker(&path),
                flag: value == "true" || value == "1",
            }
        } else {
            Predicate::Equals {
                path,
                value: value.to_string(),
            }
        }
    }

    pub fn path(&self) -> &FieldPath {
        match self {
            Predicate::Equals { path, .. } | Predicate::IsNull { path, .. } => path,
        }
    }
}

/// Remove the null-check marker so the path names the checked field.
///
/// Accepts `phone__isnull`, `isnull_phone` and `phone_isnull`.
fn strip_isnull_marker(path: &FieldPath) -> FieldPath {
    let segments: Vec<&str> = path
        .segments()
        .into_iter()
        .filter(|s| *s != ISNULL_MARKER)
        .map(|s| {
            s.strip_prefix("isnull_")
                .or_else(|| s.strip_suffix("_isnull"))
                .unwrap_or(s)
        })
        .collect();
    FieldPath(segments.join(RELATION_SEPARATOR))
}

/// Turn the raw filter map into predicates
pub fn predicates(clauses: &FilterClauses) -> Vec<Predicate> {
    clauses
        .iter()
        .map(|(key, value)| Predicate::from_clause(key, value))
        .collect()
}
