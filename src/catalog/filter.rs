//! Active search term and the view filter derived from it.

use super::collection::Collection;
use super::types::{normalize_name, Entity};

/// Normalized (trimmed, lowercased) query controlling the visible set.
///
/// An empty term means "show everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Normalize a raw form submission.
    pub fn parse(raw: &str) -> Self {
        Self(normalize_name(raw))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive exact match against an entity name.
    pub fn matches(&self, name: &str) -> bool {
        self.is_empty() || name.to_lowercase() == self.0
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entities visible under `term`, in stored order.
pub fn visible<'a>(collection: &'a Collection, term: &SearchTerm) -> Vec<&'a Entity> {
    collection.iter().filter(|e| term.matches(&e.name)).collect()
}
