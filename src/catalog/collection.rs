//! Append-only, insertion-ordered store of loaded entities.

use super::types::{normalize_name, Entity};
use indexmap::IndexMap;

/// Loaded entities keyed by lowercased name.
///
/// Insertion order is discovery order. Entries are never reordered or removed,
/// and a name can only be present once.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: IndexMap<String, Entity>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entity` unless its name is already present.
    ///
    /// Returns `true` when the entity was inserted.
    pub fn insert(&mut self, entity: Entity) -> bool {
        let key = entity.key();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, entity);
        true
    }

    /// Append a batch in order, skipping names already present.
    ///
    /// Returns the number of entities inserted.
    pub fn extend_batch(&mut self, batch: Vec<Entity>) -> usize {
        batch
            .into_iter()
            .map(|entity| self.insert(entity))
            .filter(|inserted| *inserted)
            .count()
    }

    /// Case-insensitive exact name lookup.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entries.get(&normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entities in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::DetailRecord;
    use proptest::prelude::*;

    fn entity(name: &str, id: u64) -> Entity {
        Entity::from_detail(DetailRecord::new(name, id), format!("u/{}", id))
    }

    fn names(c: &Collection) -> Vec<&str> {
        c.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_collection_001_preserves_discovery_order() {
        let mut c = Collection::new();
        c.insert(entity("charmander", 4));
        c.insert(entity("bulbasaur", 1));
        c.insert(entity("squirtle", 7));
        assert_eq!(names(&c), vec!["charmander", "bulbasaur", "squirtle"]);
    }

    #[test]
    fn test_collection_002_rejects_duplicate_names_case_insensitively() {
        let mut c = Collection::new();
        assert!(c.insert(entity("Pikachu", 25)));
        assert!(!c.insert(entity("pikachu", 25)));
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("PIKACHU").map(|e| e.name.as_str()), Some("Pikachu"));
    }

    #[test]
    fn test_collection_003_extend_batch_counts_inserted() {
        let mut c = Collection::new();
        c.insert(entity("b", 2));
        let inserted = c.extend_batch(vec![entity("a", 1), entity("b", 2), entity("c", 3)]);
        assert_eq!(inserted, 2);
        assert_eq!(names(&c), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_collection_004_empty() {
        let c = Collection::new();
        assert!(c.is_empty());
        assert!(!c.contains("anything"));
    }

    proptest! {
        #[test]
        fn prop_collection_batches_keep_first_seen_unique_names(
            batches in prop::collection::vec(
                prop::collection::vec("[a-cA-C]{1,3}", 0..8),
                0..6,
            ),
        ) {
            let mut c = Collection::new();
            let mut expected: Vec<String> = Vec::new();
            let mut id = 0;

            for batch in &batches {
                let before = c.len();
                let entities: Vec<Entity> = batch
                    .iter()
                    .map(|name| {
                        id += 1;
                        entity(name, id)
                    })
                    .collect();
                let inserted = c.extend_batch(entities);

                for name in batch {
                    if !expected.iter().any(|seen| seen.eq_ignore_ascii_case(name)) {
                        expected.push(name.clone());
                    }
                }
                prop_assert_eq!(c.len(), before + inserted);
            }

            prop_assert_eq!(c.len(), expected.len());
            prop_assert_eq!(names(&c), expected.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn prop_collection_distinct_pages_sum_to_length(
            sizes in prop::collection::vec(0usize..10, 0..6),
        ) {
            let mut c = Collection::new();
            let mut id = 0u64;
            let mut order = Vec::new();

            for size in &sizes {
                let batch: Vec<Entity> = (0..*size)
                    .map(|_| {
                        id += 1;
                        order.push(format!("mon-{}", id));
                        entity(&format!("mon-{}", id), id)
                    })
                    .collect();
                prop_assert_eq!(c.extend_batch(batch), *size);
            }

            prop_assert_eq!(c.len(), sizes.iter().sum::<usize>());
            prop_assert_eq!(names(&c), order.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
