//! # Snapshot Bridge
//!
//! Flattens the entity store into ordered `(id, record)` sequences across
//! host lifecycle boundaries and rebuilds it on resume.
//!
//! The runtime mappings are the source of truth at steady state; the flat
//! sequences are authoritative only across the boundary. Restoring consumes
//! the snapshot, so the sequences are reclaimed once the maps are rebuilt.
//! Adjacency caches are not trusted from the wire: they are rebuilt from the
//! relationship sequence. Restore is idempotent: resuming twice from the
//! same snapshot produces equal stores.

use serde::{Deserialize, Serialize};

use crate::error::CredenceError;
use crate::store::EntityStore;
use crate::types::{Concept, ConceptId, Relationship, RelationshipId, RelationshipType, TypeId};

/// The durable form of the store: three ordered `(id, record)` sequences
/// plus the three identifier counters, saved separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub concepts: Vec<(ConceptId, Concept)>,
    pub relationships: Vec<(RelationshipId, Relationship)>,
    pub types: Vec<(TypeId, RelationshipType)>,
    pub next_concept_id: u64,
    pub next_relationship_id: u64,
    pub next_type_id: u64,
}

impl From<&EntityStore> for Snapshot {
    fn from(store: &EntityStore) -> Self {
        let (next_concept_id, next_relationship_id, next_type_id) = store.counters();
        Self {
            concepts: store.concepts().map(|c| (c.id, c.clone())).collect(),
            relationships: store.relationships().map(|r| (r.id, r.clone())).collect(),
            types: store.relationship_types().map(|t| (t.id, t.clone())).collect(),
            next_concept_id,
            next_relationship_id,
            next_type_id,
        }
    }
}

impl Snapshot {
    /// Rebuild a store, consuming the flat sequences.
    ///
    /// Fails with a system error when the snapshot is internally
    /// inconsistent (a relationship referencing a missing concept or type).
    pub fn restore(self) -> Result<EntityStore, CredenceError> {
        EntityStore::from_parts(
            self.concepts,
            self.relationships,
            self.types,
            (
                self.next_concept_id,
                self.next_relationship_id,
                self.next_type_id,
            ),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fraction::Fraction;
    use crate::types::{
        Caller, InheritanceProperties, LogicalProperties, Metadata, PrincipalId, Timestamp,
    };

    fn seeded_store() -> EntityStore {
        let mut store = EntityStore::new();
        let creator = Caller::new(PrincipalId::new("u1"), Timestamp(5)).creator();
        let t = store
            .create_relationship_type(
                "IS-A".to_string(),
                None,
                LogicalProperties {
                    transitive: true,
                    irreflexive: true,
                    ..LogicalProperties::default()
                },
                InheritanceProperties::default(),
                Vec::new(),
                Metadata::new(),
            )
            .expect("type");
        let a = store
            .create_concept(creator.clone(), "A".to_string(), None, Metadata::new())
            .expect("concept");
        let b = store
            .create_concept(creator.clone(), "B".to_string(), None, Metadata::new())
            .expect("concept");
        store
            .assert_relationship(
                creator,
                a,
                b,
                t,
                Fraction::new(9, 10).expect("fraction"),
                Fraction::one(),
                Metadata::new(),
            )
            .expect("assert");
        store
    }

    #[test]
    fn roundtrip_preserves_entities_and_counters() {
        let store = seeded_store();
        let snapshot = Snapshot::from(&store);
        let restored = snapshot.restore().expect("restore");

        assert_eq!(restored.concept_count(), store.concept_count());
        assert_eq!(restored.relationship_count(), store.relationship_count());
        assert_eq!(restored.type_count(), store.type_count());
        assert_eq!(restored.counters(), store.counters());
        assert_eq!(restored.list_concepts(), store.list_concepts());
        assert_eq!(restored.list_relationships(), store.list_relationships());
    }

    #[test]
    fn restore_is_idempotent() {
        let store = seeded_store();
        let snapshot = Snapshot::from(&store);
        let once = snapshot.clone().restore().expect("restore");
        let twice = snapshot.restore().expect("restore");
        assert_eq!(once.list_concepts(), twice.list_concepts());
        assert_eq!(once.list_relationships(), twice.list_relationships());
        assert_eq!(once.list_relationship_types(), twice.list_relationship_types());
        assert_eq!(once.counters(), twice.counters());
    }

    #[test]
    fn adjacency_is_rebuilt_from_relationships() {
        let store = seeded_store();
        let mut snapshot = Snapshot::from(&store);
        // Corrupt the serialized caches; restore must not trust them.
        for (_, concept) in &mut snapshot.concepts {
            concept.outgoing.clear();
            concept.incoming.clear();
        }
        let restored = snapshot.restore().expect("restore");
        assert_eq!(restored.list_concepts(), store.list_concepts());
    }

    #[test]
    fn dangling_relationship_is_a_system_error() {
        let store = seeded_store();
        let mut snapshot = Snapshot::from(&store);
        snapshot.concepts.pop();
        let err = snapshot.restore().expect_err("dangling endpoint");
        assert!(matches!(err, CredenceError::System(_)));
    }

    #[test]
    fn restored_counters_never_reuse_identifiers() {
        let store = seeded_store();
        let mut snapshot = Snapshot::from(&store);
        // A corrupt counter lower than an allocated id must not cause reuse.
        snapshot.next_concept_id = 0;
        let mut restored = snapshot.restore().expect("restore");
        let creator = Caller::new(PrincipalId::new("u1"), Timestamp(9)).creator();
        let fresh = restored
            .create_concept(creator, "C".to_string(), None, Metadata::new())
            .expect("concept");
        assert!(restored
            .list_concepts()
            .iter()
            .filter(|c| c.id == fresh)
            .count()
            == 1);
        assert_eq!(fresh, ConceptId(2));
    }
}
