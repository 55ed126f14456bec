//! # Operations Facade
//!
//! The coarse-grained command/query surface over the entity store.
//!
//! A [`ConceptBase`] owns the store and is the only mutation path: the host
//! hands every mutating command an authenticated [`Caller`], whose identity
//! and clock reading are stamped onto the record as its creator. Queries
//! carry no caller. Pure logic (validation, queries, inference) receives the
//! store as an explicit parameter; there is no ambient state.

use serde::Serialize;

use crate::error::CredenceError;
use crate::fraction::Fraction;
use crate::inference::{self, InferenceQuery, InferredRelationship};
use crate::primitives::{HAS_A, IS_A, PART_OF, PROPERTY_OF};
use crate::query::{self, ConceptCriteria, QueryPage, RelationshipCriteria};
use crate::snapshot::Snapshot;
use crate::store::EntityStore;
use crate::types::{
    Caller, CombinationMode, Concept, ConceptId, ConceptPatch, InheritanceProperties,
    LogicalProperties, Metadata, Relationship, RelationshipId, RelationshipPatch,
    RelationshipType, TypeId, ValidationRule,
};

/// The probabilistic concept base: entity store plus command surface.
#[derive(Debug, Clone, Default)]
pub struct ConceptBase {
    store: EntityStore,
}

impl ConceptBase {
    /// An empty concept base. Call [`bootstrap`](Self::bootstrap) before use
    /// so the well-known types exist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a snapshot taken by [`snapshot`](Self::snapshot).
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, CredenceError> {
        Ok(Self {
            store: snapshot.restore()?,
        })
    }

    /// Flatten the store for the persistence bridge.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.store)
    }

    /// Read-only access to the store.
    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    // =========================================================================
    // BOOTSTRAP
    // =========================================================================

    /// Register the four well-known relationship types at their reserved
    /// identifiers: `IS-A` (0), `HAS-A` (1), `PART-OF` (2), `PROPERTY-OF` (3).
    ///
    /// An active-name collision means the store is already initialized and
    /// is not an error.
    pub fn bootstrap(&mut self) -> Result<(), CredenceError> {
        let wellknown = [
            ("IS-A", IS_A, true, true),
            ("HAS-A", HAS_A, false, true),
            ("PART-OF", PART_OF, true, false),
            ("PROPERTY-OF", PROPERTY_OF, false, true),
        ];
        for (name, reserved, transitive, inheritable) in wellknown {
            let result = self.store.create_relationship_type(
                name.to_string(),
                None,
                LogicalProperties {
                    transitive,
                    symmetric: false,
                    reflexive: false,
                    irreflexive: true,
                },
                InheritanceProperties {
                    inheritable,
                    combination: CombinationMode::Multiply,
                },
                Vec::new(),
                Metadata::new(),
            );
            match result {
                Ok(id) => {
                    if id != reserved {
                        tracing::warn!(
                            name,
                            assigned = %id,
                            reserved = %reserved,
                            "bootstrap type landed off its reserved identifier"
                        );
                    }
                }
                Err(CredenceError::AlreadyExists(_)) => {
                    tracing::debug!(name, "bootstrap type already registered");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    // =========================================================================
    // CONCEPTS
    // =========================================================================

    pub fn create_concept(
        &mut self,
        caller: &Caller,
        name: String,
        description: Option<String>,
        metadata: Metadata,
    ) -> Result<ConceptId, CredenceError> {
        self.store
            .create_concept(caller.creator(), name, description, metadata)
    }

    pub fn update_concept(
        &mut self,
        caller: &Caller,
        id: ConceptId,
        patch: ConceptPatch,
    ) -> Result<(), CredenceError> {
        self.store.update_concept(caller, id, patch)
    }

    pub fn get_concept(&self, id: ConceptId) -> Result<Concept, CredenceError> {
        self.store.get_concept(id)
    }

    #[must_use]
    pub fn query_concepts(&self, criteria: &ConceptCriteria) -> QueryPage<Concept> {
        query::query_concepts(&self.store, criteria)
    }

    // =========================================================================
    // RELATIONSHIP TYPES
    // =========================================================================

    pub fn create_relationship_type(
        &mut self,
        name: String,
        description: Option<String>,
        logical: LogicalProperties,
        inheritance: InheritanceProperties,
        validation: Vec<ValidationRule>,
        metadata: Metadata,
    ) -> Result<TypeId, CredenceError> {
        self.store
            .create_relationship_type(name, description, logical, inheritance, validation, metadata)
    }

    pub fn get_relationship_type(&self, id: TypeId) -> Result<RelationshipType, CredenceError> {
        self.store.get_relationship_type(id)
    }

    pub fn deprecate_relationship_type(
        &mut self,
        id: TypeId,
        replaced_by: Option<TypeId>,
        reason: String,
    ) -> Result<(), CredenceError> {
        self.store.deprecate_type(id, replaced_by, reason)
    }

    // =========================================================================
    // RELATIONSHIPS
    // =========================================================================

    /// Assert a relationship. Probability and confidence arrive as raw
    /// `(numerator, denominator)` boundary input; a malformed probability is
    /// a validation error while a malformed confidence keeps its own error
    /// kind for wire compatibility.
    #[allow(clippy::too_many_arguments)]
    pub fn assert_relationship(
        &mut self,
        caller: &Caller,
        from: ConceptId,
        to: ConceptId,
        type_id: TypeId,
        probability: (u64, u64),
        confidence: (u64, u64),
        metadata: Metadata,
    ) -> Result<RelationshipId, CredenceError> {
        let probability = Fraction::new(probability.0, probability.1)?;
        let confidence = Fraction::new(confidence.0, confidence.1).map_err(|_| {
            CredenceError::InvalidConfidence {
                value: format!("{}/{}", confidence.0, confidence.1),
                reason: "confidence must be a fraction in [0, 1] with denominator >= 1".to_string(),
            }
        })?;
        self.store.assert_relationship(
            caller.creator(),
            from,
            to,
            type_id,
            probability,
            confidence,
            metadata,
        )
    }

    pub fn update_relationship(
        &mut self,
        caller: &Caller,
        id: RelationshipId,
        patch: RelationshipPatch,
    ) -> Result<(), CredenceError> {
        self.store.update_relationship(caller, id, patch)
    }

    pub fn get_relationship(&self, id: RelationshipId) -> Result<Relationship, CredenceError> {
        self.store.get_relationship(id)
    }

    #[must_use]
    pub fn query_relationships(&self, criteria: &RelationshipCriteria) -> QueryPage<Relationship> {
        query::query_relationships(&self.store, criteria)
    }

    // =========================================================================
    // INFERENCE
    // =========================================================================

    pub fn infer_relationships(
        &self,
        query: &InferenceQuery,
    ) -> Result<Vec<InferredRelationship>, CredenceError> {
        inference::infer_relationships(&self.store, query)
    }

    // =========================================================================
    // METRICS
    // =========================================================================

    /// Counts for the host's status surface.
    #[must_use]
    pub fn metrics(&self) -> StoreMetrics {
        StoreMetrics::from_store(&self.store)
    }
}

/// Aggregate counts over the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreMetrics {
    pub concept_count: usize,
    pub relationship_count: usize,
    pub type_count: usize,
    pub active_type_count: usize,
    pub deprecated_type_count: usize,
}

impl StoreMetrics {
    #[must_use]
    pub fn from_store(store: &EntityStore) -> Self {
        let active_type_count = store
            .relationship_types()
            .filter(|t| t.status.is_active())
            .count();
        Self {
            concept_count: store.concept_count(),
            relationship_count: store.relationship_count(),
            type_count: store.type_count(),
            active_type_count,
            deprecated_type_count: store.type_count() - active_type_count,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
