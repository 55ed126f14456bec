//! # Entity Store
//!
//! In-memory storage for concepts, relationships, and relationship types,
//! each keyed by a monotonically increasing identifier.
//!
//! All maps are `BTreeMap` for deterministic ordering. Because identifiers
//! are allocated strictly increasing and never reused, iterating a map in
//! key order IS insertion order; every listing relies on this.
//!
//! The store owns all records. Other components borrow by identifier, never
//! by reference into internal storage; read accessors hand out deep
//! snapshots (clones).

use std::collections::BTreeMap;

use crate::error::{CredenceError, ValidationCode};
use crate::fraction::Fraction;
use crate::primitives::{MAX_METADATA_ENTRIES, MAX_NAME_LENGTH};
use crate::types::{
    Caller, Concept, ConceptId, ConceptPatch, Creator, InheritanceProperties, LogicalProperties,
    Metadata, Relationship, RelationshipId, RelationshipPatch, RelationshipType, TypeId,
    TypeStatus, ValidationRule,
};
use crate::validation;

/// The three entity mappings and their identifier counters.
///
/// This is the process-wide mutable state of the kernel: created once at
/// startup, threaded as an explicit parameter through the pure logic
/// (validation, queries, inference), and mutated only through the operations
/// facade.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    concepts: BTreeMap<ConceptId, Concept>,
    relationships: BTreeMap<RelationshipId, Relationship>,
    types: BTreeMap<TypeId, RelationshipType>,
    next_concept_id: u64,
    next_relationship_id: u64,
    next_type_id: u64,
}

impl EntityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // CONCEPTS
    // =========================================================================

    /// Create a concept and return its fresh identifier.
    ///
    /// The name must be non-empty and within the boundary length limit.
    pub fn create_concept(
        &mut self,
        creator: Creator,
        name: String,
        description: Option<String>,
        metadata: Metadata,
    ) -> Result<ConceptId, CredenceError> {
        validate_name(&name, "concept name")?;
        validate_metadata(&metadata)?;

        let id = ConceptId(self.next_concept_id);
        self.next_concept_id += 1;

        let created_at = creator.at;
        tracing::debug!(id = %id, name = %name, "concept created");
        self.concepts.insert(
            id,
            Concept {
                id,
                name,
                description,
                creator,
                created_at,
                modified_at: created_at,
                outgoing: Vec::new(),
                incoming: Vec::new(),
                metadata,
            },
        );
        Ok(id)
    }

    /// Update a concept in place. Only the creating principal may do this;
    /// identifiers and creator never change; `modified_at` is refreshed.
    pub fn update_concept(
        &mut self,
        caller: &Caller,
        id: ConceptId,
        patch: ConceptPatch,
    ) -> Result<(), CredenceError> {
        if patch.is_empty() {
            return Err(CredenceError::InvalidOperation(
                "concept update carries no fields".to_string(),
            ));
        }
        if let Some(name) = &patch.name {
            validate_name(name, "concept name")?;
        }
        if let Some(metadata) = &patch.metadata {
            validate_metadata(metadata)?;
        }

        let concept = self
            .concepts
            .get_mut(&id)
            .ok_or_else(|| CredenceError::NotFound(format!("concept {id}")))?;
        ensure_creator(&concept.creator, caller, "modify", "concept")?;

        if let Some(name) = patch.name {
            concept.name = name;
        }
        if let Some(description) = patch.description {
            concept.description = Some(description);
        }
        if let Some(metadata) = patch.metadata {
            concept.metadata = metadata;
        }
        concept.modified_at = caller.at;
        tracing::debug!(id = %id, "concept updated");
        Ok(())
    }

    /// Deep snapshot of a concept.
    pub fn get_concept(&self, id: ConceptId) -> Result<Concept, CredenceError> {
        self.concepts
            .get(&id)
            .cloned()
            .ok_or_else(|| CredenceError::NotFound(format!("concept {id}")))
    }

    /// All concepts in insertion order, as deep snapshots.
    #[must_use]
    pub fn list_concepts(&self) -> Vec<Concept> {
        self.concepts.values().cloned().collect()
    }

    /// Borrow a concept (kernel-internal reads).
    #[must_use]
    pub fn concept(&self, id: ConceptId) -> Option<&Concept> {
        self.concepts.get(&id)
    }

    /// Iterate concepts in insertion order.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }

    #[must_use]
    pub fn contains_concept(&self, id: ConceptId) -> bool {
        self.concepts.contains_key(&id)
    }

    #[must_use]
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    // =========================================================================
    // RELATIONSHIP TYPES
    // =========================================================================

    /// Create a relationship type and return its fresh identifier.
    ///
    /// Rejects a name already carried by an active type, and the
    /// `reflexive && irreflexive` contradiction.
    pub fn create_relationship_type(
        &mut self,
        name: String,
        description: Option<String>,
        logical: LogicalProperties,
        inheritance: InheritanceProperties,
        validation: Vec<ValidationRule>,
        metadata: Metadata,
    ) -> Result<TypeId, CredenceError> {
        validate_name(&name, "relationship type name")?;
        validate_metadata(&metadata)?;
        if logical.reflexive && logical.irreflexive {
            return Err(CredenceError::validation(
                ValidationCode::ReflexivityConflict,
                "a type cannot be both reflexive and irreflexive",
            ));
        }
        if self
            .types
            .values()
            .any(|t| t.status.is_active() && t.name == name)
        {
            return Err(CredenceError::AlreadyExists(format!(
                "active relationship type named {name:?}"
            )));
        }

        let id = TypeId(self.next_type_id);
        self.next_type_id += 1;

        tracing::debug!(id = %id, name = %name, "relationship type created");
        self.types.insert(
            id,
            RelationshipType {
                id,
                name,
                description,
                logical,
                inheritance,
                validation,
                status: TypeStatus::Active,
                metadata,
            },
        );
        Ok(id)
    }

    /// Transition a type from `Active` to `Deprecated`.
    ///
    /// The type is retained so existing relationships stay interpretable;
    /// new assertions against it fail. `replaced_by` must resolve when given.
    pub fn deprecate_type(
        &mut self,
        id: TypeId,
        replaced_by: Option<TypeId>,
        reason: String,
    ) -> Result<(), CredenceError> {
        if let Some(replacement) = replaced_by {
            if !self.types.contains_key(&replacement) {
                return Err(CredenceError::NotFound(format!(
                    "replacement relationship type {replacement}"
                )));
            }
        }
        let rtype = self
            .types
            .get_mut(&id)
            .ok_or_else(|| CredenceError::NotFound(format!("relationship type {id}")))?;
        if !rtype.status.is_active() {
            return Err(CredenceError::InvalidOperation(format!(
                "relationship type {id} is already deprecated"
            )));
        }
        rtype.status = TypeStatus::Deprecated {
            replaced_by,
            reason,
        };
        tracing::debug!(id = %id, "relationship type deprecated");
        Ok(())
    }

    /// Deep snapshot of a relationship type.
    pub fn get_relationship_type(&self, id: TypeId) -> Result<RelationshipType, CredenceError> {
        self.types
            .get(&id)
            .cloned()
            .ok_or_else(|| CredenceError::NotFound(format!("relationship type {id}")))
    }

    /// All relationship types in insertion order, as deep snapshots.
    #[must_use]
    pub fn list_relationship_types(&self) -> Vec<RelationshipType> {
        self.types.values().cloned().collect()
    }

    /// Borrow a relationship type (kernel-internal reads).
    #[must_use]
    pub fn relationship_type(&self, id: TypeId) -> Option<&RelationshipType> {
        self.types.get(&id)
    }

    /// Iterate relationship types in insertion order.
    pub fn relationship_types(&self) -> impl Iterator<Item = &RelationshipType> {
        self.types.values()
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // =========================================================================
    // RELATIONSHIPS
    // =========================================================================

    /// Assert a relationship. The full pipeline:
    ///
    /// 1. the type must exist (deprecation is checked by the validation
    ///    engine, which also carries the replacement id into the error),
    /// 2. both concepts must exist,
    /// 3. the weights arrive as validated [`Fraction`]s,
    /// 4. the type's validation rules and logical laws must pass,
    /// 5. only then is an identifier allocated and the relationship written,
    ///    together with both adjacency entries.
    ///
    /// Every fallible step precedes the first write, so a failure leaves the
    /// store untouched and the adjacency invariant can never be observed
    /// broken.
    pub fn assert_relationship(
        &mut self,
        creator: Creator,
        from: ConceptId,
        to: ConceptId,
        type_id: TypeId,
        probability: Fraction,
        confidence: Fraction,
        metadata: Metadata,
    ) -> Result<RelationshipId, CredenceError> {
        validate_metadata(&metadata)?;
        let rtype = self
            .types
            .get(&type_id)
            .ok_or_else(|| CredenceError::NotFound(format!("relationship type {type_id}")))?;
        if !self.concepts.contains_key(&from) {
            return Err(CredenceError::NotFound(format!("source concept {from}")));
        }
        if !self.concepts.contains_key(&to) {
            return Err(CredenceError::NotFound(format!("target concept {to}")));
        }

        let draft = validation::AssertionDraft {
            from,
            to,
            type_id,
            metadata: &metadata,
        };
        if let Err(err) = validation::validate_assertion(self, &draft, rtype) {
            tracing::warn!(from = %from, to = %to, type_id = %type_id, error = %err, "assertion rejected");
            return Err(err);
        }

        let id = RelationshipId(self.next_relationship_id);
        self.next_relationship_id += 1;

        self.relationships.insert(
            id,
            Relationship {
                id,
                from,
                to,
                type_id,
                probability,
                confidence,
                creator,
                metadata,
            },
        );
        // Both adjacency writes are infallible: the invariant that every
        // stored relationship appears exactly once in each list holds
        // unconditionally after this point.
        self.concepts
            .get_mut(&from)
            .expect("source existence checked above")
            .outgoing
            .push(id);
        self.concepts
            .get_mut(&to)
            .expect("target existence checked above")
            .incoming
            .push(id);
        tracing::debug!(id = %id, from = %from, to = %to, type_id = %type_id, "relationship asserted");
        Ok(id)
    }

    /// Update a relationship in place. Only the creating principal may do
    /// this; endpoints, type, identifier, and creator never change.
    pub fn update_relationship(
        &mut self,
        caller: &Caller,
        id: RelationshipId,
        patch: RelationshipPatch,
    ) -> Result<(), CredenceError> {
        if patch.is_empty() {
            return Err(CredenceError::InvalidOperation(
                "relationship update carries no fields".to_string(),
            ));
        }
        let probability = patch
            .probability
            .map(|(n, d)| Fraction::new(n, d))
            .transpose()?;
        if let Some(metadata) = &patch.metadata {
            validate_metadata(metadata)?;
        }

        let relationship = self
            .relationships
            .get_mut(&id)
            .ok_or_else(|| CredenceError::NotFound(format!("relationship {id}")))?;
        ensure_creator(&relationship.creator, caller, "modify", "relationship")?;

        if let Some(probability) = probability {
            relationship.probability = probability;
        }
        if let Some(metadata) = patch.metadata {
            relationship.metadata = metadata;
        }
        tracing::debug!(id = %id, "relationship updated");
        Ok(())
    }

    /// Deep snapshot of a relationship.
    pub fn get_relationship(&self, id: RelationshipId) -> Result<Relationship, CredenceError> {
        self.relationships
            .get(&id)
            .cloned()
            .ok_or_else(|| CredenceError::NotFound(format!("relationship {id}")))
    }

    /// All relationships in insertion order, as deep snapshots.
    #[must_use]
    pub fn list_relationships(&self) -> Vec<Relationship> {
        self.relationships.values().cloned().collect()
    }

    /// Borrow a relationship (kernel-internal reads).
    #[must_use]
    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.get(&id)
    }

    /// Iterate relationships in insertion order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Whether any relationship of `type_id` runs `from -> to`.
    /// Backs the `UniqueTarget` validation rule.
    #[must_use]
    pub fn has_relationship(&self, type_id: TypeId, from: ConceptId, to: ConceptId) -> bool {
        // The source's outgoing list bounds the scan to edges touching `from`.
        self.concepts.get(&from).is_some_and(|concept| {
            concept.outgoing.iter().any(|rid| {
                self.relationships
                    .get(rid)
                    .is_some_and(|r| r.type_id == type_id && r.to == to)
            })
        })
    }

    // =========================================================================
    // COUNTER ACCESS (snapshot support)
    // =========================================================================

    pub(crate) fn counters(&self) -> (u64, u64, u64) {
        (
            self.next_concept_id,
            self.next_relationship_id,
            self.next_type_id,
        )
    }

    /// Rebuild a store from flattened entity sequences and saved counters.
    ///
    /// Adjacency caches are NOT trusted from the wire: both lists are cleared
    /// and rebuilt from the relationship sequence, and every relationship's
    /// endpoints and type must resolve (a dangling reference means a corrupt
    /// snapshot, which is a system error rather than user input).
    pub(crate) fn from_parts(
        concepts: Vec<(ConceptId, Concept)>,
        relationships: Vec<(RelationshipId, Relationship)>,
        types: Vec<(TypeId, RelationshipType)>,
        counters: (u64, u64, u64),
    ) -> Result<Self, CredenceError> {
        let mut store = Self {
            next_concept_id: counters.0,
            next_relationship_id: counters.1,
            next_type_id: counters.2,
            ..Self::default()
        };

        for (id, mut concept) in concepts {
            concept.outgoing.clear();
            concept.incoming.clear();
            if id.0 >= store.next_concept_id {
                store.next_concept_id = id.0 + 1;
            }
            store.concepts.insert(id, concept);
        }
        for (id, rtype) in types {
            if id.0 >= store.next_type_id {
                store.next_type_id = id.0 + 1;
            }
            store.types.insert(id, rtype);
        }
        for (id, relationship) in relationships {
            if !store.types.contains_key(&relationship.type_id) {
                return Err(corrupt(format!(
                    "relationship {id} references missing type {}",
                    relationship.type_id
                )));
            }
            let (from, to) = (relationship.from, relationship.to);
            if !store.concepts.contains_key(&from) || !store.concepts.contains_key(&to) {
                return Err(corrupt(format!(
                    "relationship {id} references a missing concept"
                )));
            }
            if id.0 >= store.next_relationship_id {
                store.next_relationship_id = id.0 + 1;
            }
            store.relationships.insert(id, relationship);
            store
                .concepts
                .get_mut(&from)
                .expect("endpoint checked above")
                .outgoing
                .push(id);
            store
                .concepts
                .get_mut(&to)
                .expect("endpoint checked above")
                .incoming
                .push(id);
        }
        Ok(store)
    }
}

fn corrupt(message: String) -> CredenceError {
    CredenceError::System(format!("corrupt snapshot: {message}"))
}

// =============================================================================
// BOUNDARY GUARDS
// =============================================================================

fn validate_name(name: &str, field: &str) -> Result<(), CredenceError> {
    if name.is_empty() {
        return Err(CredenceError::validation(
            ValidationCode::EmptyName,
            format!("{field} must not be empty"),
        ));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(CredenceError::validation(
            ValidationCode::LimitExceeded,
            format!("{field} exceeds {MAX_NAME_LENGTH} bytes"),
        ));
    }
    Ok(())
}

fn validate_metadata(metadata: &Metadata) -> Result<(), CredenceError> {
    if metadata.len() > MAX_METADATA_ENTRIES {
        return Err(CredenceError::validation(
            ValidationCode::LimitExceeded,
            format!("metadata exceeds {MAX_METADATA_ENTRIES} entries"),
        ));
    }
    Ok(())
}

fn ensure_creator(
    creator: &Creator,
    caller: &Caller,
    operation: &str,
    resource: &str,
) -> Result<(), CredenceError> {
    if creator.principal == caller.principal {
        Ok(())
    } else {
        Err(CredenceError::PermissionDenied {
            operation: operation.to_string(),
            resource: resource.to_string(),
            reason: format!(
                "only the creator {:?} may {operation} this {resource}",
                creator.principal.as_str()
            ),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrincipalId, Timestamp};

    fn caller(name: &str) -> Caller {
        Caller::new(PrincipalId::new(name), Timestamp(1_000))
    }

    fn add_concept(store: &mut EntityStore, name: &str) -> ConceptId {
        store
            .create_concept(
                caller("u1").creator(),
                name.to_string(),
                None,
                Metadata::new(),
            )
            .expect("create concept")
    }

    fn add_type(store: &mut EntityStore, name: &str, logical: LogicalProperties) -> TypeId {
        store
            .create_relationship_type(
                name.to_string(),
                None,
                logical,
                InheritanceProperties::default(),
                Vec::new(),
                Metadata::new(),
            )
            .expect("create type")
    }

    #[test]
    fn concept_ids_are_monotonic() {
        let mut store = EntityStore::new();
        let a = add_concept(&mut store, "A");
        let b = add_concept(&mut store, "B");
        assert!(a < b);
        assert_eq!(store.concept_count(), 2);
    }

    #[test]
    fn empty_concept_name_rejected() {
        let mut store = EntityStore::new();
        let err = store
            .create_concept(caller("u1").creator(), String::new(), None, Metadata::new())
            .expect_err("empty name");
        assert_eq!(err.validation_code(), Some(ValidationCode::EmptyName));
    }

    #[test]
    fn duplicate_active_type_name_rejected() {
        let mut store = EntityStore::new();
        add_type(&mut store, "IS-A", LogicalProperties::default());
        let err = store
            .create_relationship_type(
                "IS-A".to_string(),
                None,
                LogicalProperties::default(),
                InheritanceProperties::default(),
                Vec::new(),
                Metadata::new(),
            )
            .expect_err("duplicate");
        assert!(matches!(err, CredenceError::AlreadyExists(_)));
    }

    #[test]
    fn deprecated_type_name_may_be_reused() {
        let mut store = EntityStore::new();
        let t1 = add_type(&mut store, "T", LogicalProperties::default());
        store
            .deprecate_type(t1, None, "obsolete".to_string())
            .expect("deprecate");
        let t2 = add_type(&mut store, "T", LogicalProperties::default());
        assert!(t2 > t1);
    }

    #[test]
    fn reflexive_irreflexive_conflict_rejected() {
        let mut store = EntityStore::new();
        let err = store
            .create_relationship_type(
                "broken".to_string(),
                None,
                LogicalProperties {
                    reflexive: true,
                    irreflexive: true,
                    ..LogicalProperties::default()
                },
                InheritanceProperties::default(),
                Vec::new(),
                Metadata::new(),
            )
            .expect_err("conflict");
        assert_eq!(
            err.validation_code(),
            Some(ValidationCode::ReflexivityConflict)
        );
    }

    #[test]
    fn assertion_maintains_adjacency() {
        let mut store = EntityStore::new();
        let t = add_type(&mut store, "LINKS", LogicalProperties::default());
        let a = add_concept(&mut store, "A");
        let b = add_concept(&mut store, "B");

        let rid = store
            .assert_relationship(
                caller("u1").creator(),
                a,
                b,
                t,
                Fraction::one(),
                Fraction::one(),
                Metadata::new(),
            )
            .expect("assert");

        let source = store.get_concept(a).expect("get");
        let target = store.get_concept(b).expect("get");
        assert_eq!(source.outgoing, vec![rid]);
        assert!(source.incoming.is_empty());
        assert_eq!(target.incoming, vec![rid]);
    }

    #[test]
    fn failed_assertion_leaves_store_untouched() {
        let mut store = EntityStore::new();
        let t = add_type(
            &mut store,
            "STRICT",
            LogicalProperties {
                irreflexive: true,
                ..LogicalProperties::default()
            },
        );
        let a = add_concept(&mut store, "A");

        let err = store
            .assert_relationship(
                caller("u1").creator(),
                a,
                a,
                t,
                Fraction::one(),
                Fraction::one(),
                Metadata::new(),
            )
            .expect_err("irreflexive violation");
        assert_eq!(
            err.validation_code(),
            Some(ValidationCode::IrreflexiveViolation)
        );
        assert_eq!(store.relationship_count(), 0);
        assert!(store.get_concept(a).expect("get").outgoing.is_empty());
    }

    #[test]
    fn assertion_against_missing_concept_fails() {
        let mut store = EntityStore::new();
        let t = add_type(&mut store, "LINKS", LogicalProperties::default());
        let a = add_concept(&mut store, "A");
        let err = store
            .assert_relationship(
                caller("u1").creator(),
                a,
                ConceptId(999),
                t,
                Fraction::one(),
                Fraction::one(),
                Metadata::new(),
            )
            .expect_err("missing target");
        assert!(matches!(err, CredenceError::NotFound(_)));
    }

    #[test]
    fn update_concept_requires_creator() {
        let mut store = EntityStore::new();
        let id = add_concept(&mut store, "C");

        let err = store
            .update_concept(
                &caller("intruder"),
                id,
                ConceptPatch {
                    name: Some("C'".to_string()),
                    ..ConceptPatch::default()
                },
            )
            .expect_err("permission");
        assert!(matches!(err, CredenceError::PermissionDenied { .. }));
        assert_eq!(store.get_concept(id).expect("get").name, "C");
    }

    #[test]
    fn update_concept_refreshes_modified_at() {
        let mut store = EntityStore::new();
        let id = add_concept(&mut store, "C");
        let later = Caller::new(PrincipalId::new("u1"), Timestamp(9_999));
        store
            .update_concept(
                &later,
                id,
                ConceptPatch {
                    description: Some("updated".to_string()),
                    ..ConceptPatch::default()
                },
            )
            .expect("update");
        let concept = store.get_concept(id).expect("get");
        assert_eq!(concept.modified_at, Timestamp(9_999));
        assert_eq!(concept.created_at, Timestamp(1_000));
    }

    #[test]
    fn empty_patch_is_invalid_operation() {
        let mut store = EntityStore::new();
        let id = add_concept(&mut store, "C");
        let err = store
            .update_concept(&caller("u1"), id, ConceptPatch::default())
            .expect_err("empty patch");
        assert!(matches!(err, CredenceError::InvalidOperation(_)));
    }

    #[test]
    fn update_relationship_validates_probability() {
        let mut store = EntityStore::new();
        let t = add_type(&mut store, "LINKS", LogicalProperties::default());
        let a = add_concept(&mut store, "A");
        let b = add_concept(&mut store, "B");
        let rid = store
            .assert_relationship(
                caller("u1").creator(),
                a,
                b,
                t,
                Fraction::one(),
                Fraction::one(),
                Metadata::new(),
            )
            .expect("assert");

        let err = store
            .update_relationship(
                &caller("u1"),
                rid,
                RelationshipPatch {
                    probability: Some((5, 4)),
                    metadata: None,
                },
            )
            .expect_err("out of range");
        assert_eq!(err.validation_code(), Some(ValidationCode::InvalidFraction));

        store
            .update_relationship(
                &caller("u1"),
                rid,
                RelationshipPatch {
                    probability: Some((3, 4)),
                    metadata: None,
                },
            )
            .expect("update");
        assert_eq!(
            store.get_relationship(rid).expect("get").probability,
            Fraction::new(3, 4).expect("fraction")
        );
    }

    #[test]
    fn deprecate_requires_existing_replacement() {
        let mut store = EntityStore::new();
        let t = add_type(&mut store, "T", LogicalProperties::default());
        let err = store
            .deprecate_type(t, Some(TypeId(42)), "gone".to_string())
            .expect_err("missing replacement");
        assert!(matches!(err, CredenceError::NotFound(_)));
        assert!(store.get_relationship_type(t).expect("get").status.is_active());
    }

    #[test]
    fn double_deprecation_is_invalid_operation() {
        let mut store = EntityStore::new();
        let t = add_type(&mut store, "T", LogicalProperties::default());
        store
            .deprecate_type(t, None, "obsolete".to_string())
            .expect("deprecate");
        let err = store
            .deprecate_type(t, None, "again".to_string())
            .expect_err("double");
        assert!(matches!(err, CredenceError::InvalidOperation(_)));
    }

    #[test]
    fn has_relationship_scans_by_type_and_endpoints() {
        let mut store = EntityStore::new();
        let t1 = add_type(&mut store, "T1", LogicalProperties::default());
        let t2 = add_type(&mut store, "T2", LogicalProperties::default());
        let a = add_concept(&mut store, "A");
        let b = add_concept(&mut store, "B");
        store
            .assert_relationship(
                caller("u1").creator(),
                a,
                b,
                t1,
                Fraction::one(),
                Fraction::one(),
                Metadata::new(),
            )
            .expect("assert");

        assert!(store.has_relationship(t1, a, b));
        assert!(!store.has_relationship(t2, a, b));
        assert!(!store.has_relationship(t1, b, a));
    }
}
