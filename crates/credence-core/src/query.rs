//! # Query Engine
//!
//! Declarative filtering over concepts and relationships.
//!
//! Every criterion field is optional; an absent field matches everything and
//! present fields AND-combine. Results preserve the entity store's insertion
//! order. The page envelope is populated but always holds a single page with
//! all matches; true pagination is a deliberate future extension and lands
//! without an API break.

use serde::{Deserialize, Serialize};

use crate::fraction::Fraction;
use crate::store::EntityStore;
use crate::types::{Concept, ConceptId, Metadata, PrincipalId, Relationship, TypeId};

// =============================================================================
// CRITERIA
// =============================================================================

/// Filter over concepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConceptCriteria {
    /// Byte-wise, case-sensitive, exact substring of the concept name.
    pub name_contains: Option<String>,
    /// Every pair must be present verbatim on the concept.
    pub metadata: Metadata,
    /// Exact creating principal.
    pub creator: Option<PrincipalId>,
}

/// Filter over relationships.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipCriteria {
    pub from: Option<ConceptId>,
    pub to: Option<ConceptId>,
    pub type_id: Option<TypeId>,
    pub creator: Option<PrincipalId>,
    /// Inclusive lower probability bound, compared by cross-multiplication.
    pub min_probability: Option<Fraction>,
    /// Inclusive upper probability bound.
    pub max_probability: Option<Fraction>,
    /// Every pair must be present verbatim on the relationship.
    pub metadata: Metadata,
}

// =============================================================================
// RESULT ENVELOPE
// =============================================================================

/// One page of query results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryPage<T> {
    pub items: Vec<T>,
    /// Total matches across all pages.
    pub total: usize,
    /// Zero-based page index.
    pub page: usize,
    pub page_size: usize,
}

impl<T> QueryPage<T> {
    /// Wrap all matches into the single page the engine currently returns.
    #[must_use]
    fn single(items: Vec<T>) -> Self {
        let total = items.len();
        Self {
            items,
            total,
            page: 0,
            page_size: total,
        }
    }
}

// =============================================================================
// EXECUTION
// =============================================================================

/// Concepts matching `criteria`, in insertion order, as deep snapshots.
#[must_use]
pub fn query_concepts(store: &EntityStore, criteria: &ConceptCriteria) -> QueryPage<Concept> {
    let items = store
        .concepts()
        .filter(|concept| concept_matches(concept, criteria))
        .cloned()
        .collect();
    QueryPage::single(items)
}

/// Relationships matching `criteria`, in insertion order, as deep snapshots.
#[must_use]
pub fn query_relationships(
    store: &EntityStore,
    criteria: &RelationshipCriteria,
) -> QueryPage<Relationship> {
    let items = store
        .relationships()
        .filter(|relationship| relationship_matches(relationship, criteria))
        .cloned()
        .collect();
    QueryPage::single(items)
}

fn concept_matches(concept: &Concept, criteria: &ConceptCriteria) -> bool {
    if let Some(needle) = &criteria.name_contains {
        // Standard substring search: the overlapping-match misses of a
        // hand-rolled two-cursor scan are exactly what this avoids.
        if !concept.name.contains(needle.as_str()) {
            return false;
        }
    }
    if let Some(creator) = &criteria.creator {
        if &concept.creator.principal != creator {
            return false;
        }
    }
    metadata_matches(&concept.metadata, &criteria.metadata)
}

fn relationship_matches(relationship: &Relationship, criteria: &RelationshipCriteria) -> bool {
    if criteria.from.is_some_and(|from| relationship.from != from) {
        return false;
    }
    if criteria.to.is_some_and(|to| relationship.to != to) {
        return false;
    }
    if criteria
        .type_id
        .is_some_and(|type_id| relationship.type_id != type_id)
    {
        return false;
    }
    if let Some(creator) = &criteria.creator {
        if &relationship.creator.principal != creator {
            return false;
        }
    }
    if let Some(min) = &criteria.min_probability {
        if relationship.probability.lt(min) {
            return false;
        }
    }
    if let Some(max) = &criteria.max_probability {
        if !relationship.probability.le(max) {
            return false;
        }
    }
    metadata_matches(&relationship.metadata, &criteria.metadata)
}

fn metadata_matches(present: &Metadata, required: &Metadata) -> bool {
    required.iter().all(|(k, v)| present.contains_pair(k, v))
}

// =============================================================================
// TESTS
// =============================================================================
