//! # Inference Engine
//!
//! Bounded-depth, cycle-avoiding derivation of relationships under the
//! symmetric and transitive laws of a relationship type, with exact
//! probability and confidence propagation.
//!
//! ## Algorithm
//!
//! A single-source traversal from the starting concept:
//!
//! - **Step 1 (incident edges).** Every stored edge of the queried type
//!   incident to the start is visited in entity-store insertion order.
//!   Outgoing edges that pass both thresholds are emitted as `Direct` (and,
//!   for symmetric types, their mirror as `Symmetric`); incoming edges of a
//!   symmetric type are mirrored into `start -> source` results, which is how
//!   a query starting at either endpoint of a symmetric edge sees it.
//! - **Step 2 (transitive expansion).** For a transitive type, each emitted
//!   `Direct` edge is expanded depth-first along same-typed outgoing edges,
//!   multiplying probabilities and pessimistically combining confidences at
//!   every hop.
//!
//! ## First path wins
//!
//! A `(start, target)` pair is emitted at most once: the first derivation
//! found in insertion order claims the pair, and later paths to the same
//! target are neither emitted nor expanded. Together with the depth bound
//! this guarantees termination on cyclic graphs. The policy is
//! order-sensitive: reordering assertions can change which derivation (and
//! therefore which weights) a pair carries.
//!
//! Both propagation operators are non-increasing, so once an accumulated
//! weight falls below its threshold no deeper path can recover; such
//! branches are pruned whole.
//!
//! Inference is a pure read: it returns `Ok` even when empty. The only
//! failures are malformed queries (unknown start concept or type).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CredenceError;
use crate::fraction::Fraction;
use crate::primitives::IS_A;
use crate::store::EntityStore;
use crate::types::{ConceptId, Creator, Metadata, Relationship, RelationshipId, TypeId};

// =============================================================================
// QUERY & RESULT TYPES
// =============================================================================

/// An inference request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceQuery {
    pub start: ConceptId,
    /// Defaults to the bootstrap `IS-A` type when absent.
    pub relationship_type: Option<TypeId>,
    /// Unbounded when absent; the visited set still bounds every walk by the
    /// number of stored concepts.
    pub max_depth: Option<usize>,
    /// Inclusive threshold, `0/1` when absent.
    pub min_probability: Option<Fraction>,
    /// Inclusive threshold, `0/1` when absent.
    pub min_confidence: Option<Fraction>,
}

impl InferenceQuery {
    /// A query with defaults for everything but the start concept.
    #[must_use]
    pub fn from_concept(start: ConceptId) -> Self {
        Self {
            start,
            relationship_type: None,
            max_depth: None,
            min_probability: None,
            min_confidence: None,
        }
    }
}

/// How an inferred relationship was derived.
///
/// Derived results carry no identifier of their own; the tag names the
/// originating stored edge(s) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Provenance {
    /// A stored edge, passed through unchanged.
    Direct(RelationshipId),
    /// The mirror of a stored edge of a symmetric type.
    Symmetric(RelationshipId),
    /// A transitive chain: the root edge out of the start concept and the
    /// final edge that reached the target, with the accumulated probability.
    Transitive {
        first: RelationshipId,
        second: RelationshipId,
        probability: Fraction,
    },
}

/// A derived relationship together with its provenance.
///
/// Creator and metadata are copied from the contributing stored edge (for a
/// transitive chain, the edge that reached the target).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredRelationship {
    pub from: ConceptId,
    pub to: ConceptId,
    pub type_id: TypeId,
    pub probability: Fraction,
    pub confidence: Fraction,
    pub creator: Creator,
    pub metadata: Metadata,
    pub provenance: Provenance,
}

// =============================================================================
// ENGINE
// =============================================================================

/// Derive relationships reachable from `query.start` under the laws of the
/// queried type.
pub fn infer_relationships(
    store: &EntityStore,
    query: &InferenceQuery,
) -> Result<Vec<InferredRelationship>, CredenceError> {
    if !store.contains_concept(query.start) {
        return Err(CredenceError::NotFound(format!(
            "starting concept {}",
            query.start
        )));
    }
    let type_id = query.relationship_type.unwrap_or(IS_A);
    let rtype = store
        .relationship_type(type_id)
        .ok_or_else(|| CredenceError::NotFound(format!("relationship type {type_id}")))?;

    let walk = Walk {
        store,
        type_id,
        start: query.start,
        max_depth: query.max_depth.unwrap_or(usize::MAX),
        min_probability: query.min_probability.clone().unwrap_or_else(Fraction::zero),
        min_confidence: query.min_confidence.clone().unwrap_or_else(Fraction::zero),
    };

    let mut visited: BTreeSet<(ConceptId, ConceptId)> = BTreeSet::new();
    let mut results = Vec::new();
    let mut roots: Vec<RelationshipId> = Vec::new();

    // Step 1: edges incident to the start concept. Merging the outgoing and
    // incoming adjacency caches through a BTreeSet restores global insertion
    // order, since relationship ids are allocated monotonically.
    let start_concept = store
        .concept(query.start)
        .expect("start existence checked above");
    let incident: BTreeSet<RelationshipId> = start_concept
        .outgoing
        .iter()
        .chain(start_concept.incoming.iter())
        .copied()
        .collect();

    for rid in incident {
        let Some(edge) = store.relationship(rid) else {
            continue;
        };
        if edge.type_id != type_id || walk.max_depth == 0 {
            continue;
        }
        let passes = walk.passes_thresholds(&edge.probability, &edge.confidence);

        if edge.from == walk.start {
            if passes && visited.insert((edge.from, edge.to)) {
                results.push(direct_result(edge));
                roots.push(edge.id);
            }
            if rtype.logical.symmetric && passes && visited.insert((edge.to, edge.from)) {
                results.push(mirror_result(edge));
            }
        } else if rtype.logical.symmetric
            && edge.to == walk.start
            && passes
            && visited.insert((edge.to, edge.from))
        {
            results.push(mirror_result(edge));
        }
    }

    // Step 2: transitive expansion from each emitted direct edge.
    if rtype.logical.transitive {
        for root in roots {
            let edge = store
                .relationship(root)
                .expect("roots were read from the store in step 1");
            walk.expand(
                edge.to,
                root,
                edge.probability.clone(),
                edge.confidence.clone(),
                1,
                &mut visited,
                &mut results,
            );
        }
    }

    tracing::debug!(
        start = %query.start,
        type_id = %type_id,
        derived = results.len(),
        "inference complete"
    );
    Ok(results)
}

struct Walk<'a> {
    store: &'a EntityStore,
    type_id: TypeId,
    start: ConceptId,
    max_depth: usize,
    min_probability: Fraction,
    min_confidence: Fraction,
}

impl Walk<'_> {
    fn passes_thresholds(&self, probability: &Fraction, confidence: &Fraction) -> bool {
        probability.ge(&self.min_probability) && confidence.ge(&self.min_confidence)
    }

    /// Walk same-typed outgoing edges of `current`, accumulating weights.
    ///
    /// `depth` counts edges already on the path (the root direct edge is 1).
    #[allow(clippy::too_many_arguments)]
    fn expand(
        &self,
        current: ConceptId,
        root: RelationshipId,
        acc_probability: Fraction,
        acc_confidence: Fraction,
        depth: usize,
        visited: &mut BTreeSet<(ConceptId, ConceptId)>,
        results: &mut Vec<InferredRelationship>,
    ) {
        let next_depth = depth + 1;
        if next_depth > self.max_depth {
            return;
        }
        let Some(concept) = self.store.concept(current) else {
            return;
        };
        // The outgoing cache is in assertion order, which is insertion order.
        for rid in &concept.outgoing {
            let Some(edge) = self.store.relationship(*rid) else {
                continue;
            };
            if edge.type_id != self.type_id {
                continue;
            }
            let probability = acc_probability.multiply(&edge.probability);
            let confidence = acc_confidence.min_combine(&edge.confidence);
            if !self.passes_thresholds(&probability, &confidence) {
                // Non-increasing accumulation: nothing deeper can recover.
                continue;
            }
            if !visited.insert((self.start, edge.to)) {
                // First path wins; the pair's subtree was already expanded.
                continue;
            }
            results.push(InferredRelationship {
                from: self.start,
                to: edge.to,
                type_id: self.type_id,
                probability: probability.clone(),
                confidence: confidence.clone(),
                creator: edge.creator.clone(),
                metadata: edge.metadata.clone(),
                provenance: Provenance::Transitive {
                    first: root,
                    second: edge.id,
                    probability: probability.clone(),
                },
            });
            self.expand(
                edge.to,
                root,
                probability,
                confidence,
                next_depth,
                visited,
                results,
            );
        }
    }
}

fn direct_result(edge: &Relationship) -> InferredRelationship {
    InferredRelationship {
        from: edge.from,
        to: edge.to,
        type_id: edge.type_id,
        probability: edge.probability.clone(),
        confidence: edge.confidence.clone(),
        creator: edge.creator.clone(),
        metadata: edge.metadata.clone(),
        provenance: Provenance::Direct(edge.id),
    }
}

fn mirror_result(edge: &Relationship) -> InferredRelationship {
    InferredRelationship {
        from: edge.to,
        to: edge.from,
        type_id: edge.type_id,
        probability: edge.probability.clone(),
        confidence: edge.confidence.clone(),
        creator: edge.creator.clone(),
        metadata: edge.metadata.clone(),
        provenance: Provenance::Symmetric(edge.id),
    }
}

// =============================================================================
// TESTS
// =============================================================================
