//! # credence-core
//!
//! The probabilistic concept base kernel - THE LOGIC.
//!
//! A graph-structured knowledge store whose nodes are concepts and whose
//! edges are typed, probability- and confidence-weighted relationships.
//! Users assert facts ("Dog IS-A Mammal with probability 1/1 and confidence
//! 99/100") and run inference queries that follow typed edges, combining
//! exact rational weights along the way under each type's logical laws.
//!
//! ## Architectural Constraints
//!
//! The kernel:
//! - Owns the only mutable state (the entity store and its counters)
//! - Is deterministic: `BTreeMap` storage, monotonic identifiers, exact
//!   rational arithmetic, no floating point
//! - Runs single-threaded between boundary points; every mutating operation
//!   either commits whole or returns an error with no partial effects
//! - Has NO async and NO network dependencies; the API shell, authentication,
//!   and durable storage belong to the host

// =============================================================================
// MODULES
// =============================================================================

pub mod error;
pub mod facade;
pub mod formats;
pub mod fraction;
pub mod inference;
pub mod primitives;
pub mod query;
pub mod snapshot;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use error::{ConstraintDetail, CredenceError, ValidationCode};
pub use fraction::Fraction;
pub use types::{
    Caller, CombinationMode, Concept, ConceptId, ConceptPatch, Creator, InheritanceProperties,
    LogicalProperties, Metadata, PrincipalId, Relationship, RelationshipId, RelationshipPatch,
    RelationshipType, Timestamp, TypeId, TypeStatus, ValidationRule,
};

// =============================================================================
// RE-EXPORTS: Kernel Components
// =============================================================================

pub use facade::{ConceptBase, StoreMetrics};
pub use inference::{InferenceQuery, InferredRelationship, Provenance};
pub use query::{ConceptCriteria, QueryPage, RelationshipCriteria};
pub use snapshot::Snapshot;
pub use store::EntityStore;
pub use validation::{validate_assertion, AssertionDraft};

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{snapshot_from_bytes, snapshot_to_bytes, SnapshotHeader};
