//! # Core Type Definitions
//!
//! All entity types for the Credence probabilistic concept base:
//! - Identifier newtypes (`ConceptId`, `RelationshipId`, `TypeId`)
//! - Caller identity and creator attribution (`PrincipalId`, `Caller`, `Creator`)
//! - Ordered metadata pairs (`Metadata`)
//! - Entities (`Concept`, `Relationship`, `RelationshipType`) and their
//!   schema components (logical properties, inheritance, validation rules,
//!   type status)
//! - Update patches (`ConceptPatch`, `RelationshipPatch`)
//!
//! ## Determinism Guarantees
//!
//! All identifier types implement `Ord` for deterministic ordering in
//! `BTreeMap`/`BTreeSet`, and identifiers are allocated monotonically by the
//! entity store, never reused.

use serde::{Deserialize, Serialize};

use crate::fraction::Fraction;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier for a concept (a node in the knowledge graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConceptId(pub u64);

/// Unique identifier for a relationship (a typed, weighted edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelationshipId(pub u64);

/// Unique identifier for a relationship type (an edge schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u64);

impl std::fmt::Display for ConceptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// CALLER IDENTITY & ATTRIBUTION
// =============================================================================

/// The identity of an authenticated principal, as supplied by the host.
///
/// The kernel treats this as opaque text; equality is the only operation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrincipalId(pub String);

impl PrincipalId {
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Milliseconds since the Unix epoch, read from the host clock at the
/// boundary. The kernel never consults a clock itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp(pub u64);

/// An authenticated caller plus the host clock reading for this command.
///
/// Bound to every mutation; queries carry no caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub principal: PrincipalId,
    pub at: Timestamp,
}

impl Caller {
    #[must_use]
    pub fn new(principal: PrincipalId, at: Timestamp) -> Self {
        Self { principal, at }
    }

    /// The creator attribution this caller stamps onto a new record.
    #[must_use]
    pub fn creator(&self) -> Creator {
        Creator {
            principal: self.principal.clone(),
            at: self.at,
        }
    }
}

/// The `(principal, timestamp)` pair recorded on every record at creation.
///
/// Used for permission isolation: only the creating principal may mutate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub principal: PrincipalId,
    pub at: Timestamp,
}

// =============================================================================
// METADATA
// =============================================================================

/// Ordered key/value string pairs attached to concepts, relationships, and
/// relationship types. Insertion order is preserved; duplicate keys are
/// permitted and `get` returns the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata(Vec<(String, String)>);

impl Metadata {
    /// An empty metadata list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing pairs, preserving their order.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// Append a pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// First value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether any pair uses `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Whether the exact `(key, value)` pair is present.
    #[must_use]
    pub fn contains_pair(&self, key: &str, value: &str) -> bool {
        self.0.iter().any(|(k, v)| k == key && v == value)
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// CONCEPT
// =============================================================================

/// A named node in the knowledge graph.
///
/// The `outgoing`/`incoming` lists are adjacency caches maintained by the
/// entity store: for every stored relationship `r`, `r.id` appears exactly
/// once in `concepts[r.from].outgoing` and once in `concepts[r.to].incoming`.
/// They duplicate information derivable from the relationship map and are
/// rebuilt from it on snapshot restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: ConceptId,
    /// Non-empty display name.
    pub name: String,
    pub description: Option<String>,
    pub creator: Creator,
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
    /// Ids of relationships with `from = self.id`, in assertion order.
    pub outgoing: Vec<RelationshipId>,
    /// Ids of relationships with `to = self.id`, in assertion order.
    pub incoming: Vec<RelationshipId>,
    pub metadata: Metadata,
}

// =============================================================================
// RELATIONSHIP
// =============================================================================

/// A directed, typed, probability- and confidence-weighted edge between two
/// concepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    pub from: ConceptId,
    pub to: ConceptId,
    pub type_id: TypeId,
    /// Asserted likelihood of the edge holding, in `[0, 1]`.
    pub probability: Fraction,
    /// The asserter's meta-confidence in the assertion, in `[0, 1]`.
    pub confidence: Fraction,
    pub creator: Creator,
    pub metadata: Metadata,
}

// =============================================================================
// RELATIONSHIP TYPE
// =============================================================================

/// Structural laws of a relationship type.
///
/// `transitive` and `symmetric` drive inference; `reflexive` and
/// `irreflexive` are enforced at assertion time. `reflexive && irreflexive`
/// is rejected when the type is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalProperties {
    pub transitive: bool,
    pub symmetric: bool,
    pub reflexive: bool,
    pub irreflexive: bool,
}

/// How weights combine when a relationship is inherited along a chain.
///
/// Only `Multiply` is exercised by the core inference path; the other modes
/// are stored verbatim for schema compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombinationMode {
    Multiply,
    Minimum,
    Maximum,
    Override,
}

/// Inheritance behavior of a relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritanceProperties {
    pub inheritable: bool,
    pub combination: CombinationMode,
}

impl Default for InheritanceProperties {
    fn default() -> Self {
        Self {
            inheritable: false,
            combination: CombinationMode::Multiply,
        }
    }
}

/// A declarative predicate evaluated against every candidate assertion of a
/// type, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationRule {
    /// Every listed key must appear among the relationship's metadata keys.
    RequiredMetadata { keys: Vec<String> },
    /// At most one relationship of this type may exist from a given source
    /// to a given target.
    UniqueTarget,
    /// Source and target must differ.
    NoSelfReference,
    /// Extension stub for user-defined rules; always fails with `error_code`.
    Custom {
        name: String,
        description: String,
        error_code: String,
    },
}

/// Lifecycle status of a relationship type.
///
/// Deprecated types are retained so existing relationships stay
/// interpretable; new assertions against them fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeStatus {
    Active,
    Deprecated {
        replaced_by: Option<TypeId>,
        reason: String,
    },
}

impl TypeStatus {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A schema object defining the laws, inheritance behavior, and validation
/// rules for a family of edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipType {
    pub id: TypeId,
    /// Unique among active types.
    pub name: String,
    pub description: Option<String>,
    pub logical: LogicalProperties,
    pub inheritance: InheritanceProperties,
    /// Applied in order; first failure wins.
    pub validation: Vec<ValidationRule>,
    pub status: TypeStatus,
    pub metadata: Metadata,
}

// =============================================================================
// UPDATE PATCHES
// =============================================================================

/// Fields a creator may change on an existing concept. A patch with every
/// field `None` is an invalid operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<Metadata>,
}

impl ConceptPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.metadata.is_none()
    }
}

/// Fields a creator may change on an existing relationship.
///
/// The probability is raw `(numerator, denominator)` boundary input,
/// validated by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipPatch {
    pub probability: Option<(u64, u64)>,
    pub metadata: Option<Metadata>,
}

impl RelationshipPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probability.is_none() && self.metadata.is_none()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_preserves_insertion_order() {
        let mut meta = Metadata::new();
        meta.push("b", "2");
        meta.push("a", "1");
        let keys: Vec<_> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn metadata_get_returns_first_match() {
        let mut meta = Metadata::new();
        meta.push("k", "first");
        meta.push("k", "second");
        assert_eq!(meta.get("k"), Some("first"));
        assert!(meta.contains_pair("k", "second"));
        assert!(!meta.contains_pair("k", "third"));
    }

    #[test]
    fn caller_stamps_creator() {
        let caller = Caller::new(PrincipalId::new("u1"), Timestamp(42));
        let creator = caller.creator();
        assert_eq!(creator.principal, PrincipalId::new("u1"));
        assert_eq!(creator.at, Timestamp(42));
    }

    #[test]
    fn empty_patches_detected() {
        assert!(ConceptPatch::default().is_empty());
        assert!(RelationshipPatch::default().is_empty());
        let patch = ConceptPatch {
            name: Some("renamed".to_string()),
            ..ConceptPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn type_status_activity() {
        assert!(TypeStatus::Active.is_active());
        let deprecated = TypeStatus::Deprecated {
            replaced_by: None,
            reason: "obsolete".to_string(),
        };
        assert!(!deprecated.is_active());
    }
}
