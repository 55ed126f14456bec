//! # CLI Command Implementations
//!
//! Each command runs one host lifecycle: load the snapshot file (or start
//! fresh), bootstrap the well-known types, execute against the kernel, and
//! save back to disk when the command mutated the store.

use credence_core::{
    snapshot_from_bytes, snapshot_to_bytes, Caller, CombinationMode, Concept, ConceptBase,
    ConceptCriteria, ConceptId, ConceptPatch, CredenceError, Fraction, InferenceQuery,
    InferredRelationship, InheritanceProperties, LogicalProperties, Metadata, PrincipalId,
    Provenance, Relationship, RelationshipCriteria, RelationshipId, RelationshipPatch,
    RelationshipType, Timestamp, TypeId, TypeStatus, ValidationRule,
    primitives::MAX_SNAPSHOT_PAYLOAD_SIZE,
};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

// =============================================================================
// COMMAND CONTEXT
// =============================================================================

/// Shared state every command needs: where the snapshot lives, who is
/// calling, and how to report results.
pub struct CommandContext {
    database: PathBuf,
    principal: String,
    json_mode: bool,
}

impl CommandContext {
    pub fn new(database: PathBuf, principal: String, json_mode: bool) -> Self {
        Self {
            database,
            principal,
            json_mode,
        }
    }

    /// The authenticated caller for this invocation, stamped with the
    /// current wall clock. The kernel never reads a clock itself.
    fn caller(&self) -> Caller {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Caller::new(PrincipalId::new(self.principal.clone()), Timestamp(now))
    }
}

// =============================================================================
// SNAPSHOT FILE LIFECYCLE
// =============================================================================

fn load_base(path: &Path) -> Result<ConceptBase, CredenceError> {
    let mut base = if path.exists() {
        validate_file_size(path)?;
        let bytes = std::fs::read(path)
            .map_err(|e| CredenceError::System(format!("cannot read {}: {e}", path.display())))?;
        ConceptBase::from_snapshot(snapshot_from_bytes(&bytes)?)?
    } else {
        ConceptBase::new()
    };
    base.bootstrap()?;
    Ok(base)
}

fn save_base(path: &Path, base: &ConceptBase) -> Result<(), CredenceError> {
    let bytes = snapshot_to_bytes(&base.snapshot())?;
    std::fs::write(path, bytes)
        .map_err(|e| CredenceError::System(format!("cannot write {}: {e}", path.display())))
}

/// Validate file size before reading, so a corrupt or hostile snapshot file
/// cannot drive a huge allocation.
fn validate_file_size(path: &Path) -> Result<(), CredenceError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CredenceError::System(format!("cannot read file metadata: {e}")))?;
    if metadata.len() > MAX_SNAPSHOT_PAYLOAD_SIZE as u64 {
        return Err(CredenceError::System(format!(
            "file size {} bytes exceeds maximum allowed {MAX_SNAPSHOT_PAYLOAD_SIZE} bytes",
            metadata.len()
        )));
    }
    Ok(())
}

// =============================================================================
// INPUT PARSING
// =============================================================================

/// Parse repeated `key=value` flags into ordered metadata.
fn parse_meta(pairs: &[String]) -> Result<Metadata, CredenceError> {
    let mut metadata = Metadata::new();
    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            CredenceError::InvalidOperation(format!("malformed metadata {pair:?}: expected key=value"))
        })?;
        metadata.push(key, value);
    }
    Ok(metadata)
}

/// Parse an `N/D` string into the raw pair the kernel validates.
fn parse_ratio(s: &str) -> Result<(u64, u64), CredenceError> {
    let malformed = || CredenceError::InvalidOperation(format!("malformed fraction {s:?}: expected N/D"));
    let (n, d) = s.split_once('/').ok_or_else(malformed)?;
    Ok((
        n.trim().parse().map_err(|_| malformed())?,
        d.trim().parse().map_err(|_| malformed())?,
    ))
}

fn parse_fraction(s: &str) -> Result<Fraction, CredenceError> {
    s.parse()
}

fn parse_combination(s: &str) -> Result<CombinationMode, CredenceError> {
    match s {
        "multiply" => Ok(CombinationMode::Multiply),
        "minimum" => Ok(CombinationMode::Minimum),
        "maximum" => Ok(CombinationMode::Maximum),
        "override" => Ok(CombinationMode::Override),
        other => Err(CredenceError::InvalidOperation(format!(
            "unknown combination mode {other:?} (expected multiply, minimum, maximum, or override)"
        ))),
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn meta_json(metadata: &Metadata) -> serde_json::Value {
    serde_json::Value::Array(
        metadata
            .iter()
            .map(|(k, v)| serde_json::json!({ "key": k, "value": v }))
            .collect(),
    )
}

fn concept_json(c: &Concept) -> serde_json::Value {
    serde_json::json!({
        "id": c.id.0,
        "name": c.name,
        "description": c.description,
        "creator": c.creator.principal.as_str(),
        "created_at": c.created_at.0,
        "modified_at": c.modified_at.0,
        "outgoing": c.outgoing.iter().map(|r| r.0).collect::<Vec<_>>(),
        "incoming": c.incoming.iter().map(|r| r.0).collect::<Vec<_>>(),
        "metadata": meta_json(&c.metadata),
    })
}

fn relationship_json(r: &Relationship) -> serde_json::Value {
    serde_json::json!({
        "id": r.id.0,
        "from": r.from.0,
        "to": r.to.0,
        "type": r.type_id.0,
        "probability": r.probability.to_string(),
        "confidence": r.confidence.to_string(),
        "creator": r.creator.principal.as_str(),
        "metadata": meta_json(&r.metadata),
    })
}

fn type_json(t: &RelationshipType) -> serde_json::Value {
    let status = match &t.status {
        TypeStatus::Active => serde_json::json!({ "state": "active" }),
        TypeStatus::Deprecated {
            replaced_by,
            reason,
        } => serde_json::json!({
            "state": "deprecated",
            "replaced_by": replaced_by.map(|id| id.0),
            "reason": reason,
        }),
    };
    serde_json::json!({
        "id": t.id.0,
        "name": t.name,
        "description": t.description,
        "transitive": t.logical.transitive,
        "symmetric": t.logical.symmetric,
        "reflexive": t.logical.reflexive,
        "irreflexive": t.logical.irreflexive,
        "inheritable": t.inheritance.inheritable,
        "status": status,
        "metadata": meta_json(&t.metadata),
    })
}

fn inferred_json(r: &InferredRelationship) -> serde_json::Value {
    let provenance = match &r.provenance {
        Provenance::Direct(id) => serde_json::json!({ "kind": "direct", "id": id.0 }),
        Provenance::Symmetric(id) => serde_json::json!({ "kind": "symmetric", "id": id.0 }),
        Provenance::Transitive {
            first,
            second,
            probability,
        } => serde_json::json!({
            "kind": "transitive",
            "first": first.0,
            "second": second.0,
            "probability": probability.to_string(),
        }),
    };
    serde_json::json!({
        "from": r.from.0,
        "to": r.to.0,
        "type": r.type_id.0,
        "probability": r.probability.to_string(),
        "confidence": r.confidence.to_string(),
        "creator": r.creator.principal.as_str(),
        "provenance": provenance,
    })
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).expect("serializable json"));
}

fn print_concept(c: &Concept) {
    let description = c.description.as_deref().unwrap_or("-");
    println!(
        "concept {}: {} ({description}) creator={} out={} in={}",
        c.id,
        c.name,
        c.creator.principal.as_str(),
        c.outgoing.len(),
        c.incoming.len()
    );
}

fn print_relationship(r: &Relationship) {
    println!(
        "relationship {}: {} -> {} type={} p={} c={} creator={}",
        r.id,
        r.from,
        r.to,
        r.type_id,
        r.probability,
        r.confidence,
        r.creator.principal.as_str()
    );
}

fn print_type(t: &RelationshipType) {
    let mut laws = Vec::new();
    if t.logical.transitive {
        laws.push("transitive");
    }
    if t.logical.symmetric {
        laws.push("symmetric");
    }
    if t.logical.reflexive {
        laws.push("reflexive");
    }
    if t.logical.irreflexive {
        laws.push("irreflexive");
    }
    let status = match &t.status {
        TypeStatus::Active => "active".to_string(),
        TypeStatus::Deprecated { reason, .. } => format!("deprecated ({reason})"),
    };
    println!("type {}: {} [{}] {}", t.id, t.name, laws.join(", "), status);
}

fn print_inferred(r: &InferredRelationship) {
    let provenance = match &r.provenance {
        Provenance::Direct(id) => format!("direct via {id}"),
        Provenance::Symmetric(id) => format!("symmetric via {id}"),
        Provenance::Transitive { first, second, .. } => {
            format!("transitive via {first}..{second}")
        }
    };
    println!(
        "{} -> {} type={} p={} c={} ({provenance})",
        r.from, r.to, r.type_id, r.probability, r.confidence
    );
}

// =============================================================================
// INIT & STATUS
// =============================================================================

/// Initialize a new snapshot file with the bootstrap types.
pub fn cmd_init(ctx: &CommandContext, force: bool) -> Result<(), CredenceError> {
    if ctx.database.exists() && !force {
        return Err(CredenceError::InvalidOperation(format!(
            "{} already exists; pass --force to reinitialize",
            ctx.database.display()
        )));
    }
    let mut base = ConceptBase::new();
    base.bootstrap()?;
    save_base(&ctx.database, &base)?;
    if ctx.json_mode {
        print_json(&serde_json::json!({
            "initialized": ctx.database.to_string_lossy(),
            "types": base.metrics().type_count,
        }));
    } else {
        println!(
            "Initialized {} with {} bootstrap types",
            ctx.database.display(),
            base.metrics().type_count
        );
    }
    Ok(())
}

/// Show store counts.
pub fn cmd_status(ctx: &CommandContext) -> Result<(), CredenceError> {
    let base = load_base(&ctx.database)?;
    let metrics = base.metrics();
    if ctx.json_mode {
        print_json(&serde_json::json!({
            "database": ctx.database.to_string_lossy(),
            "concepts": metrics.concept_count,
            "relationships": metrics.relationship_count,
            "types": metrics.type_count,
            "active_types": metrics.active_type_count,
            "deprecated_types": metrics.deprecated_type_count,
        }));
    } else {
        println!("Database:       {}", ctx.database.display());
        println!("Concepts:       {}", metrics.concept_count);
        println!("Relationships:  {}", metrics.relationship_count);
        println!(
            "Types:          {} ({} active, {} deprecated)",
            metrics.type_count, metrics.active_type_count, metrics.deprecated_type_count
        );
    }
    Ok(())
}

// =============================================================================
// CONCEPT COMMANDS
// =============================================================================

pub fn cmd_create_concept(
    ctx: &CommandContext,
    name: String,
    description: Option<String>,
    meta: &[String],
) -> Result<(), CredenceError> {
    let mut base = load_base(&ctx.database)?;
    let id = base.create_concept(&ctx.caller(), name, description, parse_meta(meta)?)?;
    save_base(&ctx.database, &base)?;
    if ctx.json_mode {
        print_json(&serde_json::json!({ "concept_id": id.0 }));
    } else {
        println!("Created concept {id}");
    }
    Ok(())
}

pub fn cmd_get_concept(ctx: &CommandContext, id: u64) -> Result<(), CredenceError> {
    let base = load_base(&ctx.database)?;
    let concept = base.get_concept(ConceptId(id))?;
    if ctx.json_mode {
        print_json(&concept_json(&concept));
    } else {
        print_concept(&concept);
    }
    Ok(())
}

pub fn cmd_update_concept(
    ctx: &CommandContext,
    id: u64,
    name: Option<String>,
    description: Option<String>,
    meta: &[String],
) -> Result<(), CredenceError> {
    let mut base = load_base(&ctx.database)?;
    let metadata = if meta.is_empty() {
        None
    } else {
        Some(parse_meta(meta)?)
    };
    base.update_concept(
        &ctx.caller(),
        ConceptId(id),
        ConceptPatch {
            name,
            description,
            metadata,
        },
    )?;
    save_base(&ctx.database, &base)?;
    if ctx.json_mode {
        print_json(&serde_json::json!({ "updated": id }));
    } else {
        println!("Updated concept {id}");
    }
    Ok(())
}

pub fn cmd_query_concepts(
    ctx: &CommandContext,
    name_contains: Option<String>,
    creator: Option<String>,
    meta: &[String],
) -> Result<(), CredenceError> {
    let base = load_base(&ctx.database)?;
    let page = base.query_concepts(&ConceptCriteria {
        name_contains,
        metadata: parse_meta(meta)?,
        creator: creator.map(PrincipalId::new),
    });
    if ctx.json_mode {
        print_json(&serde_json::json!({
            "total": page.total,
            "page": page.page,
            "page_size": page.page_size,
            "items": page.items.iter().map(concept_json).collect::<Vec<_>>(),
        }));
    } else {
        println!("{} concepts", page.total);
        for concept in &page.items {
            print_concept(concept);
        }
    }
    Ok(())
}

// =============================================================================
// TYPE COMMANDS
// =============================================================================

/// Parsed `create-type` inputs, before kernel types are built.
pub struct TypeSpec {
    pub name: String,
    pub description: Option<String>,
    pub transitive: bool,
    pub symmetric: bool,
    pub reflexive: bool,
    pub irreflexive: bool,
    pub inheritable: bool,
    pub combination: String,
    pub require_meta: Vec<String>,
    pub unique_target: bool,
    pub no_self_reference: bool,
}

pub fn cmd_create_type(
    ctx: &CommandContext,
    spec: TypeSpec,
    meta: &[String],
) -> Result<(), CredenceError> {
    let mut base = load_base(&ctx.database)?;

    let mut rules = Vec::new();
    if !spec.require_meta.is_empty() {
        rules.push(ValidationRule::RequiredMetadata {
            keys: spec.require_meta,
        });
    }
    if spec.unique_target {
        rules.push(ValidationRule::UniqueTarget);
    }
    if spec.no_self_reference {
        rules.push(ValidationRule::NoSelfReference);
    }

    let id = base.create_relationship_type(
        spec.name,
        spec.description,
        LogicalProperties {
            transitive: spec.transitive,
            symmetric: spec.symmetric,
            reflexive: spec.reflexive,
            irreflexive: spec.irreflexive,
        },
        InheritanceProperties {
            inheritable: spec.inheritable,
            combination: parse_combination(&spec.combination)?,
        },
        rules,
        parse_meta(meta)?,
    )?;
    save_base(&ctx.database, &base)?;
    if ctx.json_mode {
        print_json(&serde_json::json!({ "type_id": id.0 }));
    } else {
        println!("Created relationship type {id}");
    }
    Ok(())
}

pub fn cmd_get_type(ctx: &CommandContext, id: u64) -> Result<(), CredenceError> {
    let base = load_base(&ctx.database)?;
    let rtype = base.get_relationship_type(TypeId(id))?;
    if ctx.json_mode {
        print_json(&type_json(&rtype));
    } else {
        print_type(&rtype);
    }
    Ok(())
}

pub fn cmd_deprecate_type(
    ctx: &CommandContext,
    id: u64,
    replaced_by: Option<u64>,
    reason: String,
) -> Result<(), CredenceError> {
    let mut base = load_base(&ctx.database)?;
    base.deprecate_relationship_type(TypeId(id), replaced_by.map(TypeId), reason)?;
    save_base(&ctx.database, &base)?;
    if ctx.json_mode {
        print_json(&serde_json::json!({ "deprecated": id }));
    } else {
        println!("Deprecated relationship type {id}");
    }
    Ok(())
}

// =============================================================================
// RELATIONSHIP COMMANDS
// =============================================================================

pub fn cmd_assert(
    ctx: &CommandContext,
    from: u64,
    to: u64,
    type_id: u64,
    probability: &str,
    confidence: &str,
    meta: &[String],
) -> Result<(), CredenceError> {
    let mut base = load_base(&ctx.database)?;
    let id = base.assert_relationship(
        &ctx.caller(),
        ConceptId(from),
        ConceptId(to),
        TypeId(type_id),
        parse_ratio(probability)?,
        parse_ratio(confidence)?,
        parse_meta(meta)?,
    )?;
    save_base(&ctx.database, &base)?;
    if ctx.json_mode {
        print_json(&serde_json::json!({ "relationship_id": id.0 }));
    } else {
        println!("Asserted relationship {id}");
    }
    Ok(())
}

pub fn cmd_get_relationship(ctx: &CommandContext, id: u64) -> Result<(), CredenceError> {
    let base = load_base(&ctx.database)?;
    let relationship = base.get_relationship(RelationshipId(id))?;
    if ctx.json_mode {
        print_json(&relationship_json(&relationship));
    } else {
        print_relationship(&relationship);
    }
    Ok(())
}

pub fn cmd_update_relationship(
    ctx: &CommandContext,
    id: u64,
    probability: Option<String>,
    meta: &[String],
) -> Result<(), CredenceError> {
    let mut base = load_base(&ctx.database)?;
    let probability = probability.as_deref().map(parse_ratio).transpose()?;
    let metadata = if meta.is_empty() {
        None
    } else {
        Some(parse_meta(meta)?)
    };
    base.update_relationship(
        &ctx.caller(),
        RelationshipId(id),
        RelationshipPatch {
            probability,
            metadata,
        },
    )?;
    save_base(&ctx.database, &base)?;
    if ctx.json_mode {
        print_json(&serde_json::json!({ "updated": id }));
    } else {
        println!("Updated relationship {id}");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_query_relationships(
    ctx: &CommandContext,
    from: Option<u64>,
    to: Option<u64>,
    type_id: Option<u64>,
    creator: Option<String>,
    min_probability: Option<String>,
    max_probability: Option<String>,
    meta: &[String],
) -> Result<(), CredenceError> {
    let base = load_base(&ctx.database)?;
    let page = base.query_relationships(&RelationshipCriteria {
        from: from.map(ConceptId),
        to: to.map(ConceptId),
        type_id: type_id.map(TypeId),
        creator: creator.map(PrincipalId::new),
        min_probability: min_probability.as_deref().map(parse_fraction).transpose()?,
        max_probability: max_probability.as_deref().map(parse_fraction).transpose()?,
        metadata: parse_meta(meta)?,
    });
    if ctx.json_mode {
        print_json(&serde_json::json!({
            "total": page.total,
            "page": page.page,
            "page_size": page.page_size,
            "items": page.items.iter().map(relationship_json).collect::<Vec<_>>(),
        }));
    } else {
        println!("{} relationships", page.total);
        for relationship in &page.items {
            print_relationship(relationship);
        }
    }
    Ok(())
}

// =============================================================================
// INFERENCE COMMAND
// =============================================================================

pub fn cmd_infer(
    ctx: &CommandContext,
    start: u64,
    type_id: Option<u64>,
    max_depth: Option<usize>,
    min_probability: Option<String>,
    min_confidence: Option<String>,
) -> Result<(), CredenceError> {
    let base = load_base(&ctx.database)?;
    let results = base.infer_relationships(&InferenceQuery {
        start: ConceptId(start),
        relationship_type: type_id.map(TypeId),
        max_depth,
        min_probability: min_probability.as_deref().map(parse_fraction).transpose()?,
        min_confidence: min_confidence.as_deref().map(parse_fraction).transpose()?,
    })?;
    if ctx.json_mode {
        print_json(&serde_json::json!({
            "count": results.len(),
            "items": results.iter().map(inferred_json).collect::<Vec<_>>(),
        }));
    } else {
        println!("{} inferred relationships", results.len());
        for result in &results {
            print_inferred(result);
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
