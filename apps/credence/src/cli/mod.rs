//! # Credence CLI Module
//!
//! The command surface of the host binary.
//!
//! ## Available Commands
//!
//! - `init` - Initialize a new snapshot file
//! - `status` - Show store counts
//! - `create-concept` / `get-concept` / `update-concept` / `query-concepts`
//! - `create-type` / `get-type` / `deprecate-type`
//! - `assert` - Assert a weighted relationship
//! - `get-relationship` / `update-relationship` / `query-relationships`
//! - `infer` - Run bounded-depth inference from a concept

mod commands;

use clap::{Parser, Subcommand};
use credence_core::CredenceError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Credence - Probabilistic Concept Base
///
/// A graph-structured knowledge store of concepts and typed, probability-
/// and confidence-weighted relationships, with bounded-depth inference.
#[derive(Parser, Debug)]
#[command(name = "credence")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the snapshot file
    #[arg(short = 'D', long, global = true, default_value = "credence.db")]
    pub database: PathBuf,

    /// Principal identity recorded as creator on mutations
    #[arg(short = 'P', long, global = true, default_value = "local")]
    pub principal: String,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new snapshot file with the bootstrap types
    Init {
        /// Force initialization even if the file exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show store counts
    Status,

    /// Create a concept
    CreateConcept {
        /// Concept name (non-empty)
        #[arg(short, long)]
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// Metadata pairs as key=value (repeatable)
        #[arg(short, long = "meta")]
        meta: Vec<String>,
    },

    /// Show a concept
    GetConcept {
        /// Concept id
        #[arg(short, long)]
        id: u64,
    },

    /// Update a concept (creator only)
    UpdateConcept {
        /// Concept id
        #[arg(short, long)]
        id: u64,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// Replacement metadata pairs as key=value (repeatable)
        #[arg(short, long = "meta")]
        meta: Vec<String>,
    },

    /// Query concepts by name substring, metadata, and creator
    QueryConcepts {
        /// Case-sensitive substring of the name
        #[arg(short, long)]
        name_contains: Option<String>,

        /// Exact creating principal
        #[arg(short, long)]
        creator: Option<String>,

        /// Required metadata pairs as key=value (repeatable)
        #[arg(short, long = "meta")]
        meta: Vec<String>,
    },

    /// Create a relationship type
    CreateType {
        /// Type name (unique among active types)
        #[arg(short, long)]
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// Derive chains through this type
        #[arg(long)]
        transitive: bool,

        /// Mirror edges of this type
        #[arg(long)]
        symmetric: bool,

        /// Permit self-reference
        #[arg(long)]
        reflexive: bool,

        /// Reject self-reference
        #[arg(long)]
        irreflexive: bool,

        /// Mark the type inheritable
        #[arg(long)]
        inheritable: bool,

        /// Weight combination mode (multiply, minimum, maximum, override)
        #[arg(long, default_value = "multiply")]
        combination: String,

        /// Metadata keys every assertion must carry (repeatable)
        #[arg(long = "require-meta")]
        require_meta: Vec<String>,

        /// Enforce at most one edge per (source, target) pair
        #[arg(long)]
        unique_target: bool,

        /// Reject source = target via a declarative rule
        #[arg(long)]
        no_self_reference: bool,

        /// Metadata pairs as key=value (repeatable)
        #[arg(short, long = "meta")]
        meta: Vec<String>,
    },

    /// Show a relationship type
    GetType {
        /// Type id
        #[arg(short, long)]
        id: u64,
    },

    /// Deprecate a relationship type
    DeprecateType {
        /// Type id
        #[arg(short, long)]
        id: u64,

        /// Replacement type id
        #[arg(short, long)]
        replaced_by: Option<u64>,

        /// Reason for deprecation
        #[arg(long, default_value = "deprecated")]
        reason: String,
    },

    /// Assert a weighted relationship between two concepts
    Assert {
        /// Source concept id
        #[arg(short, long)]
        from: u64,

        /// Target concept id
        #[arg(short, long)]
        to: u64,

        /// Relationship type id
        #[arg(short = 'T', long = "type")]
        type_id: u64,

        /// Probability as N/D, e.g. 9/10
        #[arg(short, long)]
        probability: String,

        /// Confidence as N/D, e.g. 99/100
        #[arg(short, long)]
        confidence: String,

        /// Metadata pairs as key=value (repeatable)
        #[arg(short, long = "meta")]
        meta: Vec<String>,
    },

    /// Show a relationship
    GetRelationship {
        /// Relationship id
        #[arg(short, long)]
        id: u64,
    },

    /// Update a relationship (creator only)
    UpdateRelationship {
        /// Relationship id
        #[arg(short, long)]
        id: u64,

        /// New probability as N/D
        #[arg(short, long)]
        probability: Option<String>,

        /// Replacement metadata pairs as key=value (repeatable)
        #[arg(short, long = "meta")]
        meta: Vec<String>,
    },

    /// Query relationships by endpoints, type, creator, and probability range
    QueryRelationships {
        /// Source concept id
        #[arg(short, long)]
        from: Option<u64>,

        /// Target concept id
        #[arg(short, long)]
        to: Option<u64>,

        /// Relationship type id
        #[arg(short = 'T', long = "type")]
        type_id: Option<u64>,

        /// Exact creating principal
        #[arg(short, long)]
        creator: Option<String>,

        /// Inclusive lower probability bound as N/D
        #[arg(long)]
        min_probability: Option<String>,

        /// Inclusive upper probability bound as N/D
        #[arg(long)]
        max_probability: Option<String>,

        /// Required metadata pairs as key=value (repeatable)
        #[arg(short, long = "meta")]
        meta: Vec<String>,
    },

    /// Derive relationships from a starting concept
    Infer {
        /// Starting concept id
        #[arg(short, long)]
        start: u64,

        /// Relationship type id (defaults to IS-A)
        #[arg(short = 'T', long = "type")]
        type_id: Option<u64>,

        /// Maximum derivation depth
        #[arg(short, long)]
        max_depth: Option<usize>,

        /// Inclusive probability threshold as N/D
        #[arg(long)]
        min_probability: Option<String>,

        /// Inclusive confidence threshold as N/D
        #[arg(long)]
        min_confidence: Option<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CredenceError> {
    let ctx = CommandContext::new(cli.database, cli.principal, cli.json_mode);

    match cli.command {
        Some(Commands::Init { force }) => cmd_init(&ctx, force),
        Some(Commands::Status) | None => cmd_status(&ctx),
        Some(Commands::CreateConcept {
            name,
            description,
            meta,
        }) => cmd_create_concept(&ctx, name, description, &meta),
        Some(Commands::GetConcept { id }) => cmd_get_concept(&ctx, id),
        Some(Commands::UpdateConcept {
            id,
            name,
            description,
            meta,
        }) => cmd_update_concept(&ctx, id, name, description, &meta),
        Some(Commands::QueryConcepts {
            name_contains,
            creator,
            meta,
        }) => cmd_query_concepts(&ctx, name_contains, creator, &meta),
        Some(Commands::CreateType {
            name,
            description,
            transitive,
            symmetric,
            reflexive,
            irreflexive,
            inheritable,
            combination,
            require_meta,
            unique_target,
            no_self_reference,
            meta,
        }) => cmd_create_type(
            &ctx,
            TypeSpec {
                name,
                description,
                transitive,
                symmetric,
                reflexive,
                irreflexive,
                inheritable,
                combination,
                require_meta,
                unique_target,
                no_self_reference,
            },
            &meta,
        ),
        Some(Commands::GetType { id }) => cmd_get_type(&ctx, id),
        Some(Commands::DeprecateType {
            id,
            replaced_by,
            reason,
        }) => cmd_deprecate_type(&ctx, id, replaced_by, reason),
        Some(Commands::Assert {
            from,
            to,
            type_id,
            probability,
            confidence,
            meta,
        }) => cmd_assert(&ctx, from, to, type_id, &probability, &confidence, &meta),
        Some(Commands::GetRelationship { id }) => cmd_get_relationship(&ctx, id),
        Some(Commands::UpdateRelationship {
            id,
            probability,
            meta,
        }) => cmd_update_relationship(&ctx, id, probability, &meta),
        Some(Commands::QueryRelationships {
            from,
            to,
            type_id,
            creator,
            min_probability,
            max_probability,
            meta,
        }) => cmd_query_relationships(
            &ctx,
            from,
            to,
            type_id,
            creator,
            min_probability,
            max_probability,
            &meta,
        ),
        Some(Commands::Infer {
            start,
            type_id,
            max_depth,
            min_probability,
            min_confidence,
        }) => cmd_infer(&ctx, start, type_id, max_depth, min_probability, min_confidence),
    }
}
