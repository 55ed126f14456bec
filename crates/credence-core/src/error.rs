//! # Error Types
//!
//! The closed error taxonomy for the Credence kernel.
//!
//! - No silent failures
//! - Use `Result<T, CredenceError>` for fallible operations
//! - The kernel never panics on user-originated input; internal invariant
//!   violations are programmer bugs and may abort the process

use crate::types::TypeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// VALIDATION CODES
// =============================================================================

/// Machine-readable code attached to every validation failure.
///
/// The wire form is the SCREAMING_SNAKE string returned by [`as_str`].
///
/// [`as_str`]: ValidationCode::as_str
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationCode {
    /// The relationship type has been deprecated; no new assertions allowed.
    DeprecatedType,
    /// A `RequiredMetadata` rule found a missing key.
    RequiredMetadata,
    /// A `NoSelfReference` rule rejected `source = target`.
    SelfReference,
    /// A `UniqueTarget` rule found an existing edge of this type and endpoints.
    UniqueTarget,
    /// A custom rule fired (custom rules always fail; they are extension stubs).
    CustomRule,
    /// An irreflexive type was asserted with `source = target`.
    IrreflexiveViolation,
    /// A probability or confidence input is not a fraction in `[0, 1]`.
    InvalidFraction,
    /// A relationship type declared both `reflexive` and `irreflexive`.
    ReflexivityConflict,
    /// A concept or type name was empty.
    EmptyName,
    /// A boundary input exceeded a size limit.
    LimitExceeded,
}

impl ValidationCode {
    /// The stable wire identifier for this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeprecatedType => "DEPRECATED_TYPE",
            Self::RequiredMetadata => "REQUIRED_METADATA",
            Self::SelfReference => "SELF_REFERENCE",
            Self::UniqueTarget => "UNIQUE_TARGET",
            Self::CustomRule => "CUSTOM_RULE",
            Self::IrreflexiveViolation => "IRREFLEXIVE_VIOLATION",
            Self::InvalidFraction => "INVALID_FRACTION",
            Self::ReflexivityConflict => "REFLEXIVITY_CONFLICT",
            Self::EmptyName => "EMPTY_NAME",
            Self::LimitExceeded => "LIMIT_EXCEEDED",
        }
    }
}

impl std::fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional structured detail on a validation failure: which field broke
/// which constraint, and the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDetail {
    pub field: String,
    pub constraint: String,
    pub value: String,
}

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Errors produced by the Credence kernel.
#[derive(Debug, Clone, Error)]
pub enum CredenceError {
    /// A referenced concept, relationship, or type does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was violated.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// A rule or law failure from the validation engine, or a malformed
    /// fraction at the boundary.
    #[error("validation failed [{code}]: {message}")]
    Validation {
        code: ValidationCode,
        message: String,
        /// Present when the failure pins down a single field.
        detail: Option<ConstraintDetail>,
        /// For `DeprecatedType`: the replacement type, when one was named.
        replaced_by: Option<TypeId>,
    },

    /// An operation that is well-formed but meaningless in the current state,
    /// e.g. an update carrying no fields or deprecating a deprecated type.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A mutation attempted by a caller who is not the record's creator.
    #[error("permission denied: cannot {operation} {resource}: {reason}")]
    PermissionDenied {
        operation: String,
        resource: String,
        reason: String,
    },

    /// A confidence input failed the fraction invariant. Kept distinct from
    /// probability validation for wire compatibility.
    #[error("invalid confidence {value}: {reason}")]
    InvalidConfidence { value: String, reason: String },

    /// A host-runtime failure (I/O, corrupt snapshot) propagated upward.
    #[error("system error: {0}")]
    System(String),
}

impl CredenceError {
    /// Shorthand for a validation error with no field detail.
    #[must_use]
    pub fn validation(code: ValidationCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            detail: None,
            replaced_by: None,
        }
    }

    /// The validation code, when this is a validation error.
    #[must_use]
    pub fn validation_code(&self) -> Option<ValidationCode> {
        match self {
            Self::Validation { code, .. } => Some(*code),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
