//! # Validation Engine
//!
//! Enforces relationship-type laws against every candidate assertion.
//!
//! Three stages run in order and stop at the first failure:
//!
//! 1. **Status check**: deprecated types admit no new assertions; the error
//!    carries the replacement type id when one was named.
//! 2. **Declarative rules**: the type's `validation` list, in declared order.
//! 3. **Logical laws**: the structural consequences of the type's boolean
//!    properties. Only reflexivity/irreflexivity act at assertion time;
//!    `symmetric` and `transitive` drive inference instead.

use crate::error::{ConstraintDetail, CredenceError, ValidationCode};
use crate::store::EntityStore;
use crate::types::{ConceptId, Metadata, RelationshipType, TypeId, TypeStatus, ValidationRule};

/// A candidate relationship, before any identifier is allocated.
///
/// Probability and confidence are absent on purpose: they are validated as
/// [`Fraction`](crate::Fraction)s at the boundary, before the engine runs.
#[derive(Debug)]
pub struct AssertionDraft<'a> {
    pub from: ConceptId,
    pub to: ConceptId,
    pub type_id: TypeId,
    pub metadata: &'a Metadata,
}

/// Run all three stages against a candidate assertion.
pub fn validate_assertion(
    store: &EntityStore,
    draft: &AssertionDraft<'_>,
    rtype: &RelationshipType,
) -> Result<(), CredenceError> {
    check_status(rtype)?;
    for rule in &rtype.validation {
        check_rule(store, draft, rule)?;
    }
    check_logical_laws(draft, rtype)
}

// =============================================================================
// STAGE 1: STATUS
// =============================================================================

fn check_status(rtype: &RelationshipType) -> Result<(), CredenceError> {
    match &rtype.status {
        TypeStatus::Active => Ok(()),
        TypeStatus::Deprecated {
            replaced_by,
            reason,
        } => Err(CredenceError::Validation {
            code: ValidationCode::DeprecatedType,
            message: match replaced_by {
                Some(replacement) => format!(
                    "relationship type {} is deprecated ({reason}); use {replacement} instead",
                    rtype.id
                ),
                None => format!("relationship type {} is deprecated ({reason})", rtype.id),
            },
            detail: None,
            replaced_by: *replaced_by,
        }),
    }
}

// =============================================================================
// STAGE 2: DECLARATIVE RULES
// =============================================================================

fn check_rule(
    store: &EntityStore,
    draft: &AssertionDraft<'_>,
    rule: &ValidationRule,
) -> Result<(), CredenceError> {
    match rule {
        ValidationRule::RequiredMetadata { keys } => {
            for key in keys {
                if !draft.metadata.contains_key(key) {
                    return Err(CredenceError::Validation {
                        code: ValidationCode::RequiredMetadata,
                        message: format!("required metadata key {key:?} is missing"),
                        detail: Some(ConstraintDetail {
                            field: "metadata".to_string(),
                            constraint: "required key".to_string(),
                            value: key.clone(),
                        }),
                        replaced_by: None,
                    });
                }
            }
            Ok(())
        }
        ValidationRule::NoSelfReference => {
            if draft.from == draft.to {
                Err(CredenceError::validation(
                    ValidationCode::SelfReference,
                    format!("concept {} may not relate to itself", draft.from),
                ))
            } else {
                Ok(())
            }
        }
        ValidationRule::UniqueTarget => {
            if store.has_relationship(draft.type_id, draft.from, draft.to) {
                Err(CredenceError::validation(
                    ValidationCode::UniqueTarget,
                    format!(
                        "a relationship of type {} from {} to {} already exists",
                        draft.type_id, draft.from, draft.to
                    ),
                ))
            } else {
                Ok(())
            }
        }
        // Custom rules are extension stubs: no evaluator exists yet, so they
        // always fail, surfacing their declared code and description.
        ValidationRule::Custom {
            name,
            description,
            error_code,
        } => Err(CredenceError::Validation {
            code: ValidationCode::CustomRule,
            message: format!("custom rule {name:?} failed: {description}"),
            detail: Some(ConstraintDetail {
                field: "validation".to_string(),
                constraint: "custom rule".to_string(),
                value: error_code.clone(),
            }),
            replaced_by: None,
        }),
    }
}

// =============================================================================
// STAGE 3: LOGICAL LAWS
// =============================================================================

fn check_logical_laws(
    draft: &AssertionDraft<'_>,
    rtype: &RelationshipType,
) -> Result<(), CredenceError> {
    if rtype.logical.irreflexive && draft.from == draft.to {
        return Err(CredenceError::validation(
            ValidationCode::IrreflexiveViolation,
            format!(
                "type {} is irreflexive: concept {} may not relate to itself",
                rtype.id, draft.from
            ),
        ));
    }
    // Reflexive self-reference is always permitted; symmetric and transitive
    // have no assertion-time effect.
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
