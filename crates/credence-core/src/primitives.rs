//! # Kernel Primitives
//!
//! Hardcoded constants for the Credence kernel: the reserved bootstrap type
//! identifiers, boundary input limits, traversal bounds, and the snapshot
//! wire-format header values. Compiled into the binary, immutable at runtime.

use crate::types::TypeId;

// =============================================================================
// RESERVED BOOTSTRAP TYPE IDENTIFIERS
// =============================================================================

/// `IS-A`: transitive, irreflexive, inheritable. The default type for
/// inference queries that name none.
pub const IS_A: TypeId = TypeId(0);

/// `HAS-A`: irreflexive, inheritable.
pub const HAS_A: TypeId = TypeId(1);

/// `PART-OF`: transitive, irreflexive, not inheritable.
pub const PART_OF: TypeId = TypeId(2);

/// `PROPERTY-OF`: irreflexive, inheritable.
pub const PROPERTY_OF: TypeId = TypeId(3);

/// The principal recorded as creator of bootstrap records.
pub const SYSTEM_PRINCIPAL: &str = "system";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for concept and relationship-type names.
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum number of metadata pairs accepted on a single record.
pub const MAX_METADATA_ENTRIES: usize = 1024;

// =============================================================================
// SNAPSHOT WIRE FORMAT
// =============================================================================

/// Magic bytes opening every snapshot byte stream.
pub const MAGIC_BYTES: &[u8; 4] = b"CRED";

/// Current snapshot format version. Increment on breaking layout changes.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum accepted snapshot payload, validated before deserialization to
/// prevent allocation exhaustion from corrupt or hostile input.
pub const MAX_SNAPSHOT_PAYLOAD_SIZE: usize = 500 * 1024 * 1024; // 500 MB

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_ids_are_contiguous_from_zero() {
        assert_eq!(IS_A, TypeId(0));
        assert_eq!(HAS_A, TypeId(1));
        assert_eq!(PART_OF, TypeId(2));
        assert_eq!(PROPERTY_OF, TypeId(3));
    }

    #[test]
    fn magic_bytes_correct() {
        assert_eq!(MAGIC_BYTES, b"CRED");
    }
}
