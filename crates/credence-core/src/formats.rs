//! # Snapshot Wire Format
//!
//! Binary serialization for store snapshots.
//!
//! Format: header (5 bytes) + postcard-serialized [`Snapshot`].
//! - 4 bytes: magic (`"CRED"`)
//! - 1 byte: format version
//!
//! File I/O lives in the app layer; these are pure byte transformations.
//! All validation (minimum size, maximum payload size, magic, version) runs
//! BEFORE payload deserialization so corrupt or hostile input cannot drive
//! large allocations.

use crate::error::CredenceError;
use crate::primitives::{FORMAT_VERSION, MAGIC_BYTES, MAX_SNAPSHOT_PAYLOAD_SIZE};
use crate::snapshot::Snapshot;

/// Header length: magic plus version byte.
const HEADER_SIZE: usize = 5;

/// The header preceding every snapshot payload.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl SnapshotHeader {
    /// A header for the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *MAGIC_BYTES,
            version: FORMAT_VERSION,
        }
    }

    /// Validate magic and version.
    pub fn validate(&self) -> Result<(), CredenceError> {
        if &self.magic != MAGIC_BYTES {
            return Err(CredenceError::System(
                "snapshot has invalid magic bytes".to_string(),
            ));
        }
        if self.version != FORMAT_VERSION {
            return Err(CredenceError::System(format!(
                "unsupported snapshot version {} (expected {FORMAT_VERSION})",
                self.version
            )));
        }
        Ok(())
    }

    /// Write the header bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read a header from the front of a byte stream.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CredenceError> {
        if bytes.len() < HEADER_SIZE {
            return Err(CredenceError::System(
                "snapshot data too short for header".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a snapshot to header + postcard payload.
pub fn snapshot_to_bytes(snapshot: &Snapshot) -> Result<Vec<u8>, CredenceError> {
    let payload = postcard::to_stdvec(snapshot)
        .map_err(|e| CredenceError::System(format!("snapshot serialization failed: {e}")))?;

    let mut result = Vec::with_capacity(HEADER_SIZE + payload.len());
    result.extend_from_slice(&SnapshotHeader::new().to_bytes());
    result.extend_from_slice(&payload);
    Ok(result)
}

/// Deserialize a snapshot, validating size bounds and the header first.
pub fn snapshot_from_bytes(bytes: &[u8]) -> Result<Snapshot, CredenceError> {
    if bytes.len() < HEADER_SIZE {
        return Err(CredenceError::System(format!(
            "snapshot data too short: minimum {HEADER_SIZE} bytes required"
        )));
    }
    if bytes.len() > MAX_SNAPSHOT_PAYLOAD_SIZE {
        return Err(CredenceError::System(format!(
            "snapshot size {} bytes exceeds maximum allowed {MAX_SNAPSHOT_PAYLOAD_SIZE} bytes",
            bytes.len()
        )));
    }

    let header = SnapshotHeader::from_bytes(bytes)?;
    header.validate()?;

    postcard::from_bytes(&bytes[HEADER_SIZE..])
        .map_err(|e| CredenceError::System(format!("snapshot deserialization failed: {e}")))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fraction::Fraction;
    use crate::store::EntityStore;
    use crate::types::{
        Caller, InheritanceProperties, LogicalProperties, Metadata, PrincipalId, Timestamp,
    };

    fn seeded_snapshot() -> Snapshot {
        let mut store = EntityStore::new();
        let creator = Caller::new(PrincipalId::new("u1"), Timestamp(1)).creator();
        let t = store
            .create_relationship_type(
                "IS-A".to_string(),
                None,
                LogicalProperties {
                    transitive: true,
                    irreflexive: true,
                    ..LogicalProperties::default()
                },
                InheritanceProperties::default(),
                Vec::new(),
                Metadata::new(),
            )
            .expect("type");
        let a = store
            .create_concept(creator.clone(), "A".to_string(), None, Metadata::new())
            .expect("concept");
        let b = store
            .create_concept(creator.clone(), "B".to_string(), None, Metadata::new())
            .expect("concept");
        store
            .assert_relationship(
                creator,
                a,
                b,
                t,
                Fraction::new(1, 2).expect("fraction"),
                Fraction::one(),
                Metadata::new(),
            )
            .expect("assert");
        Snapshot::from(&store)
    }

    #[test]
    fn header_roundtrip() {
        let header = SnapshotHeader::new();
        let bytes = header.to_bytes();
        let restored = SnapshotHeader::from_bytes(&bytes).expect("parse header");
        assert_eq!(restored.magic, *MAGIC_BYTES);
        assert_eq!(restored.version, FORMAT_VERSION);
        restored.validate().expect("valid");
    }

    #[test]
    fn bytes_roundtrip_bit_exact() {
        let snapshot = seeded_snapshot();
        let bytes1 = snapshot_to_bytes(&snapshot).expect("serialize");
        let restored = snapshot_from_bytes(&bytes1).expect("deserialize");
        let bytes2 = snapshot_to_bytes(&restored).expect("reserialize");
        assert_eq!(
            bytes1, bytes2,
            "save -> load -> save must produce identical bytes"
        );
    }

    #[test]
    fn roundtrip_restores_a_working_store() {
        let snapshot = seeded_snapshot();
        let bytes = snapshot_to_bytes(&snapshot).expect("serialize");
        let store = snapshot_from_bytes(&bytes)
            .expect("deserialize")
            .restore()
            .expect("restore");
        assert_eq!(store.concept_count(), 2);
        assert_eq!(store.relationship_count(), 1);
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = snapshot_to_bytes(&seeded_snapshot()).expect("serialize");
        bytes[0..4].copy_from_slice(b"XXXX");
        assert!(snapshot_from_bytes(&bytes).is_err());
    }

    #[test]
    fn unsupported_version_rejected() {
        let mut bytes = snapshot_to_bytes(&seeded_snapshot()).expect("serialize");
        bytes[4] = FORMAT_VERSION + 1;
        assert!(snapshot_from_bytes(&bytes).is_err());
    }

    #[test]
    fn truncated_data_rejected() {
        assert!(snapshot_from_bytes(&[0u8; 3]).is_err());
    }
}
