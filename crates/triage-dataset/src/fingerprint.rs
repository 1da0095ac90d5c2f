//! Content fingerprint for loaded datasets
//!
//! Provides [`DatasetFingerprint`], a 32-byte Blake3 hash of the raw
//! document so callers can tell whether a reload changed anything.

use std::fmt::{self, Display, Formatter};

/// A 32-byte dataset fingerprint (Blake3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetFingerprint([u8; 32]);

impl DatasetFingerprint {
    /// Fingerprint raw document bytes
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Get reference to the underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for DatasetFingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl serde::Serialize for DatasetFingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
