//! Opaque entity identifiers
//!
//! Spatial structures never own the things they index. They hold an [`Id`]
//! (or another cheap handle) and serialize it as a plain number, so a saved
//! structure can be re-linked to live objects after loading.

use core::fmt;
use serde::{Deserialize, Serialize};

/// A unique, opaque identifier for an entity
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id {
    bits: u64,
}

impl Id {
    /// Create an ID from raw bits
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Create a null/invalid ID
    #[inline]
    pub const fn null() -> Self {
        Self { bits: u64::MAX }
    }

    /// Check if this ID is null
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.bits == u64::MAX
    }

    /// Get the raw bits
    #[inline]
    pub const fn to_bits(&self) -> u64 {
        self.bits
    }

    /// Create an ID from a name using FNV-1a
    pub fn from_name(name: &str) -> Self {
        let mut hash = 0xcbf29ce484222325u64;
        for byte in name.bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
        Self { bits: hash }
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Id(null)")
        } else {
            write!(f, "Id({})", self.bits)
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else {
            write!(f, "{}", self.bits)
        }
    }
}

/// Something that can be referred to by an [`Id`]
///
/// Implemented by the handles stored inside spatial structures so they can be
/// written out as ids.
pub trait Identified {
    fn id(&self) -> Id;
}

impl Identified for Id {
    #[inline]
    fn id(&self) -> Id {
        *self
    }
}

impl Identified for usize {
    #[inline]
    fn id(&self) -> Id {
        Id::from_bits(*self as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_id() {
        assert!(Id::null().is_null());
        assert!(Id::default().is_null());
        assert!(!Id::from_bits(3).is_null());
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_value(Id::from_bits(42)).unwrap();
        assert_eq!(json, serde_json::json!(42));
        let back: Id = serde_json::from_value(json).unwrap();
        assert_eq!(back, Id::from_bits(42));
    }

    #[test]
    fn test_from_name_is_stable() {
        assert_eq!(Id::from_name("agent"), Id::from_name("agent"));
        assert_ne!(Id::from_name("agent"), Id::from_name("obstacle"));
    }
}
