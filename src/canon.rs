//! Canonical JSON encoding and the key digest.
//!
//! Canonical rules:
//! - object keys in canonical (name-sorted) attribute order
//! - no insignificant whitespace
//!
//! Two keys that are equal produce byte-identical canonical JSON, so the
//! digest over those bytes is a stable cross-process stand-in for the key
//! when deduplicating nodes from multiple data sources.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::DigestError;
use crate::key::IdentityKey;

/// Render a key's canonical form as canonical JSON bytes.
pub fn canonical_json_bytes(key: &IdentityKey) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&CanonicalMap(key))
}

struct CanonicalMap<'k>(&'k IdentityKey);

impl Serialize for CanonicalMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let pairs = self.0.canonical();
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (name, value) in pairs {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// SHA-256 fingerprint of a key's canonical JSON bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyDigest([u8; 32]);

impl KeyDigest {
    pub fn of(key: &IdentityKey) -> Result<Self, serde_json::Error> {
        let bytes = canonical_json_bytes(key)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(Self(hasher.finalize().into()))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Parse from a 64-character lowercase or uppercase hex string.
    pub fn from_hex(s: &str) -> Result<Self, DigestError> {
        if s.len() != 64 {
            return Err(DigestError {
                raw: s.to_string(),
                reason: format!("must be 64 hex chars (got {})", s.len()),
            });
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let hex = std::str::from_utf8(chunk).map_err(|_| DigestError {
                raw: s.to_string(),
                reason: "contains invalid UTF-8".into(),
            })?;
            bytes[i] = u8::from_str_radix(hex, 16).map_err(|_| DigestError {
                raw: s.to_string(),
                reason: format!("contains invalid hex: {}", hex),
            })?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Debug for KeyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyDigest({})", self.to_hex())
    }
}

impl fmt::Display for KeyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for KeyDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for KeyDigest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        KeyDigest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::IdentityKey;

    #[test]
    fn canonical_json_sorts_names_and_stays_compact() {
        let key = IdentityKey::new(attrs! { "name" => "foo", "line" => 10 }).unwrap();
        let bytes = canonical_json_bytes(&key).unwrap();
        assert_eq!(bytes, br#"{"line":10,"name":"foo"}"#);
    }

    #[test]
    fn digest_ignores_insertion_order() {
        let a = IdentityKey::new(attrs! { "name" => "foo", "line" => 10 }).unwrap();
        let b = IdentityKey::new(attrs! { "line" => 10, "name" => "foo" }).unwrap();
        assert_eq!(KeyDigest::of(&a).unwrap(), KeyDigest::of(&b).unwrap());
    }

    #[test]
    fn hex_round_trip() {
        let key = IdentityKey::new(attrs! { "name" => "foo" }).unwrap();
        let digest = KeyDigest::of(&key).unwrap();
        let hex = digest.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(KeyDigest::from_hex(&hex).unwrap(), digest);
    }

    #[test]
    fn from_hex_rejects_malformed_input() {
        assert!(KeyDigest::from_hex("abc").is_err());
        let bad = "zz".repeat(32);
        let err = KeyDigest::from_hex(&bad).unwrap_err();
        assert!(err.reason.contains("invalid hex"));
    }
}
