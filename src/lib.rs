//! Canonical identity keys for performance-profile graph nodes.
//!
//! Many nodes across data sources or sampled runs describe the same program
//! location. [`IdentityKey`] gives that location a stable, comparable,
//! hashable representation so graph builders can deduplicate, merge, and
//! sort nodes, and use the key directly as a map or set key.
//!
//! Module hierarchy follows type dependency order:
//! - error: construction/lookup/comparison error types
//! - attr: AttrValue, AttrMap attribute primitives
//! - key: IdentityKey and the lookup query shapes
//! - canon: canonical JSON encoding and KeyDigest

#![forbid(unsafe_code)]

pub mod attr;
pub mod canon;
pub mod error;
pub mod key;

pub use attr::{AttrMap, AttrValue};
pub use canon::{canonical_json_bytes, KeyDigest};
pub use error::{DigestError, IdentityError, InvalidIdentity, MissingAttribute, UnorderedValues};
pub use key::{AttrQuery, AttrValues, IdentityKey};
