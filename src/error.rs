//! Error types for key construction, lookup, and comparison.
//!
//! Specific types carry what a caller needs to react; `IdentityError` is a
//! thin transparent wrapper for callers that unify.

use thiserror::Error;

/// Construction rejected: the merged attribute set was empty.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("identity key requires at least one attribute")]
pub struct InvalidIdentity;

/// Strict lookup asked for an attribute the key does not carry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("attribute `{name}` is missing")]
pub struct MissingAttribute {
    pub name: String,
}

/// Checked comparison reached two attribute values with no mutual order.
///
/// Carries the attribute name and both value kinds so the caller can tell
/// which entry of the working set mixed kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("attribute `{name}` values are not orderable: {lhs} vs {rhs}")]
pub struct UnorderedValues {
    pub name: String,
    pub lhs: &'static str,
    pub rhs: &'static str,
}

/// Invalid key digest text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("key digest `{raw}` is invalid: {reason}")]
pub struct DigestError {
    pub raw: String,
    pub reason: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentityError {
    #[error(transparent)]
    Invalid(#[from] InvalidIdentity),
    #[error(transparent)]
    Missing(#[from] MissingAttribute),
    #[error(transparent)]
    Unordered(#[from] UnorderedValues),
    #[error(transparent)]
    Digest(#[from] DigestError),
}
