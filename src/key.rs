//! The identity key: canonical, hashable node identity.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::attr::{AttrMap, AttrValue};
use crate::error::{InvalidIdentity, MissingAttribute, UnorderedValues};

/// Canonical identity of a performance-profile graph node.
///
/// Wraps the attribute set describing one program location (function name,
/// source file, line, module, ...). Equality, ordering, and hashing all go
/// through the canonical form - the name-sorted attribute pairs - so keys
/// built from the same attributes in any insertion order collapse to the
/// same identity when graph builders deduplicate or merge nodes.
///
/// Keys are immutable after construction. The canonical form is computed on
/// first use and cached; the cache write is the only internal state change
/// and goes through a `OnceLock`, so sharing keys across threads is safe.
#[derive(Serialize, Deserialize)]
#[serde(try_from = "AttrMap", into = "AttrMap")]
pub struct IdentityKey {
    attrs: AttrMap,
    canon: OnceLock<Vec<(String, AttrValue)>>,
}

impl IdentityKey {
    /// Construct from an attribute mapping.
    ///
    /// Rejects an empty mapping eagerly: an attribute-free identity is
    /// meaningless and must not reach first use.
    pub fn new(attrs: AttrMap) -> Result<Self, InvalidIdentity> {
        if attrs.is_empty() {
            return Err(InvalidIdentity);
        }
        Ok(Self {
            attrs,
            canon: OnceLock::new(),
        })
    }

    /// Construct from `base` with `overrides` applied on top.
    ///
    /// Overlapping names take the override's value; all other base entries
    /// are retained.
    pub fn merged(base: AttrMap, overrides: AttrMap) -> Result<Self, InvalidIdentity> {
        let mut attrs = base;
        attrs.merge(overrides);
        Self::new(attrs)
    }

    /// The raw attribute mapping, in the order supplied.
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    /// Name-sorted attribute pairs. Built on first use, then cached.
    pub fn canonical(&self) -> &[(String, AttrValue)] {
        self.canon.get_or_init(|| {
            let mut pairs: Vec<(String, AttrValue)> = self
                .attrs
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            pairs
        })
    }

    /// New key holding an independent copy of the attribute mapping.
    ///
    /// The canonical-form cache is not carried over; the duplicate rebuilds
    /// it on first use.
    pub fn duplicate(&self) -> Self {
        Self {
            attrs: self.attrs.clone(),
            canon: OnceLock::new(),
        }
    }

    /// Strict lookup.
    pub fn get(&self, name: &str) -> Result<&AttrValue, MissingAttribute> {
        self.attrs.get(name).ok_or_else(|| MissingAttribute {
            name: name.to_string(),
        })
    }

    /// Lookup with a caller-supplied default for absent names.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a AttrValue) -> &'a AttrValue {
        self.attrs.get(name).unwrap_or(default)
    }

    /// Shape-preserving lookup: a bare value for a single name, a sequence
    /// of values for a sequence of names. Missing names yield `None` rather
    /// than failing the call.
    pub fn values<'q>(&self, query: impl Into<AttrQuery<'q>>) -> AttrValues<'_> {
        match query.into() {
            AttrQuery::One(name) => AttrValues::One(self.attrs.get(name)),
            AttrQuery::Many(names) => {
                AttrValues::Many(names.iter().map(|name| self.attrs.get(name)).collect())
            }
        }
    }

    /// Checked comparison over canonical forms.
    ///
    /// Total order as long as every compared value pair is mutually
    /// orderable; otherwise reports the attribute whose values mixed kinds.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, UnorderedValues> {
        let (lhs, rhs) = (self.canonical(), other.canonical());
        for ((ln, lv), (rn, rv)) in lhs.iter().zip(rhs) {
            match ln.cmp(rn) {
                Ordering::Equal => {}
                ord => return Ok(ord),
            }
            match lv.partial_cmp(rv) {
                Some(Ordering::Equal) => {}
                Some(ord) => return Ok(ord),
                None => {
                    return Err(UnorderedValues {
                        name: ln.clone(),
                        lhs: lv.kind(),
                        rhs: rv.kind(),
                    });
                }
            }
        }
        Ok(lhs.len().cmp(&rhs.len()))
    }
}

impl Clone for IdentityKey {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl PartialEq for IdentityKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for IdentityKey {}

impl Hash for IdentityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl PartialOrd for IdentityKey {
    /// Lexicographic over canonical forms; `None` when the first differing
    /// position holds values with no mutual order.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attrs)
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKey({})", self.attrs)
    }
}

impl TryFrom<AttrMap> for IdentityKey {
    type Error = InvalidIdentity;

    fn try_from(attrs: AttrMap) -> Result<Self, Self::Error> {
        IdentityKey::new(attrs)
    }
}

impl From<IdentityKey> for AttrMap {
    fn from(key: IdentityKey) -> AttrMap {
        key.attrs
    }
}

/// Lookup request shape: one bare name, or a sequence of names.
#[derive(Clone, Copy, Debug)]
pub enum AttrQuery<'q> {
    One(&'q str),
    Many(&'q [&'q str]),
}

impl<'q> From<&'q str> for AttrQuery<'q> {
    fn from(name: &'q str) -> Self {
        Self::One(name)
    }
}

impl<'q> From<&'q [&'q str]> for AttrQuery<'q> {
    fn from(names: &'q [&'q str]) -> Self {
        Self::Many(names)
    }
}

impl<'q, const N: usize> From<&'q [&'q str; N]> for AttrQuery<'q> {
    fn from(names: &'q [&'q str; N]) -> Self {
        Self::Many(names)
    }
}

/// Lookup result, mirroring the request shape.
///
/// The single-name/bare-value vs. sequence/sequence asymmetry is a
/// deliberate compatibility contract with collaborators that call both ways.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValues<'k> {
    One(Option<&'k AttrValue>),
    Many(Vec<Option<&'k AttrValue>>),
}
