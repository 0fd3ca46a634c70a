//! Attribute primitives.
//!
//! AttrValue: tagged value payload (string, int, bool, list)
//! AttrMap: insertion-ordered name -> value mapping with override-on-reinsert

use std::cmp::Ordering;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single attribute value.
///
/// Values of different kinds never compare equal and have no mutual order:
/// `partial_cmp` across kinds is `None`. Ordering a working set therefore
/// requires kind-consistent values per attribute name, which is the caller's
/// contract, not this type's.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Kind label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "str",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialOrd for AttrValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    match x.partial_cmp(y)? {
                        Ordering::Equal => {}
                        ord => return Some(ord),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<u32> for AttrValue {
    fn from(n: u32) -> Self {
        Self::Int(n.into())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(items: Vec<AttrValue>) -> Self {
        Self::List(items)
    }
}

/// Insertion-ordered attribute mapping with unique names.
///
/// Reinserting an existing name replaces the value in place; the entry keeps
/// its original position. Lookup is a linear scan - attribute sets are small
/// and fixed per node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttrMap {
    entries: Vec<(String, AttrValue)>,
}

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Apply `overrides` on top of this map: overlapping names take the
    /// override's value, everything else is retained.
    pub fn merge(&mut self, overrides: AttrMap) {
        for (name, value) in overrides {
            self.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl fmt::Display for AttrMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        f.write_str("}")
    }
}

impl<N: Into<String>, V: Into<AttrValue>> FromIterator<(N, V)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = AttrMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl IntoIterator for AttrMap {
    type Item = (String, AttrValue);
    type IntoIter = std::vec::IntoIter<(String, AttrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttrMap {
    type Item = &'a (String, AttrValue);
    type IntoIter = std::slice::Iter<'a, (String, AttrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for AttrMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttrMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttrMapVisitor;

        impl<'de> Visitor<'de> for AttrMapVisitor {
            type Value = AttrMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = AttrMap::new();
                while let Some((name, value)) = access.next_entry::<String, AttrValue>()? {
                    map.insert(name, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(AttrMapVisitor)
    }
}

/// Build an [`AttrMap`] from literal name/value pairs.
///
/// ```
/// use nodekey::attrs;
///
/// let attrs = attrs! { "name" => "main", "line" => 42 };
/// assert_eq!(attrs.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    () => { $crate::AttrMap::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::AttrMap::new();
        $(map.insert($name, $value);)+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut map = AttrMap::new();
        map.insert("name", "foo");
        map.insert("file", "bar.c");
        map.insert("name", "baz");

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name"), Some(&AttrValue::from("baz")));
        let names: Vec<&str> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["name", "file"]);
    }

    #[test]
    fn merge_overrides_and_retains() {
        let mut base = attrs! { "name" => "foo", "file" => "bar.c" };
        base.merge(attrs! { "file" => "baz.h", "line" => 10 });

        assert_eq!(base.get("name"), Some(&AttrValue::from("foo")));
        assert_eq!(base.get("file"), Some(&AttrValue::from("baz.h")));
        assert_eq!(base.get("line"), Some(&AttrValue::from(10)));
    }

    #[test]
    fn cross_kind_values_are_unordered() {
        let s = AttrValue::from("10");
        let n = AttrValue::from(10);
        assert_eq!(s.partial_cmp(&n), None);
        assert_ne!(s, n);
    }

    #[test]
    fn same_kind_values_order_natively() {
        assert!(AttrValue::from("a") < AttrValue::from("b"));
        assert!(AttrValue::from(2) < AttrValue::from(10));
        assert!(AttrValue::from(false) < AttrValue::from(true));
    }

    #[test]
    fn lists_order_lexicographically() {
        let short = AttrValue::from(vec![AttrValue::from(1)]);
        let long = AttrValue::from(vec![AttrValue::from(1), AttrValue::from(2)]);
        assert!(short < long);

        let mixed = AttrValue::from(vec![AttrValue::from("x")]);
        assert_eq!(long.partial_cmp(&mixed), None);
    }

    #[test]
    fn display_renders_insertion_order() {
        let map = attrs! { "name" => "foo", "line" => 10, "inlined" => false };
        assert_eq!(map.to_string(), r#"{name: "foo", line: 10, inlined: false}"#);
    }

    #[test]
    fn serde_preserves_document_order() {
        let map = attrs! { "line" => 10, "name" => "foo" };
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"line":10,"name":"foo"}"#);

        let back: AttrMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
