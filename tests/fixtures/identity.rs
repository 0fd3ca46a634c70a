#![allow(dead_code)]

use nodekey::{attrs, AttrMap, IdentityKey};

pub fn function_key(name: &str) -> IdentityKey {
    IdentityKey::new(attrs! { "name" => name }).expect("valid key fixture")
}

pub fn source_location(name: &str, file: &str, line: i64) -> IdentityKey {
    IdentityKey::new(attrs! { "name" => name, "file" => file, "line" => line })
        .expect("valid key fixture")
}

pub fn module_key(module: &str, name: &str) -> IdentityKey {
    IdentityKey::new(attrs! { "module" => module, "name" => name }).expect("valid key fixture")
}

/// Same attribute set built in two insertion orders.
pub fn shuffled_pair() -> (IdentityKey, IdentityKey) {
    let forward = attrs! { "name" => "main", "file" => "main.c", "line" => 12 };
    let reversed = attrs! { "line" => 12, "file" => "main.c", "name" => "main" };
    (
        IdentityKey::new(forward).expect("valid key fixture"),
        IdentityKey::new(reversed).expect("valid key fixture"),
    )
}

pub fn empty_map() -> AttrMap {
    AttrMap::new()
}
