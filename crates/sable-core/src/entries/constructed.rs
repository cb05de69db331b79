//! Array and pointer type entries.
//!
//! These are structural types: their hash is derived from the component type
//! and they are materialised on demand by the type provider.

use crate::TypeHash;

/// Registry entry for an array type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayEntry {
    pub type_hash: TypeHash,
    pub element: TypeHash,
    pub rank: u32,
}

impl ArrayEntry {
    pub fn new(element: TypeHash, rank: u32) -> Self {
        Self {
            type_hash: TypeHash::from_array(element, rank),
            element,
            rank,
        }
    }
}

/// Registry entry for an unmanaged pointer type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEntry {
    pub type_hash: TypeHash,
    pub pointee: TypeHash,
}

impl PointerEntry {
    pub fn new(pointee: TypeHash) -> Self {
        Self {
            type_hash: TypeHash::from_pointer(pointee),
            pointee,
        }
    }
}
