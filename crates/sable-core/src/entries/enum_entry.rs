//! Enum type entry.

use crate::{PrimitiveKind, TypeHash};

/// A named enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// Registry entry for an enumeration type.
///
/// Enums are integer-backed; the underlying kind defaults to `int`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntry {
    /// Unqualified name.
    pub name: String,
    /// Fully qualified name (with namespace).
    pub qualified_name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Underlying integral kind.
    pub underlying: PrimitiveKind,
    /// Enum values.
    pub values: Vec<EnumValue>,
}

impl EnumEntry {
    /// Create an `int`-backed enum in the global namespace.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name: name.clone(),
            qualified_name: name,
            type_hash,
            underlying: PrimitiveKind::Int32,
            values: Vec::new(),
        }
    }

    /// Set the underlying integral kind.
    pub fn with_underlying(mut self, underlying: PrimitiveKind) -> Self {
        self.underlying = underlying;
        self
    }

    /// Add a value.
    pub fn with_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            value,
        });
        self
    }

    /// Look up a value by name.
    pub fn get_value(&self, name: &str) -> Option<i64> {
        self.values.iter().find(|v| v.name == name).map(|v| v.value)
    }
}
