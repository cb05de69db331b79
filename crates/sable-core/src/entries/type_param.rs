//! Generic type parameter entry.
//!
//! This module provides `TypeParamEntry` for placeholders like `T` in
//! `List<T>` or `M<T>(T value)`.

use crate::TypeHash;

/// Constraints declared on a generic type parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeParamConstraint {
    /// Base class bound, or another type parameter this one is bounded by.
    pub base: Option<TypeHash>,
    /// Interface bounds.
    pub interfaces: Vec<TypeHash>,
    /// `struct` constraint.
    pub value_type: bool,
    /// `class` constraint.
    pub reference_type: bool,
}

/// Registry entry for a generic type parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamEntry {
    /// Parameter name (e.g., "T", "K", "V").
    pub name: String,
    /// Parameter index within its owner (0-based).
    pub index: usize,
    /// The generic type or method this parameter belongs to.
    pub owner: TypeHash,
    /// Type hash for this parameter.
    pub type_hash: TypeHash,
    /// Declared constraints.
    pub constraint: TypeParamConstraint,
}

impl TypeParamEntry {
    /// Create a parameter with its hash derived from the owner's name.
    pub fn for_owner(
        name: impl Into<String>,
        index: usize,
        owner: TypeHash,
        owner_name: &str,
    ) -> Self {
        let name = name.into();
        let qualified = format!("{}::{}", owner_name, name);
        Self {
            type_hash: TypeHash::from_name(&qualified),
            name,
            index,
            owner,
            constraint: TypeParamConstraint::default(),
        }
    }

    /// Bound the parameter by a base class or another type parameter.
    pub fn with_base(mut self, base: TypeHash) -> Self {
        self.constraint.base = Some(base);
        self
    }

    /// Bound the parameter by an interface.
    pub fn with_interface(mut self, interface: TypeHash) -> Self {
        self.constraint.interfaces.push(interface);
        self
    }

    /// Add the `struct` constraint.
    pub fn value_constrained(mut self) -> Self {
        self.constraint.value_type = true;
        self
    }

    /// Add the `class` constraint.
    pub fn reference_constrained(mut self) -> Self {
        self.constraint.reference_type = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_qualified_by_owner() {
        let owner = TypeHash::from_name("List");
        let param = TypeParamEntry::for_owner("T", 0, owner, "List");
        assert_eq!(param.type_hash, TypeHash::from_name("List::T"));
        assert_eq!(param.owner, owner);
        assert_eq!(param.constraint, TypeParamConstraint::default());
    }

    #[test]
    fn constraints_accumulate() {
        let base = TypeHash::from_name("Entity");
        let param = TypeParamEntry::for_owner("T", 0, TypeHash::from_name("F"), "F")
            .with_base(base)
            .reference_constrained();
        assert_eq!(param.constraint.base, Some(base));
        assert!(param.constraint.reference_type);
        assert!(!param.constraint.value_type);
    }
}
