//! Class and struct type entry.
//!
//! This module provides `ClassEntry` for classes and structs, including
//! generic definitions (`List<T>`) and their instances (`List<int>`).

use crate::{TypeHash, well_known};

/// Registry entry for a class or struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntry {
    /// Unqualified name.
    pub name: String,
    /// Fully qualified name (with namespace and generic arguments).
    pub qualified_name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Struct (value semantics) rather than class (reference semantics).
    pub is_value_type: bool,

    // === Inheritance ===
    /// Base class type hash (single inheritance). `None` only for the root.
    pub base_class: Option<TypeHash>,
    /// Directly implemented interface type hashes.
    pub interfaces: Vec<TypeHash>,

    // === Members ===
    /// User-declared conversion operators (function hashes).
    pub conversion_operators: Vec<TypeHash>,

    // === Generic Info ===
    /// Generic parameter type hashes (non-empty = generic definition).
    pub generic_params: Vec<TypeHash>,
    /// Definition this was instantiated from (for generic instances).
    pub definition: Option<TypeHash>,
    /// Type arguments for generic instances.
    pub type_args: Vec<TypeHash>,

    // === Modifiers ===
    pub is_sealed: bool,
    pub is_abstract: bool,
}

impl ClassEntry {
    /// Create a new class entry with no base class.
    pub fn new(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        type_hash: TypeHash,
        is_value_type: bool,
    ) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            type_hash,
            is_value_type,
            base_class: None,
            interfaces: Vec::new(),
            conversion_operators: Vec::new(),
            generic_params: Vec::new(),
            definition: None,
            type_args: Vec::new(),
            is_sealed: false,
            is_abstract: false,
        }
    }

    /// Create a reference type (class) deriving from `object`.
    pub fn reference(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        let mut entry = Self::new(name.clone(), name, type_hash, false);
        entry.base_class = Some(well_known::OBJECT);
        entry
    }

    /// Create a sealed value type (struct) deriving from `ValueType`.
    pub fn value(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        let mut entry = Self::new(name.clone(), name, type_hash, true);
        entry.base_class = Some(well_known::VALUE_TYPE);
        entry.is_sealed = true;
        entry
    }

    // === Builder Methods ===

    /// Set the base class.
    pub fn with_base(mut self, base: TypeHash) -> Self {
        self.base_class = Some(base);
        self
    }

    /// Add an implemented interface.
    pub fn with_interface(mut self, interface: TypeHash) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a user-declared conversion operator.
    pub fn with_operator(mut self, operator: TypeHash) -> Self {
        self.conversion_operators.push(operator);
        self
    }

    /// Add a generic parameter.
    pub fn with_generic_param(mut self, param: TypeHash) -> Self {
        self.generic_params.push(param);
        self
    }

    /// Mark the class as sealed.
    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// Mark the class as abstract.
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    // === Queries ===

    /// Check if this is a generic definition.
    pub fn is_generic_definition(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// Check if this is a generic instance.
    pub fn is_generic_instance(&self) -> bool {
        self.definition.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_class_derives_from_object() {
        let entry = ClassEntry::reference("Player");
        assert_eq!(entry.type_hash, TypeHash::from_name("Player"));
        assert_eq!(entry.base_class, Some(well_known::OBJECT));
        assert!(!entry.is_value_type);
        assert!(!entry.is_sealed);
    }

    #[test]
    fn struct_is_sealed_value_type() {
        let entry = ClassEntry::value("Vector3");
        assert!(entry.is_value_type);
        assert!(entry.is_sealed);
        assert_eq!(entry.base_class, Some(well_known::VALUE_TYPE));
    }

    #[test]
    fn builder_methods() {
        let base = TypeHash::from_name("Entity");
        let iface = TypeHash::from_name("IDrawable");
        let t = TypeHash::from_name("Sprite::T");
        let entry = ClassEntry::reference("Sprite")
            .with_base(base)
            .with_interface(iface)
            .with_generic_param(t)
            .sealed();
        assert_eq!(entry.base_class, Some(base));
        assert_eq!(entry.interfaces, vec![iface]);
        assert!(entry.is_generic_definition());
        assert!(!entry.is_generic_instance());
        assert!(entry.is_sealed);
    }
}
