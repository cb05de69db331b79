//! Platform types every compilation starts with.
//!
//! ```text
//! object
//! ├── ValueType            (abstract)
//! │   ├── Enum             (abstract)
//! │   ├── <primitives>
//! │   └── Nullable<T>      (sealed struct, T : struct)
//! ├── Array                (abstract)
//! ├── Delegate             (abstract)
//! └── string               (sealed)
//! ```
//!
//! `ValueType` and `Enum` are themselves reference types; converting a value
//! to either is boxing.

use sable_core::{ClassEntry, PrimitiveEntry, PrimitiveKind, TypeHash, TypeParamEntry, well_known};

use crate::TypeRegistry;

impl TypeRegistry {
    /// Create a registry holding the primitives and platform types.
    pub fn with_platform_types() -> Self {
        let mut registry = Self::new();
        registry.register_platform_types();
        registry
    }

    /// Register the primitives and platform types, replacing any existing
    /// entries with the same hashes.
    pub fn register_platform_types(&mut self) {
        for kind in PrimitiveKind::ALL {
            self.insert_type(PrimitiveEntry::new(kind));
        }

        self.insert_type(ClassEntry::new("object", "object", well_known::OBJECT, false));
        self.insert_type(root_class("ValueType", well_known::VALUE_TYPE, well_known::OBJECT));
        self.insert_type(root_class("Enum", well_known::ENUM, well_known::VALUE_TYPE));
        self.insert_type(root_class("Array", well_known::ARRAY, well_known::OBJECT));
        self.insert_type(root_class("Delegate", well_known::DELEGATE, well_known::OBJECT));
        self.insert_type(ClassEntry::reference("string").sealed());

        let t = TypeParamEntry::for_owner("T", 0, well_known::NULLABLE, "Nullable")
            .value_constrained();
        let t_hash = self.insert_type(t);
        self.insert_type(ClassEntry::value("Nullable").with_generic_param(t_hash));
    }
}

fn root_class(name: &str, hash: TypeHash, base: TypeHash) -> ClassEntry {
    ClassEntry::new(name, name, hash, false)
        .with_base(base)
        .abstract_class()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::{TypeFlags, TypeQuery, primitives};

    #[test]
    fn platform_hierarchy() {
        let registry = TypeRegistry::with_platform_types();
        assert_eq!(registry.base_class(well_known::OBJECT), None);
        assert_eq!(
            registry.base_chain(primitives::INT32),
            vec![well_known::VALUE_TYPE, well_known::OBJECT]
        );
        assert_eq!(
            registry.base_chain(well_known::ENUM),
            vec![well_known::VALUE_TYPE, well_known::OBJECT]
        );
        assert!(registry.is_reference_type(well_known::VALUE_TYPE));
        assert!(registry.flags(well_known::STRING).contains(TypeFlags::SEALED));
    }

    #[test]
    fn nullable_definition() {
        let registry = TypeRegistry::with_platform_types();
        assert_eq!(
            registry.generic_params(well_known::NULLABLE),
            vec![well_known::NULLABLE_T]
        );
        assert!(registry.is_value_type(well_known::NULLABLE_T));

        let nullable_int = registry.nullable_of(primitives::INT32).unwrap();
        let flags = registry.flags(nullable_int);
        assert!(flags.contains(TypeFlags::NULLABLE | TypeFlags::VALUE_TYPE | TypeFlags::SEALED));
        assert_eq!(registry.nullable_inner(nullable_int), Some(primitives::INT32));
        assert_eq!(registry.nullable_inner(primitives::INT32), None);
    }

    #[test]
    fn every_primitive_is_registered() {
        let registry = TypeRegistry::with_platform_types();
        for kind in PrimitiveKind::ALL {
            assert!(registry.type_entry(kind.type_hash()).is_some(), "{kind}");
        }
        assert!(registry.type_entry(primitives::NULL).is_none());
    }
}
