//! TypeEntry enum for unified type storage.
//!
//! This module provides `TypeEntry`, a single enum that wraps all type entry
//! kinds for unified storage and lookup in a type provider.

use crate::{TypeFlags, TypeHash, Variance, well_known};

use super::{
    ArrayEntry, ClassEntry, DelegateEntry, EnumEntry, InterfaceEntry, PointerEntry,
    PrimitiveEntry, TypeParamEntry,
};

/// Unified type entry.
///
/// Entries are immutable once registered; providers hand them out behind `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeEntry {
    /// Primitive type (int, double, bool, etc.).
    Primitive(PrimitiveEntry),
    /// Class or struct (including generic definitions and instances).
    Class(ClassEntry),
    /// Enum type.
    Enum(EnumEntry),
    /// Interface type.
    Interface(InterfaceEntry),
    /// Callable type.
    Delegate(DelegateEntry),
    /// Generic parameter placeholder.
    TypeParam(TypeParamEntry),
    /// Array type.
    Array(ArrayEntry),
    /// Unmanaged pointer type.
    Pointer(PointerEntry),
}

impl TypeEntry {
    /// Get the type hash for this entry.
    pub fn type_hash(&self) -> TypeHash {
        match self {
            TypeEntry::Primitive(e) => e.type_hash,
            TypeEntry::Class(e) => e.type_hash,
            TypeEntry::Enum(e) => e.type_hash,
            TypeEntry::Interface(e) => e.type_hash,
            TypeEntry::Delegate(e) => e.type_hash,
            TypeEntry::TypeParam(e) => e.type_hash,
            TypeEntry::Array(e) => e.type_hash,
            TypeEntry::Pointer(e) => e.type_hash,
        }
    }

    /// Get the unqualified name. Structural types have no name of their own.
    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Primitive(e) => e.name(),
            TypeEntry::Class(e) => &e.name,
            TypeEntry::Enum(e) => &e.name,
            TypeEntry::Interface(e) => &e.name,
            TypeEntry::Delegate(e) => &e.name,
            TypeEntry::TypeParam(e) => &e.name,
            TypeEntry::Array(_) => "[]",
            TypeEntry::Pointer(_) => "*",
        }
    }

    /// Classification flags derived from the entry alone.
    ///
    /// A type parameter bounded by a class is a reference type too, but that
    /// needs a lookup of the bound; `TypeQuery::flags` adds it.
    pub fn flags(&self) -> TypeFlags {
        match self {
            TypeEntry::Primitive(_) => {
                TypeFlags::PRIMITIVE | TypeFlags::VALUE_TYPE | TypeFlags::SEALED
            }
            TypeEntry::Class(e) => {
                let mut flags = if e.is_value_type {
                    TypeFlags::VALUE_TYPE
                } else {
                    TypeFlags::REFERENCE_TYPE
                };
                if e.is_sealed {
                    flags |= TypeFlags::SEALED;
                }
                if e.is_abstract {
                    flags |= TypeFlags::ABSTRACT;
                }
                if e.is_generic_definition() || e.is_generic_instance() {
                    flags |= TypeFlags::GENERIC;
                }
                if e.definition == Some(well_known::NULLABLE) {
                    flags |= TypeFlags::NULLABLE;
                }
                flags
            }
            TypeEntry::Enum(_) => TypeFlags::ENUM | TypeFlags::VALUE_TYPE | TypeFlags::SEALED,
            TypeEntry::Interface(e) => {
                let mut flags =
                    TypeFlags::INTERFACE | TypeFlags::REFERENCE_TYPE | TypeFlags::ABSTRACT;
                if !e.generic_params.is_empty() || e.definition.is_some() {
                    flags |= TypeFlags::GENERIC;
                }
                flags
            }
            TypeEntry::Delegate(e) => {
                let mut flags = TypeFlags::DELEGATE | TypeFlags::REFERENCE_TYPE | TypeFlags::SEALED;
                if !e.generic_params.is_empty() || e.definition.is_some() {
                    flags |= TypeFlags::GENERIC;
                }
                flags
            }
            TypeEntry::TypeParam(e) => {
                let mut flags = TypeFlags::TYPE_PARAMETER;
                if e.constraint.value_type {
                    flags |= TypeFlags::VALUE_TYPE;
                } else if e.constraint.reference_type {
                    flags |= TypeFlags::REFERENCE_TYPE;
                }
                flags
            }
            TypeEntry::Array(_) => TypeFlags::ARRAY | TypeFlags::REFERENCE_TYPE | TypeFlags::SEALED,
            TypeEntry::Pointer(_) => TypeFlags::POINTER | TypeFlags::SEALED,
        }
    }

    /// Direct base class.
    ///
    /// Enums, arrays and callables derive from their platform roots. Interfaces
    /// and type parameters have no base class.
    pub fn base_class(&self) -> Option<TypeHash> {
        match self {
            TypeEntry::Primitive(e) if e.kind == crate::PrimitiveKind::Void => None,
            TypeEntry::Primitive(_) => Some(well_known::VALUE_TYPE),
            TypeEntry::Class(e) => e.base_class,
            TypeEntry::Enum(_) => Some(well_known::ENUM),
            TypeEntry::Delegate(_) => Some(well_known::DELEGATE),
            TypeEntry::Array(_) => Some(well_known::ARRAY),
            TypeEntry::Interface(_) | TypeEntry::TypeParam(_) | TypeEntry::Pointer(_) => None,
        }
    }

    /// Directly declared interfaces (inherited interfaces for an interface,
    /// interface bounds for a type parameter).
    pub fn direct_interfaces(&self) -> &[TypeHash] {
        match self {
            TypeEntry::Class(e) => &e.interfaces,
            TypeEntry::Interface(e) => &e.base_interfaces,
            TypeEntry::TypeParam(e) => &e.constraint.interfaces,
            _ => &[],
        }
    }

    /// Generic arguments of an instance. Empty otherwise.
    pub fn generic_args(&self) -> &[TypeHash] {
        match self {
            TypeEntry::Class(e) => &e.type_args,
            TypeEntry::Interface(e) => &e.type_args,
            TypeEntry::Delegate(e) => &e.type_args,
            _ => &[],
        }
    }

    /// Generic parameters of a definition. Empty otherwise.
    pub fn generic_params(&self) -> &[TypeHash] {
        match self {
            TypeEntry::Class(e) => &e.generic_params,
            TypeEntry::Interface(e) => &e.generic_params,
            TypeEntry::Delegate(e) => &e.generic_params,
            _ => &[],
        }
    }

    /// The definition an instance was built from.
    pub fn generic_definition(&self) -> Option<TypeHash> {
        match self {
            TypeEntry::Class(e) => e.definition,
            TypeEntry::Interface(e) => e.definition,
            TypeEntry::Delegate(e) => e.definition,
            _ => None,
        }
    }

    /// Declared variance per generic parameter. Classes are always invariant.
    pub fn variance(&self) -> &[Variance] {
        match self {
            TypeEntry::Interface(e) => &e.variance,
            TypeEntry::Delegate(e) => &e.variance,
            _ => &[],
        }
    }

    /// User-declared conversion operators (function hashes).
    pub fn conversion_operators(&self) -> &[TypeHash] {
        match self {
            TypeEntry::Class(e) => &e.conversion_operators,
            _ => &[],
        }
    }

    // === Downcasts ===

    pub fn as_primitive(&self) -> Option<&PrimitiveEntry> {
        match self {
            TypeEntry::Primitive(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassEntry> {
        match self {
            TypeEntry::Class(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumEntry> {
        match self {
            TypeEntry::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceEntry> {
        match self {
            TypeEntry::Interface(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_delegate(&self) -> Option<&DelegateEntry> {
        match self {
            TypeEntry::Delegate(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_type_param(&self) -> Option<&TypeParamEntry> {
        match self {
            TypeEntry::TypeParam(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayEntry> {
        match self {
            TypeEntry::Array(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_pointer(&self) -> Option<&PointerEntry> {
        match self {
            TypeEntry::Pointer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrimitiveEntry> for TypeEntry {
    fn from(entry: PrimitiveEntry) -> Self {
        TypeEntry::Primitive(entry)
    }
}

impl From<ClassEntry> for TypeEntry {
    fn from(entry: ClassEntry) -> Self {
        TypeEntry::Class(entry)
    }
}

impl From<EnumEntry> for TypeEntry {
    fn from(entry: EnumEntry) -> Self {
        TypeEntry::Enum(entry)
    }
}

impl From<InterfaceEntry> for TypeEntry {
    fn from(entry: InterfaceEntry) -> Self {
        TypeEntry::Interface(entry)
    }
}

impl From<DelegateEntry> for TypeEntry {
    fn from(entry: DelegateEntry) -> Self {
        TypeEntry::Delegate(entry)
    }
}

impl From<TypeParamEntry> for TypeEntry {
    fn from(entry: TypeParamEntry) -> Self {
        TypeEntry::TypeParam(entry)
    }
}

impl From<ArrayEntry> for TypeEntry {
    fn from(entry: ArrayEntry) -> Self {
        TypeEntry::Array(entry)
    }
}

impl From<PointerEntry> for TypeEntry {
    fn from(entry: PointerEntry) -> Self {
        TypeEntry::Pointer(entry)
    }
}
