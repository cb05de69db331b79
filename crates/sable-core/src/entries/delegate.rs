//! Callable (delegate) type entry.
//!
//! This module provides `DelegateEntry` for callable types: named function
//! signatures that method groups and method addresses convert to.

use crate::{TypeHash, Variance};

use super::Param;

/// Registry entry for a callable type.
#[derive(Debug, Clone, PartialEq)]
pub struct DelegateEntry {
    /// Unqualified name.
    pub name: String,
    /// Fully qualified name (with namespace and generic arguments).
    pub qualified_name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Parameters of the callable signature.
    pub params: Vec<Param>,
    /// Return type.
    pub return_type: TypeHash,
    /// Generic parameter type hashes (non-empty = generic definition).
    pub generic_params: Vec<TypeHash>,
    /// Declared variance per generic parameter.
    pub variance: Vec<Variance>,
    /// Definition this was instantiated from (for generic instances).
    pub definition: Option<TypeHash>,
    /// Type arguments for generic instances.
    pub type_args: Vec<TypeHash>,
}

impl DelegateEntry {
    /// Create a callable type in the global namespace.
    pub fn new(name: impl Into<String>, params: Vec<Param>, return_type: TypeHash) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name: name.clone(),
            qualified_name: name,
            type_hash,
            params,
            return_type,
            generic_params: Vec::new(),
            variance: Vec::new(),
            definition: None,
            type_args: Vec::new(),
        }
    }

    /// Add a generic parameter with its declared variance.
    pub fn with_generic_param(mut self, param: TypeHash, variance: Variance) -> Self {
        self.generic_params.push(param);
        self.variance.push(variance);
        self
    }
}

/// The signature of a callable type, as returned by the `TypeQuery` capability.
#[derive(Debug, Clone, PartialEq)]
pub struct CallableSignature {
    pub params: Vec<Param>,
    pub return_type: TypeHash,
}
