//! Interface type entry.

use crate::{TypeHash, Variance};

/// Registry entry for an interface type.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceEntry {
    /// Unqualified name.
    pub name: String,
    /// Fully qualified name (with namespace and generic arguments).
    pub qualified_name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Inherited interfaces.
    pub base_interfaces: Vec<TypeHash>,
    /// Generic parameter type hashes (non-empty = generic definition).
    pub generic_params: Vec<TypeHash>,
    /// Declared variance per generic parameter, parallel to `generic_params`.
    pub variance: Vec<Variance>,
    /// Definition this was instantiated from (for generic instances).
    pub definition: Option<TypeHash>,
    /// Type arguments for generic instances.
    pub type_args: Vec<TypeHash>,
}

impl InterfaceEntry {
    /// Create an interface in the global namespace.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name: name.clone(),
            qualified_name: name,
            type_hash,
            base_interfaces: Vec::new(),
            generic_params: Vec::new(),
            variance: Vec::new(),
            definition: None,
            type_args: Vec::new(),
        }
    }

    /// Add an inherited interface.
    pub fn with_base(mut self, base: TypeHash) -> Self {
        self.base_interfaces.push(base);
        self
    }

    /// Add a generic parameter with its declared variance.
    pub fn with_generic_param(mut self, param: TypeHash, variance: Variance) -> Self {
        self.generic_params.push(param);
        self.variance.push(variance);
        self
    }
}
