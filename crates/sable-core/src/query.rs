//! The type capability consumed by the conversion core.
//!
//! [`TypeQuery`] is the boundary between the core and whatever owns the type
//! tables. A provider implements the five required lookups; every
//! classification the core asks about (flags, base chain, interfaces, generic
//! arguments, nullable wrap and unwrap, callable signatures) is derived from
//! them by provided methods, so providers cannot disagree with each other on
//! the derived answers.
//!
//! Providers must be `Send + Sync`: the core may be driven from several
//! threads against one provider.

use std::sync::Arc;

use crate::{
    CallableSignature, ContractViolation, FunctionDef, PrimitiveKind, TypeEntry, TypeFlags,
    TypeHash, Variance, well_known,
};

/// Read access to types and functions.
pub trait TypeQuery: Send + Sync {
    /// Look up a type. Instantiations the provider has built are included.
    fn type_entry(&self, ty: TypeHash) -> Option<Arc<TypeEntry>>;

    /// Look up a function signature.
    fn function(&self, func: TypeHash) -> Option<Arc<FunctionDef>>;

    /// Instantiate a generic definition, building it on first use.
    ///
    /// `None` if `definition` is unknown, not generic, or `args` has the wrong
    /// length.
    fn instantiate(&self, definition: TypeHash, args: &[TypeHash]) -> Option<TypeHash>;

    /// The array type with the given element and rank, built on first use.
    fn array_of(&self, element: TypeHash, rank: u32) -> TypeHash;

    /// The pointer type to `pointee`, built on first use.
    fn pointer_to(&self, pointee: TypeHash) -> TypeHash;

    // === Classification ===

    /// Primitive code, `None` for non-primitive types.
    fn primitive_kind(&self, ty: TypeHash) -> Option<PrimitiveKind> {
        PrimitiveKind::from_hash(ty)
    }

    /// Classification flags. Unknown types (including the `null` type) have none.
    ///
    /// A type parameter takes its value/reference class from its constraints,
    /// following a base bound that is itself a type parameter.
    fn flags(&self, ty: TypeHash) -> TypeFlags {
        let Some(entry) = self.type_entry(ty) else {
            return TypeFlags::empty();
        };
        let mut flags = entry.flags();
        if let TypeEntry::TypeParam(param) = &*entry
            && !flags.is_classified()
            && let Some(base) = param.constraint.base
        {
            let base_flags = self.flags(base);
            if base_flags.contains(TypeFlags::TYPE_PARAMETER) {
                flags |= base_flags & (TypeFlags::VALUE_TYPE | TypeFlags::REFERENCE_TYPE);
            } else if base_flags.contains(TypeFlags::REFERENCE_TYPE)
                && !base_flags.contains(TypeFlags::INTERFACE)
            {
                flags |= TypeFlags::REFERENCE_TYPE;
            }
        }
        flags
    }

    fn is_value_type(&self, ty: TypeHash) -> bool {
        self.flags(ty).contains(TypeFlags::VALUE_TYPE)
    }

    fn is_reference_type(&self, ty: TypeHash) -> bool {
        self.flags(ty).contains(TypeFlags::REFERENCE_TYPE)
    }

    fn is_interface(&self, ty: TypeHash) -> bool {
        self.flags(ty).contains(TypeFlags::INTERFACE)
    }

    fn is_enum(&self, ty: TypeHash) -> bool {
        self.flags(ty).contains(TypeFlags::ENUM)
    }

    fn is_type_param(&self, ty: TypeHash) -> bool {
        self.flags(ty).contains(TypeFlags::TYPE_PARAMETER)
    }

    // === Hierarchy ===

    fn base_class(&self, ty: TypeHash) -> Option<TypeHash> {
        self.type_entry(ty)?.base_class()
    }

    /// Ancestors of `ty`, nearest first, not including `ty`.
    fn base_chain(&self, ty: TypeHash) -> Vec<TypeHash> {
        let mut chain = Vec::new();
        let mut current = self.base_class(ty);
        while let Some(base) = current {
            // Chains are acyclic; the guard only stops a malformed provider.
            if chain.contains(&base) || base == ty {
                break;
            }
            chain.push(base);
            current = self.base_class(base);
        }
        chain
    }

    /// Whether `base` is a proper ancestor of `derived`.
    fn is_subclass_of(&self, derived: TypeHash, base: TypeHash) -> bool {
        self.base_chain(derived).contains(&base)
    }

    /// Base bounds reached by following a type parameter's constraint chain,
    /// nearest first. Empty for anything that is not a type parameter.
    fn constraint_chain(&self, ty: TypeHash) -> Vec<TypeHash> {
        let mut chain = Vec::new();
        let mut current = ty;
        while let Some(entry) = self.type_entry(current) {
            let Some(base) = entry.as_type_param().and_then(|p| p.constraint.base) else {
                break;
            };
            if base == ty || chain.contains(&base) {
                break;
            }
            chain.push(base);
            current = base;
        }
        chain
    }

    /// All interfaces `ty` implements or inherits, deduplicated, in discovery
    /// order. An interface does not list itself. A type parameter reports the
    /// interfaces of every bound it reaches.
    fn interfaces(&self, ty: TypeHash) -> Vec<TypeHash> {
        let mut owners = vec![ty];
        owners.extend(self.base_chain(ty));
        for bound in self.constraint_chain(ty) {
            owners.push(bound);
            owners.extend(self.base_chain(bound));
        }

        let mut found = Vec::new();
        let mut pending: Vec<TypeHash> = Vec::new();
        for owner in owners {
            if let Some(entry) = self.type_entry(owner) {
                pending.extend(entry.direct_interfaces().iter().rev());
            }
            while let Some(next) = pending.pop() {
                if next == ty || found.contains(&next) {
                    continue;
                }
                found.push(next);
                if let Some(entry) = self.type_entry(next) {
                    pending.extend(entry.direct_interfaces().iter().rev());
                }
            }
        }
        found
    }

    fn implements(&self, ty: TypeHash, interface: TypeHash) -> bool {
        self.interfaces(ty).contains(&interface)
    }

    /// Every type a type parameter converts to through its constraints: the
    /// constraint chain, the ancestors of each bound, and all interfaces.
    fn type_param_bounds(&self, ty: TypeHash) -> Vec<TypeHash> {
        let mut all = Vec::new();
        for bound in self.constraint_chain(ty) {
            let ancestors = self.base_chain(bound);
            for candidate in std::iter::once(bound).chain(ancestors) {
                if !all.contains(&candidate) {
                    all.push(candidate);
                }
            }
        }
        for interface in self.interfaces(ty) {
            if !all.contains(&interface) {
                all.push(interface);
            }
        }
        all
    }

    // === Generics ===

    fn generic_args(&self, ty: TypeHash) -> Vec<TypeHash> {
        self.type_entry(ty)
            .map(|e| e.generic_args().to_vec())
            .unwrap_or_default()
    }

    fn generic_definition(&self, ty: TypeHash) -> Option<TypeHash> {
        self.type_entry(ty)?.generic_definition()
    }

    fn generic_params(&self, definition: TypeHash) -> Vec<TypeHash> {
        self.type_entry(definition)
            .map(|e| e.generic_params().to_vec())
            .unwrap_or_default()
    }

    /// Declared variance of the definition behind `ty`, one per argument.
    fn variance(&self, ty: TypeHash) -> Vec<Variance> {
        let definition = self.generic_definition(ty).unwrap_or(ty);
        self.type_entry(definition)
            .map(|e| e.variance().to_vec())
            .unwrap_or_default()
    }

    // === Wrappers and structure ===

    /// Underlying integral type of an enum.
    fn underlying_type(&self, ty: TypeHash) -> Option<TypeHash> {
        self.type_entry(ty)?
            .as_enum()
            .map(|e| e.underlying.type_hash())
    }

    /// `T` for `Nullable<T>`.
    fn nullable_inner(&self, ty: TypeHash) -> Option<TypeHash> {
        let entry = self.type_entry(ty)?;
        if entry.generic_definition() != Some(well_known::NULLABLE) {
            return None;
        }
        entry.generic_args().first().copied()
    }

    /// `Nullable<T>` for `T`.
    fn nullable_of(&self, ty: TypeHash) -> Option<TypeHash> {
        self.instantiate(well_known::NULLABLE, &[ty])
    }

    /// Element type and rank of an array type.
    fn array_element(&self, ty: TypeHash) -> Option<(TypeHash, u32)> {
        self.type_entry(ty)?
            .as_array()
            .map(|a| (a.element, a.rank))
    }

    fn pointee(&self, ty: TypeHash) -> Option<TypeHash> {
        self.type_entry(ty)?.as_pointer().map(|p| p.pointee)
    }

    /// Signature of a callable type.
    ///
    /// Calling this on anything other than a callable type is a caller defect.
    fn delegate_signature(&self, ty: TypeHash) -> Result<CallableSignature, ContractViolation> {
        let entry = self
            .type_entry(ty)
            .ok_or(ContractViolation::UnknownType { ty })?;
        let delegate = entry
            .as_delegate()
            .ok_or(ContractViolation::NotCallable { ty })?;
        Ok(CallableSignature {
            params: delegate.params.clone(),
            return_type: delegate.return_type,
        })
    }

    /// User-declared conversion operators declared on `ty` itself.
    fn conversion_operators(&self, ty: TypeHash) -> Vec<Arc<FunctionDef>> {
        self.type_entry(ty)
            .map(|e| {
                e.conversion_operators()
                    .iter()
                    .filter_map(|op| self.function(*op))
                    .collect()
            })
            .unwrap_or_default()
    }
}
