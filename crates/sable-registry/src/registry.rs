//! TypeRegistry - declared types, functions and constructed types.
//!
//! # Storage Model
//!
//! - **Declared**: types and functions registered up front through `&mut self`,
//!   stored by hash in `FxHashMap`s. Entries are immutable once registered and
//!   handed out as `Arc`s.
//! - **Constructed**: generic instances, arrays and pointers built on demand
//!   through `&self`. They live behind an `RwLock` and are populated with a
//!   double-checked read-then-write discipline: a read lock answers every hit,
//!   a miss builds the entry without holding any lock, and the write lock
//!   inserts it only if no other thread got there first. Once inserted an
//!   entry never changes.
//!
//! # Thread Safety
//!
//! Registration is single-threaded (`&mut self`). After that the registry is
//! `Send + Sync` and may be shared by any number of concurrent compilations.
//!
//! # Example
//!
//! ```
//! use sable_registry::TypeRegistry;
//! use sable_core::{TypeQuery, primitives, well_known};
//!
//! let registry = TypeRegistry::with_platform_types();
//! let nullable_int = registry.nullable_of(primitives::INT32).unwrap();
//! assert_eq!(registry.nullable_inner(nullable_int), Some(primitives::INT32));
//! assert_eq!(registry.generic_definition(nullable_int), Some(well_known::NULLABLE));
//! ```

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;
use tracing::trace;

use sable_core::{
    ArrayEntry, ClassEntry, DelegateEntry, FunctionDef, InterfaceEntry, Param, PointerEntry,
    RegistrationError, TypeEntry, TypeHash, TypeQuery,
};

/// Types built on demand.
#[derive(Debug, Default)]
struct Constructed {
    types: FxHashMap<TypeHash, Arc<TypeEntry>>,
    /// Conversion operators of generic instances, substituted.
    functions: FxHashMap<TypeHash, Arc<FunctionDef>>,
}

/// Substitution from generic parameters to arguments.
type SubstitutionMap = FxHashMap<TypeHash, TypeHash>;

/// Type and function registry.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: FxHashMap<TypeHash, Arc<TypeEntry>>,
    functions: FxHashMap<TypeHash, Arc<FunctionDef>>,
    /// Function hashes in registration order.
    function_order: Vec<TypeHash>,
    constructed: RwLock<Constructed>,
}

impl TypeRegistry {
    /// Create an empty registry with no platform types.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a type.
    ///
    /// Returns an error if a type with the same hash already exists.
    pub fn register_type(
        &mut self,
        entry: impl Into<TypeEntry>,
    ) -> Result<TypeHash, RegistrationError> {
        let entry = entry.into();
        let hash = entry.type_hash();
        if self.types.contains_key(&hash) {
            return Err(RegistrationError::DuplicateType(entry.name().to_string()));
        }
        self.types.insert(hash, Arc::new(entry));
        Ok(hash)
    }

    /// Register a function.
    ///
    /// Returns an error if a function with the same hash already exists.
    pub fn register_function(&mut self, def: FunctionDef) -> Result<TypeHash, RegistrationError> {
        let hash = def.func_hash;
        if self.functions.contains_key(&hash) {
            return Err(RegistrationError::DuplicateFunction(def.name));
        }
        self.functions.insert(hash, Arc::new(def));
        self.function_order.push(hash);
        Ok(hash)
    }

    /// Register a conversion operator and attach it to its owning class.
    pub fn register_conversion_operator(
        &mut self,
        def: FunctionDef,
    ) -> Result<TypeHash, RegistrationError> {
        let hash = def.func_hash;
        let owner = def
            .owner
            .filter(|o| self.types.get(o).is_some_and(|e| e.as_class().is_some()))
            .ok_or(RegistrationError::OrphanOperator(hash))?;
        self.register_function(def)?;
        if let Some(entry) = self.types.get_mut(&owner)
            && let TypeEntry::Class(class) = Arc::make_mut(entry)
        {
            class.conversion_operators.push(hash);
        }
        Ok(hash)
    }

    /// Insert a type, replacing any previous entry. Used for platform types.
    pub(crate) fn insert_type(&mut self, entry: impl Into<TypeEntry>) -> TypeHash {
        let entry = entry.into();
        let hash = entry.type_hash();
        self.types.insert(hash, Arc::new(entry));
        hash
    }

    // ==========================================================================
    // Construction
    // ==========================================================================

    /// Instantiate a generic definition, reporting why it failed.
    ///
    /// The trait method [`TypeQuery::instantiate`] is the same operation with
    /// the error discarded.
    pub fn instance(
        &self,
        definition: TypeHash,
        args: &[TypeHash],
    ) -> Result<TypeHash, RegistrationError> {
        self.instantiate_in(definition, args, &mut Vec::new())
    }

    fn instantiate_in(
        &self,
        definition: TypeHash,
        args: &[TypeHash],
        building: &mut Vec<TypeHash>,
    ) -> Result<TypeHash, RegistrationError> {
        let hash = TypeHash::from_generic_instance(definition, args);
        if self.types.contains_key(&hash)
            || building.contains(&hash)
            || self.read().types.contains_key(&hash)
        {
            return Ok(hash);
        }

        let def = self
            .types
            .get(&definition)
            .ok_or(RegistrationError::UnknownDefinition(definition))?;
        let params = def.generic_params();
        if params.is_empty() {
            return Err(RegistrationError::NotGeneric(definition));
        }
        if params.len() != args.len() {
            return Err(RegistrationError::GenericArgCountMismatch {
                definition,
                expected: params.len(),
                got: args.len(),
            });
        }
        let map: SubstitutionMap = params.iter().copied().zip(args.iter().copied()).collect();

        // Self-referential instances (`Node<T> : IEquatable<Node<T>>`) resolve
        // to the hash being built.
        building.push(hash);
        let built = self.build_instance(def, hash, args, &map, building);
        building.pop();
        let (entry, operators) = built?;

        let mut constructed = self.write();
        if !constructed.types.contains_key(&hash) {
            trace!(name = entry.name(), %hash, "instantiated generic type");
            for op in operators {
                constructed.functions.insert(op.func_hash, Arc::new(op));
            }
            constructed.types.insert(hash, Arc::new(entry));
        }
        Ok(hash)
    }

    fn build_instance(
        &self,
        def: &TypeEntry,
        hash: TypeHash,
        args: &[TypeHash],
        map: &SubstitutionMap,
        building: &mut Vec<TypeHash>,
    ) -> Result<(TypeEntry, Vec<FunctionDef>), RegistrationError> {
        let arg_names: Vec<String> = args.iter().map(|a| self.display_name(*a)).collect();
        let name = format!("{}<{}>", def.name(), arg_names.join(", "));

        match def {
            TypeEntry::Class(class) => {
                let base_class = class
                    .base_class
                    .map(|b| self.substitute(b, map, building))
                    .transpose()?;
                let interfaces = self.substitute_all(&class.interfaces, map, building)?;

                let mut operators = Vec::new();
                for op_hash in &class.conversion_operators {
                    let Some(op) = self.lookup_function(*op_hash) else {
                        continue;
                    };
                    let [param] = op.params.as_slice() else {
                        continue;
                    };
                    let from = self.substitute(param.ty, map, building)?;
                    let to = self.substitute(op.return_type, map, building)?;
                    operators.push(FunctionDef::conversion_operator(
                        hash,
                        !op.is_implicit_operator(),
                        from,
                        to,
                    ));
                }

                let mut entry = ClassEntry::new(name.clone(), name, hash, class.is_value_type);
                entry.base_class = base_class;
                entry.interfaces = interfaces;
                entry.conversion_operators = operators.iter().map(|o| o.func_hash).collect();
                entry.definition = Some(class.type_hash);
                entry.type_args = args.to_vec();
                entry.is_sealed = class.is_sealed;
                entry.is_abstract = class.is_abstract;
                Ok((TypeEntry::Class(entry), operators))
            }
            TypeEntry::Interface(interface) => {
                let mut entry = InterfaceEntry::new(name);
                entry.type_hash = hash;
                entry.base_interfaces =
                    self.substitute_all(&interface.base_interfaces, map, building)?;
                entry.definition = Some(interface.type_hash);
                entry.type_args = args.to_vec();
                Ok((TypeEntry::Interface(entry), Vec::new()))
            }
            TypeEntry::Delegate(delegate) => {
                let params = delegate
                    .params
                    .iter()
                    .map(|p| {
                        Ok(Param {
                            ty: self.substitute(p.ty, map, building)?,
                            ..p.clone()
                        })
                    })
                    .collect::<Result<Vec<_>, RegistrationError>>()?;
                let return_type = self.substitute(delegate.return_type, map, building)?;
                let mut entry = DelegateEntry::new(name, params, return_type);
                entry.type_hash = hash;
                entry.definition = Some(delegate.type_hash);
                entry.type_args = args.to_vec();
                Ok((TypeEntry::Delegate(entry), Vec::new()))
            }
            other => Err(RegistrationError::NotGeneric(other.type_hash())),
        }
    }

    /// Replace generic parameters in `ty`, rebuilding arrays, pointers and
    /// generic instances that mention them.
    fn substitute(
        &self,
        ty: TypeHash,
        map: &SubstitutionMap,
        building: &mut Vec<TypeHash>,
    ) -> Result<TypeHash, RegistrationError> {
        if let Some(arg) = map.get(&ty) {
            return Ok(*arg);
        }
        let Some(entry) = self.lookup_type(ty) else {
            return Ok(ty);
        };
        match &*entry {
            TypeEntry::Array(array) => {
                let element = self.substitute(array.element, map, building)?;
                Ok(self.array_of(element, array.rank))
            }
            TypeEntry::Pointer(pointer) => {
                let pointee = self.substitute(pointer.pointee, map, building)?;
                Ok(self.pointer_to(pointee))
            }
            _ => match entry.generic_definition() {
                Some(definition) => {
                    let args = self.substitute_all(entry.generic_args(), map, building)?;
                    if args == entry.generic_args() {
                        Ok(ty)
                    } else {
                        self.instantiate_in(definition, &args, building)
                    }
                }
                None => Ok(ty),
            },
        }
    }

    fn substitute_all(
        &self,
        types: &[TypeHash],
        map: &SubstitutionMap,
        building: &mut Vec<TypeHash>,
    ) -> Result<Vec<TypeHash>, RegistrationError> {
        types
            .iter()
            .map(|t| self.substitute(*t, map, building))
            .collect()
    }

    /// Build a structural type at most once.
    fn construct(&self, hash: TypeHash, build: impl FnOnce() -> TypeEntry) -> TypeHash {
        if self.types.contains_key(&hash) || self.read().types.contains_key(&hash) {
            return hash;
        }
        let entry = build();
        self.write()
            .types
            .entry(hash)
            .or_insert_with(|| Arc::new(entry));
        hash
    }

    fn read(&self) -> RwLockReadGuard<'_, Constructed> {
        self.constructed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Constructed> {
        self.constructed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    fn lookup_type(&self, ty: TypeHash) -> Option<Arc<TypeEntry>> {
        if let Some(entry) = self.types.get(&ty) {
            return Some(Arc::clone(entry));
        }
        self.read().types.get(&ty).cloned()
    }

    fn lookup_function(&self, func: TypeHash) -> Option<Arc<FunctionDef>> {
        if let Some(def) = self.functions.get(&func) {
            return Some(Arc::clone(def));
        }
        self.read().functions.get(&func).cloned()
    }

    /// Functions with the given owner and name, in registration order.
    ///
    /// This is the usual way to gather the candidates of a method group.
    pub fn functions_named(&self, owner: Option<TypeHash>, name: &str) -> Vec<TypeHash> {
        self.function_order
            .iter()
            .filter(|h| {
                self.functions
                    .get(h)
                    .is_some_and(|f| f.owner == owner && f.name == name)
            })
            .copied()
            .collect()
    }

    /// Human-readable name of a type, for instance names and tracing.
    pub fn display_name(&self, ty: TypeHash) -> String {
        match self.lookup_type(ty).as_deref() {
            Some(TypeEntry::Array(array)) => format!(
                "{}[{}]",
                self.display_name(array.element),
                ",".repeat(array.rank.saturating_sub(1) as usize)
            ),
            Some(TypeEntry::Pointer(pointer)) => format!("{}*", self.display_name(pointer.pointee)),
            Some(TypeEntry::Class(class)) => class.qualified_name.clone(),
            Some(TypeEntry::Interface(interface)) => interface.qualified_name.clone(),
            Some(TypeEntry::Delegate(delegate)) => delegate.qualified_name.clone(),
            Some(TypeEntry::Enum(e)) => e.qualified_name.clone(),
            Some(entry) => entry.name().to_string(),
            None => ty.to_string(),
        }
    }

    /// Number of registered (not constructed) types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of registered functions.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Number of types built on demand so far.
    pub fn constructed_count(&self) -> usize {
        self.read().types.len()
    }
}

impl TypeQuery for TypeRegistry {
    fn type_entry(&self, ty: TypeHash) -> Option<Arc<TypeEntry>> {
        self.lookup_type(ty)
    }

    fn function(&self, func: TypeHash) -> Option<Arc<FunctionDef>> {
        self.lookup_function(func)
    }

    fn instantiate(&self, definition: TypeHash, args: &[TypeHash]) -> Option<TypeHash> {
        self.instance(definition, args).ok()
    }

    fn array_of(&self, element: TypeHash, rank: u32) -> TypeHash {
        let hash = TypeHash::from_array(element, rank);
        self.construct(hash, || ArrayEntry::new(element, rank).into())
    }

    fn pointer_to(&self, pointee: TypeHash) -> TypeHash {
        let hash = TypeHash::from_pointer(pointee);
        self.construct(hash, || PointerEntry::new(pointee).into())
    }
}
