//! Generic method support: inferring type arguments from call arguments and
//! substituting them into signatures.
//!
//! Inference works one argument at a time through [`unify`], accumulating
//! [`Bindings`] for the method's own type parameters. Type parameters that
//! belong to an enclosing type are not inferred; they are treated as ordinary
//! types.

mod inference;
mod substitution;

pub use inference::unify;
pub use substitution::substitute;

use rustc_hash::FxHashMap;
use sable_core::TypeHash;

/// Type arguments inferred so far for one generic method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    /// The method's type parameters, in declaration order.
    params: Vec<TypeHash>,
    bound: FxHashMap<TypeHash, TypeHash>,
}

impl Bindings {
    /// Empty bindings for a method with the given type parameters.
    pub fn new(params: &[TypeHash]) -> Self {
        Self {
            params: params.to_vec(),
            bound: FxHashMap::default(),
        }
    }

    /// Whether `ty` is one of the parameters being inferred.
    pub fn is_variable(&self, ty: TypeHash) -> bool {
        self.params.contains(&ty)
    }

    pub fn get(&self, param: TypeHash) -> Option<TypeHash> {
        self.bound.get(&param).copied()
    }

    /// Record a binding. Returns `false` if `param` is already bound to a
    /// different type.
    pub(crate) fn bind(&mut self, param: TypeHash, ty: TypeHash) -> bool {
        *self.bound.entry(param).or_insert(ty) == ty
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Whether every parameter has been inferred.
    pub fn is_complete(&self) -> bool {
        self.params.iter().all(|p| self.bound.contains_key(p))
    }

    /// The inferred arguments in declaration order, once complete.
    pub fn inferred(&self) -> Option<Vec<TypeHash>> {
        self.params.iter().map(|p| self.get(*p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::primitives;

    #[test]
    fn bindings_track_declaration_order() {
        let (t, u) = (TypeHash::from_name("M::T"), TypeHash::from_name("M::U"));
        let mut bindings = Bindings::new(&[t, u]);
        assert!(bindings.is_variable(t));
        assert!(!bindings.is_variable(primitives::INT32));

        assert!(bindings.bind(u, primitives::DOUBLE));
        assert!(!bindings.is_complete());
        assert_eq!(bindings.inferred(), None);

        assert!(bindings.bind(t, primitives::INT32));
        assert!(bindings.bind(t, primitives::INT32));
        assert!(!bindings.bind(t, primitives::INT64));
        assert_eq!(bindings.inferred(), Some(vec![primitives::INT32, primitives::DOUBLE]));
    }
}
