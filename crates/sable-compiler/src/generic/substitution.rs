//! Replacing inferred type parameters in a signature type.

use sable_core::TypeHash;

use super::Bindings;
use crate::context::CompilationContext;

/// Substitute bound parameters in `ty`, rebuilding arrays, pointers and
/// generic instances that contain them.
///
/// Unbound parameters are left in place. A generic instance the provider
/// cannot build is returned unchanged.
pub fn substitute(ctx: &CompilationContext<'_>, ty: TypeHash, bindings: &Bindings) -> TypeHash {
    if let Some(bound) = bindings.get(ty) {
        return bound;
    }
    if bindings.is_empty() {
        return ty;
    }

    let types = ctx.types();
    if let Some((element, rank)) = types.array_element(ty) {
        let substituted = substitute(ctx, element, bindings);
        return if substituted == element {
            ty
        } else {
            types.array_of(substituted, rank)
        };
    }
    if let Some(pointee) = types.pointee(ty) {
        let substituted = substitute(ctx, pointee, bindings);
        return if substituted == pointee {
            ty
        } else {
            types.pointer_to(substituted)
        };
    }
    if let Some(definition) = types.generic_definition(ty) {
        let args = types.generic_args(ty);
        let substituted: Vec<TypeHash> =
            args.iter().map(|a| substitute(ctx, *a, bindings)).collect();
        if substituted != args {
            return types.instantiate(definition, &substituted).unwrap_or(ty);
        }
    }
    ty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::World;
    use sable_core::{TypeQuery, primitives};

    #[test]
    fn substitutes_through_constructed_types() {
        let mut world = World::new();
        let t = world.method_param("Wrap", "T", 0);
        let list_t = world.list(t);
        let t_array = world.registry.array_of(t, 1);
        let list_of_arrays = world.list(t_array);
        let ctx = world.ctx();

        let mut bindings = Bindings::new(&[t]);
        assert!(bindings.bind(t, primitives::INT32));

        assert_eq!(substitute(&ctx, t, &bindings), primitives::INT32);
        assert_eq!(substitute(&ctx, list_t, &bindings), world.list(primitives::INT32));
        let int_array = world.registry.array_of(primitives::INT32, 1);
        assert_eq!(substitute(&ctx, list_of_arrays, &bindings), world.list(int_array));
        assert_eq!(substitute(&ctx, world.shape, &bindings), world.shape);
    }

    #[test]
    fn unbound_parameters_stay() {
        let mut world = World::new();
        let t = world.method_param("Wrap", "T", 0);
        let seq_t = world.seq(t);
        let ctx = world.ctx();
        let bindings = Bindings::new(&[t]);
        assert_eq!(substitute(&ctx, seq_t, &bindings), seq_t);
    }
}
