//! Type-argument inference by structural unification.

use sable_core::TypeHash;
use tracing::trace;

use super::Bindings;
use crate::context::CompilationContext;

/// Unify an argument type with a declared parameter type, extending
/// `bindings`.
///
/// - a parameter being inferred binds to the argument, or must equal its
///   existing binding
/// - an array parameter needs an array argument of the same rank; elements
///   unify
/// - a pointer parameter needs a pointer argument; pointees unify
/// - a constructed generic parameter unifies argument-wise with the argument
///   if it is an instance of the same definition, otherwise with the first
///   instance of that definition among the argument's interfaces, then its
///   base classes
/// - any other parameter unifies trivially; whether the argument converts is
///   decided later
///
/// Returns `false` on failure, leaving `bindings` as they were before the
/// call.
pub fn unify(
    ctx: &CompilationContext<'_>,
    bindings: &mut Bindings,
    arg: TypeHash,
    param: TypeHash,
) -> bool {
    let saved = bindings.clone();
    if unify_in(ctx, bindings, arg, param) {
        true
    } else {
        trace!(%arg, %param, "type inference failed");
        *bindings = saved;
        false
    }
}

fn unify_in(
    ctx: &CompilationContext<'_>,
    bindings: &mut Bindings,
    arg: TypeHash,
    param: TypeHash,
) -> bool {
    if bindings.is_variable(param) {
        return bindings.bind(param, arg);
    }

    let types = ctx.types();
    if let Some((param_element, param_rank)) = types.array_element(param) {
        return match types.array_element(arg) {
            Some((arg_element, arg_rank)) if arg_rank == param_rank => {
                unify_in(ctx, bindings, arg_element, param_element)
            }
            _ => false,
        };
    }

    if let Some(param_pointee) = types.pointee(param) {
        return types
            .pointee(arg)
            .is_some_and(|arg_pointee| unify_in(ctx, bindings, arg_pointee, param_pointee));
    }

    if let Some(definition) = types.generic_definition(param) {
        let Some(instance) = matching_instance(ctx, arg, definition) else {
            return false;
        };
        let arg_args = types.generic_args(instance);
        let param_args = types.generic_args(param);
        return arg_args.len() == param_args.len()
            && arg_args
                .iter()
                .zip(&param_args)
                .all(|(a, p)| unify_in(ctx, bindings, *a, *p));
    }

    true
}

/// `arg` itself, or the first of its interfaces or base classes, that is an
/// instance of `definition`.
fn matching_instance(
    ctx: &CompilationContext<'_>,
    arg: TypeHash,
    definition: TypeHash,
) -> Option<TypeHash> {
    let types = ctx.types();
    if types.generic_definition(arg) == Some(definition) {
        return Some(arg);
    }
    types
        .interfaces(arg)
        .into_iter()
        .chain(types.base_chain(arg))
        .find(|ty| types.generic_definition(*ty) == Some(definition))
}
