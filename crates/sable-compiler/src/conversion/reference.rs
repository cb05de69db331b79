//! Boxing, reference, type-parameter, array and pointer conversions.
//!
//! ## Implicit
//!
//! - value type to `ValueType`, `object`, `Enum` (enums) or an implemented
//!   interface: boxing
//! - class to any ancestor, any implemented interface; interface to `object`
//! - generic instance to a variance-compatible instance of the same
//!   definition, directly or through an implemented interface
//! - reference-element array to array of equal rank (covariance), any array
//!   to `Array` and `object`, callable types to `Delegate`
//! - type parameter to each of its bounds and `object`
//!
//! ## Explicit
//!
//! - unboxing (the reverse of boxing)
//! - base class to derived class
//! - non-sealed class to any interface; interface to a non-sealed class or a
//!   sealed class implementing it; interface to interface
//! - `object` or a bound to a type parameter; type parameter to an interface
//!
//! An interface never converts to a sealed class that does not implement it.

use sable_core::{ConversionKind, TypeFlags, TypeHash, Variance, primitives, well_known};

use super::Conversion;
use crate::context::CompilationContext;

/// Conversion of the `null` literal to `to`.
pub(crate) fn null_conversion(ctx: &CompilationContext<'_>, to: TypeHash) -> Option<Conversion> {
    let flags = ctx.types().flags(to);
    let accepts = flags.intersects(TypeFlags::REFERENCE_TYPE | TypeFlags::NULLABLE)
        || (flags.contains(TypeFlags::POINTER) && ctx.options().unsafe_context);
    accepts.then(|| Conversion::standard(ConversionKind::NullLiteral, to))
}

/// Boxing, unboxing, reference and type-parameter conversions.
pub(super) fn classify(
    ctx: &CompilationContext<'_>,
    from: TypeHash,
    to: TypeHash,
) -> Option<Conversion> {
    let types = ctx.types();
    let from_flags = types.flags(from);
    let to_flags = types.flags(to);
    if from_flags.contains(TypeFlags::POINTER) || to_flags.contains(TypeFlags::POINTER) {
        return None;
    }

    if from_flags.contains(TypeFlags::TYPE_PARAMETER)
        || to_flags.contains(TypeFlags::TYPE_PARAMETER)
    {
        return type_parameter(ctx, from, to, from_flags, to_flags);
    }

    if from_flags.contains(TypeFlags::VALUE_TYPE) {
        return is_boxing_target(ctx, from, to)
            .then(|| Conversion::standard(ConversionKind::Boxing, to));
    }
    if to_flags.contains(TypeFlags::VALUE_TYPE) {
        return (from_flags.contains(TypeFlags::REFERENCE_TYPE) && is_boxing_target(ctx, to, from))
            .then(|| Conversion::standard(ConversionKind::Unboxing, to));
    }

    if !from_flags.contains(TypeFlags::REFERENCE_TYPE)
        || !to_flags.contains(TypeFlags::REFERENCE_TYPE)
    {
        return None;
    }
    if is_implicit_reference(ctx, from, to) {
        return Some(Conversion::standard(ConversionKind::ImplicitReference, to));
    }
    if is_explicit_reference(ctx, from, to, from_flags, to_flags) {
        return Some(Conversion::standard(ConversionKind::ExplicitReference, to));
    }
    None
}

/// Whether boxing a `value` produces a `target` reference.
fn is_boxing_target(ctx: &CompilationContext<'_>, value: TypeHash, target: TypeHash) -> bool {
    let types = ctx.types();
    if types.base_chain(value).contains(&target) {
        return true;
    }
    types
        .interfaces(value)
        .into_iter()
        .any(|i| i == target || is_variance_convertible(ctx, i, target))
}

/// Implicit reference conversion between two reference types.
pub(crate) fn is_implicit_reference(
    ctx: &CompilationContext<'_>,
    from: TypeHash,
    to: TypeHash,
) -> bool {
    let types = ctx.types();
    if from == to {
        return true;
    }
    if to == well_known::OBJECT && types.is_reference_type(from) {
        return true;
    }
    if types.base_chain(from).contains(&to) {
        return true;
    }
    if is_variance_convertible(ctx, from, to) {
        return true;
    }
    if types
        .interfaces(from)
        .into_iter()
        .any(|i| i == to || is_variance_convertible(ctx, i, to))
    {
        return true;
    }
    if ctx.options().array_covariance
        && let (Some((from_elem, from_rank)), Some((to_elem, to_rank))) =
            (types.array_element(from), types.array_element(to))
    {
        return from_rank == to_rank
            && types.is_reference_type(from_elem)
            && is_implicit_reference(ctx, from_elem, to_elem);
    }
    false
}

/// Two instances of the same variant generic definition whose arguments
/// convert according to the declared variance.
fn is_variance_convertible(ctx: &CompilationContext<'_>, from: TypeHash, to: TypeHash) -> bool {
    let types = ctx.types();
    let Some(definition) = types.generic_definition(from) else {
        return false;
    };
    if from == to || types.generic_definition(to) != Some(definition) {
        return false;
    }
    let from_args = types.generic_args(from);
    let to_args = types.generic_args(to);
    let variance = types.variance(from);
    if from_args.len() != to_args.len() || variance.len() != from_args.len() {
        return false;
    }
    from_args
        .iter()
        .zip(&to_args)
        .zip(&variance)
        .all(|((&a, &b), variance)| {
            a == b
                || match variance {
                    Variance::Invariant => false,
                    Variance::Covariant => {
                        types.is_reference_type(a) && is_implicit_reference(ctx, a, b)
                    }
                    Variance::Contravariant => {
                        types.is_reference_type(b) && is_implicit_reference(ctx, b, a)
                    }
                }
        })
}

fn is_explicit_reference(
    ctx: &CompilationContext<'_>,
    from: TypeHash,
    to: TypeHash,
    from_flags: TypeFlags,
    to_flags: TypeFlags,
) -> bool {
    let types = ctx.types();
    if types.is_subclass_of(to, from) {
        return true;
    }

    let from_interface = from_flags.contains(TypeFlags::INTERFACE);
    let to_interface = to_flags.contains(TypeFlags::INTERFACE);
    match (from_interface, to_interface) {
        (false, true) => !from_flags.contains(TypeFlags::SEALED),
        (true, false) => !to_flags.contains(TypeFlags::SEALED) || types.implements(to, from),
        (true, true) => true,
        (false, false) => {
            if !ctx.options().array_covariance {
                return false;
            }
            match (types.array_element(from), types.array_element(to)) {
                (Some((from_elem, from_rank)), Some((to_elem, to_rank))) => {
                    from_rank == to_rank
                        && types.is_reference_type(from_elem)
                        && types.is_reference_type(to_elem)
                        && (is_implicit_reference(ctx, to_elem, from_elem)
                            || is_explicit_reference(
                                ctx,
                                from_elem,
                                to_elem,
                                types.flags(from_elem),
                                types.flags(to_elem),
                            ))
                }
                _ => false,
            }
        }
    }
}

fn type_parameter(
    ctx: &CompilationContext<'_>,
    from: TypeHash,
    to: TypeHash,
    from_flags: TypeFlags,
    to_flags: TypeFlags,
) -> Option<Conversion> {
    let types = ctx.types();
    if from_flags.contains(TypeFlags::TYPE_PARAMETER) {
        if to == well_known::OBJECT || types.type_param_bounds(from).contains(&to) {
            let kind = if from_flags.contains(TypeFlags::VALUE_TYPE) {
                ConversionKind::Boxing
            } else {
                ConversionKind::ImplicitReference
            };
            return Some(Conversion::standard(kind, to));
        }
        if to_flags.contains(TypeFlags::INTERFACE) {
            return Some(Conversion::standard(ConversionKind::ExplicitReference, to));
        }
    }
    if to_flags.contains(TypeFlags::TYPE_PARAMETER)
        && (from == well_known::OBJECT || types.type_param_bounds(to).contains(&from))
    {
        let kind = if to_flags.contains(TypeFlags::VALUE_TYPE) {
            ConversionKind::Unboxing
        } else {
            ConversionKind::ExplicitReference
        };
        return Some(Conversion::standard(kind, to));
    }
    None
}

/// Pointer conversions; only in an unsafe context.
pub(super) fn classify_pointer(
    ctx: &CompilationContext<'_>,
    from: TypeHash,
    to: TypeHash,
) -> Option<Conversion> {
    if !ctx.options().unsafe_context {
        return None;
    }
    let types = ctx.types();
    let from_pointer = types.pointee(from).is_some();
    let to_pointer = types.pointee(to).is_some();
    let is_integral = |ty| types.primitive_kind(ty).is_some_and(|k| k.is_integral());

    match (from_pointer, to_pointer) {
        (true, true) if types.pointee(to) == Some(primitives::VOID) => {
            Some(Conversion::standard(ConversionKind::ImplicitPointer, to))
        }
        (true, true) => Some(Conversion::standard(ConversionKind::ExplicitPointer, to)),
        (true, false) if is_integral(to) => {
            Some(Conversion::standard(ConversionKind::ExplicitPointer, to))
        }
        (false, true) if is_integral(from) => {
            Some(Conversion::standard(ConversionKind::ExplicitPointer, to))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::{ConversionMode, ConversionStep, find_type_conversion, type_exists};
    use crate::test_support::World;
    use sable_core::TypeQuery;

    fn step(
        world: &World,
        from: TypeHash,
        to: TypeHash,
        mode: ConversionMode,
    ) -> Option<ConversionStep> {
        find_type_conversion(&world.ctx(), from, to, mode)
            .ok()
            .map(|c| c.step)
    }

    fn standard(kind: ConversionKind) -> Option<ConversionStep> {
        Some(ConversionStep::Standard(kind))
    }

    #[test]
    fn boxing_and_unboxing() {
        let world = World::new();
        let implicit = ConversionMode::Implicit;
        let explicit = ConversionMode::Explicit;
        let boxing = standard(ConversionKind::Boxing);
        let unboxing = standard(ConversionKind::Unboxing);
        for target in [well_known::OBJECT, well_known::VALUE_TYPE, world.imeasurable] {
            assert_eq!(step(&world, world.meters, target, implicit), boxing);
            assert_eq!(step(&world, target, world.meters, implicit), None);
            assert_eq!(step(&world, target, world.meters, explicit), unboxing);
        }
        assert_eq!(step(&world, world.color, well_known::ENUM, implicit), boxing);
        assert_eq!(step(&world, primitives::INT32, well_known::ENUM, implicit), None);
        assert_eq!(step(&world, primitives::INT32, world.ishape, explicit), None);
    }

    #[test]
    fn hierarchy_conversions() {
        let world = World::new();
        let implicit = ConversionMode::Implicit;
        let explicit = ConversionMode::Explicit;
        let up = standard(ConversionKind::ImplicitReference);
        let down = standard(ConversionKind::ExplicitReference);
        assert_eq!(step(&world, world.circle, world.shape, implicit), up);
        assert_eq!(step(&world, world.circle, world.ishape, implicit), up);
        assert_eq!(step(&world, world.ishape, well_known::OBJECT, implicit), up);
        assert_eq!(step(&world, well_known::OBJECT, world.circle, explicit), down);
        assert_eq!(step(&world, world.circle, well_known::STRING, explicit), None);
    }

    #[test]
    fn interface_casts() {
        let world = World::new();
        let explicit = ConversionMode::Explicit;
        let cast = standard(ConversionKind::ExplicitReference);
        // Non-sealed class to any interface, and back.
        assert_eq!(step(&world, world.shape, world.imeasurable, explicit), cast);
        assert_eq!(step(&world, world.imeasurable, world.shape, explicit), cast);
        // Interface to interface.
        assert_eq!(step(&world, world.ishape, world.imeasurable, explicit), cast);
        // Sealed classes only when they implement the interface.
        assert_eq!(step(&world, world.ishape, world.token, explicit), None);
        assert_eq!(step(&world, world.token, world.ishape, explicit), None);
        assert_eq!(step(&world, world.ishape, world.square, explicit), cast);
    }

    #[test]
    fn covariant_interfaces() {
        let world = World::new();
        let ctx = world.ctx();
        let seq_circle = world.seq(world.circle);
        let seq_shape = world.seq(world.shape);
        let list_circle = world.list(world.circle);
        assert!(type_exists(&ctx, seq_circle, seq_shape, ConversionMode::Implicit));
        assert!(!type_exists(&ctx, seq_shape, seq_circle, ConversionMode::Implicit));
        assert!(type_exists(&ctx, list_circle, seq_shape, ConversionMode::Implicit));

        // Variance never applies to value-type arguments.
        let seq_int = world.seq(primitives::INT32);
        let seq_object = world.seq(well_known::OBJECT);
        assert!(!type_exists(&ctx, seq_int, seq_object, ConversionMode::Implicit));

        // Invariant class instances do not vary.
        let list_shape = world.list(world.shape);
        assert!(!type_exists(&ctx, list_circle, list_shape, ConversionMode::Implicit));
    }

    #[test]
    fn contravariant_callables() {
        let world = World::new();
        let ctx = world.ctx();
        let sink_shape = world.sink(world.shape);
        let sink_circle = world.sink(world.circle);
        assert!(type_exists(&ctx, sink_shape, sink_circle, ConversionMode::Implicit));
        assert!(!type_exists(&ctx, sink_circle, sink_shape, ConversionMode::Implicit));
        assert!(type_exists(&ctx, sink_shape, well_known::DELEGATE, ConversionMode::Implicit));
    }

    #[test]
    fn array_covariance() {
        let world = World::new();
        let types = &world.registry;
        let circles = types.array_of(world.circle, 1);
        let shapes = types.array_of(world.shape, 1);
        let shape_grid = types.array_of(world.shape, 2);
        let ints = types.array_of(primitives::INT32, 1);
        let objects = types.array_of(well_known::OBJECT, 1);

        let ctx = world.ctx();
        assert!(type_exists(&ctx, circles, shapes, ConversionMode::Implicit));
        assert!(type_exists(&ctx, circles, well_known::ARRAY, ConversionMode::Implicit));
        assert!(type_exists(&ctx, ints, well_known::OBJECT, ConversionMode::Implicit));
        assert!(!type_exists(&ctx, circles, shape_grid, ConversionMode::Explicit));
        assert!(!type_exists(&ctx, ints, objects, ConversionMode::Explicit));
        assert!(!type_exists(&ctx, shapes, circles, ConversionMode::Implicit));
        assert!(type_exists(&ctx, shapes, circles, ConversionMode::Explicit));
        assert!(type_exists(&ctx, well_known::ARRAY, circles, ConversionMode::Explicit));

        let strict = world.ctx_with(|o| o.with_array_covariance(false));
        assert!(!type_exists(&strict, circles, shapes, ConversionMode::Implicit));
        assert!(type_exists(&strict, circles, well_known::ARRAY, ConversionMode::Implicit));
    }

    #[test]
    fn type_parameter_conversions() {
        let world = World::new();
        let ctx = world.ctx();
        let t = world.shape_param;
        assert_eq!(types_flags(&world, t), TypeFlags::TYPE_PARAMETER | TypeFlags::REFERENCE_TYPE);
        for bound in [world.shape, world.ishape, well_known::OBJECT] {
            assert!(type_exists(&ctx, t, bound, ConversionMode::Implicit));
        }
        assert!(!type_exists(&ctx, world.shape, t, ConversionMode::Implicit));
        assert!(type_exists(&ctx, world.shape, t, ConversionMode::Explicit));
        assert!(type_exists(&ctx, t, world.imeasurable, ConversionMode::Explicit));
        assert!(!type_exists(&ctx, t, world.circle, ConversionMode::Explicit));
    }

    fn types_flags(world: &World, ty: TypeHash) -> TypeFlags {
        let mask = TypeFlags::TYPE_PARAMETER | TypeFlags::REFERENCE_TYPE | TypeFlags::VALUE_TYPE;
        world.registry.flags(ty) & mask
    }

    #[test]
    fn pointers_need_unsafe_context() {
        let world = World::new();
        let int_ptr = world.registry.pointer_to(primitives::INT32);
        let byte_ptr = world.registry.pointer_to(primitives::UINT8);
        let void_ptr = world.registry.pointer_to(primitives::VOID);

        let safe = world.ctx();
        assert!(!type_exists(&safe, int_ptr, void_ptr, ConversionMode::Explicit));

        let ctx = world.unsafe_ctx();
        assert_eq!(
            find_type_conversion(&ctx, int_ptr, void_ptr, ConversionMode::Implicit).map(|c| c.step),
            Ok(ConversionStep::Standard(ConversionKind::ImplicitPointer))
        );
        assert!(!type_exists(&ctx, int_ptr, byte_ptr, ConversionMode::Implicit));
        assert!(type_exists(&ctx, int_ptr, byte_ptr, ConversionMode::Explicit));
        assert!(type_exists(&ctx, int_ptr, primitives::INT64, ConversionMode::Explicit));
        assert!(type_exists(&ctx, primitives::NINT, int_ptr, ConversionMode::Explicit));
        assert!(!type_exists(&ctx, primitives::DOUBLE, int_ptr, ConversionMode::Explicit));
    }
}
