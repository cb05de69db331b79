//! User-declared conversion operators.
//!
//! Operators are searched on the source type and its ancestors (nearest
//! first, stopping at the first level that declares an operator producing the
//! target exactly), then on the target type. An operator is eligible when a
//! standard conversion reaches its parameter from the source and the target
//! from its result. Among eligible operators one must dominate the others on
//! both sides:
//!
//! - source side: a parameter equal to the source wins, then the more
//!   specific parameter, then the parameter that converts implicitly to the
//!   other
//! - target side: a result equal to the target wins, then the more specific
//!   result, then the result the other converts implicitly to
//!
//! With everything else equal an implicit operator beats an explicit one.
//!
//! The search depends only on the two types and the mode, so it is memoised
//! per [`CompilationContext`].

use std::cmp::Ordering;
use std::iter;

use sable_core::{ConversionError, FunctionDef, TypeHash};
use tracing::{debug, trace};

use super::{
    Conversion, ConversionMode, ConversionStep, Source, UserConversions, classify as classify_any,
};
use crate::context::CompilationContext;
use crate::overload::specificity::{Specificity, compare_specificity};

/// Memoised outcome of an operator search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OperatorLookup {
    NotFound,
    Found(OperatorChoice),
    Ambiguous,
}

/// The operator selected for a pair of types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OperatorChoice {
    pub operator: TypeHash,
    pub parameter: TypeHash,
    pub result: TypeHash,
    pub implicit: bool,
}

pub(super) fn classify(
    ctx: &CompilationContext<'_>,
    source: Source<'_>,
    target: TypeHash,
    mode: ConversionMode,
) -> Result<Option<Conversion>, ConversionError> {
    let from = source.ty();
    let lookup = ctx
        .operator_cache()
        .get_or_compute((from, target, mode), || search(ctx, from, target, mode));

    let choice = match lookup {
        OperatorLookup::NotFound => return Ok(None),
        OperatorLookup::Ambiguous => {
            return Err(ConversionError::AmbiguousConversion { from, to: target });
        }
        OperatorLookup::Found(choice) => choice,
    };

    // The source may be a constant, so the pre-conversion is classified on
    // the expression itself and can fold or report a range error.
    let before = classify_any(ctx, source, choice.parameter, mode, UserConversions::Excluded)?;
    let after = classify_any(
        ctx,
        Source::Type(choice.result),
        target,
        mode,
        UserConversions::Excluded,
    )?;

    debug!(operator = %choice.operator, %from, to = %target, "selected conversion operator");
    Ok(Some(Conversion {
        is_implicit: choice.implicit && before.is_implicit && after.is_implicit,
        step: ConversionStep::UserDefined {
            operator: choice.operator,
            result: choice.result,
            before: Box::new(before),
            after: Box::new(after),
        },
        target,
    }))
}

fn search(
    ctx: &CompilationContext<'_>,
    from: TypeHash,
    to: TypeHash,
    mode: ConversionMode,
) -> OperatorLookup {
    let types = ctx.types();
    let mut candidates: Vec<OperatorChoice> = Vec::new();

    for owner in iter::once(from).chain(types.base_chain(from)) {
        let level: Vec<_> = types
            .conversion_operators(owner)
            .iter()
            .filter_map(|op| eligible(ctx, op, from, to, mode))
            .collect();
        let exact = level.iter().any(|c| c.result == to);
        candidates.extend(level);
        if exact {
            break;
        }
    }
    for op in types.conversion_operators(to) {
        if let Some(choice) = eligible(ctx, &op, from, to, mode)
            && !candidates.iter().any(|c| c.operator == choice.operator)
        {
            candidates.push(choice);
        }
    }

    let mut candidates = candidates.into_iter();
    let Some(mut best) = candidates.next() else {
        return OperatorLookup::NotFound;
    };
    let mut tied: Vec<OperatorChoice> = Vec::new();
    for candidate in candidates {
        if dominates(ctx, &candidate, &best, from, to) {
            tied.retain(|t| !dominates(ctx, &candidate, t, from, to));
            best = candidate;
        } else if !dominates(ctx, &best, &candidate, from, to) {
            tied.push(candidate);
        }
    }

    if tied.is_empty() {
        OperatorLookup::Found(best)
    } else {
        debug!(%from, %to, candidates = tied.len() + 1, "ambiguous conversion operators");
        OperatorLookup::Ambiguous
    }
}

fn eligible(
    ctx: &CompilationContext<'_>,
    op: &FunctionDef,
    from: TypeHash,
    to: TypeHash,
    mode: ConversionMode,
) -> Option<OperatorChoice> {
    let implicit = op.is_implicit_operator();
    if mode == ConversionMode::Implicit && !implicit {
        return None;
    }
    let parameter = op.params.first()?.ty;
    let result = op.return_type;
    let standard = |a: TypeHash, b: TypeHash| {
        classify_any(ctx, Source::Type(a), b, mode, UserConversions::Excluded).is_ok()
    };
    if !standard(from, parameter) || !standard(result, to) {
        trace!(operator = %op.func_hash, "conversion operator not applicable");
        return None;
    }
    Some(OperatorChoice {
        operator: op.func_hash,
        parameter,
        result,
        implicit,
    })
}

/// Whether `a` is strictly better than `b` on both sides.
fn dominates(
    ctx: &CompilationContext<'_>,
    a: &OperatorChoice,
    b: &OperatorChoice,
    from: TypeHash,
    to: TypeHash,
) -> bool {
    let Some(source) = prefer(ctx, a.parameter, b.parameter, from, Direction::Narrower) else {
        return false;
    };
    let Some(target) = prefer(ctx, a.result, b.result, to, Direction::Wider) else {
        return false;
    };
    match (source, target) {
        (Ordering::Less, _) | (_, Ordering::Less) => false,
        (Ordering::Greater, _) | (_, Ordering::Greater) => true,
        (Ordering::Equal, Ordering::Equal) => a.implicit && !b.implicit,
    }
}

#[derive(Clone, Copy)]
enum Direction {
    /// Prefer the type that converts to the other.
    Narrower,
    /// Prefer the type the other converts to.
    Wider,
}

/// Compare two operator types against the exact type they should match.
/// `Greater` means `a` is preferred, `None` that they are unrelated.
fn prefer(
    ctx: &CompilationContext<'_>,
    a: TypeHash,
    b: TypeHash,
    exact: TypeHash,
    direction: Direction,
) -> Option<Ordering> {
    if a == b {
        return Some(Ordering::Equal);
    }
    if a == exact {
        return Some(Ordering::Greater);
    }
    if b == exact {
        return Some(Ordering::Less);
    }
    match compare_specificity(ctx, a, b) {
        Specificity::More => return Some(Ordering::Greater),
        Specificity::Less => return Some(Ordering::Less),
        Specificity::Same | Specificity::Incomparable => {}
    }
    let converts = |x: TypeHash, y: TypeHash| {
        classify_any(
            ctx,
            Source::Type(x),
            y,
            ConversionMode::Implicit,
            UserConversions::Excluded,
        )
        .is_ok()
    };
    let (a_to_b, b_to_a) = (converts(a, b), converts(b, a));
    match (a_to_b, b_to_a, direction) {
        (true, false, Direction::Narrower) | (false, true, Direction::Wider) => {
            Some(Ordering::Greater)
        }
        (false, true, Direction::Narrower) | (true, false, Direction::Wider) => {
            Some(Ordering::Less)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::{convert, find_type_conversion, type_exists};
    use crate::test_support::World;
    use sable_core::{ClassEntry, ConstantValue, ConversionKind, Expr, ExprKind, primitives};

    #[test]
    fn implicit_operator_from_source_type() {
        let world = World::new();
        let ctx = world.ctx();
        let converted =
            convert(&ctx, Expr::value(world.meters), primitives::DOUBLE, ConversionMode::Implicit)
                .unwrap();
        let ExprKind::UserConversion { operator, operand } = &converted.kind else {
            panic!("expected operator call, got {:?}", converted.kind);
        };
        assert_eq!(*operator, world.meters_to_double);
        assert_eq!(operand.ty, world.meters);
        assert_eq!(converted.ty, primitives::DOUBLE);
    }

    #[test]
    fn explicit_operator_needs_a_cast() {
        let world = World::new();
        let ctx = world.ctx();
        assert!(!type_exists(&ctx, primitives::DOUBLE, world.meters, ConversionMode::Implicit));

        let conversion =
            find_type_conversion(&ctx, primitives::DOUBLE, world.meters, ConversionMode::Explicit)
                .unwrap();
        assert!(!conversion.is_implicit);
        let ConversionStep::UserDefined { operator, .. } = conversion.step else {
            panic!("expected user-defined conversion");
        };
        assert_eq!(operator, world.double_to_meters);
    }

    #[test]
    fn standard_conversions_around_the_operator() {
        let world = World::new();
        let ctx = world.ctx();

        // 5 is folded to a double constant before the operator runs.
        let converted =
            convert(&ctx, Expr::int_literal(5), world.meters, ConversionMode::Explicit).unwrap();
        let ExprKind::UserConversion { operand, .. } = &converted.kind else {
            panic!("expected operator call");
        };
        assert_eq!(operand.ty, primitives::DOUBLE);
        assert_eq!(operand.constant_value(), Some(&ConstantValue::float(5.0)));

        // Meters -> double -> float narrows after the operator.
        assert!(!type_exists(&ctx, world.meters, primitives::FLOAT, ConversionMode::Implicit));
        let converted =
            convert(&ctx, Expr::value(world.meters), primitives::FLOAT, ConversionMode::Explicit)
                .unwrap();
        let ExprKind::Convert { operand, kind } = &converted.kind else {
            panic!("expected post-conversion");
        };
        assert_eq!(*kind, ConversionKind::ExplicitNumeric);
        assert!(matches!(operand.kind, ExprKind::UserConversion { .. }));
    }

    #[test]
    fn operators_do_not_chain() {
        let mut world = World::new();
        let feet = world
            .registry
            .register_type(ClassEntry::value("Feet"))
            .unwrap();
        world
            .registry
            .register_conversion_operator(FunctionDef::conversion_operator(
                feet,
                false,
                feet,
                world.meters,
            ))
            .unwrap();
        let ctx = world.ctx();
        assert!(type_exists(&ctx, feet, world.meters, ConversionMode::Implicit));
        // Feet -> Meters -> double would need two operators.
        assert!(!type_exists(&ctx, feet, primitives::DOUBLE, ConversionMode::Explicit));
    }

    #[test]
    fn operators_declared_on_both_sides_are_ambiguous() {
        let mut world = World::new();
        let celsius = world.registry.register_type(ClassEntry::value("Celsius")).unwrap();
        let kelvin = world.registry.register_type(ClassEntry::value("Kelvin")).unwrap();
        for owner in [celsius, kelvin] {
            world
                .registry
                .register_conversion_operator(FunctionDef::conversion_operator(
                    owner, false, celsius, kelvin,
                ))
                .unwrap();
        }
        let ctx = world.ctx();
        let err =
            find_type_conversion(&ctx, celsius, kelvin, ConversionMode::Implicit).unwrap_err();
        assert_eq!(
            err,
            ConversionError::AmbiguousConversion {
                from: celsius,
                to: kelvin,
            }
        );
    }

    #[test]
    fn exact_parameter_beats_wider_parameter() {
        let mut world = World::new();
        let grams = world.registry.register_type(ClassEntry::value("Grams")).unwrap();
        let from_int = world
            .registry
            .register_conversion_operator(FunctionDef::conversion_operator(
                grams,
                false,
                primitives::INT32,
                grams,
            ))
            .unwrap();
        world
            .registry
            .register_conversion_operator(FunctionDef::conversion_operator(
                grams,
                false,
                primitives::INT64,
                grams,
            ))
            .unwrap();
        let ctx = world.ctx();

        let conversion =
            find_type_conversion(&ctx, primitives::INT32, grams, ConversionMode::Implicit).unwrap();
        assert!(matches!(
            conversion.step,
            ConversionStep::UserDefined { operator, .. } if operator == from_int
        ));
        // From int16 neither parameter is exact; int is the narrower one.
        let conversion =
            find_type_conversion(&ctx, primitives::INT16, grams, ConversionMode::Implicit).unwrap();
        assert!(matches!(
            conversion.step,
            ConversionStep::UserDefined { operator, .. } if operator == from_int
        ));
    }

    #[test]
    fn operator_search_is_memoised() {
        let world = World::new();
        let ctx = world.ctx();
        assert_eq!(ctx.cached_operator_lookups(), 0);
        for _ in 0..3 {
            assert!(type_exists(&ctx, world.meters, primitives::DOUBLE, ConversionMode::Implicit));
        }
        assert_eq!(ctx.cached_operator_lookups(), 1);
        assert!(type_exists(&ctx, world.meters, primitives::DOUBLE, ConversionMode::Explicit));
        assert_eq!(ctx.cached_operator_lookups(), 2);
    }
}
