//! Per-candidate eligibility.
//!
//! A candidate is applicable in its normal form when the arguments map
//! one-to-one onto its parameters (trailing defaulted parameters may be
//! omitted, and functions accepting extra arguments take any surplus as-is).
//! Only if that fails is the expanded form tried, where arguments past the
//! fixed parameters become elements of the parameter array.

use std::sync::Arc;

use sable_core::{Expr, FunctionDef, ParamMode, TypeHash};
use tracing::trace;

use super::{ApplicableForm, Argument, OverloadMatch, ResolveMode};
use crate::context::CompilationContext;
use crate::conversion::{Conversion, ConversionMode, find_conversion};
use crate::generic::{Bindings, substitute, unify};

/// An applicable candidate, with everything ranking and the final match need.
#[derive(Debug, Clone)]
pub(super) struct Applicable {
    pub func: Arc<FunctionDef>,
    pub form: ApplicableForm,
    pub inferred: Vec<TypeHash>,
    /// Parameter type per argument, before generic substitution.
    pub declared_types: Vec<TypeHash>,
    /// Parameter type per argument, after generic substitution.
    pub param_types: Vec<TypeHash>,
    /// Implicit conversion per argument. `None` in count-only mode.
    pub conversions: Vec<Option<Conversion>>,
    pub return_type: TypeHash,
}

impl Applicable {
    pub fn func_hash(&self) -> TypeHash {
        self.func.func_hash
    }

    pub fn into_match(self, args: &[Argument]) -> OverloadMatch {
        let converted_args = args
            .iter()
            .zip(&self.conversions)
            .map(|(arg, conversion)| match conversion {
                Some(conversion) => conversion.apply(arg.expr.clone()),
                None => arg.expr.clone(),
            })
            .collect();
        OverloadMatch {
            func_hash: self.func.func_hash,
            form: self.form,
            inferred: self.inferred,
            param_types: self.param_types,
            return_type: self.return_type,
            converted_args,
        }
    }
}

/// The parameter an argument is matched against.
#[derive(Debug, Clone, Copy)]
struct Slot {
    ty: TypeHash,
    mode: ParamMode,
    /// Surplus argument of a function accepting extra arguments.
    extra: bool,
}

/// Test a candidate, returning its first applicable form.
pub(super) fn check(
    ctx: &CompilationContext<'_>,
    func_hash: TypeHash,
    args: &[Argument],
    mode: ResolveMode,
) -> Option<Applicable> {
    let Some(func) = ctx.types().function(func_hash) else {
        trace!(func = %func_hash, "unknown candidate skipped");
        return None;
    };
    let applicable = try_form(ctx, &func, args, mode, ApplicableForm::Normal).or_else(|| {
        func.param_array()
            .and_then(|_| try_form(ctx, &func, args, mode, ApplicableForm::Expanded))
    });
    if applicable.is_none() {
        trace!(func = %func_hash, name = %func.name, "candidate not applicable");
    }
    applicable
}

fn try_form(
    ctx: &CompilationContext<'_>,
    func: &Arc<FunctionDef>,
    args: &[Argument],
    mode: ResolveMode,
    form: ApplicableForm,
) -> Option<Applicable> {
    let slots = match form {
        ApplicableForm::Normal => normal_slots(func, args)?,
        ApplicableForm::Expanded => expanded_slots(ctx, func, args)?,
    };

    if let Some((arg, slot)) = args.iter().zip(&slots).find(|(a, s)| !s.mode.accepts(a.mode)) {
        trace!(
            func = %func.func_hash,
            arg = ?arg.mode,
            param = ?slot.mode,
            "argument mode mismatch"
        );
        return None;
    }

    let strict = mode == ResolveMode::Strict;
    let mut bindings = Bindings::new(&func.generic_params);
    if func.is_generic() {
        for (arg, slot) in args.iter().zip(&slots) {
            if slot.extra || arg.expr.is_null_literal() || arg.expr.is_method_reference() {
                continue;
            }
            if !unify(ctx, &mut bindings, arg.expr.ty, slot.ty) && strict {
                return None;
            }
        }
    }
    let inferred = match bindings.inferred() {
        Some(inferred) => inferred,
        None if strict => {
            trace!(func = %func.func_hash, "generic arguments not inferred");
            return None;
        }
        None => Vec::new(),
    };

    let declared_types: Vec<TypeHash> = slots.iter().map(|s| s.ty).collect();
    let param_types: Vec<TypeHash> = declared_types
        .iter()
        .map(|ty| substitute(ctx, *ty, &bindings))
        .collect();

    let conversions = if strict {
        args.iter()
            .zip(&slots)
            .zip(&param_types)
            .map(|((arg, slot), &param)| {
                argument_conversion(ctx, &arg.expr, *slot, param).map(Some)
            })
            .collect::<Option<Vec<_>>>()?
    } else {
        vec![None; args.len()]
    };

    Some(Applicable {
        func: Arc::clone(func),
        form,
        inferred,
        declared_types,
        param_types,
        conversions,
        return_type: substitute(ctx, func.return_type, &bindings),
    })
}

/// One slot per argument in the normal form.
fn normal_slots(func: &FunctionDef, args: &[Argument]) -> Option<Vec<Slot>> {
    let params = &func.params;
    if args.len() > params.len() && !func.accepts_extra_args {
        return None;
    }
    if params.iter().skip(args.len()).any(|p| !p.has_default) {
        return None;
    }
    let declared = params.iter().map(|p| Slot {
        ty: p.ty,
        mode: p.mode,
        extra: false,
    });
    let surplus = args.iter().skip(params.len()).map(|a| Slot {
        ty: a.expr.ty,
        mode: a.mode,
        extra: true,
    });
    Some(declared.take(args.len()).chain(surplus).collect())
}

/// One slot per argument in the expanded form.
fn expanded_slots(
    ctx: &CompilationContext<'_>,
    func: &FunctionDef,
    args: &[Argument],
) -> Option<Vec<Slot>> {
    let (array, fixed) = func.params.split_last()?;
    let (element, _) = ctx.types().array_element(array.ty)?;
    if fixed.iter().skip(args.len()).any(|p| !p.has_default) {
        return None;
    }
    let fixed_slots = fixed.iter().map(|p| Slot {
        ty: p.ty,
        mode: p.mode,
        extra: false,
    });
    let elements = std::iter::repeat(Slot {
        ty: element,
        mode: ParamMode::Ordinary,
        extra: false,
    });
    Some(fixed_slots.chain(elements).take(args.len()).collect())
}

/// The implicit conversion of one argument, honouring by-reference slots.
fn argument_conversion(
    ctx: &CompilationContext<'_>,
    expr: &Expr,
    slot: Slot,
    param: TypeHash,
) -> Option<Conversion> {
    if slot.extra {
        return Some(Conversion::identity(expr.ty));
    }
    if slot.mode.requires_identity() {
        return (expr.ty == param).then(|| Conversion::identity(param));
    }
    find_conversion(ctx, expr, param, ConversionMode::Implicit).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::{Param, TypeQuery, primitives};

    use crate::test_support::World;

    fn args(types: &[TypeHash]) -> Vec<Argument> {
        types.iter().map(|t| Argument::new(Expr::value(*t))).collect()
    }

    #[test]
    fn defaults_may_be_omitted() {
        let mut world = World::new();
        let f = world.function(
            "F",
            vec![
                Param::new("a", primitives::INT32),
                Param::new("b", primitives::INT32).with_default(),
            ],
        );
        let ctx = world.ctx();
        let found = check(&ctx, f, &args(&[primitives::INT32]), ResolveMode::Strict).unwrap();
        assert_eq!(found.form, ApplicableForm::Normal);
        assert_eq!(found.param_types, vec![primitives::INT32]);
        assert!(check(&ctx, f, &[], ResolveMode::Strict).is_none());
    }

    #[test]
    fn parameter_array_expands_only_when_needed() {
        let mut world = World::new();
        let ints = world.registry.array_of(primitives::INT32, 1);
        let f = world.function(
            "Sum",
            vec![Param::new("first", primitives::INT32), Param::new("rest", ints).param_array()],
        );
        let ctx = world.ctx();

        let normal =
            check(&ctx, f, &args(&[primitives::INT32, ints]), ResolveMode::Strict).unwrap();
        assert_eq!(normal.form, ApplicableForm::Normal);

        let expanded = check(
            &ctx,
            f,
            &args(&[primitives::INT32, primitives::INT16, primitives::INT32]),
            ResolveMode::Strict,
        )
        .unwrap();
        assert_eq!(expanded.form, ApplicableForm::Expanded);
        assert_eq!(expanded.param_types, vec![primitives::INT32; 3]);

        let empty = check(&ctx, f, &args(&[primitives::INT32]), ResolveMode::Strict).unwrap();
        assert_eq!(empty.form, ApplicableForm::Expanded);
        assert_eq!(empty.param_types, vec![primitives::INT32]);
    }

    #[test]
    fn extra_arguments_keep_their_types() {
        let mut world = World::new();
        let printf = world.register(
            FunctionDef::new(
                "Print",
                vec![Param::new("format", sable_core::well_known::STRING)],
                primitives::VOID,
            )
            .with_extra_args(),
        );
        let ctx = world.ctx();
        let found = check(
            &ctx,
            printf,
            &args(&[sable_core::well_known::STRING, primitives::DOUBLE, world.circle]),
            ResolveMode::Strict,
        )
        .unwrap();
        assert_eq!(
            found.param_types,
            vec![sable_core::well_known::STRING, primitives::DOUBLE, world.circle]
        );
        assert!(found.conversions.iter().flatten().all(Conversion::is_identity));
    }

    #[test]
    fn by_reference_arguments_need_identical_types() {
        let mut world = World::new();
        let f = world.function(
            "Swap",
            vec![Param::new("x", world.shape).with_mode(ParamMode::Ref)],
        );
        let ctx = world.ctx();
        let by_ref = |ty| vec![Argument::with_mode(Expr::value(ty), ParamMode::Ref)];

        assert!(check(&ctx, f, &by_ref(world.shape), ResolveMode::Strict).is_some());
        assert!(check(&ctx, f, &by_ref(world.circle), ResolveMode::Strict).is_none());
        assert!(check(&ctx, f, &args(&[world.shape]), ResolveMode::Strict).is_none());

        // Count-only mode still checks modes, not types.
        assert!(check(&ctx, f, &by_ref(world.circle), ResolveMode::ArgumentCountOnly).is_some());
        assert!(check(&ctx, f, &args(&[world.shape]), ResolveMode::ArgumentCountOnly).is_none());
    }

    #[test]
    fn in_parameters_accept_plain_arguments() {
        let mut world = World::new();
        let f = world.function(
            "Measure",
            vec![Param::new("x", primitives::INT64).with_mode(ParamMode::In)],
        );
        let ctx = world.ctx();
        assert!(check(&ctx, f, &args(&[primitives::INT32]), ResolveMode::Strict).is_some());
    }

    #[test]
    fn generic_arguments_are_inferred_and_substituted() {
        let mut world = World::new();
        let t = world.method_param("First", "T", 0);
        let seq_t = world.seq(t);
        let first = world.register(
            FunctionDef::new("First", vec![Param::new("items", seq_t)], t).with_generic_param(t),
        );
        let list_circle = world.list(world.circle);
        let ctx = world.ctx();

        let found = check(&ctx, first, &args(&[list_circle]), ResolveMode::Strict).unwrap();
        assert_eq!(found.inferred, vec![world.circle]);
        assert_eq!(found.declared_types, vec![seq_t]);
        assert_eq!(found.param_types, vec![world.seq(world.circle)]);
        assert_eq!(found.return_type, world.circle);

        // `null` gives no evidence, so T stays unbound.
        let null = vec![Argument::new(Expr::null())];
        assert!(check(&ctx, first, &null, ResolveMode::Strict).is_none());
    }
}
