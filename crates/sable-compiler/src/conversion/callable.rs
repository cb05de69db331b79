//! Method group and method address conversions to callable types.
//!
//! The callable's parameters become the arguments of an ordinary overload
//! resolution over the group. The winner must then match the callable
//! exactly up to variance: parameter modes equal, each callable parameter
//! converting to the method's by identity or implicit reference
//! (contravariance), and the method's return converting to the callable's
//! the same way (covariance).

use sable_core::{
    CallableSignature, ConversionError, Expr, ExprKind, TypeFlags, TypeHash,
};
use tracing::debug;

use super::reference::is_implicit_reference;
use super::{Conversion, ConversionStep, no_conversion};
use crate::context::CompilationContext;
use crate::overload::{ApplicableForm, Argument, OverloadMatch, OverloadResult, resolve_overload};

pub(super) fn classify(
    ctx: &CompilationContext<'_>,
    expr: &Expr,
    target: TypeHash,
) -> Result<Conversion, ConversionError> {
    if !ctx.types().flags(target).contains(TypeFlags::DELEGATE) {
        return Err(no_conversion(expr.ty, target));
    }
    let method = resolve_method_reference(ctx, expr, target)?;
    Ok(Conversion {
        step: ConversionStep::Delegate { method },
        target,
        is_implicit: true,
    })
}

/// Pick the method a method group or method address binds to when
/// converted to the callable type `callable`.
///
/// # Errors
///
/// - [`ConversionError::Contract`] if `callable` is not a callable type; this
///   is a defect in the caller.
/// - [`ConversionError::NoConversion`] if `expr` is not a method reference or
///   no method in it is compatible with the callable's signature.
/// - [`ConversionError::AmbiguousConversion`] if overload resolution over the
///   group is ambiguous.
pub fn resolve_method_reference(
    ctx: &CompilationContext<'_>,
    expr: &Expr,
    callable: TypeHash,
) -> Result<TypeHash, ConversionError> {
    let signature = ctx.types().delegate_signature(callable)?;
    let candidates = match &expr.kind {
        ExprKind::MethodGroup { candidates, .. } => candidates.clone(),
        ExprKind::MethodAddress { method } => vec![*method],
        _ => return Err(no_conversion(expr.ty, callable)),
    };
    let args: Vec<Argument> = signature
        .params
        .iter()
        .map(|p| Argument::with_mode(Expr::value(p.ty), p.mode))
        .collect();

    match resolve_overload(ctx, &candidates, &args) {
        OverloadResult::Resolved(found) if is_compatible(ctx, &signature, &found) => {
            debug!(method = %found.func_hash, %callable, "bound method reference");
            Ok(found.func_hash)
        }
        OverloadResult::Resolved(found) => {
            debug!(
                method = %found.func_hash,
                %callable,
                "method signature incompatible with callable"
            );
            Err(no_conversion(expr.ty, callable))
        }
        OverloadResult::NoMatch => Err(no_conversion(expr.ty, callable)),
        OverloadResult::Ambiguous(_) => Err(ConversionError::AmbiguousConversion {
            from: expr.ty,
            to: callable,
        }),
    }
}

fn is_compatible(
    ctx: &CompilationContext<'_>,
    signature: &CallableSignature,
    found: &OverloadMatch,
) -> bool {
    let types = ctx.types();
    let Some(func) = types.function(found.func_hash) else {
        return false;
    };
    if found.form != ApplicableForm::Normal
        || func.params.len() != signature.params.len()
        || found.param_types.len() != signature.params.len()
    {
        return false;
    }

    let converts = |from: TypeHash, to: TypeHash| {
        from == to || (types.is_reference_type(from) && is_implicit_reference(ctx, from, to))
    };
    let params_match = signature
        .params
        .iter()
        .zip(&func.params)
        .zip(&found.param_types)
        .all(|((expected, declared), &actual)| {
            expected.mode == declared.mode
                && if expected.mode.requires_identity() {
                    expected.ty == actual
                } else {
                    converts(expected.ty, actual)
                }
        });
    params_match && converts(found.return_type, signature.return_type)
}
