//! Nullable wrap, unwrap and lifting.
//!
//! - `S? -> T?` is lifted: the payload conversion `S -> T` runs only when the
//!   operand has a value, `null` passes through. The payload conversion must
//!   exist statically; an out-of-range payload at run time is a runtime fault.
//! - `S -> T?` converts to `T`, then wraps.
//! - `S? -> T` is a cast: unwrap (faulting on `null` at run time), then
//!   convert. A reference target is boxing instead and is left to the
//!   reference stage.

use sable_core::{ConversionError, TypeHash};

use super::{
    Conversion, ConversionMode, ConversionStep, Source, UserConversions, classify as classify_any,
};
use crate::context::CompilationContext;

pub(super) fn classify(
    ctx: &CompilationContext<'_>,
    source: Source<'_>,
    target: TypeHash,
    mode: ConversionMode,
    user: UserConversions,
) -> Result<Option<Conversion>, ConversionError> {
    let types = ctx.types();
    let from = source.ty();

    match (types.nullable_inner(from), types.nullable_inner(target)) {
        (Some(from_value), Some(to_value)) => {
            if !ctx.options().lifted_conversions {
                return Ok(None);
            }
            let inner = classify_any(ctx, Source::Type(from_value), to_value, mode, user);
            let Some(inner) = payload(inner)? else {
                return Ok(None);
            };
            Ok(Some(Conversion {
                is_implicit: inner.is_implicit,
                step: ConversionStep::Lifted {
                    value_type: from_value,
                    inner: Box::new(inner),
                },
                target,
            }))
        }
        (None, Some(to_value)) => {
            let Some(inner) = payload(classify_any(ctx, source, to_value, mode, user))? else {
                return Ok(None);
            };
            Ok(Some(Conversion {
                is_implicit: inner.is_implicit,
                step: ConversionStep::WrapNullable(Box::new(inner)),
                target,
            }))
        }
        (Some(from_value), None) => {
            if mode == ConversionMode::Implicit || types.is_reference_type(target) {
                return Ok(None);
            }
            let then = classify_any(ctx, Source::Type(from_value), target, mode, user);
            let Some(then) = payload(then)? else {
                return Ok(None);
            };
            Ok(Some(Conversion {
                step: ConversionStep::UnwrapNullable {
                    value_type: from_value,
                    then: Box::new(then),
                },
                target,
                is_implicit: false,
            }))
        }
        (None, None) => Ok(None),
    }
}

/// A missing payload conversion means this stage does not apply; any other
/// failure is final.
fn payload(
    result: Result<Conversion, ConversionError>,
) -> Result<Option<Conversion>, ConversionError> {
    match result {
        Ok(conversion) => Ok(Some(conversion)),
        Err(ConversionError::NoConversion { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}
