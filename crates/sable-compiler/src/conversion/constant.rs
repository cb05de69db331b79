//! Compile-time constant conversions.
//!
//! A numeric constant converted to a numeric or enum type is folded: the
//! result is a constant of the target type carrying the converted value, not
//! a conversion node. Integral constants narrow implicitly when the value
//! fits (except to `char`), and literal `0` converts implicitly to any enum.
//!
//! Out-of-range handling differs by source family:
//!
//! | source            | target   | value does not fit                      |
//! |-------------------|----------|-----------------------------------------|
//! | integer, decimal  | any      | `OutOfRangeConstant`, implicit or cast  |
//! | float, double     | integral | cast only; unfolded runtime conversion  |
//! | float, double     | decimal  | `OutOfRangeConstant`                    |

use sable_core::{
    ConstantValue, ConversionError, ConversionKind, DecimalValue, Expr, PrimitiveKind, TypeHash,
};

use super::primitive::{NumericConversion, numeric_conversion};
use super::{Conversion, ConversionMode};
use crate::context::CompilationContext;

/// Numeric family of a constant's type: a primitive, or an enum and its
/// underlying primitive.
#[derive(Debug, Clone, Copy)]
struct NumericType {
    kind: PrimitiveKind,
    is_enum: bool,
}

fn numeric_type(ctx: &CompilationContext<'_>, ty: TypeHash) -> Option<NumericType> {
    let types = ctx.types();
    if let Some(kind) = types.primitive_kind(ty).filter(|k| k.is_numeric()) {
        return Some(NumericType {
            kind,
            is_enum: false,
        });
    }
    let underlying = types.underlying_type(ty)?;
    Some(NumericType {
        kind: types.primitive_kind(underlying)?,
        is_enum: true,
    })
}

/// Classify a constant conversion.
///
/// `Ok(None)` when the constant rules do not apply and the type-level stages
/// should decide.
pub(super) fn classify(
    ctx: &CompilationContext<'_>,
    expr: &Expr,
    target: TypeHash,
    mode: ConversionMode,
) -> Result<Option<Conversion>, ConversionError> {
    let Some(value) = expr.constant_value().filter(|v| v.is_numeric()) else {
        return Ok(None);
    };
    let (Some(from), Some(to)) = (numeric_type(ctx, expr.ty), numeric_type(ctx, target)) else {
        return Ok(None);
    };

    if from.is_enum || to.is_enum {
        return enumeration(expr, value, from, to, target, mode);
    }

    let lattice = numeric_conversion(from.kind, to.kind);
    let out_of_range = || ConversionError::OutOfRangeConstant {
        value: value.clone(),
        target,
    };

    let conversion = match value {
        ConstantValue::Integer(v) => {
            if to.kind.is_integral() {
                if !value.fits_integral(to.kind) {
                    return Err(out_of_range());
                }
                // Only an untyped literal narrows without a cast; typed
                // constants follow the lattice.
                let kind = match lattice {
                    Some(NumericConversion::Implicit) => ConversionKind::ImplicitNumeric,
                    _ if expr.is_polymorphic_constant() && to.kind != PrimitiveKind::Char => {
                        ConversionKind::ImplicitConstant
                    }
                    _ => ConversionKind::ExplicitNumeric,
                };
                Conversion::folded(ConstantValue::Integer(*v), kind, target)
            } else if to.kind == PrimitiveKind::Decimal {
                let decimal = DecimalValue::from_integer(*v).ok_or_else(out_of_range)?;
                Conversion::folded(ConstantValue::Decimal(decimal), lattice_kind(lattice), target)
            } else {
                Conversion::folded(float_value(*v as f64, to.kind), lattice_kind(lattice), target)
            }
        }
        ConstantValue::Float(f) => {
            let kind = lattice_kind(lattice);
            if to.kind.is_integral() {
                // Only casts reach here; the lattice has no implicit float-to-integer edge.
                if mode == ConversionMode::Implicit {
                    return Ok(None);
                }
                let truncated = f.0.trunc();
                let folded = ConstantValue::Integer(truncated as i128);
                if truncated.is_finite() && folded.fits_integral(to.kind) {
                    Conversion::folded(folded, kind, target)
                } else {
                    // Unchecked truncation deferred to run time.
                    Conversion::standard(kind, target)
                }
            } else if to.kind == PrimitiveKind::Decimal {
                let decimal = DecimalValue::from_f64(f.0).ok_or_else(out_of_range)?;
                Conversion::folded(ConstantValue::Decimal(decimal), kind, target)
            } else {
                Conversion::folded(float_value(f.0, to.kind), kind, target)
            }
        }
        ConstantValue::Decimal(d) => {
            let kind = lattice_kind(lattice);
            if to.kind.is_integral() {
                let folded = ConstantValue::Integer(d.truncate());
                if !folded.fits_integral(to.kind) {
                    return Err(out_of_range());
                }
                Conversion::folded(folded, kind, target)
            } else {
                Conversion::folded(float_value(d.to_f64(), to.kind), kind, target)
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(conversion))
}

/// Constant conversions to, from and between enums.
fn enumeration(
    expr: &Expr,
    value: &ConstantValue,
    from: NumericType,
    to: NumericType,
    target: TypeHash,
    mode: ConversionMode,
) -> Result<Option<Conversion>, ConversionError> {
    if to.is_enum && !from.is_enum && expr.is_zero_constant() {
        return Ok(Some(Conversion::folded(
            value.clone(),
            ConversionKind::ZeroToEnum,
            target,
        )));
    }
    if mode == ConversionMode::Implicit {
        return Ok(None);
    }

    let out_of_range = || ConversionError::OutOfRangeConstant {
        value: value.clone(),
        target,
    };
    let folded = match value {
        ConstantValue::Integer(_) if to.kind.is_integral() => {
            if !value.fits_integral(to.kind) {
                return Err(out_of_range());
            }
            value.clone()
        }
        ConstantValue::Integer(v) if to.kind == PrimitiveKind::Decimal => {
            ConstantValue::Decimal(DecimalValue::from_integer(*v).ok_or_else(out_of_range)?)
        }
        ConstantValue::Integer(v) => float_value(*v as f64, to.kind),
        ConstantValue::Float(f) => {
            let truncated = ConstantValue::Integer(f.0.trunc() as i128);
            if !f.0.is_finite() || !truncated.fits_integral(to.kind) {
                return Ok(Some(Conversion::standard(
                    ConversionKind::ExplicitEnumeration,
                    target,
                )));
            }
            truncated
        }
        ConstantValue::Decimal(d) => {
            let truncated = ConstantValue::Integer(d.truncate());
            if !truncated.fits_integral(to.kind) {
                return Err(out_of_range());
            }
            truncated
        }
        _ => return Ok(None),
    };
    Ok(Some(Conversion::folded(
        folded,
        ConversionKind::ExplicitEnumeration,
        target,
    )))
}

fn lattice_kind(lattice: Option<NumericConversion>) -> ConversionKind {
    match lattice {
        Some(NumericConversion::Identity) => ConversionKind::Identity,
        Some(NumericConversion::Implicit) => ConversionKind::ImplicitNumeric,
        _ => ConversionKind::ExplicitNumeric,
    }
}

/// A floating constant of the given kind; `float` values are rounded to
/// single precision.
fn float_value(value: f64, kind: PrimitiveKind) -> ConstantValue {
    if kind == PrimitiveKind::Float {
        ConstantValue::float(value as f32 as f64)
    } else {
        ConstantValue::float(value)
    }
}
