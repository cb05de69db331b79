//! Type conversion system.
//!
//! Decides whether an expression (or a bare type) converts to a target type,
//! implicitly or explicitly, and builds the expression that performs the
//! conversion.
//!
//! ## Conversion Priority
//!
//! Conversions are tried in this order; the first stage that produces a
//! conversion allowed in the requested mode wins:
//!
//! 1. Identity
//! 2. Method group or address to a callable type
//! 3. `null` literal, then compile-time constants (range-checked re-typing)
//! 4. Nullable wrap, unwrap and lifting
//! 5. Boxing, unboxing and reference conversions (hierarchy, interfaces,
//!    variance, arrays, type parameters)
//! 6. The numeric lattice and enum conversions
//! 7. Pointer conversions (unsafe context only)
//! 8. User-declared conversion operators, unless both sides are primitive
//!
//! Classification ([`find_conversion`]) and materialisation
//! ([`Conversion::apply`]) are separate: overload resolution classifies every
//! argument of every candidate but only materialises the winner's.

use sable_core::{
    ConstantValue, ConversionError, ConversionKind, Expr, ExprKind, TypeHash, primitives,
};

use crate::context::CompilationContext;

mod callable;
mod constant;
mod nullable;
pub(crate) mod primitive;
pub(crate) mod reference;
pub(crate) mod user_defined;

pub use callable::resolve_method_reference;
pub use primitive::{NumericConversion, numeric_conversion};

/// Whether explicit (cast) conversions are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionMode {
    Implicit,
    Explicit,
}

impl ConversionMode {
    /// Whether `conversion` may be used in this mode.
    pub fn admits(self, conversion: &Conversion) -> bool {
        conversion.is_implicit || self == ConversionMode::Explicit
    }
}

/// Coarse conversion class used by overload betterness. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConversionRank {
    Identity,
    Widening,
    Narrowing,
    UserDefined,
}

/// A classified conversion to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub step: ConversionStep,
    /// The type the conversion produces.
    pub target: TypeHash,
    /// Whether the conversion can be applied without a cast.
    pub is_implicit: bool,
}

/// How a conversion is carried out.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionStep {
    /// The expression already has the target type.
    Identity,
    /// A single standard conversion node.
    Standard(ConversionKind),
    /// A compile-time constant re-typed with its (possibly narrowed) value.
    Folded {
        value: ConstantValue,
        kind: ConversionKind,
    },
    /// Convert to the nullable's value type, then wrap.
    WrapNullable(Box<Conversion>),
    /// Unwrap to `value_type`, then convert.
    UnwrapNullable {
        value_type: TypeHash,
        then: Box<Conversion>,
    },
    /// Nullable to nullable; `inner` converts the payload when present.
    Lifted {
        value_type: TypeHash,
        inner: Box<Conversion>,
    },
    /// Standard conversion to the operator's parameter, the operator call,
    /// then a standard conversion from its result.
    UserDefined {
        operator: TypeHash,
        result: TypeHash,
        before: Box<Conversion>,
        after: Box<Conversion>,
    },
    /// A method group bound to a callable type.
    Delegate { method: TypeHash },
}

impl Conversion {
    pub(crate) fn identity(target: TypeHash) -> Self {
        Self {
            step: ConversionStep::Identity,
            target,
            is_implicit: true,
        }
    }

    pub(crate) fn standard(kind: ConversionKind, target: TypeHash) -> Self {
        Self {
            step: ConversionStep::Standard(kind),
            target,
            is_implicit: !kind.is_explicit_only(),
        }
    }

    pub(crate) fn folded(value: ConstantValue, kind: ConversionKind, target: TypeHash) -> Self {
        Self {
            step: ConversionStep::Folded { value, kind },
            target,
            is_implicit: !kind.is_explicit_only(),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.step, ConversionStep::Identity)
    }

    pub fn is_user_defined(&self) -> bool {
        matches!(self.step, ConversionStep::UserDefined { .. })
    }

    /// Rank for overload betterness.
    pub fn rank(&self) -> ConversionRank {
        match &self.step {
            ConversionStep::Identity => ConversionRank::Identity,
            ConversionStep::Standard(kind) | ConversionStep::Folded { kind, .. } => {
                kind_rank(*kind)
            }
            ConversionStep::WrapNullable(inner) | ConversionStep::Lifted { inner, .. } => {
                inner.rank().max(ConversionRank::Widening)
            }
            ConversionStep::UnwrapNullable { .. } => ConversionRank::Narrowing,
            ConversionStep::UserDefined { .. } => ConversionRank::UserDefined,
            ConversionStep::Delegate { .. } => ConversionRank::Widening,
        }
    }

    /// Build the expression performing this conversion on `expr`.
    ///
    /// `expr` must be the expression (or an expression of the type) this
    /// conversion was classified for.
    pub fn apply(&self, expr: Expr) -> Expr {
        let span = expr.span;
        match &self.step {
            ConversionStep::Identity => expr,
            ConversionStep::Standard(kind) => Expr::convert(expr, *kind, self.target),
            ConversionStep::Folded { value, .. } => {
                Expr::constant(value.clone(), self.target).with_span(span)
            }
            ConversionStep::WrapNullable(inner) => {
                let value = inner.apply(expr);
                Expr::convert(value, ConversionKind::NullableWrap, self.target)
            }
            ConversionStep::UnwrapNullable { value_type, then } => {
                let value = Expr::convert(expr, ConversionKind::NullableUnwrap, *value_type);
                then.apply(value)
            }
            ConversionStep::Lifted { value_type, inner } => {
                let payload = Expr::new(ExprKind::LiftedValue, *value_type).with_span(span);
                Expr::new(
                    ExprKind::Lifted {
                        operand: Box::new(expr),
                        conversion: Box::new(inner.apply(payload)),
                    },
                    self.target,
                )
                .with_span(span)
            }
            ConversionStep::UserDefined {
                operator,
                result,
                before,
                after,
            } => {
                let operand = before.apply(expr);
                let call = Expr::new(
                    ExprKind::UserConversion {
                        operator: *operator,
                        operand: Box::new(operand),
                    },
                    *result,
                )
                .with_span(span);
                after.apply(call)
            }
            ConversionStep::Delegate { method } => {
                let receiver = match expr.kind {
                    ExprKind::MethodGroup { receiver, .. } => receiver,
                    _ => None,
                };
                Expr::new(
                    ExprKind::NewDelegate {
                        method: *method,
                        receiver,
                    },
                    self.target,
                )
                .with_span(span)
            }
        }
    }
}

fn kind_rank(kind: ConversionKind) -> ConversionRank {
    if kind == ConversionKind::Identity {
        ConversionRank::Identity
    } else if kind.is_explicit_only() {
        ConversionRank::Narrowing
    } else {
        ConversionRank::Widening
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Classify the conversion of `expr` to `target`.
///
/// In [`ConversionMode::Implicit`] only implicit conversions are returned.
/// Constants are range-checked: an integral or decimal constant that does not
/// fit the target is [`ConversionError::OutOfRangeConstant`] in either mode.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn find_conversion(
    ctx: &CompilationContext<'_>,
    expr: &Expr,
    target: TypeHash,
    mode: ConversionMode,
) -> Result<Conversion, ConversionError> {
    classify(ctx, Source::Expr(expr), target, mode, UserConversions::Allowed)
}

/// Classify a conversion between types, ignoring any constant value.
pub fn find_type_conversion(
    ctx: &CompilationContext<'_>,
    from: TypeHash,
    to: TypeHash,
    mode: ConversionMode,
) -> Result<Conversion, ConversionError> {
    classify(ctx, Source::Type(from), to, mode, UserConversions::Allowed)
}

/// Whether `expr` converts to `target` in `mode`.
pub fn exists(
    ctx: &CompilationContext<'_>,
    expr: &Expr,
    target: TypeHash,
    mode: ConversionMode,
) -> bool {
    find_conversion(ctx, expr, target, mode).is_ok()
}

/// Whether a value of type `from` converts to `to` in `mode`.
pub fn type_exists(
    ctx: &CompilationContext<'_>,
    from: TypeHash,
    to: TypeHash,
    mode: ConversionMode,
) -> bool {
    find_type_conversion(ctx, from, to, mode).is_ok()
}

/// Convert `expr` to `target`, returning the converted expression.
///
/// An expression that already has the target type is returned unchanged.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn convert(
    ctx: &CompilationContext<'_>,
    expr: Expr,
    target: TypeHash,
    mode: ConversionMode,
) -> Result<Expr, ConversionError> {
    let conversion = find_conversion(ctx, &expr, target, mode)?;
    Ok(conversion.apply(expr))
}

// ============================================================================
// Classification
// ============================================================================

/// What is being converted: an expression, whose constant value and kind
/// matter, or just a value of some type.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Source<'e> {
    Expr(&'e Expr),
    Type(TypeHash),
}

impl Source<'_> {
    pub(crate) fn ty(self) -> TypeHash {
        match self {
            Source::Expr(expr) => expr.ty,
            Source::Type(ty) => ty,
        }
    }
}

/// Whether the user-defined stage may run. Operator pre- and post-conversions
/// are standard conversions only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UserConversions {
    Allowed,
    Excluded,
}

pub(crate) fn no_conversion(from: TypeHash, to: TypeHash) -> ConversionError {
    ConversionError::NoConversion { from, to }
}

pub(crate) fn classify(
    ctx: &CompilationContext<'_>,
    source: Source<'_>,
    target: TypeHash,
    mode: ConversionMode,
    user: UserConversions,
) -> Result<Conversion, ConversionError> {
    let from = source.ty();
    if from == target {
        return Ok(Conversion::identity(target));
    }

    if let Source::Expr(expr) = source {
        if expr.is_method_reference() {
            return callable::classify(ctx, expr, target);
        }
        if expr.is_null_literal() {
            return reference::null_conversion(ctx, target)
                .ok_or_else(|| no_conversion(from, target));
        }
        if let Some(conversion) = constant::classify(ctx, expr, target, mode)?
            && mode.admits(&conversion)
        {
            return Ok(conversion);
        }
    }
    if from == primitives::NULL {
        return reference::null_conversion(ctx, target).ok_or_else(|| no_conversion(from, target));
    }

    if let Some(conversion) = nullable::classify(ctx, source, target, mode, user)?
        && mode.admits(&conversion)
    {
        return Ok(conversion);
    }

    let standard = reference::classify(ctx, from, target)
        .or_else(|| primitive::classify(ctx, from, target))
        .or_else(|| reference::classify_pointer(ctx, from, target));
    if let Some(conversion) = standard
        && mode.admits(&conversion)
    {
        return Ok(conversion);
    }

    let types = ctx.types();
    let both_primitive =
        types.primitive_kind(from).is_some() && types.primitive_kind(target).is_some();
    if user == UserConversions::Allowed
        && !both_primitive
        && let Some(conversion) = user_defined::classify(ctx, source, target, mode)?
    {
        return Ok(conversion);
    }

    Err(no_conversion(from, target))
}
