//! Typed expression trees consumed and produced by the conversion core.
//!
//! Only the expression kinds the core inspects are modelled: compile-time
//! constants, method groups and addresses, and the conversion wrappers the
//! core itself builds. Everything else is an opaque [`ExprKind::Value`] of a
//! known type.

use crate::{ConstantValue, PrimitiveKind, Span, TypeHash, primitives};

/// The kind of conversion a [`ExprKind::Convert`] node performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    Identity,
    /// Widening numeric conversion from the implicit half of the lattice.
    ImplicitNumeric,
    /// Narrowing or cross-signedness numeric conversion.
    ExplicitNumeric,
    /// Integral constant re-typed to a narrower integral type.
    ImplicitConstant,
    /// `null` to a reference, nullable or pointer type.
    NullLiteral,
    /// Literal `0` to an enum.
    ZeroToEnum,
    /// Enum to enum, enum to number or number to enum.
    ExplicitEnumeration,
    Boxing,
    Unboxing,
    /// Derived to base, class to interface, covariant instantiation.
    ImplicitReference,
    /// Base to derived and other runtime-checked reference casts.
    ExplicitReference,
    /// `T` to `Nullable<T>` ("has value" construction).
    NullableWrap,
    /// `Nullable<T>` to `T`; faults at run time when empty.
    NullableUnwrap,
    /// Any pointer to `void*`.
    ImplicitPointer,
    /// Pointer to pointer, pointer to integer and back.
    ExplicitPointer,
}

impl ConversionKind {
    /// Whether this kind only exists in explicit (cast) contexts.
    pub fn is_explicit_only(self) -> bool {
        matches!(
            self,
            ConversionKind::ExplicitNumeric
                | ConversionKind::ExplicitEnumeration
                | ConversionKind::Unboxing
                | ConversionKind::ExplicitReference
                | ConversionKind::NullableUnwrap
                | ConversionKind::ExplicitPointer
        )
    }
}

/// A typed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    /// Statically known type. Method groups have [`TypeHash::EMPTY`].
    pub ty: TypeHash,
    pub span: Span,
}

/// Expression variants the core distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A compile-time constant.
    Constant {
        value: ConstantValue,
        /// Untyped numeric literal that may be re-typed to any type that can
        /// represent its value.
        polymorphic: bool,
    },
    /// Any expression the core does not inspect.
    Value,
    /// An unresolved set of same-named overloads.
    MethodGroup {
        candidates: Vec<TypeHash>,
        receiver: Option<Box<Expr>>,
    },
    /// The address of a single method.
    MethodAddress { method: TypeHash },
    /// A standard conversion.
    Convert {
        operand: Box<Expr>,
        kind: ConversionKind,
    },
    /// A call to a user-declared conversion operator.
    UserConversion {
        operator: TypeHash,
        operand: Box<Expr>,
    },
    /// Nullable-to-nullable conversion. `conversion` is applied to a
    /// [`ExprKind::LiftedValue`] placeholder only when `operand` has a value.
    Lifted {
        operand: Box<Expr>,
        conversion: Box<Expr>,
    },
    /// The unwrapped payload inside a [`ExprKind::Lifted`] conversion.
    LiftedValue,
    /// A callable instance bound to a method.
    NewDelegate {
        method: TypeHash,
        receiver: Option<Box<Expr>>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, ty: TypeHash) -> Self {
        Self {
            kind,
            ty,
            span: Span::default(),
        }
    }

    /// An opaque expression of type `ty`.
    pub fn value(ty: TypeHash) -> Self {
        Self::new(ExprKind::Value, ty)
    }

    /// A typed constant.
    pub fn constant(value: ConstantValue, ty: TypeHash) -> Self {
        Self::new(
            ExprKind::Constant {
                value,
                polymorphic: false,
            },
            ty,
        )
    }

    /// An untyped integer literal.
    ///
    /// The natural type is the first of `int`, `uint`, `int64`, `uint64`
    /// that holds the value.
    pub fn int_literal(value: i128) -> Self {
        let natural = [
            PrimitiveKind::Int32,
            PrimitiveKind::Uint32,
            PrimitiveKind::Int64,
            PrimitiveKind::Uint64,
        ]
        .into_iter()
        .find(|k| ConstantValue::Integer(value).fits_integral(*k))
        .unwrap_or(PrimitiveKind::Uint64);
        Self::new(
            ExprKind::Constant {
                value: ConstantValue::Integer(value),
                polymorphic: true,
            },
            natural.type_hash(),
        )
    }

    pub fn int32(value: i32) -> Self {
        Self::constant(ConstantValue::Integer(value.into()), primitives::INT32)
    }

    pub fn double(value: f64) -> Self {
        Self::constant(ConstantValue::float(value), primitives::DOUBLE)
    }

    pub fn bool(value: bool) -> Self {
        Self::constant(ConstantValue::Bool(value), primitives::BOOL)
    }

    /// The `null` literal.
    pub fn null() -> Self {
        Self::constant(ConstantValue::Null, primitives::NULL)
    }

    pub fn method_group(candidates: Vec<TypeHash>) -> Self {
        Self::new(
            ExprKind::MethodGroup {
                candidates,
                receiver: None,
            },
            TypeHash::EMPTY,
        )
    }

    pub fn method_address(method: TypeHash) -> Self {
        Self::new(ExprKind::MethodAddress { method }, TypeHash::EMPTY)
    }

    /// Wrap `operand` in a standard conversion to `ty`.
    pub fn convert(operand: Expr, kind: ConversionKind, ty: TypeHash) -> Self {
        let span = operand.span;
        Self::new(
            ExprKind::Convert {
                operand: Box::new(operand),
                kind,
            },
            ty,
        )
        .with_span(span)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    // === Queries ===

    pub fn constant_value(&self) -> Option<&ConstantValue> {
        match &self.kind {
            ExprKind::Constant { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.kind, ExprKind::Constant { .. })
    }

    pub fn is_numeric_constant(&self) -> bool {
        self.constant_value().is_some_and(ConstantValue::is_numeric)
    }

    /// Untyped numeric literal.
    pub fn is_polymorphic_constant(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Constant {
                polymorphic: true,
                ..
            }
        )
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Constant {
                value: ConstantValue::Null,
                ..
            }
        )
    }

    /// Integral constant zero.
    pub fn is_zero_constant(&self) -> bool {
        self.constant_value().is_some_and(ConstantValue::is_zero)
    }

    /// Method group or method address awaiting a callable target.
    pub fn is_method_reference(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::MethodGroup { .. } | ExprKind::MethodAddress { .. }
        )
    }
}
