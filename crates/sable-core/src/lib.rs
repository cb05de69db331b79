//! Core types for the sable conversion and overload-resolution engine.
//!
//! This crate holds everything shared between the type provider and the
//! compiler core:
//!
//! - [`TypeHash`] - deterministic identity for types and functions
//! - [`TypeEntry`] and friends - immutable type descriptions
//! - [`FunctionDef`] / [`Param`] - candidate signatures
//! - [`Expr`] / [`ConstantValue`] - the expression view the core inspects
//! - [`TypeQuery`] - the capability through which the core reads types
//! - [`error`] - the outcome taxonomy

pub mod constant;
pub mod entries;
pub mod error;
pub mod expr;
pub mod query;
pub mod span;
pub mod type_hash;
pub mod types;

pub use constant::{ConstantValue, DecimalValue};
pub use entries::{
    ArrayEntry, CallableSignature, ClassEntry, DelegateEntry, EnumEntry, EnumValue, FunctionDef,
    FunctionKind, InterfaceEntry, Param, PointerEntry, PrimitiveEntry, TypeEntry,
    TypeParamConstraint, TypeParamEntry,
};
pub use error::{ContractViolation, ConversionError, OverloadError, RegistrationError};
pub use expr::{ConversionKind, Expr, ExprKind};
pub use query::TypeQuery;
pub use span::Span;
pub use type_hash::{TypeHash, primitives, well_known};
pub use types::{ParamMode, PrimitiveKind, TypeFlags, Variance};
