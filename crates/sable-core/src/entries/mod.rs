//! Type and function entries.
//!
//! This module provides the entry types a type provider stores and hands out
//! through the [`TypeQuery`](crate::TypeQuery) capability:
//!
//! - [`TypeEntry`] - Unified enum wrapping all type entries
//! - [`ClassEntry`] - Classes and structs (including generic definitions)
//! - [`EnumEntry`] - Enumeration types
//! - [`InterfaceEntry`] - Interface types
//! - [`DelegateEntry`] - Callable types
//! - [`PrimitiveEntry`] - Built-in primitive types
//! - [`TypeParamEntry`] - Generic type parameters
//! - [`ArrayEntry`], [`PointerEntry`] - Structural types
//! - [`FunctionDef`] - Function signatures, including conversion operators

mod class;
mod constructed;
mod delegate;
mod enum_entry;
mod function;
mod interface;
mod primitive;
mod type_entry;
mod type_param;

pub use class::ClassEntry;
pub use constructed::{ArrayEntry, PointerEntry};
pub use delegate::{CallableSignature, DelegateEntry};
pub use enum_entry::{EnumEntry, EnumValue};
pub use function::{FunctionDef, FunctionKind, Param};
pub use interface::InterfaceEntry;
pub use primitive::PrimitiveEntry;
pub use type_entry::TypeEntry;
pub use type_param::{TypeParamConstraint, TypeParamEntry};
