//! Error types for the conversion core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ConversionError    - recoverable; no conversion, ambiguity, constant range
//! OverloadError      - recoverable; no applicable candidate or ambiguity
//! ContractViolation  - a capability queried outside its precondition
//! RegistrationError  - type provider set-up failures
//! ```
//!
//! Recoverable outcomes are ordinary `Err` values so resolution can be tried
//! speculatively. None of these types formats user-facing diagnostics beyond
//! their `Display` text; callers attach their own messages and spans.

use thiserror::Error;

use crate::{ConstantValue, TypeHash};

// ============================================================================
// Conversion Errors
// ============================================================================

/// Why a conversion could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// No implicit or explicit path exists.
    #[error("no conversion from {from} to {to}")]
    NoConversion {
        /// Source type.
        from: TypeHash,
        /// Requested target type.
        to: TypeHash,
    },

    /// Several user-declared operators are equally good.
    #[error("ambiguous conversion from {from} to {to}")]
    AmbiguousConversion {
        /// Source type.
        from: TypeHash,
        /// Requested target type.
        to: TypeHash,
    },

    /// A compile-time constant is not representable in the target type.
    #[error("constant {value} is out of range for {target}")]
    OutOfRangeConstant {
        /// The literal value, for diagnostics.
        value: ConstantValue,
        /// Requested target type.
        target: TypeHash,
    },

    /// The conversion needed a capability query that violated its contract.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

impl ConversionError {
    /// Whether this is the plain "no path" outcome.
    pub fn is_no_conversion(&self) -> bool {
        matches!(self, ConversionError::NoConversion { .. })
    }
}

// ============================================================================
// Overload Errors
// ============================================================================

/// Failed overload resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverloadError {
    /// No candidate is applicable.
    #[error("no applicable overload")]
    NoMatch,

    /// Several candidates are applicable and none is better than the rest.
    #[error("ambiguous call between {} candidates", candidates.len())]
    Ambiguous {
        /// The tied candidates, best first.
        candidates: Vec<TypeHash>,
    },
}

// ============================================================================
// Contract Violations
// ============================================================================

/// A capability was used outside its documented precondition.
///
/// This indicates a defect in the caller, not in the program being compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A callable-only query on a non-callable type.
    #[error("type {ty} is not callable")]
    NotCallable { ty: TypeHash },

    /// A type the provider does not know.
    #[error("unknown type {ty}")]
    UnknownType { ty: TypeHash },

    /// A function the provider does not know.
    #[error("unknown function {func}")]
    UnknownFunction { func: TypeHash },
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while populating a type provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A type with this hash already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A function with this hash already exists.
    #[error("duplicate function: {0}")]
    DuplicateFunction(String),

    /// A referenced generic definition was not found.
    #[error("unknown generic definition: {0}")]
    UnknownDefinition(TypeHash),

    /// The type is not a generic definition.
    #[error("type {0} is not generic")]
    NotGeneric(TypeHash),

    /// A conversion operator whose owner is missing or not a class.
    #[error("conversion operator {0} has no owning class")]
    OrphanOperator(TypeHash),

    /// Wrong number of generic arguments.
    #[error("generic definition {definition} expects {expected} arguments, got {got}")]
    GenericArgCountMismatch {
        /// The generic definition.
        definition: TypeHash,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        got: usize,
    },
}
