//! Sable conversion and overload-resolution core.
//!
//! The semantic core of the front end: given typed expressions and candidate
//! signatures, it decides which conversions exist between types, builds the
//! expression that performs a conversion, and picks the single best overload
//! for a call site.
//!
//! ## Modules
//!
//! - [`context`]: per-compilation context holding the type capability,
//!   options and memo tables
//! - [`conversion`]: implicit/explicit conversion classification and
//!   materialisation, including user-declared operators
//! - [`generic`]: type-argument inference and substitution for generic methods
//! - [`overload`]: eligibility, betterness and tie-breaking
//! - [`options`]: compiler options
//!
//! Every operation is a synchronous, pure query over the
//! [`TypeQuery`](sable_core::TypeQuery) capability. The only mutable state is
//! the compute-once memo tables owned by a [`CompilationContext`].

mod cache;
pub mod context;
pub mod conversion;
pub mod generic;
pub mod options;
pub mod overload;

pub use context::CompilationContext;
pub use conversion::{
    Conversion, ConversionMode, ConversionRank, ConversionStep, convert, exists,
    find_conversion, find_type_conversion, resolve_method_reference, type_exists,
};
pub use generic::{Bindings, substitute, unify};
pub use options::CompilerOptions;
pub use overload::{
    ApplicableForm, Argument, OverloadMatch, OverloadResult, ResolveMode, resolve_overload,
    resolve_overload_with,
};
pub use overload::specificity::{Specificity, compare_specificity};

#[cfg(test)]
pub(crate) mod test_support;
