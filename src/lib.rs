//! sable: the conversion and overload-resolution core of a statically typed
//! front end.
//!
//! Given typed expressions and candidate signatures, sable decides which
//! implicit and explicit conversions exist between types, builds the
//! expression performing a conversion, infers generic method arguments and
//! selects the single best overload for a call.
//!
//! # Example
//!
//! ```
//! use sable::prelude::*;
//!
//! let mut registry = TypeRegistry::with_platform_types();
//! let mut overload = |ty| {
//!     let params = vec![Param::new("x", ty)];
//!     registry
//!         .register_function(FunctionDef::new("M", params, primitives::VOID))
//!         .unwrap()
//! };
//! let by_int = overload(primitives::INT32);
//! let by_long = overload(primitives::INT64);
//!
//! let ctx = CompilationContext::new(&registry);
//! let result = resolve_overload(&ctx, &[by_long, by_int], &[Argument::new(Expr::int_literal(5))]);
//! assert_eq!(result.func_hash(), Some(by_int));
//! ```
//!
//! # Crates
//!
//! - [`sable_core`]: type identity, entries, expressions, errors and the
//!   [`TypeQuery`](sable_core::TypeQuery) capability
//! - [`sable_registry`]: a thread-safe [`TypeRegistry`](sable_registry::TypeRegistry)
//!   implementing the capability
//! - [`sable_compiler`]: conversions, generic inference and overload resolution

pub use sable_compiler::{
    ApplicableForm, Argument, Bindings, CompilationContext, CompilerOptions, Conversion,
    ConversionMode, ConversionRank, ConversionStep, OverloadMatch, OverloadResult, ResolveMode,
    Specificity, compare_specificity, convert, exists, find_conversion, find_type_conversion,
    resolve_method_reference, resolve_overload, resolve_overload_with, substitute, type_exists,
    unify,
};
pub use sable_core::{
    ConstantValue, ContractViolation, ConversionError, ConversionKind, Expr, ExprKind,
    FunctionDef, OverloadError, Param, ParamMode, RegistrationError, TypeHash, TypeQuery,
};
pub use sable_registry::TypeRegistry;

/// Everything needed to set up types and resolve conversions and calls.
pub mod prelude {
    pub use sable_compiler::{
        Argument, CompilationContext, CompilerOptions, ConversionMode, OverloadResult,
        ResolveMode, convert, exists, find_conversion, resolve_overload, resolve_overload_with,
        type_exists,
    };
    pub use sable_core::{
        ClassEntry, ConstantValue, ConversionError, ConversionKind, DelegateEntry, EnumEntry,
        Expr, ExprKind, FunctionDef, InterfaceEntry, Param, ParamMode, PrimitiveKind, TypeHash,
        TypeParamEntry, TypeQuery, Variance, primitives, well_known,
    };
    pub use sable_registry::TypeRegistry;
}
