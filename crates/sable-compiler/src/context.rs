//! CompilationContext - the per-compilation view of types, options and memo
//! tables.

use std::fmt;

use sable_core::{TypeHash, TypeQuery};

use crate::cache::MemoCache;
use crate::conversion::ConversionMode;
use crate::conversion::user_defined::OperatorLookup;
use crate::options::CompilerOptions;

/// Key of a memoised user-defined operator search.
pub(crate) type OperatorKey = (TypeHash, TypeHash, ConversionMode);

/// Everything a conversion or overload query needs.
///
/// The context borrows its type provider and owns nothing but options and
/// compute-once memo tables, so it can be shared across threads. Independent
/// compilations use independent contexts.
pub struct CompilationContext<'a> {
    types: &'a dyn TypeQuery,
    options: CompilerOptions,
    operators: MemoCache<OperatorKey, OperatorLookup>,
}

impl<'a> CompilationContext<'a> {
    /// Create a context with default options.
    pub fn new(types: &'a dyn TypeQuery) -> Self {
        Self::with_options(types, CompilerOptions::default())
    }

    pub fn with_options(types: &'a dyn TypeQuery, options: CompilerOptions) -> Self {
        Self {
            types,
            options,
            operators: MemoCache::new(),
        }
    }

    /// The type capability.
    #[inline]
    pub fn types(&self) -> &'a dyn TypeQuery {
        self.types
    }

    #[inline]
    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub(crate) fn operator_cache(&self) -> &MemoCache<OperatorKey, OperatorLookup> {
        &self.operators
    }

    /// Number of memoised user-defined operator searches.
    pub fn cached_operator_lookups(&self) -> usize {
        self.operators.len()
    }
}

impl fmt::Debug for CompilationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilationContext")
            .field("options", &self.options)
            .field("cached_operator_lookups", &self.operators.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_registry::TypeRegistry;

    #[test]
    fn context_is_shareable() {
        fn assert_sync<T: Sync>(_: &T) {}
        let registry = TypeRegistry::with_platform_types();
        let ctx = CompilationContext::new(&registry);
        assert_sync(&ctx);
        assert_eq!(ctx.cached_operator_lookups(), 0);
        assert!(ctx.options().array_covariance);
    }

    #[test]
    fn custom_options() {
        let registry = TypeRegistry::with_platform_types();
        let ctx = CompilationContext::with_options(
            &registry,
            CompilerOptions::new().with_unsafe_context(true),
        );
        assert!(ctx.options().unsafe_context);
    }
}
