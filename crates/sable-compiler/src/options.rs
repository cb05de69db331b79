//! Compiler options.

/// Switches that widen or narrow the set of conversions the core considers.
///
/// Options never affect determinism: the same options, inputs and candidate
/// order always produce the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Allow pointer conversions (`null` to pointer, pointer to `void*`,
    /// pointer casts). Off outside unsafe code.
    pub unsafe_context: bool,
    /// Allow covariant conversions between arrays of reference types.
    pub array_covariance: bool,
    /// Allow lifted conversions between nullable types.
    pub lifted_conversions: bool,
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unsafe_context(mut self, enabled: bool) -> Self {
        self.unsafe_context = enabled;
        self
    }

    pub fn with_array_covariance(mut self, enabled: bool) -> Self {
        self.array_covariance = enabled;
        self
    }

    pub fn with_lifted_conversions(mut self, enabled: bool) -> Self {
        self.lifted_conversions = enabled;
        self
    }
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            unsafe_context: false,
            array_covariance: true,
            lifted_conversions: true,
        }
    }
}
