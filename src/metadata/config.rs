//! Resolver configuration
//!
//! Knobs for the symbol factory and the signature resolver. The defaults model what a
//! compiler consuming arbitrary references needs; the presets trade checks for speed or
//! tighten limits for untrusted input.

/// Default bound on the containing-type chain of a nested class
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Configuration for type-symbol materialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Enable the embedded-interop legality check of generic instantiations.
    /// When false, no instantiation is ever marked illegal, regardless of the module.
    pub enable_interop_validation: bool,

    /// Maximum depth of a signature tree the resolver follows (default: 100)
    pub max_recursion_depth: usize,

    /// Maximum number of definitions in a nesting chain, the nested class itself
    /// included (default: 64)
    pub max_nesting_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            enable_interop_validation: true,
            max_recursion_depth: 100,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ResolverConfig {
    /// Creates a minimal configuration for maximum performance
    ///
    /// Skips the embedded-interop legality check; recursion limits stay in place.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            enable_interop_validation: false,
            ..Self::default()
        }
    }

    /// Creates a configuration for untrusted input
    ///
    /// All checks enabled, with tighter bounds on signature depth and nesting.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            enable_interop_validation: true,
            max_recursion_depth: 50,
            max_nesting_depth: 16,
        }
    }
}
