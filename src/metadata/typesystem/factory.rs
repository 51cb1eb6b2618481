//! Shape constructors for type symbols decoded from metadata.
//!
//! [`SymbolFactory`] is what the metadata reader calls for every type shape it encounters.
//! Operands are already-resolved symbols; the factory only decides which shape to build
//! and how poison propagates:
//!
//! - An `Unsupported` operand is returned as-is (the same `Arc`), without looking at any
//!   other input. The one exception is the rank-1 array check, which runs first.
//! - Faults the factory detects itself produce a *fresh* `Unsupported`.
//! - Nothing panics and nothing returns `Result`; every outcome is a symbol.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use symscope::metadata::{
//!     identity::{AssemblyIdentity, AssemblyVersion},
//!     typesystem::{ModuleInfo, SymbolFactory, TypeSymbol},
//! };
//!
//! let module = ModuleInfo::new(AssemblyIdentity::new("App", AssemblyVersion::default(), None));
//! let factory = SymbolFactory::new(&module);
//!
//! let poison = factory.make_unsupported(None);
//! assert!(Arc::ptr_eq(&factory.make_sz_array(&poison, vec![]), &poison));
//! assert!(factory.make_array(&poison, 1).is_unsupported());
//! ```

use std::sync::Arc;

use crate::{
    metadata::{
        config::ResolverConfig,
        typesystem::{
            ArrayDimensions, CustomModifier, ModuleContext, NamedType, PrimitiveTypeCode,
            SpecialType, TypeSymbol, TypeSymbolRc,
        },
    },
    Error,
};

/// Builds type symbols on behalf of the metadata reader of one module
pub struct SymbolFactory<'a, C: ModuleContext> {
    pub(crate) context: &'a C,
    pub(crate) config: ResolverConfig,
}

impl<'a, C: ModuleContext> SymbolFactory<'a, C> {
    /// Create a new factory with the default configuration
    ///
    /// ## Arguments
    /// * `context` - The module whose metadata is being materialized
    pub fn new(context: &'a C) -> Self {
        SymbolFactory {
            context,
            config: ResolverConfig::default(),
        }
    }

    /// Replace the configuration
    ///
    /// ## Arguments
    /// * `config` - The configuration to use
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The module context
    #[must_use]
    pub fn context(&self) -> &'a C {
        self.context
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Build a multi-dimensional array without declared sizes or bounds
    ///
    /// A rank of 1 is always rejected with a fresh `Unsupported`, even for a poisoned
    /// element: the encoding cannot tell a declared rank-1 multi-dimensional array from
    /// an ordinary single-dimension array.
    ///
    /// ## Arguments
    /// * `element` - The element type
    /// * `rank`    - Number of dimensions
    #[must_use]
    pub fn make_array(&self, element: &TypeSymbolRc, rank: u32) -> TypeSymbolRc {
        self.make_array_with_dimensions(element, rank, Vec::new(), Vec::new())
    }

    /// Build a multi-dimensional array with the sizes and lower bounds a signature declares
    ///
    /// ## Arguments
    /// * `element`    - The element type
    /// * `rank`       - Number of dimensions
    /// * `dimensions` - Declared sizes / lower bounds, in dimension order
    /// * `modifiers`  - Custom modifiers of the array occurrence
    #[must_use]
    pub fn make_array_with_dimensions(
        &self,
        element: &TypeSymbolRc,
        rank: u32,
        dimensions: Vec<ArrayDimensions>,
        modifiers: Vec<CustomModifier>,
    ) -> TypeSymbolRc {
        if rank == 1 {
            log::trace!("Rejecting rank-1 multi-dimensional array of {}", element);
            return self.make_unsupported(None);
        }

        if element.is_unsupported() {
            return element.clone();
        }

        if rank == 0 {
            return self.make_unsupported(Some(malformed_error!(
                "Array of {} declares rank 0",
                element
            )));
        }

        Arc::new(TypeSymbol::Array {
            element: element.clone(),
            rank,
            dimensions,
            modifiers,
        })
    }

    /// Build a single-dimension, zero-based array
    ///
    /// ## Arguments
    /// * `element`   - The element type
    /// * `modifiers` - Custom modifiers of the element occurrence
    #[must_use]
    pub fn make_sz_array(
        &self,
        element: &TypeSymbolRc,
        modifiers: Vec<CustomModifier>,
    ) -> TypeSymbolRc {
        if element.is_unsupported() {
            return element.clone();
        }

        Arc::new(TypeSymbol::SzArray {
            element: element.clone(),
            modifiers,
        })
    }

    /// Build an unmanaged pointer
    ///
    /// ## Arguments
    /// * `pointee`   - The pointed-to type
    /// * `modifiers` - Custom modifiers of the pointee occurrence
    #[must_use]
    pub fn make_pointer(
        &self,
        pointee: &TypeSymbolRc,
        modifiers: Vec<CustomModifier>,
    ) -> TypeSymbolRc {
        if pointee.is_unsupported() {
            return pointee.clone();
        }

        Arc::new(TypeSymbol::Pointer {
            pointee: pointee.clone(),
            modifiers,
        })
    }

    /// Build the marker for a by-reference return type. By-ref returns are never
    /// modeled as ordinary types, so this applies to every operand, poisoned or not.
    ///
    /// ## Arguments
    /// * `referenced` - The referenced type
    #[must_use]
    pub fn make_by_ref_return(&self, referenced: &TypeSymbolRc) -> TypeSymbolRc {
        Arc::new(TypeSymbol::ByRefReturnError {
            referenced: referenced.clone(),
        })
    }

    /// The declared underlying type of an enum; `None` if `enum_type` declares none
    #[must_use]
    pub fn enum_underlying_type(&self, enum_type: &TypeSymbolRc) -> Option<TypeSymbolRc> {
        enum_type.as_named()?.definition.enum_underlying_type()
    }

    /// The primitive type code of `symbol`
    #[must_use]
    pub fn primitive_code(&self, symbol: &TypeSymbolRc) -> PrimitiveTypeCode {
        match symbol.as_ref() {
            TypeSymbol::Pointer { .. } => PrimitiveTypeCode::Pointer,
            TypeSymbol::ByRefReturnError { .. } => PrimitiveTypeCode::ByRef,
            _ => symbol
                .special_type()
                .map_or(PrimitiveTypeCode::NotPrimitive, |special| {
                    special.primitive_code()
                }),
        }
    }

    /// Returns true if `symbol` is `System.Runtime.CompilerServices.IsVolatile`
    #[must_use]
    pub fn is_volatile_modifier_type(&self, symbol: &TypeSymbolRc) -> bool {
        symbol.special_type() == Some(SpecialType::IsVolatile)
    }

    /// Build a fresh poison sentinel
    ///
    /// ## Arguments
    /// * `cause` - The decode fault to carry for diagnostics, if any
    #[must_use]
    pub fn make_unsupported(&self, cause: Option<Error>) -> TypeSymbolRc {
        Arc::new(TypeSymbol::Unsupported {
            cause: cause.map(Arc::new),
        })
    }

    /// The unbound form of a constructed generic type; any other symbol, including
    /// poison and already-unbound types, is returned unchanged
    ///
    /// ## Arguments
    /// * `symbol` - The symbol to unbind
    #[must_use]
    pub fn make_unbound_if_generic(&self, symbol: &TypeSymbolRc) -> TypeSymbolRc {
        let Some(named) = symbol.as_named() else {
            return symbol.clone();
        };

        if !named.is_constructed() || !self.is_generic(named) {
            return symbol.clone();
        }

        Arc::new(TypeSymbol::Named(NamedType::new(named.definition.clone())))
    }

    /// A type is generic if it or any containing type declares type parameters
    fn is_generic(&self, named: &NamedType) -> bool {
        named
            .definition
            .all_type_parameters(self.config.max_nesting_depth)
            .is_ok_and(|params| !params.is_empty())
    }
}
