//! # symscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the symscope library. Import this module to get quick access to the essential
//! types for materializing type symbols.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all symscope operations
pub use crate::Error;

/// The result type used throughout symscope
pub use crate::Result;

/// Configuration for type-symbol materialization
pub use crate::ResolverConfig;

// ================================================================================================
// Tokens and Identity
// ================================================================================================

/// Metadata token referencing a table row
pub use crate::metadata::token::Token;

/// Assembly identity and version
pub use crate::metadata::identity::{AssemblyIdentity, AssemblyVersion};

// ================================================================================================
// Type System
// ================================================================================================

/// Symbols and their shared references
pub use crate::metadata::typesystem::{NamedType, TypeSymbol, TypeSymbolRc};

/// Nominal type definitions and generic parameters
pub use crate::metadata::typesystem::{
    GenericParameter, GenericParameterRc, TypeAttributes, TypeDefinition, TypeDefinitionRc,
};

/// Array dimensions and custom modifiers
pub use crate::metadata::typesystem::{ArrayDimensions, CustomModifier};

/// Special types and primitive codes
pub use crate::metadata::typesystem::{PrimitiveTypeCode, SpecialType};

/// Module context and its concrete implementation
pub use crate::metadata::typesystem::{DefinitionLookup, ModuleContext, ModuleInfo};

/// Symbol construction and signature resolution
pub use crate::metadata::typesystem::{SymbolFactory, TypeMap, TypeResolver};

// ================================================================================================
// Signatures
// ================================================================================================

/// Token-resolved type signatures
pub use crate::metadata::signatures::{
    SignatureArray, SignatureModifier, SignaturePointer, SignatureSzArray, TypeSignature,
};
