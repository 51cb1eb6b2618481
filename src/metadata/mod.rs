//! Metadata-side building blocks of symbol materialization.
//!
//! The metadata reader (out of scope for this crate) decodes tables, heaps and signature
//! blobs. What it hands over lands in the modules below:
//!
//! - [`token`] - Metadata tokens identifying table rows
//! - [`identity`] - Assembly identities used for origin tracking
//! - [`signatures`] - Token-resolved type signatures
//! - [`typesystem`] - Type definitions, symbols and the factory building them
//! - [`config`] - Limits and toggles for symbol materialization

/// Configuration of the symbol factory and signature resolver
pub mod config;
/// Assembly identity of type definitions
pub mod identity;
/// Implementation of type signatures
pub mod signatures;
/// Commonly used metadata token type
pub mod token;
/// Implementation of the .NET type-symbol system
pub mod typesystem;
