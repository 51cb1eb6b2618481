// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # symscope
//!
//! Materializes .NET metadata type descriptors into compiler type symbols.
//!
//! A compiler that consumes compiled references sees types as descriptors in metadata:
//! arrays, pointers, by-reference returns, generic instantiations, enum underlying types.
//! `symscope` turns those already token-resolved descriptors into the symbol representation
//! binding works with, and enforces the rules the binary format needs on the way:
//!
//! - **Total operations** - Nothing panics or returns an error for bad input. Metadata that
//!   cannot be modeled becomes an `Unsupported` symbol, optionally carrying the decode fault.
//! - **Poison propagation** - Every shape constructor hands a poisoned operand straight back,
//!   so a single fault surfaces once, at the point of use.
//! - **Embedded interop legality** - Generic instantiations closed over embedded-interop
//!   ("local") types are marked illegal, with the constructed type kept underneath.
//! - **Thread safety** - Symbols are immutable and shared through `Arc`; the module context is
//!   read-only once loaded, so any number of threads can materialize symbols concurrently.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use symscope::prelude::*;
//!
//! let corlib = AssemblyIdentity::parse("mscorlib, Version=4.0.0.0, Culture=neutral")?;
//! let module = ModuleInfo::new(corlib.clone());
//! module.register_type(Arc::new(
//!     TypeDefinition::new(Token::new(0x0200_0001), "System", "Int32", TypeAttributes::SEALED, corlib)
//!         .with_special(SpecialType::Int32),
//! ))?;
//!
//! let factory = SymbolFactory::new(&module);
//! let int32 = module.special_type(SpecialType::Int32);
//!
//! assert_eq!(factory.make_sz_array(&int32, vec![]).to_string(), "System.Int32[]");
//! assert_eq!(factory.make_array(&int32, 2).to_string(), "System.Int32[,]");
//!
//! // A declared rank-1 multi-dimensional array cannot be told apart from `int[]`
//! assert!(factory.make_array(&int32, 1).is_unsupported());
//! # Ok::<(), symscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`metadata::typesystem`] - Symbols, definitions, the symbol factory and the resolver
//! - [`metadata::signatures`] - Token-resolved type signatures handed over by the reader
//! - [`metadata::identity`] / [`metadata::token`] - Assembly identities and metadata tokens
//! - [`ResolverConfig`] - Limits and toggles
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! Decisions that turn input into marker symbols (rank-1 rejection, arity mismatch, illegal
//! interop instantiation, unresolvable tokens) are traced through the [`log`] facade at
//! `debug`/`trace` level. Nothing is reported above `debug`: surfacing these states to a
//! user is the job of the caller's diagnostics.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use symscope::prelude::*;
///
/// let identity = AssemblyIdentity::new("App", AssemblyVersion::new(1, 0, 0, 0), None);
/// let module = ModuleInfo::new(identity);
/// let factory = SymbolFactory::new(&module);
/// assert!(factory.make_unsupported(None).is_unsupported());
/// ```
pub mod prelude;

/// Type descriptors, definitions and symbol materialization based on ECMA-335
///
/// # Key Components
///
/// ## Type System
/// - [`metadata::typesystem`] - Symbols, definitions and the factory building them
/// - [`metadata::signatures`] - Token-resolved type signatures
/// - [`metadata::token`] - Metadata tokens for cross-references
///
/// ## Identity and Configuration
/// - [`metadata::identity`] - Assembly identities for origin tracking
/// - [`metadata::config`] - Resolver configuration
pub mod metadata;

/// `symscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// Only setup APIs (identity parsing, type registration) return it; symbol construction is total.
///
/// # Examples
///
/// ```rust
/// use symscope::{metadata::identity::AssemblyIdentity, Result};
///
/// fn parse_reference(name: &str) -> Result<AssemblyIdentity> {
///     AssemblyIdentity::parse(name)
/// }
/// # assert!(parse_reference("System.Runtime").is_ok());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `symscope` Error type
///
/// Describes decode and setup faults. During symbol construction an `Error` never
/// propagates; it travels as the cause of an `Unsupported` symbol instead.
///
/// # Examples
///
/// ```rust
/// use symscope::{Error, metadata::identity::AssemblyIdentity};
///
/// match AssemblyIdentity::parse("Broken, Version=1.2.3.4.5") {
///     Ok(identity) => println!("Parsed {}", identity),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Configuration for type-symbol materialization
///
/// See [`metadata::config::ResolverConfig`] for the available presets.
pub use metadata::config::ResolverConfig;
