//! .NET type-symbol materialization.
//!
//! This module turns type descriptors read from metadata into the symbols a compiler binds
//! against. The metadata reader resolves tokens and hands already-resolved operands to a
//! [`SymbolFactory`], which builds arrays, pointers, by-ref return markers and generic
//! instantiations while enforcing the binary-format legality rules.
//!
//! # Key Components
//!
//! - [`TypeSymbol`]: The closed set of symbol shapes, including the `Unsupported` poison
//!   sentinel and the `IllegalInteropInstantiation` marker
//! - [`TypeDefinition`]: Nominal types backing `TypeSymbol::Named`
//! - [`SymbolFactory`]: Shape constructors and the generic instantiation engine
//! - [`ModuleContext`] / [`ModuleInfo`]: What the factory needs to know about the module
//! - [`TypeResolver`]: Walks a token-resolved signature through the factory
//! - [`TypeMap`]: Positional substitution of formal type parameters
//!
//! # Failure Model
//!
//! No operation here fails. Metadata that cannot be modeled becomes
//! [`TypeSymbol::Unsupported`], optionally carrying the [`crate::Error`] that caused it, and
//! every shape constructor hands a poisoned operand straight back. Callers detect faults at
//! the point of use with [`TypeSymbol::is_unsupported`] and
//! [`TypeSymbol::is_illegal_interop`].
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use symscope::prelude::*;
//!
//! let corlib = AssemblyIdentity::new("mscorlib", AssemblyVersion::new(4, 0, 0, 0), None);
//! let module = ModuleInfo::new(corlib.clone());
//!
//! let int32 = TypeDefinition::new(
//!     Token::new(0x0200_0001), "System", "Int32", TypeAttributes::SEALED, corlib.clone(),
//! )
//! .with_special(SpecialType::Int32);
//! module.register_type(Arc::new(int32))?;
//!
//! let list = Arc::new(
//!     TypeDefinition::new(
//!         Token::new(0x0200_0002), "System.Collections.Generic", "List`1",
//!         TypeAttributes::empty(), corlib,
//!     )
//!     .with_generic_param(Token::new(0x2A00_0001), "T"),
//! );
//!
//! let factory = SymbolFactory::new(&module);
//! let list_of_int = factory.instantiate(
//!     &TypeSymbol::named(&list),
//!     vec![module.special_type(SpecialType::Int32)],
//!     &[false],
//! );
//! assert_eq!(list_of_int.to_string(), "System.Collections.Generic.List`1<System.Int32>");
//!
//! let unbound = factory.make_unbound_if_generic(&list_of_int);
//! assert_eq!(unbound.to_string(), "System.Collections.Generic.List`1<>");
//! # Ok::<(), symscope::Error>(())
//! ```

mod base;
mod context;
mod definition;
mod factory;
mod instantiate;
mod map;
mod primitives;
mod resolver;
mod symbol;

pub use base::{ArrayDimensions, CustomModifier, TypeAttributes};
pub use context::{DefinitionLookup, ModuleContext, ModuleInfo};
pub use definition::{GenericParameter, GenericParameterRc, TypeDefinition, TypeDefinitionRc};
pub use factory::SymbolFactory;
pub use map::TypeMap;
pub use primitives::{PrimitiveTypeCode, SpecialType};
pub use resolver::TypeResolver;
pub use symbol::{NamedType, TypeSymbol, TypeSymbolRc};
