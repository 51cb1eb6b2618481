//! Token-resolved type signatures.
//!
//! ECMA-335 encodes types inside signature blobs as a tree of element types: primitives,
//! `TypeDefOrRef` tokens, generic parameters by index, and constructors such as `SZARRAY`,
//! `PTR`, `ARRAY` and `GENERICINST`. The byte-level blob decoding belongs to the metadata
//! reader; this module holds the decoded tree in the shape the reader produces, ready to be
//! materialized into symbols by [`crate::metadata::typesystem::TypeResolver`].
//!
//! # Examples
//!
//! ```rust
//! use symscope::metadata::{
//!     signatures::{SignatureSzArray, TypeSignature},
//!     token::Token,
//! };
//!
//! // List<int>[]
//! let list_of_int = TypeSignature::GenericInst(
//!     Box::new(TypeSignature::Class(Token::new(0x0100_0012))),
//!     vec![TypeSignature::I4],
//! );
//! let array = TypeSignature::SzArray(SignatureSzArray {
//!     modifiers: vec![],
//!     base: Box::new(list_of_int),
//! });
//! # let _ = array;
//! ```
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II, Section 23.2 - Blobs and Signatures

mod types;

pub use types::*;
