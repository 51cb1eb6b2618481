use crate::{
    metadata::{token::Token, typesystem::ArrayDimensions},
    Error,
};

/// A type signature whose `TypeDefOrRef` tokens are known but not yet resolved to symbols.
///
/// This is the form in which the metadata reader hands a decoded `TypeSpec` or member
/// signature to [`crate::metadata::typesystem::TypeResolver`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSignature {
    /// void
    Void,
    /// bool
    Boolean,
    /// char
    Char,
    /// signed 8bit integer
    I1,
    /// unsigned 8bit integer
    U1,
    /// signed 16bit integer
    I2,
    /// unsigned 16bit integer
    U2,
    /// signed 32bit integer
    I4,
    /// unsigned 32bit integer
    U4,
    /// signed 64bit integer
    I8,
    /// unsigned 64bit integer
    U8,
    /// 32bit floating-point
    R4,
    /// 64bit floating-point
    R8,
    /// System.String
    String,
    /// System.Object
    Object,
    /// signed integer, sized to executing platform
    I,
    /// unsigned integer, sized to executing platform
    U,
    /// A pointer to a type
    Ptr(SignaturePointer),
    /// Type by reference
    ByRef(Box<TypeSignature>),
    /// CIL value-type
    // TypeDefOrRefOrSpecEncoded
    ValueType(Token),
    /// CIL Class
    // TypeDefOrRefOrSpecEncoded
    Class(Token),
    /// Generic type parameter
    // Index into the flattened parameter list of the generic context
    GenericParamType(u32),
    /// Array
    Array(SignatureArray),
    /// Generic type and its flattened arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Single dimension array
    SzArray(SignatureSzArray),
    /// The reader failed to decode this part of the signature
    Invalid(Error),
}

/// A multi-dimensional array
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureArray {
    /// The type in the array
    pub base: Box<TypeSignature>,
    /// The number of dimensions
    pub rank: u32,
    /// The dimensions (can be less than 'rank', are in order from 0..count)
    pub dimensions: Vec<ArrayDimensions>,
}

/// A pointer to a 'flat' Array
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureSzArray {
    /// Custom modifiers of the element
    pub modifiers: Vec<SignatureModifier>,
    /// The type in the array
    pub base: Box<TypeSignature>,
}

/// A pointer to a type
#[derive(Debug, Clone, PartialEq)]
pub struct SignaturePointer {
    /// Custom modifiers of the pointee
    pub modifiers: Vec<SignatureModifier>,
    /// The type pointed to
    pub base: Box<TypeSignature>,
}

/// A `modreq` / `modopt` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureModifier {
    /// `CMOD_REQD` if true, `CMOD_OPT` otherwise
    pub required: bool,
    /// Token to TypeDef | TypeRef
    pub token: Token,
}
