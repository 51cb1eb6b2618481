use bitflags::bitflags;

use crate::metadata::typesystem::{SpecialType, TypeSymbolRc};

bitflags! {
    /// `TypeAttributes` of a type definition (ECMA-335 II.23.1.15), reduced to the bits
    /// the type-symbol layer inspects.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeAttributes: u32 {
        /// Type is an interface
        const INTERFACE = 0x0000_0020;
        /// Type is abstract
        const ABSTRACT = 0x0000_0080;
        /// Type is sealed
        const SEALED = 0x0000_0100;
        /// Type is imported from a COM type library
        const IMPORT = 0x0000_1000;
        /// Type is a nested type with public visibility
        const NESTED_PUBLIC = 0x0000_0002;
    }
}

/// A single dimension of a multi-dimensional array
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayDimensions {
    /// The size of this dimension
    pub size: Option<u32>,
    /// The lower bound of this dimension (lowest index that can be used to access an element)
    pub lower_bound: Option<i32>,
}

/// A custom modifier attached to a type occurrence (e.g. `modreq(IsVolatile)`).
///
/// The modifier type is carried through shape constructors untouched; only
/// [`crate::metadata::typesystem::SymbolFactory::is_volatile_modifier_type`] looks into it.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomModifier {
    /// Is this modifier required (`modreq`) or informational (`modopt`)?
    pub required: bool,
    /// The modifier type
    pub modifier: TypeSymbolRc,
}

impl CustomModifier {
    /// Create a required (`modreq`) modifier
    #[must_use]
    pub fn required(modifier: TypeSymbolRc) -> Self {
        CustomModifier {
            required: true,
            modifier,
        }
    }

    /// Create an optional (`modopt`) modifier
    #[must_use]
    pub fn optional(modifier: TypeSymbolRc) -> Self {
        CustomModifier {
            required: false,
            modifier,
        }
    }

    /// Returns true if this is the `modreq(System.Runtime.CompilerServices.IsVolatile)` marker
    #[must_use]
    pub fn is_volatile(&self) -> bool {
        self.required && self.modifier.special_type() == Some(SpecialType::IsVolatile)
    }
}
