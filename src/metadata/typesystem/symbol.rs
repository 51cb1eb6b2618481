//! The closed set of type-symbol shapes produced from metadata.
//!
//! Symbols are immutable and shared through [`TypeSymbolRc`]. Constructors that "return
//! the operand unchanged" hand back the very same allocation, so poison identity can be
//! observed with [`Arc::ptr_eq`]; constructors that produce a "fresh" value allocate.

use std::{fmt, sync::Arc};

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        typesystem::{
            ArrayDimensions, CustomModifier, GenericParameterRc, SpecialType, TypeDefinitionRc,
            TypeMap,
        },
    },
    Error,
};

/// Shared reference to a `TypeSymbol`
pub type TypeSymbolRc = Arc<TypeSymbol>;

/// A type symbol as seen by binding, overload resolution and code generation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSymbol {
    /// Multi-dimensional array; `rank` is never 1
    Array {
        /// Element type
        element: TypeSymbolRc,
        /// Number of dimensions (>= 2)
        rank: u32,
        /// Declared sizes and lower bounds, in dimension order (may be shorter than `rank`)
        dimensions: Vec<ArrayDimensions>,
        /// Custom modifiers on the array occurrence
        modifiers: Vec<CustomModifier>,
    },
    /// Single-dimension, zero-based array
    SzArray {
        /// Element type
        element: TypeSymbolRc,
        /// Custom modifiers on the element occurrence
        modifiers: Vec<CustomModifier>,
    },
    /// Unmanaged pointer
    Pointer {
        /// Pointed-to type
        pointee: TypeSymbolRc,
        /// Custom modifiers on the pointee occurrence
        modifiers: Vec<CustomModifier>,
    },
    /// A by-reference return type, which is not modeled as an ordinary type
    ByRefReturnError {
        /// The referenced type
        referenced: TypeSymbolRc,
    },
    /// A nominal type, possibly a generic instantiation
    Named(NamedType),
    /// A formal type parameter
    TypeParameter(GenericParameterRc),
    /// Poison: metadata that could not be modeled
    Unsupported {
        /// The decode fault that caused this, if one was reported
        cause: Option<Arc<Error>>,
    },
    /// A constructed type that violates embedded-interop closure rules
    IllegalInteropInstantiation {
        /// The fully formed constructed type
        underlying: TypeSymbolRc,
    },
}

/// A nominal type together with its (optional) generic instantiation.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    /// The nominal definition
    pub definition: TypeDefinitionRc,
    substitution: Option<TypeMap>,
}

impl NamedType {
    /// The definition itself: non-generic, or the unbound form of a generic type
    #[must_use]
    pub fn new(definition: TypeDefinitionRc) -> Self {
        NamedType {
            definition,
            substitution: None,
        }
    }

    /// A constructed type; `substitution` maps every flattened formal to its argument
    #[must_use]
    pub fn constructed(definition: TypeDefinitionRc, substitution: TypeMap) -> Self {
        NamedType {
            definition,
            substitution: Some(substitution),
        }
    }

    /// The flattened type arguments (containing types' arguments first), if constructed
    #[must_use]
    pub fn type_arguments(&self) -> Option<&[TypeSymbolRc]> {
        self.substitution.as_ref().map(TypeMap::arguments)
    }

    /// The positional substitution of a constructed type
    #[must_use]
    pub fn substitution(&self) -> Option<&TypeMap> {
        self.substitution.as_ref()
    }

    /// Check if this type carries generic arguments
    #[must_use]
    pub fn is_constructed(&self) -> bool {
        self.substitution.is_some()
    }

    /// The base type, with type parameters replaced by this type's arguments
    #[must_use]
    pub fn base_type(&self) -> Option<TypeSymbolRc> {
        let base = self.definition.base_type()?;
        Some(match &self.substitution {
            Some(map) => map.substitute(&base),
            None => base,
        })
    }

    /// The implemented interfaces, with type parameters replaced by this type's arguments
    #[must_use]
    pub fn interfaces(&self) -> Vec<TypeSymbolRc> {
        self.definition
            .interfaces
            .iter()
            .map(|(_, interface)| match &self.substitution {
                Some(map) => map.substitute(interface),
                None => interface.clone(),
            })
            .collect()
    }

    /// The containing type; for a constructed type this is the containing definition
    /// constructed over the leading arguments
    #[must_use]
    pub fn containing_type(&self) -> Option<TypeSymbolRc> {
        let containing = self.definition.containing_type()?;
        let named = match &self.substitution {
            Some(map) => {
                let outer_count = map.len().saturating_sub(self.definition.arity());
                if outer_count == 0 {
                    NamedType::new(containing)
                } else {
                    NamedType::constructed(containing, map.prefix(outer_count))
                }
            }
            None => NamedType::new(containing),
        };
        Some(Arc::new(TypeSymbol::Named(named)))
    }
}

impl TypeSymbol {
    /// Wrap a definition as a symbol (non-generic, or the unbound generic form)
    #[must_use]
    pub fn named(definition: &TypeDefinitionRc) -> TypeSymbolRc {
        Arc::new(TypeSymbol::Named(NamedType::new(definition.clone())))
    }

    /// Check if this is the poison sentinel
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, TypeSymbol::Unsupported { .. })
    }

    /// The decode fault carried by a poison sentinel
    #[must_use]
    pub fn unsupported_cause(&self) -> Option<&Error> {
        match self {
            TypeSymbol::Unsupported { cause } => cause.as_deref(),
            _ => None,
        }
    }

    /// Check if this is an illegal embedded-interop instantiation
    #[must_use]
    pub fn is_illegal_interop(&self) -> bool {
        matches!(self, TypeSymbol::IllegalInteropInstantiation { .. })
    }

    /// The nominal view of this symbol, if it is a `Named`
    #[must_use]
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            TypeSymbol::Named(named) => Some(named),
            _ => None,
        }
    }

    /// The special-type classification of a nominal symbol
    #[must_use]
    pub fn special_type(&self) -> Option<SpecialType> {
        self.as_named().and_then(|named| named.definition.special)
    }

    /// Check if this is a nominal interface type
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.as_named()
            .is_some_and(|named| named.definition.is_interface())
    }

    /// Returns true if this type is defined in, or closed over a type defined in, one of
    /// `assemblies`
    #[must_use]
    pub fn is_or_closed_over_assemblies(&self, assemblies: &[AssemblyIdentity]) -> bool {
        match self {
            TypeSymbol::Named(named) => {
                assemblies.contains(&named.definition.assembly)
                    || named.type_arguments().is_some_and(|arguments| {
                        arguments
                            .iter()
                            .any(|argument| argument.is_or_closed_over_assemblies(assemblies))
                    })
            }
            TypeSymbol::Array { element, .. } | TypeSymbol::SzArray { element, .. } => {
                element.is_or_closed_over_assemblies(assemblies)
            }
            TypeSymbol::Pointer { pointee, .. } => pointee.is_or_closed_over_assemblies(assemblies),
            TypeSymbol::ByRefReturnError { referenced } => {
                referenced.is_or_closed_over_assemblies(assemblies)
            }
            TypeSymbol::IllegalInteropInstantiation { underlying } => {
                underlying.is_or_closed_over_assemblies(assemblies)
            }
            TypeSymbol::TypeParameter(_) | TypeSymbol::Unsupported { .. } => false,
        }
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSymbol::Array { element, rank, .. } => {
                let commas = usize::try_from(rank.saturating_sub(1)).unwrap_or(0);
                write!(f, "{}[{}]", element, ",".repeat(commas))
            }
            TypeSymbol::SzArray { element, .. } => write!(f, "{}[]", element),
            TypeSymbol::Pointer { pointee, .. } => write!(f, "{}*", pointee),
            TypeSymbol::ByRefReturnError { referenced } => write!(f, "{}&", referenced),
            TypeSymbol::Named(named) => {
                f.write_str(&named.definition.fullname())?;
                match named.type_arguments() {
                    Some(arguments) => {
                        f.write_str("<")?;
                        for (index, argument) in arguments.iter().enumerate() {
                            if index > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{}", argument)?;
                        }
                        f.write_str(">")
                    }
                    None if named.definition.arity() > 0 => {
                        write!(f, "<{}>", ",".repeat(named.definition.arity() - 1))
                    }
                    None => Ok(()),
                }
            }
            TypeSymbol::TypeParameter(param) => f.write_str(&param.name),
            TypeSymbol::Unsupported { cause: Some(cause) } => {
                write!(f, "<unsupported: {}>", cause)
            }
            TypeSymbol::Unsupported { cause: None } => f.write_str("<unsupported>"),
            TypeSymbol::IllegalInteropInstantiation { underlying } => write!(f, "{}", underlying),
        }
    }
}
