//! Positional substitution of formal type parameters.
//!
//! A [`TypeMap`] pairs the flattened formal parameter list of a generic definition with the
//! arguments of one instantiation. Constructed types keep their map and apply it on demand
//! (base type, interfaces, containing type) instead of eagerly rebuilding the definition's
//! shape, so self-referential shapes such as `class Node<T> : IComparable<Node<T>>` never
//! expand without bound.

use std::sync::Arc;

use crate::{
    metadata::typesystem::{GenericParameter, GenericParameterRc, NamedType, TypeSymbol, TypeSymbolRc},
    Result,
};

/// Formal parameter to argument mapping of a single generic instantiation
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMap {
    parameters: Vec<GenericParameterRc>,
    arguments: Vec<TypeSymbolRc>,
}

impl TypeMap {
    /// Create a new substitution
    ///
    /// ## Arguments
    /// * `parameters` - The flattened formal parameters, outermost type first
    /// * `arguments`  - The arguments, index-aligned with `parameters`
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the two lists differ in length.
    pub fn new(parameters: Vec<GenericParameterRc>, arguments: Vec<TypeSymbolRc>) -> Result<Self> {
        if parameters.len() != arguments.len() {
            return Err(malformed_error!(
                "Substitution needs {} arguments, got {}",
                parameters.len(),
                arguments.len()
            ));
        }

        Ok(TypeMap {
            parameters,
            arguments,
        })
    }

    /// The identity substitution, mapping every parameter to itself. Definitions use it
    /// to describe shapes such as `IEnumerable<T>` in terms of their own parameters.
    #[must_use]
    pub fn identity(parameters: &[GenericParameterRc]) -> Self {
        TypeMap {
            parameters: parameters.to_vec(),
            arguments: parameters
                .iter()
                .map(|param| Arc::new(TypeSymbol::TypeParameter(param.clone())))
                .collect(),
        }
    }

    /// Number of mapped parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns true if nothing is mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// The formal parameters
    #[must_use]
    pub fn parameters(&self) -> &[GenericParameterRc] {
        &self.parameters
    }

    /// The arguments
    #[must_use]
    pub fn arguments(&self) -> &[TypeSymbolRc] {
        &self.arguments
    }

    /// The argument bound to `param`, if `param` is one of the mapped formals
    #[must_use]
    pub fn lookup(&self, param: &GenericParameter) -> Option<&TypeSymbolRc> {
        self.parameters
            .iter()
            .position(|candidate| candidate.as_ref() == param)
            .map(|index| &self.arguments[index])
    }

    /// The leading `count` entries, which belong to the containing types of a nested
    /// generic type
    #[must_use]
    pub fn prefix(&self, count: usize) -> TypeMap {
        let count = count.min(self.parameters.len());
        TypeMap {
            parameters: self.parameters[..count].to_vec(),
            arguments: self.arguments[..count].to_vec(),
        }
    }

    /// Replace every mapped formal parameter occurring in `symbol`.
    ///
    /// Structure without mapped parameters is shared, not copied: if nothing changes, the
    /// same `Arc` is returned. An illegal-interop marker stays a marker around the
    /// substituted type.
    #[must_use]
    pub fn substitute(&self, symbol: &TypeSymbolRc) -> TypeSymbolRc {
        match symbol.as_ref() {
            TypeSymbol::TypeParameter(param) => match self.lookup(param) {
                Some(argument) => argument.clone(),
                None => symbol.clone(),
            },
            TypeSymbol::Array {
                element,
                rank,
                dimensions,
                modifiers,
            } => {
                let new_element = self.substitute(element);
                if Arc::ptr_eq(&new_element, element) {
                    return symbol.clone();
                }
                Arc::new(TypeSymbol::Array {
                    element: new_element,
                    rank: *rank,
                    dimensions: dimensions.clone(),
                    modifiers: modifiers.clone(),
                })
            }
            TypeSymbol::SzArray { element, modifiers } => {
                let new_element = self.substitute(element);
                if Arc::ptr_eq(&new_element, element) {
                    return symbol.clone();
                }
                Arc::new(TypeSymbol::SzArray {
                    element: new_element,
                    modifiers: modifiers.clone(),
                })
            }
            TypeSymbol::Pointer { pointee, modifiers } => {
                let new_pointee = self.substitute(pointee);
                if Arc::ptr_eq(&new_pointee, pointee) {
                    return symbol.clone();
                }
                Arc::new(TypeSymbol::Pointer {
                    pointee: new_pointee,
                    modifiers: modifiers.clone(),
                })
            }
            TypeSymbol::ByRefReturnError { referenced } => {
                let new_referenced = self.substitute(referenced);
                if Arc::ptr_eq(&new_referenced, referenced) {
                    return symbol.clone();
                }
                Arc::new(TypeSymbol::ByRefReturnError {
                    referenced: new_referenced,
                })
            }
            TypeSymbol::Named(named) => {
                let Some(inner) = named.substitution() else {
                    return symbol.clone();
                };

                let arguments: Vec<TypeSymbolRc> = inner
                    .arguments
                    .iter()
                    .map(|argument| self.substitute(argument))
                    .collect();
                let unchanged = arguments
                    .iter()
                    .zip(&inner.arguments)
                    .all(|(new, old)| Arc::ptr_eq(new, old));
                if unchanged {
                    return symbol.clone();
                }

                Arc::new(TypeSymbol::Named(NamedType::constructed(
                    named.definition.clone(),
                    TypeMap {
                        parameters: inner.parameters.clone(),
                        arguments,
                    },
                )))
            }
            TypeSymbol::IllegalInteropInstantiation { underlying } => {
                let new_underlying = self.substitute(underlying);
                if Arc::ptr_eq(&new_underlying, underlying) {
                    return symbol.clone();
                }
                Arc::new(TypeSymbol::IllegalInteropInstantiation {
                    underlying: new_underlying,
                })
            }
            TypeSymbol::Unsupported { .. } => symbol.clone(),
        }
    }
}
