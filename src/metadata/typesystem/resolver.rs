use rayon::prelude::*;

use crate::{
    metadata::{
        config::ResolverConfig,
        signatures::{SignatureModifier, TypeSignature},
        token::Token,
        typesystem::{
            CustomModifier, DefinitionLookup, ModuleContext, SpecialType, SymbolFactory,
            TypeSymbol, TypeSymbolRc,
        },
    },
    Error::{self, RecursionLimit, TypeNotFound},
};

/// Resolves type signatures to type symbols through a [`SymbolFactory`]
///
/// Resolution is total: every fault on the way (unknown token, bad generic parameter
/// index, too deeply nested signature, a decode error reported by the reader) ends up as
/// an `Unsupported` symbol carrying the fault as its cause.
pub struct TypeResolver<'a, C: ModuleContext + DefinitionLookup> {
    /// The factory building the symbols
    factory: SymbolFactory<'a, C>,
    /// Arguments `!0`, `!1`, ... refer to, flattened outer to inner
    generic_context: Vec<TypeSymbolRc>,
}

impl<'a, C: ModuleContext + DefinitionLookup> TypeResolver<'a, C> {
    /// Create a new resolver for the given module
    ///
    /// ## Arguments
    /// * 'context' - The module whose signatures are resolved
    pub fn new(context: &'a C) -> Self {
        TypeResolver {
            factory: SymbolFactory::new(context),
            generic_context: Vec::new(),
        }
    }

    /// Replace the configuration
    ///
    /// ## Arguments
    /// * 'config' - The configuration for the resolver and its factory
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.factory = self.factory.with_config(config);
        self
    }

    /// Set the symbols `GenericParamType` indices resolve to
    ///
    /// ## Arguments
    /// * 'arguments' - Flattened type arguments (or formal parameters) of the enclosing type
    #[must_use]
    pub fn with_generic_context(mut self, arguments: Vec<TypeSymbolRc>) -> Self {
        self.generic_context = arguments;
        self
    }

    /// The factory used for symbol construction
    pub fn factory(&self) -> &SymbolFactory<'a, C> {
        &self.factory
    }

    /// Resolve a type signature to a type symbol
    ///
    /// ## Arguments
    /// * 'signature' - The signature to resolve
    pub fn resolve(&self, signature: &TypeSignature) -> TypeSymbolRc {
        self.resolve_with_depth(signature, 0).0
    }

    /// Resolve a batch of signatures in parallel; the result is index-aligned with
    /// `signatures` and equal to resolving them one by one
    ///
    /// ## Arguments
    /// * 'signatures' - The signatures to resolve
    pub fn resolve_all(&self, signatures: &[TypeSignature]) -> Vec<TypeSymbolRc>
    where
        C: Sync,
    {
        signatures
            .par_iter()
            .map(|signature| self.resolve(signature))
            .collect()
    }

    /// Internal recursive resolver with depth tracking
    ///
    /// Returns the symbol and whether the signature referred to an embedded-interop
    /// local type anywhere inside it.
    ///
    /// ## Arguments
    /// * 'signature'   - The signature to resolve
    /// * 'depth'       - Indicator of recursion level
    fn resolve_with_depth(&self, signature: &TypeSignature, depth: usize) -> (TypeSymbolRc, bool) {
        let max_depth = self.factory.config().max_recursion_depth;
        if depth >= max_depth {
            log::debug!("Signature nesting exceeds {} levels", max_depth);
            return (
                self.factory.make_unsupported(Some(RecursionLimit(max_depth))),
                false,
            );
        }

        match signature {
            TypeSignature::Void => self.special(SpecialType::Void),
            TypeSignature::Boolean => self.special(SpecialType::Boolean),
            TypeSignature::Char => self.special(SpecialType::Char),
            TypeSignature::I1 => self.special(SpecialType::SByte),
            TypeSignature::U1 => self.special(SpecialType::Byte),
            TypeSignature::I2 => self.special(SpecialType::Int16),
            TypeSignature::U2 => self.special(SpecialType::UInt16),
            TypeSignature::I4 => self.special(SpecialType::Int32),
            TypeSignature::U4 => self.special(SpecialType::UInt32),
            TypeSignature::I8 => self.special(SpecialType::Int64),
            TypeSignature::U8 => self.special(SpecialType::UInt64),
            TypeSignature::R4 => self.special(SpecialType::Single),
            TypeSignature::R8 => self.special(SpecialType::Double),
            TypeSignature::I => self.special(SpecialType::IntPtr),
            TypeSignature::U => self.special(SpecialType::UIntPtr),
            TypeSignature::Object => self.special(SpecialType::Object),
            TypeSignature::String => self.special(SpecialType::String),
            TypeSignature::Class(token) | TypeSignature::ValueType(token) => self.nominal(*token),
            TypeSignature::GenericParamType(index) => {
                let argument = usize::try_from(*index)
                    .ok()
                    .and_then(|index| self.generic_context.get(index));
                match argument {
                    Some(argument) => (argument.clone(), false),
                    None => (
                        self.factory.make_unsupported(Some(malformed_error!(
                            "Generic parameter !{} out of range, context has {}",
                            index,
                            self.generic_context.len()
                        ))),
                        false,
                    ),
                }
            }
            TypeSignature::Array(array) => {
                let (element, local) = self.resolve_with_depth(&array.base, depth + 1);
                let symbol = self.factory.make_array_with_dimensions(
                    &element,
                    array.rank,
                    array.dimensions.clone(),
                    Vec::new(),
                );
                (symbol, local)
            }
            TypeSignature::SzArray(sz_array) => {
                let (element, local) = self.resolve_with_depth(&sz_array.base, depth + 1);
                let symbol = match self.modifiers(&sz_array.modifiers) {
                    Ok(modifiers) => self.factory.make_sz_array(&element, modifiers),
                    Err(poison) => poison,
                };
                (symbol, local)
            }
            TypeSignature::Ptr(pointer) => {
                let (pointee, local) = self.resolve_with_depth(&pointer.base, depth + 1);
                let symbol = match self.modifiers(&pointer.modifiers) {
                    Ok(modifiers) => self.factory.make_pointer(&pointee, modifiers),
                    Err(poison) => poison,
                };
                (symbol, local)
            }
            TypeSignature::ByRef(inner) => {
                let (referenced, local) = self.resolve_with_depth(inner, depth + 1);
                (self.factory.make_by_ref_return(&referenced), local)
            }
            TypeSignature::GenericInst(base, arguments) => {
                let (generic_def, _) = self.resolve_with_depth(base, depth + 1);

                let mut resolved = Vec::with_capacity(arguments.len());
                let mut refers_to_local = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    let (symbol, local) = self.resolve_with_depth(argument, depth + 1);
                    resolved.push(symbol);
                    refers_to_local.push(local);
                }

                let local = refers_to_local.iter().any(|local| *local);
                (
                    self.factory
                        .instantiate(&generic_def, resolved, &refers_to_local),
                    local,
                )
            }
            TypeSignature::Invalid(error) => {
                (self.factory.make_unsupported(Some(error.clone())), false)
            }
        }
    }

    fn special(&self, special: SpecialType) -> (TypeSymbolRc, bool) {
        (self.factory.context().special_type(special), false)
    }

    fn nominal(&self, token: Token) -> (TypeSymbolRc, bool) {
        if !token.is_type_def_or_ref() {
            return (self.factory.make_unsupported(Some(not_a_type(token))), false);
        }

        match self.factory.context().definition(token) {
            Some(definition) => (
                TypeSymbol::named(&definition),
                definition.is_embedded_local(),
            ),
            None => {
                log::debug!("Signature refers to unknown type {}", token);
                (self.factory.make_unsupported(Some(TypeNotFound(token))), false)
            }
        }
    }

    /// Resolve custom modifiers; an unknown modifier type poisons the whole occurrence
    fn modifiers(
        &self,
        modifiers: &[SignatureModifier],
    ) -> std::result::Result<Vec<CustomModifier>, TypeSymbolRc> {
        modifiers
            .iter()
            .map(|modifier| {
                if !modifier.token.is_type_def_or_ref() {
                    return Err(self.factory.make_unsupported(Some(not_a_type(modifier.token))));
                }

                match self.factory.context().definition(modifier.token) {
                    Some(definition) if modifier.required => {
                        Ok(CustomModifier::required(TypeSymbol::named(&definition)))
                    }
                    Some(definition) => Ok(CustomModifier::optional(TypeSymbol::named(&definition))),
                    None => Err(self
                        .factory
                        .make_unsupported(Some(TypeNotFound(modifier.token)))),
                }
            })
            .collect()
    }
}

fn not_a_type(token: Token) -> Error {
    malformed_error!("Token {} does not reference a TypeDef, TypeRef or TypeSpec", token)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        metadata::signatures::{SignatureArray, SignaturePointer, SignatureSzArray},
        test::*,
        Error,
    };

    #[test]
    fn test_resolve_primitives() {
        let module = create_core_module();
        let resolver = TypeResolver::new(&module);

        assert_eq!(
            resolver.resolve(&TypeSignature::I4).special_type(),
            Some(SpecialType::Int32)
        );
        assert_eq!(
            resolver.resolve(&TypeSignature::Object).special_type(),
            Some(SpecialType::Object)
        );
        // Not registered by the core fixture
        let missing = resolver.resolve(&TypeSignature::R4);
        assert_eq!(
            missing.unsupported_cause(),
            Some(&Error::SpecialTypeMissing(SpecialType::Single))
        );
    }

    #[test]
    fn test_unknown_token_is_poison_with_cause() {
        let module = create_core_module();
        let resolver = TypeResolver::new(&module);
        let token = Token::new(0x0200_0999);

        let result = resolver.resolve(&TypeSignature::Class(token));
        assert_eq!(result.unsupported_cause(), Some(&Error::TypeNotFound(token)));

        // and it propagates through shape constructors unchanged
        let array = resolver.resolve(&TypeSignature::SzArray(SignatureSzArray {
            modifiers: vec![],
            base: Box::new(TypeSignature::Class(token)),
        }));
        assert_eq!(array.unsupported_cause(), Some(&Error::TypeNotFound(token)));
    }

    #[test]
    fn test_resolve_shapes() {
        let module = create_core_module();
        let resolver = TypeResolver::new(&module);

        let pointer = resolver.resolve(&TypeSignature::Ptr(SignaturePointer {
            modifiers: vec![],
            base: Box::new(TypeSignature::U1),
        }));
        assert_eq!(pointer.to_string(), "System.Byte*");

        let matrix = resolver.resolve(&TypeSignature::Array(SignatureArray {
            base: Box::new(TypeSignature::R8),
            rank: 2,
            dimensions: vec![],
        }));
        // System.Double is missing from the fixture, poison wins
        assert!(matrix.is_unsupported());

        let rank_one = resolver.resolve(&TypeSignature::Array(SignatureArray {
            base: Box::new(TypeSignature::I4),
            rank: 1,
            dimensions: vec![],
        }));
        assert!(rank_one.is_unsupported());
        assert!(rank_one.unsupported_cause().is_none());

        let by_ref = resolver.resolve(&TypeSignature::ByRef(Box::new(TypeSignature::I4)));
        assert!(matches!(by_ref.as_ref(), TypeSymbol::ByRefReturnError { .. }));
    }

    #[test]
    fn test_volatile_modifier_is_resolved() {
        let module = create_core_module();
        let resolver = TypeResolver::new(&module);
        let volatile_token = module
            .get_by_fullname("System.Runtime.CompilerServices.IsVolatile")[0]
            .token;

        let pointer = resolver.resolve(&TypeSignature::Ptr(SignaturePointer {
            modifiers: vec![SignatureModifier {
                required: true,
                token: volatile_token,
            }],
            base: Box::new(TypeSignature::I4),
        }));
        match pointer.as_ref() {
            TypeSymbol::Pointer { modifiers, .. } => {
                assert!(modifiers[0].is_volatile());
                assert!(resolver.factory().is_volatile_modifier_type(&modifiers[0].modifier));
            }
            other => panic!("Expected Pointer, got {:?}", other),
        }

        let unknown = Token::new(0x0100_0777);
        let broken = resolver.resolve(&TypeSignature::SzArray(SignatureSzArray {
            modifiers: vec![SignatureModifier {
                required: false,
                token: unknown,
            }],
            base: Box::new(TypeSignature::I4),
        }));
        assert_eq!(broken.unsupported_cause(), Some(&Error::TypeNotFound(unknown)));
    }

    #[test]
    fn test_optional_modifier_and_foreign_tokens() {
        let module = create_core_module();
        let resolver = TypeResolver::new(&module);
        let volatile_token = module
            .get_by_fullname("System.Runtime.CompilerServices.IsVolatile")[0]
            .token;

        let array = resolver.resolve(&TypeSignature::SzArray(SignatureSzArray {
            modifiers: vec![SignatureModifier {
                required: false,
                token: volatile_token,
            }],
            base: Box::new(TypeSignature::I4),
        }));
        match array.as_ref() {
            TypeSymbol::SzArray { modifiers, .. } => {
                assert!(!modifiers[0].required);
                assert!(!modifiers[0].is_volatile());
            }
            other => panic!("Expected SzArray, got {:?}", other),
        }

        // A GenericParam row is not a type
        let foreign = Token::new(0x2A00_0001);
        let class = resolver.resolve(&TypeSignature::Class(foreign));
        assert!(matches!(
            class.unsupported_cause(),
            Some(Error::Malformed { .. })
        ));
        let pointer = resolver.resolve(&TypeSignature::Ptr(SignaturePointer {
            modifiers: vec![SignatureModifier {
                required: true,
                token: foreign,
            }],
            base: Box::new(TypeSignature::I4),
        }));
        assert!(matches!(
            pointer.unsupported_cause(),
            Some(Error::Malformed { .. })
        ));
    }

    #[test]
    fn test_generic_parameter_context() {
        let module = create_core_module();
        let list = create_generic_class(0x500, "System.Collections.Generic", "List`1", &["T"]);
        let formal = Arc::new(TypeSymbol::TypeParameter(list.generic_params[0].clone()));

        let resolver = TypeResolver::new(&module).with_generic_context(vec![formal.clone()]);
        assert!(Arc::ptr_eq(
            &resolver.resolve(&TypeSignature::GenericParamType(0)),
            &formal
        ));
        assert_eq!(
            resolver.resolve(&TypeSignature::SzArray(SignatureSzArray {
                modifiers: vec![],
                base: Box::new(TypeSignature::GenericParamType(0)),
            }))
            .to_string(),
            "T[]"
        );

        let out_of_range = resolver.resolve(&TypeSignature::GenericParamType(3));
        assert!(matches!(
            out_of_range.unsupported_cause(),
            Some(Error::Malformed { .. })
        ));
    }

    #[test]
    fn test_recursion_limit() {
        let module = create_core_module();
        let resolver = TypeResolver::new(&module).with_config(ResolverConfig {
            max_recursion_depth: 8,
            ..ResolverConfig::default()
        });

        let mut signature = TypeSignature::I4;
        for _ in 0..10 {
            signature = TypeSignature::Ptr(SignaturePointer {
                modifiers: vec![],
                base: Box::new(signature),
            });
        }

        let result = resolver.resolve(&signature);
        assert_eq!(result.unsupported_cause(), Some(&Error::RecursionLimit(8)));
    }

    #[test]
    fn test_decode_fault_becomes_cause() {
        let module = create_core_module();
        let resolver = TypeResolver::new(&module);

        let result = resolver.resolve(&TypeSignature::Invalid(Error::OutOfBounds));
        assert_eq!(result.unsupported_cause(), Some(&Error::OutOfBounds));
    }

    #[test]
    fn test_generic_inst_tracks_local_arguments() {
        let module = create_interop_module();
        let generic = create_generic_class(0x501, "N", "G`1", &["T"]);
        module.register_type(generic.clone()).unwrap();
        let local = create_local_interface(&module, 0x502, "IShape");

        let resolver = TypeResolver::new(&module);
        let result = resolver.resolve(&TypeSignature::GenericInst(
            Box::new(TypeSignature::Class(generic.token)),
            vec![TypeSignature::SzArray(SignatureSzArray {
                modifiers: vec![],
                base: Box::new(TypeSignature::Class(local.token)),
            })],
        ));
        assert!(result.is_illegal_interop());
        assert_eq!(result.to_string(), "N.G`1<Interop.IShape[]>");

        let legal = resolver.resolve(&TypeSignature::GenericInst(
            Box::new(TypeSignature::Class(generic.token)),
            vec![TypeSignature::I4],
        ));
        assert!(!legal.is_illegal_interop());
    }
}
