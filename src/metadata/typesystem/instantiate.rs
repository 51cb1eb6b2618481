//! Generic instantiation with embedded-interop legality.
//!
//! Arguments arrive flattened: the arguments of every containing generic type come first,
//! outermost type first, followed by the arguments of the type itself. `refers_to_local`
//! is index-aligned with them and records, per argument, whether the metadata reader
//! resolved that argument to an embedded-interop local type.
//!
//! An instantiation is *illegal* when one of its arguments is, or is closed over, a type
//! from an assembly linked for embedded interop. Interop types cannot be unified across
//! assembly boundaries when they appear as generic arguments, so the compiler has to reject
//! uses of such types. The trailing arguments that belong to a chain of interfaces nested
//! inside another interface are exempt.
//!
//! The result keeps the full constructed type underneath the illegal marker, so binding
//! can still navigate it before the diagnostics layer reports the use.

use std::sync::Arc;

use crate::{
    metadata::typesystem::{
        factory::SymbolFactory, ModuleContext, NamedType, TypeDefinitionRc, TypeMap, TypeSymbol,
        TypeSymbolRc,
    },
    Error,
};

impl<C: ModuleContext> SymbolFactory<'_, C> {
    /// Instantiate a generic type definition.
    ///
    /// The checks run in a fixed order, and the first one that decides the outcome wins:
    /// 1. A poisoned definition is returned unchanged.
    /// 2. Any poisoned argument yields a fresh `Unsupported`.
    /// 3. Embedded-interop legality is evaluated if the module links interop assemblies or
    ///    declares local types itself (and the check is enabled in the configuration).
    /// 4. The flattened formal count must equal the argument count, otherwise the result
    ///    is a fresh `Unsupported`.
    /// 5. The constructed type is built, and wrapped in `IllegalInteropInstantiation` if
    ///    step 3 found an offending argument.
    ///
    /// ## Arguments
    /// * `generic_def`     - The generic type definition (its unbound form)
    /// * `arguments`       - Flattened type arguments, outermost containing type first
    /// * `refers_to_local` - Per flattened argument: resolved to an embedded-interop local type
    #[must_use]
    pub fn instantiate(
        &self,
        generic_def: &TypeSymbolRc,
        arguments: Vec<TypeSymbolRc>,
        refers_to_local: &[bool],
    ) -> TypeSymbolRc {
        if generic_def.is_unsupported() {
            return generic_def.clone();
        }

        if arguments.iter().any(|argument| argument.is_unsupported()) {
            return self.make_unsupported(None);
        }

        let Some(named) = generic_def.as_named() else {
            if arguments.is_empty() {
                return generic_def.clone();
            }
            log::debug!("Cannot instantiate {}, it is not a nominal type", generic_def);
            return self.make_unsupported(Some(Error::NotSupported));
        };
        let definition = &named.definition;

        let illegal = self.interop_check_applies()
            && self.has_illegal_argument(definition, &arguments, refers_to_local);

        let formals = match definition.all_type_parameters(self.config.max_nesting_depth) {
            Ok(formals) => formals,
            Err(error) => return self.make_unsupported(Some(error)),
        };

        if formals.len() != arguments.len() {
            log::debug!(
                "Arity mismatch instantiating {}: {} formal parameters, {} arguments",
                definition.fullname(),
                formals.len(),
                arguments.len()
            );
            return self.make_unsupported(None);
        }

        if formals.is_empty() {
            return generic_def.clone();
        }

        let substitution = match TypeMap::new(formals, arguments) {
            Ok(substitution) => substitution,
            Err(error) => return self.make_unsupported(Some(error)),
        };
        let constructed = Arc::new(TypeSymbol::Named(NamedType::constructed(
            definition.clone(),
            substitution,
        )));

        if illegal {
            log::debug!(
                "Instantiation {} is closed over an embedded interop type",
                constructed
            );
            return Arc::new(TypeSymbol::IllegalInteropInstantiation {
                underlying: constructed,
            });
        }

        constructed
    }

    /// Legality is only checked for modules that can see embedded interop types at all
    fn interop_check_applies(&self) -> bool {
        self.config.enable_interop_validation
            && (!self.context.linked_assemblies().is_empty()
                || self.context.has_embedded_local_types())
    }

    /// Scan the non-exempt arguments for an embedded-interop local type
    fn has_illegal_argument(
        &self,
        definition: &TypeDefinitionRc,
        arguments: &[TypeSymbolRc],
        refers_to_local: &[bool],
    ) -> bool {
        let checked = self.checked_argument_count(definition, arguments.len());
        let linked = self.context.linked_assemblies();

        (0..checked).rev().any(|index| {
            refers_to_local.get(index).copied().unwrap_or(false)
                || arguments[index].is_or_closed_over_assemblies(linked)
        })
    }

    /// Number of leading arguments subject to the legality check.
    ///
    /// Walks outwards from `definition` while the current type is an interface nested in
    /// another type, excluding that interface's own arguments from the end of the list.
    /// The walk stops at the first type that is not an interface or is not nested.
    fn checked_argument_count(&self, definition: &TypeDefinitionRc, argument_count: usize) -> usize {
        let mut remaining = argument_count;
        let mut current = definition.clone();

        for _ in 0..self.config.max_nesting_depth {
            if !current.is_interface() {
                break;
            }
            let Some(containing) = current.containing_type() else {
                break;
            };
            remaining = remaining.saturating_sub(current.arity());
            current = containing;
        }

        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{config::ResolverConfig, typesystem::{ModuleInfo, SpecialType}},
        test::*,
    };

    #[test]
    fn test_poisoned_definition_is_returned_unchanged() {
        let module = create_core_module();
        let factory = SymbolFactory::new(&module);
        let poison = factory.make_unsupported(None);
        let int32 = module.special_type(SpecialType::Int32);

        let result = factory.instantiate(&poison, vec![int32], &[false]);
        assert!(Arc::ptr_eq(&result, &poison));
    }

    #[test]
    fn test_poisoned_argument_yields_fresh_poison() {
        let module = create_core_module();
        let factory = SymbolFactory::new(&module);
        let list = create_named(&create_generic_class(0x400, "System.Collections.Generic", "List`1", &["T"]));
        let poison = factory.make_unsupported(Some(Error::OutOfBounds));

        let result = factory.instantiate(&list, vec![poison.clone()], &[false]);
        assert!(result.is_unsupported());
        assert!(!Arc::ptr_eq(&result, &poison));
        assert!(result.unsupported_cause().is_none());
    }

    #[test]
    fn test_arity_mismatch() {
        let module = create_core_module();
        let factory = SymbolFactory::new(&module);
        let dict = create_named(&create_generic_class(0x401, "System.Collections.Generic", "Dictionary`2", &["TKey", "TValue"]));
        let int32 = module.special_type(SpecialType::Int32);

        let too_many = factory.instantiate(&dict, vec![int32.clone(), int32.clone(), int32.clone()], &[false; 3]);
        assert!(too_many.is_unsupported());
        assert!(too_many.unsupported_cause().is_none());

        let too_few = factory.instantiate(&dict, vec![int32], &[false]);
        assert!(too_few.is_unsupported());
    }

    #[test]
    fn test_constructed_type() {
        let module = create_core_module();
        let factory = SymbolFactory::new(&module);
        let dict = create_named(&create_generic_class(0x402, "System.Collections.Generic", "Dictionary`2", &["TKey", "TValue"]));
        let int32 = module.special_type(SpecialType::Int32);
        let string = module.special_type(SpecialType::String);

        let result = factory.instantiate(&dict, vec![string.clone(), int32.clone()], &[false, false]);
        let named = result.as_named().unwrap();
        let arguments = named.type_arguments().unwrap();
        assert!(Arc::ptr_eq(&arguments[0], &string));
        assert!(Arc::ptr_eq(&arguments[1], &int32));
        assert_eq!(
            result.to_string(),
            "System.Collections.Generic.Dictionary`2<System.String, System.Int32>"
        );
    }

    #[test]
    fn test_non_generic_without_arguments_is_unchanged() {
        let module = create_core_module();
        let factory = SymbolFactory::new(&module);
        let int32 = module.special_type(SpecialType::Int32);

        assert!(Arc::ptr_eq(&factory.instantiate(&int32, vec![], &[]), &int32));

        let array = factory.make_sz_array(&int32, vec![]);
        assert!(Arc::ptr_eq(&factory.instantiate(&array, vec![], &[]), &array));
        let bogus = factory.instantiate(&array, vec![int32], &[false]);
        assert_eq!(bogus.unsupported_cause(), Some(&Error::NotSupported));
    }

    #[test]
    fn test_local_flag_gated_by_context() {
        let generic = create_named(&create_generic_class(0x403, "N", "G`1", &["T"]));
        let local = create_named(&create_interop_interface(0x404, "IWorkbook"));

        let closed = ModuleInfo::new(create_app_assembly());
        let result = SymbolFactory::new(&closed).instantiate(&generic, vec![local.clone()], &[true]);
        assert!(!result.is_illegal_interop());
        assert!(result.as_named().is_some());

        let open = ModuleInfo::new(create_app_assembly()).with_embedded_local_types();
        let result = SymbolFactory::new(&open).instantiate(&generic, vec![local], &[true]);
        assert!(result.is_illegal_interop());
    }

    #[test]
    fn test_interop_check_can_be_disabled() {
        let generic = create_named(&create_generic_class(0x405, "N", "G`1", &["T"]));
        let local = create_named(&create_interop_interface(0x406, "IWorkbook"));
        let module = create_interop_module();

        let factory = SymbolFactory::new(&module).with_config(ResolverConfig::minimal());
        let result = factory.instantiate(&generic, vec![local], &[true]);
        assert!(!result.is_illegal_interop());
    }

    #[test]
    fn test_argument_from_linked_assembly_is_illegal_without_flag() {
        let module = create_interop_module();
        let factory = SymbolFactory::new(&module);
        let generic = create_named(&create_generic_class(0x407, "N", "G`1", &["T"]));
        let interop = create_named(&create_interop_interface(0x408, "IRange"));

        // Closed over through an array element
        let array = factory.make_sz_array(&interop, vec![]);
        let result = factory.instantiate(&generic, vec![array], &[false]);
        assert!(result.is_illegal_interop());
    }

    #[test]
    fn test_illegal_keeps_underlying_type() {
        let module = create_interop_module();
        let factory = SymbolFactory::new(&module);
        let generic = create_named(&create_generic_class(0x409, "N", "G`1", &["T"]));
        let interop = create_named(&create_interop_interface(0x40A, "IRange"));

        let result = factory.instantiate(&generic, vec![interop.clone()], &[true]);
        match result.as_ref() {
            TypeSymbol::IllegalInteropInstantiation { underlying } => {
                let arguments = underlying.as_named().unwrap().type_arguments().unwrap();
                assert!(Arc::ptr_eq(&arguments[0], &interop));
            }
            other => panic!("Expected IllegalInteropInstantiation, got {:?}", other),
        }
        assert_eq!(result.to_string(), "N.G`1<Interop.IRange>");
    }

    #[test]
    fn test_missing_flags_are_treated_as_not_local() {
        let module = create_interop_module();
        let factory = SymbolFactory::new(&module);
        let generic = create_named(&create_generic_class(0x40B, "N", "G`1", &["T"]));
        let int32 = module.special_type(SpecialType::Int32);

        let result = factory.instantiate(&generic, vec![int32], &[]);
        assert!(!result.is_illegal_interop());
        assert!(!result.is_unsupported());
    }

    #[test]
    fn test_exempt_count_for_nested_interfaces() {
        let module = create_interop_module();
        let factory = SymbolFactory::new(&module);

        let outer = create_generic_interface(0x40C, "N", "I2`1", &["U"]);
        let inner = create_nested(&outer, create_generic_interface(0x40D, "", "I1`1", &["T"]));
        assert_eq!(factory.checked_argument_count(&inner, 2), 1);
        assert_eq!(factory.checked_argument_count(&outer, 1), 1);

        let class_outer = create_generic_class(0x40E, "N", "C`1", &["U"]);
        let in_class = create_nested(&class_outer, create_generic_interface(0x40F, "", "I`1", &["T"]));
        assert_eq!(factory.checked_argument_count(&in_class, 2), 1);

        let class_inner = create_nested(&outer, create_generic_class(0x410, "", "D`1", &["T"]));
        assert_eq!(factory.checked_argument_count(&class_inner, 2), 2);
    }

    #[test]
    fn test_exempt_walk_is_bounded() {
        let module = create_interop_module();
        let factory = SymbolFactory::new(&module);

        let a = create_generic_interface(0x411, "N", "A`1", &["T"]);
        let b = create_nested(&a, create_generic_interface(0x412, "", "B`1", &["U"]));
        a.set_containing(&b).unwrap();

        assert_eq!(factory.checked_argument_count(&b, 2), 0);
        let result = factory.instantiate(&create_named(&b), vec![module.special_type(SpecialType::Int32)], &[false]);
        assert!(matches!(result.unsupported_cause(), Some(Error::RecursionLimit(64))));
    }
}
