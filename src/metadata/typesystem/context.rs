//! The module context consulted while materializing type symbols.
//!
//! Symbol construction never decodes metadata itself. Everything it needs to know about the
//! module being read goes through [`ModuleContext`]: the identity of the containing assembly,
//! special-type lookup, the `System.Type` symbol, the referenced assemblies linked for
//! embedded interop, and whether the module declares embedded-interop local types itself.
//!
//! [`ModuleInfo`] is the concrete context. It is filled while the owning module loads and is
//! effectively read-only afterwards; all lookups go through `DashMap` and atomics, so any
//! number of threads can materialize symbols against one `ModuleInfo` at the same time.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use symscope::metadata::{
//!     identity::{AssemblyIdentity, AssemblyVersion},
//!     token::Token,
//!     typesystem::{ModuleContext, ModuleInfo, SpecialType, TypeAttributes, TypeDefinition},
//! };
//!
//! let corlib = AssemblyIdentity::new("mscorlib", AssemblyVersion::new(4, 0, 0, 0), None);
//! let module = ModuleInfo::new(corlib.clone());
//!
//! let int32 = TypeDefinition::new(
//!     Token::new(0x0200_0001), "System", "Int32", TypeAttributes::SEALED, corlib,
//! )
//! .with_special(SpecialType::Int32);
//! module.register_type(Arc::new(int32))?;
//!
//! assert_eq!(module.special_type(SpecialType::Int32).to_string(), "System.Int32");
//! assert!(module.special_type(SpecialType::Double).is_unsupported());
//! # Ok::<(), symscope::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, OnceLock,
};

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    metadata::{
        identity::AssemblyIdentity,
        token::Token,
        typesystem::{SpecialType, TypeDefinitionRc, TypeSymbol, TypeSymbolRc},
    },
    Error::{SpecialTypeMissing, TypeError},
    Result,
};

/// Read-only view of the module whose metadata is being materialized
pub trait ModuleContext {
    /// Identity of the assembly containing the module
    fn containing_assembly(&self) -> &AssemblyIdentity;

    /// Look up a special type; a type the module cannot provide is returned as an
    /// `Unsupported` symbol carrying the reason
    ///
    /// ## Arguments
    /// * `special` - The special type to look up
    fn special_type(&self, special: SpecialType) -> TypeSymbolRc;

    /// The `System.Type` symbol
    fn system_type(&self) -> TypeSymbolRc;

    /// Referenced assemblies linked for embedded interop (sources of local types)
    fn linked_assemblies(&self) -> &[AssemblyIdentity];

    /// Returns true if the module itself declares embedded-interop local types
    fn has_embedded_local_types(&self) -> bool;
}

/// Token-based access to type definitions, used by the signature resolver
pub trait DefinitionLookup {
    /// Find the definition a `TypeDef` / `TypeRef` token refers to
    ///
    /// ## Arguments
    /// * `token` - The token to look up
    fn definition(&self, token: Token) -> Option<TypeDefinitionRc>;
}

/// Context information of one loaded module
pub struct ModuleInfo {
    identity: AssemblyIdentity,
    linked: Vec<AssemblyIdentity>,
    local_types: AtomicBool,
    special: DashMap<SpecialType, TypeSymbolRc>,
    system_type: OnceLock<TypeSymbolRc>,
    types: DashMap<Token, TypeDefinitionRc>,
    types_by_fullname: DashMap<String, Vec<Token>>,
}

impl ModuleInfo {
    /// Create a new, empty module context
    ///
    /// ## Arguments
    /// * `identity` - Identity of the assembly containing the module
    pub fn new(identity: AssemblyIdentity) -> Self {
        ModuleInfo {
            identity,
            linked: Vec::new(),
            local_types: AtomicBool::new(false),
            special: DashMap::new(),
            system_type: OnceLock::new(),
            types: DashMap::new(),
            types_by_fullname: DashMap::new(),
        }
    }

    /// Add a referenced assembly that is linked for embedded interop
    ///
    /// ## Arguments
    /// * `assembly` - The linked assembly
    #[must_use]
    pub fn with_linked_assembly(mut self, assembly: AssemblyIdentity) -> Self {
        if !self.linked.contains(&assembly) {
            self.linked.push(assembly);
        }
        self
    }

    /// Declare that the module contains embedded-interop local types, even before any
    /// of them has been registered
    #[must_use]
    pub fn with_embedded_local_types(self) -> Self {
        self.local_types.store(true, Ordering::Relaxed);
        self
    }

    /// Register a type definition of this module.
    ///
    /// Special types (classified explicitly or by their well-known name) and `System.Type`
    /// become available through the [`ModuleContext`] lookups, and an embedded-interop
    /// local type defined by this assembly turns on
    /// [`ModuleContext::has_embedded_local_types`].
    ///
    /// ## Arguments
    /// * `definition` - The definition to register
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a definition with the same token is
    /// already registered.
    pub fn register_type(&self, definition: TypeDefinitionRc) -> Result<()> {
        match self.types.entry(definition.token) {
            Entry::Occupied(_) => {
                return Err(malformed_error!(
                    "Duplicate type definition - {}",
                    definition.token
                ))
            }
            Entry::Vacant(entry) => {
                entry.insert(definition.clone());
            }
        }

        self.types_by_fullname
            .entry(definition.fullname())
            .or_default()
            .push(definition.token);

        if let Some(special) = definition.special {
            self.special
                .entry(special)
                .or_insert_with(|| TypeSymbol::named(&definition));
        }

        if definition.namespace == "System" && definition.name == "Type" {
            // First registration wins
            let _ = self.system_type.set(TypeSymbol::named(&definition));
        }

        if definition.is_embedded_local() && definition.assembly == self.identity {
            self.local_types.store(true, Ordering::Relaxed);
        }

        Ok(())
    }

    /// Look up definitions by their full name (`Namespace.Name`, nested with `+`)
    ///
    /// ## Arguments
    /// * `fullname` - The full name to search for
    pub fn get_by_fullname(&self, fullname: &str) -> Vec<TypeDefinitionRc> {
        self.types_by_fullname
            .get(fullname)
            .map(|tokens| {
                tokens
                    .iter()
                    .filter_map(|token| self.types.get(token).map(|entry| entry.value().clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no definitions are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ModuleContext for ModuleInfo {
    fn containing_assembly(&self) -> &AssemblyIdentity {
        &self.identity
    }

    fn special_type(&self, special: SpecialType) -> TypeSymbolRc {
        match self.special.get(&special) {
            Some(entry) => entry.value().clone(),
            None => Arc::new(TypeSymbol::Unsupported {
                cause: Some(Arc::new(SpecialTypeMissing(special))),
            }),
        }
    }

    fn system_type(&self) -> TypeSymbolRc {
        match self.system_type.get() {
            Some(symbol) => symbol.clone(),
            None => Arc::new(TypeSymbol::Unsupported {
                cause: Some(Arc::new(TypeError(format!(
                    "System.Type is not available in {}",
                    self.identity.name
                )))),
            }),
        }
    }

    fn linked_assemblies(&self) -> &[AssemblyIdentity] {
        &self.linked
    }

    fn has_embedded_local_types(&self) -> bool {
        self.local_types.load(Ordering::Relaxed)
    }
}

impl DefinitionLookup for ModuleInfo {
    fn definition(&self, token: Token) -> Option<TypeDefinitionRc> {
        self.types.get(&token).map(|entry| entry.value().clone())
    }
}
