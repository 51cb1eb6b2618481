//! Nominal type definitions backing [`crate::metadata::typesystem::TypeSymbol::Named`].
//!
//! A [`TypeDefinition`] is what the metadata loader produces for a `TypeDef` (or a resolved
//! `TypeRef`) row: identity, flags, owning assembly, its own generic parameters, and the
//! parts of its shape that may mention those parameters (base type, interfaces, enum
//! underlying type). The shape is written once while the owning module loads and is
//! read-only afterwards, which is what makes symbol construction safe to run concurrently.
//!
//! Nesting is a lookup, not ownership: a nested definition holds a [`Weak`] reference to
//! its containing definition, while the module keeps the strong references.

use std::{
    fmt,
    sync::{Arc, OnceLock, Weak},
};

use uguid::Guid;

use crate::{
    metadata::{
        config::DEFAULT_MAX_NESTING_DEPTH,
        identity::AssemblyIdentity,
        token::Token,
        typesystem::{SpecialType, TypeAttributes, TypeSymbolRc},
    },
    Error::RecursionLimit,
    Result,
};

/// Reference to a `TypeDefinition`
pub type TypeDefinitionRc = Arc<TypeDefinition>;
/// Reference to a `GenericParameter`
pub type GenericParameterRc = Arc<GenericParameter>;

/// A formal type parameter declared by exactly one type definition.
///
/// Identity is the `GenericParam` token, so two parameters compare equal only if they
/// are the same row.
#[derive(Debug, Clone)]
pub struct GenericParameter {
    /// `GenericParam` token
    pub token: Token,
    /// Declared name (`T`, `TKey`, ...)
    pub name: String,
    /// Position within the declaring type's own parameter list
    pub ordinal: u32,
}

impl PartialEq for GenericParameter {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for GenericParameter {}

/// A nominal type as read from metadata.
pub struct TypeDefinition {
    /// Token
    pub token: Token,
    /// `TypeNamespace` (empty for nested types)
    pub namespace: String,
    /// `TypeName`, including the arity suffix (e.g. ``List`1``)
    pub name: String,
    /// `TypeAttributes` flags
    pub flags: TypeAttributes,
    /// The assembly that defines this type
    pub assembly: AssemblyIdentity,
    /// The type parameters this type declares itself, excluding those of containing types
    pub generic_params: Vec<GenericParameterRc>,
    /// Special-type classification, if the loader recognized the type
    pub special: Option<SpecialType>,
    /// `TypeIdentifier` GUID; present if and only if this is an embedded-interop local type
    pub type_identifier: Option<Guid>,
    containing: OnceLock<Weak<TypeDefinition>>,
    base: OnceLock<TypeSymbolRc>,
    enum_underlying: OnceLock<TypeSymbolRc>,
    /// All interfaces this type implements
    pub interfaces: boxcar::Vec<TypeSymbolRc>,
}

impl TypeDefinition {
    /// Create a new, non-generic type definition
    ///
    /// A definition whose `Namespace.Name` is one of the well-known names of
    /// [`SpecialType`] is classified as that special type; [`TypeDefinition::with_special`]
    /// overrides the classification.
    ///
    /// ## Arguments
    /// * `token`     - The `TypeDef` or `TypeRef` token
    /// * `namespace` - Namespace of the type
    /// * `name`      - Name of the type
    /// * `flags`     - `TypeAttributes` of the type
    /// * `assembly`  - The defining assembly
    pub fn new(
        token: Token,
        namespace: impl Into<String>,
        name: impl Into<String>,
        flags: TypeAttributes,
        assembly: AssemblyIdentity,
    ) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        let special = SpecialType::from_full_name(&format!("{}.{}", namespace, name));

        TypeDefinition {
            token,
            namespace,
            name,
            flags,
            assembly,
            generic_params: Vec::new(),
            special,
            type_identifier: None,
            containing: OnceLock::new(),
            base: OnceLock::new(),
            enum_underlying: OnceLock::new(),
            interfaces: boxcar::Vec::new(),
        }
    }

    /// Declare the next own generic parameter
    ///
    /// ## Arguments
    /// * `token` - The `GenericParam` token
    /// * `name`  - The parameter name
    #[must_use]
    pub fn with_generic_param(mut self, token: Token, name: impl Into<String>) -> Self {
        let ordinal = u32::try_from(self.generic_params.len()).unwrap_or(u32::MAX);
        self.generic_params.push(Arc::new(GenericParameter {
            token,
            name: name.into(),
            ordinal,
        }));
        self
    }

    /// Classify this definition as a special type
    #[must_use]
    pub fn with_special(mut self, special: SpecialType) -> Self {
        self.special = Some(special);
        self
    }

    /// Mark this definition as an embedded-interop local type with the given identifier
    #[must_use]
    pub fn with_type_identifier(mut self, guid: Guid) -> Self {
        self.type_identifier = Some(guid);
        self
    }

    /// Record the containing type of a nested definition
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the containing type was already set.
    pub fn set_containing(&self, containing: &TypeDefinitionRc) -> Result<()> {
        self.containing
            .set(Arc::downgrade(containing))
            .map_err(|_| malformed_error!("Containing type of {} already set", self.token))
    }

    /// Record the base type
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the base type was already set.
    pub fn set_base(&self, base: TypeSymbolRc) -> Result<()> {
        self.base
            .set(base)
            .map_err(|_| malformed_error!("Base type of {} already set", self.token))
    }

    /// Record the underlying type of an enum definition
    ///
    /// The underlying type must be one of the integral special types (including `Char`
    /// and `Boolean`), or poison standing in for one that could not be resolved.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the underlying type is not integral or was
    /// already set.
    pub fn set_enum_underlying(&self, underlying: TypeSymbolRc) -> Result<()> {
        let integral = underlying.is_unsupported()
            || underlying
                .special_type()
                .is_some_and(|special| special.is_valid_enum_underlying());
        if !integral {
            return Err(malformed_error!(
                "Enum {} declares non-integral underlying type {}",
                self.token,
                underlying
            ));
        }

        self.enum_underlying
            .set(underlying)
            .map_err(|_| malformed_error!("Enum underlying type of {} already set", self.token))
    }

    /// The containing type, if this is a nested type and the container is still alive
    #[must_use]
    pub fn containing_type(&self) -> Option<TypeDefinitionRc> {
        self.containing.get().and_then(Weak::upgrade)
    }

    /// The declared base type, in terms of this definition's own type parameters
    #[must_use]
    pub fn base_type(&self) -> Option<TypeSymbolRc> {
        self.base.get().cloned()
    }

    /// The declared enum underlying type; `None` for anything that is not an enum
    #[must_use]
    pub fn enum_underlying_type(&self) -> Option<TypeSymbolRc> {
        self.enum_underlying.get().cloned()
    }

    /// Number of type parameters declared by this type itself
    #[must_use]
    pub fn arity(&self) -> usize {
        self.generic_params.len()
    }

    /// Check if this type is an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags.contains(TypeAttributes::INTERFACE)
    }

    /// Check if this type is an embedded-interop local type
    #[must_use]
    pub fn is_embedded_local(&self) -> bool {
        self.type_identifier.is_some()
    }

    /// Returns the full name of the type; nested types are joined with `+`.
    ///
    /// Cyclic (malformed) nesting cannot be named; such a type renders as its bare name.
    #[must_use]
    pub fn fullname(&self) -> String {
        let Ok(containers) = self.containers(DEFAULT_MAX_NESTING_DEPTH) else {
            return self.name.clone();
        };

        let outermost = containers.last().map_or(self, |containing| &**containing);
        let mut fullname = if outermost.namespace.is_empty() {
            outermost.name.clone()
        } else {
            format!("{}.{}", outermost.namespace, outermost.name)
        };

        if !containers.is_empty() {
            for nested in containers.iter().rev().skip(1) {
                fullname.push('+');
                fullname.push_str(&nested.name);
            }
            fullname.push('+');
            fullname.push_str(&self.name);
        }

        fullname
    }

    /// This definition followed by its containing definitions, innermost first.
    ///
    /// # Errors
    /// Returns [`crate::Error::RecursionLimit`] if the chain would hold more than
    /// `max_depth` definitions, which only happens for cyclic (malformed) nesting.
    pub fn nesting_chain(self: &Arc<Self>, max_depth: usize) -> Result<Vec<TypeDefinitionRc>> {
        let mut chain = vec![self.clone()];
        chain.extend(self.containers(max_depth)?);
        Ok(chain)
    }

    // Containing definitions, innermost first; together with `self` at most `max_depth`
    fn containers(&self, max_depth: usize) -> Result<Vec<TypeDefinitionRc>> {
        let mut containers = Vec::new();
        let mut current = self.containing_type();
        while let Some(containing) = current {
            if containers.len() + 1 >= max_depth {
                return Err(RecursionLimit(max_depth));
            }
            current = containing.containing_type();
            containers.push(containing);
        }
        Ok(containers)
    }

    /// The flattened formal type parameters of this type and all containing types,
    /// outermost type first. This is the order in which metadata lists the arguments of
    /// a generic instantiation.
    ///
    /// # Errors
    /// Returns [`crate::Error::RecursionLimit`] if the nesting chain exceeds `max_depth`.
    pub fn all_type_parameters(
        self: &Arc<Self>,
        max_depth: usize,
    ) -> Result<Vec<GenericParameterRc>> {
        let chain = self.nesting_chain(max_depth)?;
        Ok(chain
            .iter()
            .rev()
            .flat_map(|definition| definition.generic_params.iter().cloned())
            .collect())
    }
}

impl PartialEq for TypeDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
            && self.assembly == other.assembly
            && self.namespace == other.namespace
            && self.name == other.name
    }
}

impl fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDefinition")
            .field("token", &self.token)
            .field("fullname", &self.fullname())
            .field("flags", &self.flags)
            .field("assembly", &self.assembly.name)
            .field("arity", &self.arity())
            .field("special", &self.special)
            .field("embedded_local", &self.is_embedded_local())
            .finish()
    }
}
