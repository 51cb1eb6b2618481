//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use symscope::{metadata::token::TABLE, prelude::*};

pub fn core_assembly() -> AssemblyIdentity {
    AssemblyIdentity::new("System.Runtime", AssemblyVersion::new(8, 0, 0, 0), None)
}

pub fn app_assembly() -> AssemblyIdentity {
    AssemblyIdentity::new("ConsumerApp", AssemblyVersion::new(1, 0, 0, 0), None)
}

pub fn interop_assembly() -> AssemblyIdentity {
    AssemblyIdentity::new("Interop.Excel", AssemblyVersion::new(1, 9, 0, 0), None)
}

/// Register a type definition with `module`, declaring `params` as its own type parameters
pub fn define(
    module: &ModuleInfo,
    row: u32,
    namespace: &str,
    name: &str,
    flags: TypeAttributes,
    params: &[&str],
) -> Result<TypeDefinitionRc> {
    define_in(module, core_assembly(), row, namespace, name, flags, params)
}

pub fn define_in(
    module: &ModuleInfo,
    assembly: AssemblyIdentity,
    row: u32,
    namespace: &str,
    name: &str,
    flags: TypeAttributes,
    params: &[&str],
) -> Result<TypeDefinitionRc> {
    let mut definition = TypeDefinition::new(
        Token::from_parts(TABLE::TYPE_DEF, row),
        namespace,
        name,
        flags,
        assembly,
    );
    for (index, param) in params.iter().enumerate() {
        definition = definition.with_generic_param(
            Token::from_parts(TABLE::GENERIC_PARAM, row * 8 + index as u32),
            *param,
        );
    }

    let definition = Arc::new(definition);
    module.register_type(definition.clone())?;
    Ok(definition)
}

/// Register `name` nested inside `outer`
pub fn define_nested(
    module: &ModuleInfo,
    outer: &TypeDefinitionRc,
    row: u32,
    name: &str,
    flags: TypeAttributes,
    params: &[&str],
) -> Result<TypeDefinitionRc> {
    let mut definition = TypeDefinition::new(
        Token::from_parts(TABLE::TYPE_DEF, row),
        "",
        name,
        flags | TypeAttributes::NESTED_PUBLIC,
        outer.assembly.clone(),
    );
    for (index, param) in params.iter().enumerate() {
        definition = definition.with_generic_param(
            Token::from_parts(TABLE::GENERIC_PARAM, row * 8 + index as u32),
            *param,
        );
    }

    let definition = Arc::new(definition);
    definition.set_containing(outer)?;
    module.register_type(definition.clone())?;
    Ok(definition)
}

fn register_core_types(module: &ModuleInfo) -> Result<()> {
    let specials = [
        (1, SpecialType::Object, TypeAttributes::empty()),
        (2, SpecialType::ValueType, TypeAttributes::ABSTRACT),
        (3, SpecialType::Enum, TypeAttributes::ABSTRACT),
        (4, SpecialType::Int32, TypeAttributes::SEALED),
        (5, SpecialType::Int64, TypeAttributes::SEALED),
        (6, SpecialType::Byte, TypeAttributes::SEALED),
        (7, SpecialType::Boolean, TypeAttributes::SEALED),
        (8, SpecialType::String, TypeAttributes::SEALED),
        (9, SpecialType::Double, TypeAttributes::SEALED),
        (10, SpecialType::IsVolatile, TypeAttributes::SEALED),
    ];

    for (row, special, flags) in specials {
        let (namespace, name) = special
            .full_name()
            .rsplit_once('.')
            .ok_or(Error::NotSupported)?;
        let definition = TypeDefinition::new(
            Token::from_parts(TABLE::TYPE_REF, row),
            namespace,
            name,
            flags,
            core_assembly(),
        )
        .with_special(special);
        module.register_type(Arc::new(definition))?;
    }

    module.register_type(Arc::new(TypeDefinition::new(
        Token::from_parts(TABLE::TYPE_REF, 11),
        "System",
        "Type",
        TypeAttributes::ABSTRACT,
        core_assembly(),
    )))?;

    Ok(())
}

/// An application module without any embedded interop
pub fn plain_module() -> Result<ModuleInfo> {
    let module = ModuleInfo::new(app_assembly());
    register_core_types(&module)?;
    Ok(module)
}

/// An application module that links `Interop.Excel` for embedded interop
pub fn interop_module() -> Result<ModuleInfo> {
    let module = ModuleInfo::new(app_assembly()).with_linked_assembly(interop_assembly());
    register_core_types(&module)?;
    Ok(module)
}

/// An embedded-interop local copy of `Interop.<name>`, defined by the module itself
pub fn define_local_interface(module: &ModuleInfo, row: u32, name: &str) -> Result<TypeDefinitionRc> {
    let definition = Arc::new(
        TypeDefinition::new(
            Token::from_parts(TABLE::TYPE_DEF, row),
            "Interop",
            name,
            TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT | TypeAttributes::IMPORT,
            module.containing_assembly().clone(),
        )
        .with_type_identifier(uguid::guid!("000208d5-0000-0000-c000-000000000046")),
    );
    module.register_type(definition.clone())?;
    Ok(definition)
}
