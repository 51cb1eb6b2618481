//! Fixtures shared by the unit tests: assemblies, type definitions and module contexts.

use std::sync::Arc;

use strum::IntoEnumIterator;
use uguid::{guid, Guid};

use crate::metadata::{
    identity::{AssemblyIdentity, AssemblyVersion},
    token::{Token, TABLE},
    typesystem::{
        ModuleContext, ModuleInfo, SpecialType, TypeAttributes, TypeDefinition, TypeDefinitionRc,
        TypeSymbol, TypeSymbolRc,
    },
};

/// Special types registered by `create_core_module`; `Single` and `Double` are left out on
/// purpose so tests can observe a missing special type
const CORE_SPECIALS: &[SpecialType] = &[
    SpecialType::Object,
    SpecialType::ValueType,
    SpecialType::Enum,
    SpecialType::Void,
    SpecialType::Boolean,
    SpecialType::Char,
    SpecialType::Byte,
    SpecialType::Int32,
    SpecialType::Int64,
    SpecialType::String,
    SpecialType::IntPtr,
    SpecialType::UIntPtr,
    SpecialType::IsVolatile,
];

pub fn create_core_assembly() -> AssemblyIdentity {
    AssemblyIdentity::new("mscorlib", AssemblyVersion::new(4, 0, 0, 0), None)
}

pub fn create_app_assembly() -> AssemblyIdentity {
    AssemblyIdentity::new("App", AssemblyVersion::new(1, 0, 0, 0), None)
}

pub fn create_interop_assembly() -> AssemblyIdentity {
    AssemblyIdentity::new("Interop.Office", AssemblyVersion::new(15, 0, 0, 0), None)
}

pub fn create_type_identifier() -> Guid {
    guid!("00020813-0000-0000-c000-000000000046")
}

// Definition of a special type, living in the core assembly
pub fn create_special_definition(special: SpecialType) -> TypeDefinitionRc {
    let index = SpecialType::iter()
        .position(|candidate| candidate == special)
        .unwrap() as u32;
    let (namespace, name) = special.full_name().rsplit_once('.').unwrap();
    let flags = match special {
        SpecialType::Object | SpecialType::String | SpecialType::IsVolatile => {
            TypeAttributes::empty()
        }
        SpecialType::ValueType | SpecialType::Enum => TypeAttributes::ABSTRACT,
        _ => TypeAttributes::SEALED,
    };

    Arc::new(
        TypeDefinition::new(
            Token::from_parts(TABLE::TYPE_DEF, 0xF00 + index),
            namespace,
            name,
            flags,
            create_core_assembly(),
        )
        .with_special(special),
    )
}

pub fn create_object_definition() -> TypeDefinitionRc {
    create_special_definition(SpecialType::Object)
}

pub fn create_named(definition: &TypeDefinitionRc) -> TypeSymbolRc {
    TypeSymbol::named(definition)
}

fn create_generic_definition(
    row: u32,
    namespace: &str,
    name: &str,
    params: &[&str],
    flags: TypeAttributes,
) -> TypeDefinitionRc {
    let mut definition = TypeDefinition::new(
        Token::from_parts(TABLE::TYPE_DEF, row),
        namespace,
        name,
        flags,
        create_core_assembly(),
    );
    for (index, param) in params.iter().enumerate() {
        definition = definition.with_generic_param(
            Token::from_parts(TABLE::GENERIC_PARAM, row * 16 + index as u32),
            *param,
        );
    }
    Arc::new(definition)
}

// A class in the core assembly declaring `params`; pass an empty slice for a non-generic class
pub fn create_generic_class(row: u32, namespace: &str, name: &str, params: &[&str]) -> TypeDefinitionRc {
    create_generic_definition(row, namespace, name, params, TypeAttributes::empty())
}

pub fn create_generic_interface(
    row: u32,
    namespace: &str,
    name: &str,
    params: &[&str],
) -> TypeDefinitionRc {
    create_generic_definition(
        row,
        namespace,
        name,
        params,
        TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT,
    )
}

// Nest `inner` inside `outer` and return `inner`
pub fn create_nested(outer: &TypeDefinitionRc, inner: TypeDefinitionRc) -> TypeDefinitionRc {
    inner.set_containing(outer).unwrap();
    inner
}

// The canonical COM interface, as defined by the interop assembly itself
pub fn create_interop_interface(row: u32, name: &str) -> TypeDefinitionRc {
    Arc::new(TypeDefinition::new(
        Token::from_parts(TABLE::TYPE_DEF, row),
        "Interop",
        name,
        TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT | TypeAttributes::IMPORT,
        create_interop_assembly(),
    ))
}

// A local copy of an interop interface embedded into `module`, registered with it
pub fn create_local_interface(module: &ModuleInfo, row: u32, name: &str) -> TypeDefinitionRc {
    let definition = Arc::new(
        TypeDefinition::new(
            Token::from_parts(TABLE::TYPE_DEF, row),
            "Interop",
            name,
            TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT | TypeAttributes::IMPORT,
            module.containing_assembly().clone(),
        )
        .with_type_identifier(create_type_identifier()),
    );
    module.register_type(definition.clone()).unwrap();
    definition
}

pub fn register_core_types(module: &ModuleInfo) {
    for special in CORE_SPECIALS {
        module
            .register_type(create_special_definition(*special))
            .unwrap();
    }

    let system_type = TypeDefinition::new(
        Token::from_parts(TABLE::TYPE_DEF, 0xEFF),
        "System",
        "Type",
        TypeAttributes::ABSTRACT,
        create_core_assembly(),
    );
    module.register_type(Arc::new(system_type)).unwrap();
}

pub fn create_core_module() -> ModuleInfo {
    let module = ModuleInfo::new(create_core_assembly());
    register_core_types(&module);
    module
}

// The application module, linking the interop assembly for embedded interop
pub fn create_interop_module() -> ModuleInfo {
    let module = ModuleInfo::new(create_app_assembly()).with_linked_assembly(create_interop_assembly());
    register_core_types(&module);
    module
}

// An enum `N.<name>` over `underlying`, registered with `module`
pub fn create_enum(module: &ModuleInfo, row: u32, name: &str, underlying: SpecialType) -> TypeSymbolRc {
    let definition = Arc::new(TypeDefinition::new(
        Token::from_parts(TABLE::TYPE_DEF, row),
        "N",
        name,
        TypeAttributes::SEALED,
        module.containing_assembly().clone(),
    ));
    definition
        .set_base(module.special_type(SpecialType::Enum))
        .unwrap();
    definition
        .set_enum_underlying(module.special_type(underlying))
        .unwrap();
    module.register_type(definition.clone()).unwrap();
    create_named(&definition)
}
