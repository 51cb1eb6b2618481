use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// Types the compiler knows by identity rather than by lookup.
///
/// A type definition carries at most one `SpecialType` classification, assigned by the
/// metadata loader when the definition is recognized (usually inside the core library).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum SpecialType {
    /// System.Object
    Object,
    /// System.Enum
    Enum,
    /// System.ValueType
    ValueType,
    /// System.Void
    Void,
    /// System.Boolean
    Boolean,
    /// System.Char
    Char,
    /// System.SByte
    SByte,
    /// System.Byte
    Byte,
    /// System.Int16
    Int16,
    /// System.UInt16
    UInt16,
    /// System.Int32
    Int32,
    /// System.UInt32
    UInt32,
    /// System.Int64
    Int64,
    /// System.UInt64
    UInt64,
    /// System.Single
    Single,
    /// System.Double
    Double,
    /// System.String
    String,
    /// System.IntPtr
    IntPtr,
    /// System.UIntPtr
    UIntPtr,
    /// System.Runtime.CompilerServices.IsVolatile
    IsVolatile,
}

impl SpecialType {
    /// Full metadata name (`Namespace.Name`) of the special type
    #[must_use]
    pub fn full_name(&self) -> &'static str {
        match self {
            SpecialType::Object => "System.Object",
            SpecialType::Enum => "System.Enum",
            SpecialType::ValueType => "System.ValueType",
            SpecialType::Void => "System.Void",
            SpecialType::Boolean => "System.Boolean",
            SpecialType::Char => "System.Char",
            SpecialType::SByte => "System.SByte",
            SpecialType::Byte => "System.Byte",
            SpecialType::Int16 => "System.Int16",
            SpecialType::UInt16 => "System.UInt16",
            SpecialType::Int32 => "System.Int32",
            SpecialType::UInt32 => "System.UInt32",
            SpecialType::Int64 => "System.Int64",
            SpecialType::UInt64 => "System.UInt64",
            SpecialType::Single => "System.Single",
            SpecialType::Double => "System.Double",
            SpecialType::String => "System.String",
            SpecialType::IntPtr => "System.IntPtr",
            SpecialType::UIntPtr => "System.UIntPtr",
            SpecialType::IsVolatile => "System.Runtime.CompilerServices.IsVolatile",
        }
    }

    /// Look up a special type by its full metadata name
    ///
    /// ## Arguments
    /// * `full_name` - `Namespace.Name` of the candidate type
    #[must_use]
    pub fn from_full_name(full_name: &str) -> Option<Self> {
        SpecialType::iter().find(|special| special.full_name() == full_name)
    }

    /// The primitive type code this special type maps to
    #[must_use]
    pub fn primitive_code(&self) -> PrimitiveTypeCode {
        match self {
            SpecialType::Void => PrimitiveTypeCode::Void,
            SpecialType::Boolean => PrimitiveTypeCode::Boolean,
            SpecialType::Char => PrimitiveTypeCode::Char,
            SpecialType::SByte => PrimitiveTypeCode::I1,
            SpecialType::Byte => PrimitiveTypeCode::U1,
            SpecialType::Int16 => PrimitiveTypeCode::I2,
            SpecialType::UInt16 => PrimitiveTypeCode::U2,
            SpecialType::Int32 => PrimitiveTypeCode::I4,
            SpecialType::UInt32 => PrimitiveTypeCode::U4,
            SpecialType::Int64 => PrimitiveTypeCode::I8,
            SpecialType::UInt64 => PrimitiveTypeCode::U8,
            SpecialType::Single => PrimitiveTypeCode::R4,
            SpecialType::Double => PrimitiveTypeCode::R8,
            SpecialType::String => PrimitiveTypeCode::String,
            SpecialType::IntPtr => PrimitiveTypeCode::I,
            SpecialType::UIntPtr => PrimitiveTypeCode::U,
            SpecialType::Object
            | SpecialType::Enum
            | SpecialType::ValueType
            | SpecialType::IsVolatile => PrimitiveTypeCode::NotPrimitive,
        }
    }

    /// Returns true if values of this type are valid enum underlying types
    #[must_use]
    pub fn is_valid_enum_underlying(&self) -> bool {
        matches!(
            self,
            SpecialType::SByte
                | SpecialType::Byte
                | SpecialType::Int16
                | SpecialType::UInt16
                | SpecialType::Int32
                | SpecialType::UInt32
                | SpecialType::Int64
                | SpecialType::UInt64
                | SpecialType::Char
                | SpecialType::Boolean
        )
    }
}

/// Primitive classification of a type symbol, as consumed by code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTypeCode {
    /// System.Boolean - true/false value
    Boolean,
    /// System.Char - Unicode 16-bit character
    Char,
    /// System.SByte - signed 8-bit integer
    I1,
    /// System.Byte - unsigned 8-bit integer
    U1,
    /// System.Int16 - signed 16-bit integer
    I2,
    /// System.UInt16 - unsigned 16-bit integer
    U2,
    /// System.Int32 - signed 32-bit integer
    I4,
    /// System.UInt32 - unsigned 32-bit integer
    U4,
    /// System.Int64 - signed 64-bit integer
    I8,
    /// System.UInt64 - unsigned 64-bit integer
    U8,
    /// System.Single - 32-bit floating point
    R4,
    /// System.Double - 64-bit floating point
    R8,
    /// System.IntPtr - native sized signed integer
    I,
    /// System.UIntPtr - native sized unsigned integer
    U,
    /// System.String
    String,
    /// System.Void
    Void,
    /// Unmanaged pointer
    Pointer,
    /// Managed reference
    ByRef,
    /// Anything else
    NotPrimitive,
}
