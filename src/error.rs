use thiserror::Error;

use crate::metadata::{token::Token, typesystem::SpecialType};

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, covering every fault this library can describe.
///
/// Most of the crate never *returns* an `Error`: symbol construction is total, and a
/// fault reported by the metadata reader is folded into an
/// [`crate::metadata::typesystem::TypeSymbol::Unsupported`] value that carries the error
/// as its cause. The variants therefore double as the diagnostic payload of poisoned
/// symbols, which is why the type is `Clone` and comparable.
///
/// # Error Categories
///
/// ## Decode Faults
/// - [`Error::Malformed`] - The metadata describes something structurally impossible
/// - [`Error::OutOfBounds`] - An index or count points outside its table
/// - [`Error::NotSupported`] - A construct this crate does not model
///
/// ## Type System Errors
/// - [`Error::TypeNotFound`] - A token did not resolve to a known type definition
/// - [`Error::SpecialTypeMissing`] - The module does not define a requested special type
/// - [`Error::TypeError`] - General type system setup error
/// - [`Error::RecursionLimit`] - Maximum nesting or signature depth exceeded
///
/// # Examples
///
/// ```rust
/// use symscope::{Error, metadata::identity::AssemblyIdentity};
///
/// match AssemblyIdentity::parse("") {
///     Ok(identity) => println!("Parsed {}", identity),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The metadata is damaged and could not be interpreted.
    ///
    /// The error includes the source location where the malformation was detected
    /// for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while interpreting a descriptor.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// The construct is valid metadata but cannot be modeled.
    #[error("This construct is not supported")]
    NotSupported,

    /// Failed to find a type definition for the given token.
    #[error("Failed to find type - {0}")]
    TypeNotFound(Token),

    /// The module does not provide the requested special type.
    #[error("Special type {0:?} is not defined by this module")]
    SpecialTypeMissing(SpecialType),

    /// General error during type system setup.
    #[error("{0}")]
    TypeError(String),

    /// Recursion limit reached.
    ///
    /// Signature resolution and containing-type walks are bounded so that
    /// malformed, self-referencing metadata cannot hang the caller. The associated
    /// value shows the limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
