//! Assembly identity for origin tracking of materialized types.
//!
//! Every [`crate::metadata::typesystem::TypeDefinition`] records the assembly it was defined
//! in. The generic instantiation engine compares these identities against the set of linked
//! (embedded-interop) referenced assemblies of the current module, so identity equality
//! follows .NET binding rules: the simple name compares case-insensitively, version and
//! culture compare exactly.
//!
//! # Key Types
//! - [`AssemblyIdentity`] - Simple name, four-part version and culture
//! - [`AssemblyVersion`] - Four-part version numbering (major.minor.build.revision)
//!
//! # Example
//! ```rust
//! use symscope::metadata::identity::{AssemblyIdentity, AssemblyVersion};
//!
//! let interop = AssemblyIdentity::parse("Interop.Excel, Version=1.7.0.0, Culture=neutral")?;
//! assert_eq!(interop.version, AssemblyVersion::new(1, 7, 0, 0));
//! assert_eq!(interop, AssemblyIdentity::parse("interop.excel, Version=1.7.0.0")?);
//! # Ok::<(), symscope::Error>(())
//! ```

use std::{
    fmt::{self, Write},
    hash::{Hash, Hasher},
    str::FromStr,
};

use crate::Result;

/// Identifies the assembly a type definition originates from.
#[derive(Debug, Clone)]
pub struct AssemblyIdentity {
    /// Simple assembly name (e.g., "mscorlib", "Interop.Excel").
    pub name: String,
    /// Four-part version number.
    pub version: AssemblyVersion,
    /// Culture for satellite assemblies; `None` is culture-neutral.
    pub culture: Option<String>,
}

impl PartialEq for AssemblyIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.version == other.version
            && self.culture == other.culture
    }
}

impl Eq for AssemblyIdentity {}

impl Hash for AssemblyIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with the case-insensitive equality above
        self.name.to_ascii_lowercase().hash(state);
        self.version.hash(state);
        self.culture.hash(state);
    }
}

/// Four-part version numbering for .NET assemblies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AssemblyVersion {
    /// Major version component.
    pub major: u16,
    /// Minor version component.
    pub minor: u16,
    /// Build version component.
    pub build: u16,
    /// Revision version component.
    pub revision: u16,
}

impl AssemblyIdentity {
    /// Create a new assembly identity.
    ///
    /// # Arguments
    /// * `name`    - Simple assembly name
    /// * `version` - Four-part version number
    /// * `culture` - Optional culture for localized assemblies
    pub fn new(name: impl Into<String>, version: AssemblyVersion, culture: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
            culture,
        }
    }

    /// Parse an assembly display name.
    ///
    /// ```text
    /// AssemblyName[, Version=Major.Minor.Build.Revision][, Culture=culture][, ...]
    /// ```
    ///
    /// Components other than `Version` and `Culture` (public key token, architecture)
    /// are accepted and ignored; they do not take part in origin matching.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the name is empty or the version is invalid.
    pub fn parse(display_name: &str) -> Result<Self> {
        let mut parts = display_name.split(',').map(str::trim);

        let name = parts.next().unwrap_or_default().to_string();
        if name.is_empty() {
            return Err(malformed_error!("Assembly name cannot be empty"));
        }

        let mut version = AssemblyVersion::default();
        let mut culture = None;
        for part in parts {
            if let Some(value) = part.strip_prefix("Version=") {
                version = AssemblyVersion::parse(value)?;
            } else if let Some(value) = part.strip_prefix("Culture=") {
                if value != "neutral" && !value.is_empty() {
                    culture = Some(value.to_string());
                }
            }
        }

        Ok(Self {
            name,
            version,
            culture,
        })
    }

    /// Generate the display name for this identity.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut result = String::with_capacity(self.name.len() + 40);
        result.push_str(&self.name);
        let _ = write!(result, ", Version={}", self.version);
        let _ = write!(
            result,
            ", Culture={}",
            self.culture.as_deref().unwrap_or("neutral")
        );
        result
    }
}

impl AssemblyVersion {
    /// Create a new assembly version with the specified components.
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Parse a dotted version string; missing trailing components default to zero.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for empty input, more than four components,
    /// or components that do not fit into 16 bits.
    pub fn parse(version: &str) -> Result<Self> {
        let mut components = [0u16; 4];
        let mut count = 0;

        for part in version.split('.') {
            if count == components.len() {
                return Err(malformed_error!("Too many version components in '{}'", version));
            }
            components[count] = part
                .trim()
                .parse::<u16>()
                .map_err(|e| malformed_error!("Invalid version component '{}': {}", part, e))?;
            count += 1;
        }

        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for AssemblyIdentity {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
