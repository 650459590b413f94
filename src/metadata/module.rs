//! Module dumps, the unit of input.
//!
//! A module dump is the JSON serialization of the type definitions of one compiled module
//! (`Assembly-CSharp.dll`, `UnityEngine.CoreModule.dll`, ...):
//!
//! ```json
//! {
//!     "name": "Assembly-CSharp",
//!     "types": [
//!         {
//!             "namespace": "Game",
//!             "name": "Player",
//!             "kind": "class",
//!             "base": { "kind": "named", "name": "UnityEngine.MonoBehaviour" },
//!             "fields": [
//!                 { "name": "health", "type": { "kind": "named", "name": "System.Int32" } }
//!             ]
//!         }
//!     ]
//! }
//! ```
//!
//! Dumps are validated after decoding; a dump that fails validation is rejected as a whole.

use std::{collections::HashSet, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    file::File,
    metadata::{
        registry::{nested_identity, NESTED_SEPARATOR},
        TypeDescriptor,
    },
    Error, Result,
};

/// The type definitions of one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDump {
    /// Module name, used for reporting
    pub name: String,
    /// Top-level type definitions in declaration order
    #[serde(default)]
    pub types: Vec<Arc<TypeDescriptor>>,
}

impl ModuleDump {
    /// Load and validate a module dump from disk.
    ///
    /// # Errors
    /// Returns an error if the file can not be read, is not a module dump, or fails
    /// [`ModuleDump::validate`].
    pub fn from_file(path: &Path) -> Result<ModuleDump> {
        let dump: ModuleDump = File::from_file(path)?.parse_json()?;
        dump.validate()?;
        Ok(dump)
    }

    /// Decode and validate a module dump held in memory.
    ///
    /// # Errors
    /// Returns an error if `data` is not a module dump or fails [`ModuleDump::validate`].
    pub fn from_mem(data: Vec<u8>) -> Result<ModuleDump> {
        let dump: ModuleDump = File::from_mem(data)?.parse_json()?;
        dump.validate()?;
        Ok(dump)
    }

    /// Check the structural rules decoding alone can not enforce.
    ///
    /// The module name and every type name must be non-empty and free of the nesting
    /// separator `/`. Nested types must not carry a namespace, and no identity may occur
    /// twice.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] or [`crate::Error::DuplicateType`].
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(malformed_error!("Module name is empty"));
        }

        let mut seen = HashSet::new();
        for descriptor in &self.types {
            if descriptor.name.is_empty() {
                return Err(malformed_error!(
                    "Type with empty name in namespace '{}' of module {}",
                    descriptor.namespace,
                    self.name
                ));
            }
            if descriptor.name.contains(NESTED_SEPARATOR) {
                return Err(malformed_error!(
                    "Type name '{}' in module {} contains '{}'",
                    descriptor.name,
                    self.name,
                    NESTED_SEPARATOR
                ));
            }

            let identity = descriptor.fullname();
            Self::validate_nested(&identity, descriptor, &mut seen)?;
            if !seen.insert(identity.clone()) {
                return Err(Error::DuplicateType(identity));
            }
        }

        Ok(())
    }

    fn validate_nested(
        parent: &str,
        descriptor: &TypeDescriptor,
        seen: &mut HashSet<String>,
    ) -> Result<()> {
        for nested in &descriptor.nested_types {
            if nested.name.is_empty() {
                return Err(malformed_error!("Nested type with empty name in {}", parent));
            }
            if nested.name.contains(NESTED_SEPARATOR) {
                return Err(malformed_error!(
                    "Nested type name '{}' in {} contains '{}'",
                    nested.name,
                    parent,
                    NESTED_SEPARATOR
                ));
            }
            if !nested.namespace.is_empty() {
                return Err(malformed_error!(
                    "Nested type {}/{} declares namespace '{}'",
                    parent,
                    nested.name,
                    nested.namespace
                ));
            }

            let identity = nested_identity(parent, &nested.name);
            Self::validate_nested(&identity, nested, seen)?;
            if !seen.insert(identity.clone()) {
                return Err(Error::DuplicateType(identity));
            }
        }

        Ok(())
    }

    /// Number of type definitions including nested types
    #[must_use]
    pub fn type_count(&self) -> usize {
        fn count(descriptor: &TypeDescriptor) -> usize {
            1 + descriptor.nested_types.iter().map(|n| count(n)).sum::<usize>()
        }

        self.types.iter().map(|t| count(t)).sum()
    }
}
