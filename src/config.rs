//! Generator configuration.
//!
//! [`TypeMap`] decides how well-known runtime types are spelled in C++ and which BNM header
//! provides each spelling. The defaults cover the primitive CLR types, the BNM Mono
//! structures and the Unity math structures; a JSON file can be layered on top with
//! [`TypeMap::merge_file`]:
//!
//! ```json
//! {
//!     "types": {
//!         "System.Decimal": { "spelling": "::BNM::Types::decimal", "include": "BNM/Defaults.hpp" }
//!     },
//!     "containers": {
//!         "System.Collections.Generic.HashSet`1": {
//!             "spelling": "::BNM::Structures::Mono::HashSet<{args}>*",
//!             "include": "BNM/ComplexMonoStructures.hpp"
//!         }
//!     }
//! }
//! ```
//!
//! All sections are optional. Entries in `types` and `containers` are added or replaced one
//! by one, the scalar sections replace the defaults.
//!
//! [`GeneratorConfig`] bundles the type map with the remaining knobs of a generation run.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::{file::File, metadata::TypeDescriptor, Result};

/// Placeholder replaced by the spelled type arguments in container and array spellings
pub const ARGS_PLACEHOLDER: &str = "{args}";

/// Default banner line written below `#pragma once`
pub const DEFAULT_BANNER: &str = "Generated by bnm-sdkgen";

/// A C++ spelling together with the header that declares it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedType {
    /// The C++ type as written at the use site
    pub spelling: String,
    /// Include token (`BNM/Defaults.hpp`), written as `#include <...>`
    pub include: String,
}

impl MappedType {
    /// Create a new mapping
    pub fn new(spelling: impl Into<String>, include: impl Into<String>) -> Self {
        MappedType {
            spelling: spelling.into(),
            include: include.into(),
        }
    }

    /// Substitute the spelled type arguments into a container spelling
    #[must_use]
    pub fn render(&self, args: &str) -> String {
        self.spelling.replace(ARGS_PLACEHOLDER, args)
    }
}

/// Spelling tables for well-known types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMap {
    /// Identity to spelling for non-generic well-known types
    pub types: BTreeMap<String, MappedType>,
    /// Generic definition identity to container spelling (with `{args}`)
    pub containers: BTreeMap<String, MappedType>,
    /// Spelling of managed arrays (with `{args}`)
    pub array: MappedType,
    /// Spelling used for references that do not resolve to an emitted type
    pub external_object: MappedType,
    /// Spelling used for value types whose layout is not reproduced
    pub opaque_value: String,
}

/// Partial [`TypeMap`] as read from a configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeMapOverlay {
    #[serde(default)]
    types: BTreeMap<String, MappedType>,
    #[serde(default)]
    containers: BTreeMap<String, MappedType>,
    array: Option<MappedType>,
    external_object: Option<MappedType>,
    opaque_value: Option<String>,
}

const DEFAULT_TYPES: &[(&str, &str, &str)] = &[
    ("System.Boolean", "bool", "stdbool.h"),
    ("System.Int32", "int", "cstdint"),
    ("System.Single", "float", "cmath"),
    ("System.IntPtr", "::BNM::Types::nint", "BNM/Defaults.hpp"),
    ("System.UInt32", "::BNM::Types::uint", "BNM/Defaults.hpp"),
    ("System.Byte", "::BNM::Types::byte", "BNM/Defaults.hpp"),
    ("System.Void", "void", "cstdint"),
    ("System.UInt64", "uint64_t", "cstdint"),
    ("System.Int64", "int64_t", "cstdint"),
    ("System.Int16", "int16_t", "cstdint"),
    ("System.Char", "char16_t", "cstdint"),
    ("System.SByte", "::BNM::Types::sbyte", "BNM/Defaults.hpp"),
    ("System.UInt16", "::BNM::Types::ushort", "BNM/Defaults.hpp"),
    ("System.UIntPtr", "::BNM::Types::nuint", "BNM/Defaults.hpp"),
    ("System.Double", "::BNM::Types::decimal", "BNM/Defaults.hpp"),
    (
        "System.String",
        "::BNM::Structures::Mono::String*",
        "BNM/BasicMonoStructures.hpp",
    ),
    (
        "System.Object",
        "::BNM::IL2CPP::Il2CppObject*",
        "BNM/Il2CppHeaders.hpp",
    ),
    ("System.Type", "::BNM::MonoType*", "BNM/Il2CppHeaders.hpp"),
    (
        "UnityEngine.Vector4",
        "::BNM::Structures::Unity::Vector4",
        "BNM/UnityStructures/Vector4.hpp",
    ),
    (
        "UnityEngine.Vector3",
        "::BNM::Structures::Unity::Vector3",
        "BNM/UnityStructures/Vector3.hpp",
    ),
    (
        "UnityEngine.Vector2",
        "::BNM::Structures::Unity::Vector2",
        "BNM/UnityStructures/Vector2.hpp",
    ),
    (
        "UnityEngine.Quaternion",
        "::BNM::Structures::Unity::Quaternion",
        "BNM/UnityStructures/Quaternion.hpp",
    ),
    (
        "UnityEngine.Rect",
        "::BNM::Structures::Unity::Rect",
        "BNM/UnityStructures/Rect.hpp",
    ),
    (
        "UnityEngine.Matrix4x4",
        "::BNM::Structures::Unity::Matrix4x4",
        "BNM/UnityStructures/Matrix4x4.hpp",
    ),
    (
        "UnityEngine.Matrix3x3",
        "::BNM::Structures::Unity::Matrix3x3",
        "BNM/UnityStructures/Matrix3x3.hpp",
    ),
    (
        "UnityEngine.Color",
        "::BNM::Structures::Unity::Color",
        "BNM/UnityStructures/Color.hpp",
    ),
    (
        "UnityEngine.RaycastHit",
        "::BNM::Structures::Unity::RaycastHit",
        "BNM/UnityStructures/RaycastHit.hpp",
    ),
    (
        "UnityEngine.Ray",
        "::BNM::Structures::Unity::Ray",
        "BNM/UnityStructures/Ray.hpp",
    ),
];

impl Default for TypeMap {
    fn default() -> Self {
        let types = DEFAULT_TYPES
            .iter()
            .map(|(identity, spelling, include)| {
                ((*identity).to_string(), MappedType::new(*spelling, *include))
            })
            .collect();

        let mut containers = BTreeMap::new();
        containers.insert(
            "System.Collections.Generic.List`1".to_string(),
            MappedType::new(
                "::BNM::Structures::Mono::List<{args}>*",
                "BNM/BasicMonoStructures.hpp",
            ),
        );
        containers.insert(
            "System.Collections.Generic.Dictionary`2".to_string(),
            MappedType::new(
                "::BNM::Structures::Mono::Dictionary<{args}>*",
                "BNM/ComplexMonoStructures.hpp",
            ),
        );

        TypeMap {
            types,
            containers,
            array: MappedType::new(
                "::BNM::Structures::Mono::Array<{args}>*",
                "BNM/BasicMonoStructures.hpp",
            ),
            external_object: MappedType::new(
                "::BNM::IL2CPP::Il2CppObject*",
                "BNM/Il2CppHeaders.hpp",
            ),
            opaque_value: "void*".to_string(),
        }
    }
}

impl TypeMap {
    /// Look up a well-known non-generic type
    #[must_use]
    pub fn lookup(&self, identity: &str) -> Option<&MappedType> {
        self.types.get(identity)
    }

    /// Look up a well-known generic container definition
    #[must_use]
    pub fn container(&self, identity: &str) -> Option<&MappedType> {
        self.containers.get(identity)
    }

    /// Layer a JSON type-map file on top of this map.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file can not be read and
    /// [`crate::Error::Json`] if it does not have the type-map shape.
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let overlay: TypeMapOverlay = File::from_file(path)?.parse_json()?;
        self.merge(overlay);
        Ok(())
    }

    /// Layer a JSON type-map document on top of this map.
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] if `json` does not have the type-map shape.
    pub fn merge_str(&mut self, json: &str) -> Result<()> {
        let overlay: TypeMapOverlay = serde_json::from_str(json)?;
        self.merge(overlay);
        Ok(())
    }

    fn merge(&mut self, overlay: TypeMapOverlay) {
        self.types.extend(overlay.types);
        self.containers.extend(overlay.containers);
        if let Some(array) = overlay.array {
            self.array = array;
        }
        if let Some(external_object) = overlay.external_object {
            self.external_object = external_object;
        }
        if let Some(opaque_value) = overlay.opaque_value {
            self.opaque_value = opaque_value;
        }
    }
}

/// How to handle two types whose sanitized C++ names collide in one scope.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CollisionPolicy {
    /// Keep the lossy spelling, warn, and skip every colliding type after the first
    #[default]
    Preserve,
    /// Append `_<n>` to every colliding type after the first, in identity order
    Suffix,
}

/// Settings for one generation run.
///
/// # Examples
///
/// ```rust
/// use bnm_sdkgen::config::{CollisionPolicy, GeneratorConfig};
///
/// let config = GeneratorConfig::default()
///     .with_collisions(CollisionPolicy::Suffix)
///     .keep_compiler_generated(true);
/// assert_eq!(config.collisions, CollisionPolicy::Suffix);
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Spelling tables
    pub type_map: TypeMap,
    /// Collision handling for sanitized type names
    pub collisions: CollisionPolicy,
    /// Emit `<Module>` and `<PrivateImplementationDetails>` types
    pub keep_compiler_generated: bool,
    /// Comment line written at the top of every unit
    pub banner: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            type_map: TypeMap::default(),
            collisions: CollisionPolicy::default(),
            keep_compiler_generated: false,
            banner: DEFAULT_BANNER.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Replace the spelling tables
    #[must_use]
    pub fn with_type_map(mut self, type_map: TypeMap) -> Self {
        self.type_map = type_map;
        self
    }

    /// Select the collision policy
    #[must_use]
    pub fn with_collisions(mut self, collisions: CollisionPolicy) -> Self {
        self.collisions = collisions;
        self
    }

    /// Toggle emission of compiler generated types
    #[must_use]
    pub fn keep_compiler_generated(mut self, keep: bool) -> Self {
        self.keep_compiler_generated = keep;
        self
    }

    /// Replace the banner line
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Returns true if `descriptor` is filtered out of generation
    #[must_use]
    pub fn skips(&self, descriptor: &TypeDescriptor) -> bool {
        !self.keep_compiler_generated && descriptor.is_compiler_generated()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::metadata::TypeKind;

    #[test]
    fn test_default_type_map() {
        let map = TypeMap::default();
        assert_eq!(map.lookup("System.Int32").unwrap().spelling, "int");
        assert_eq!(
            map.lookup("System.Byte").unwrap().spelling,
            "::BNM::Types::byte"
        );
        assert_eq!(map.lookup("System.Char").unwrap().spelling, "char16_t");
        assert!(map.lookup("Game.Player").is_none());
        assert_eq!(
            map.container("System.Collections.Generic.List`1")
                .unwrap()
                .render("int"),
            "::BNM::Structures::Mono::List<int>*"
        );
        assert_eq!(map.array.render("float"), "::BNM::Structures::Mono::Array<float>*");
    }

    #[test]
    fn test_merge_overlay() {
        let mut map = TypeMap::default();
        map.merge_str(
            r#"{
                "types": {
                    "System.Int32": { "spelling": "int32_t", "include": "cstdint" },
                    "System.Decimal": { "spelling": "::BNM::Types::decimal", "include": "BNM/Defaults.hpp" }
                },
                "opaque_value": "std::uintptr_t"
            }"#,
        )
        .unwrap();

        assert_eq!(map.lookup("System.Int32").unwrap().spelling, "int32_t");
        assert!(map.lookup("System.Decimal").is_some());
        assert!(map.lookup("System.Boolean").is_some());
        assert_eq!(map.opaque_value, "std::uintptr_t");
        assert_eq!(map.containers.len(), 2);
    }

    #[test]
    fn test_merge_rejects_unknown_sections() {
        let mut map = TypeMap::default();
        assert!(map.merge_str(r#"{ "typez": {} }"#).is_err());
    }

    #[test]
    fn test_merge_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(
            &path,
            r#"{ "external_object": { "spelling": "void*", "include": "cstddef" } }"#,
        )
        .unwrap();

        let mut map = TypeMap::default();
        map.merge_file(&path).unwrap();
        assert_eq!(map.external_object.spelling, "void*");
        assert_eq!(map.external_object.include, "cstddef");
    }

    #[test]
    fn test_collision_policy_names() {
        assert_eq!(
            CollisionPolicy::from_str("suffix").unwrap(),
            CollisionPolicy::Suffix
        );
        assert_eq!(CollisionPolicy::Preserve.to_string(), "preserve");
        assert!(CollisionPolicy::from_str("rename").is_err());
    }

    #[test]
    fn test_compiler_generated_filter() {
        let module = TypeDescriptor::new("", "<Module>", TypeKind::Class);
        let details = TypeDescriptor::new(
            "",
            "<PrivateImplementationDetails>{B2D0}",
            TypeKind::Class,
        );
        let player = TypeDescriptor::new("Game", "Player", TypeKind::Class);

        let config = GeneratorConfig::default();
        assert!(config.skips(&module));
        assert!(config.skips(&details));
        assert!(!config.skips(&player));

        let config = config.keep_compiler_generated(true);
        assert!(!config.skips(&module));
    }
}
