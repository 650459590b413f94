// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
#![allow(clippy::too_many_arguments)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # bnm-sdkgen
//!
//! Generates C++17 headers for the [ByNameModding](https://github.com/ByNameModding/BNM-Android)
//! runtime from the type metadata of IL2CPP compiled Unity games.
//!
//! The generated headers do not reproduce object layouts. Every field accessor and method
//! wrapper resolves its member by name through the runtime class of the declaring type on
//! first use, so the headers keep working across game updates that shuffle offsets.
//!
//! ## Features
//!
//! - **Complete type coverage** - classes, structs, enums, interfaces, nested and generic types
//! - **Include graph without cycles** - pointers cross units through forward declarations only
//! - **Graceful degradation** - unresolvable and value types fall back to opaque spellings
//!   or defaulted template parameters instead of failing the run
//! - **Deterministic output** - byte-identical headers for identical input
//! - **Parallel generation** - types are rendered on the `rayon` thread pool
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bnm_sdkgen::prelude::*;
//!
//! let result = ProjectLoader::new().input("dumps")?.build()?;
//! let config = GeneratorConfig::default();
//!
//! let generator = Generator::new(result.project.registry(), &config);
//! let sdk = generator.generate();
//!
//! let report = OutputWriter::new("sdk").write_sdk(&sdk);
//! println!("{} files written", report.written);
//! # Ok::<(), bnm_sdkgen::Error>(())
//! ```
//!
//! ## Input
//!
//! The generator reads *module dumps*: JSON documents describing the type definitions of
//! one compiled module each. They are produced by an external dumper from the game's
//! `global-metadata.dat`, see [`metadata::module`] for the format.
//!
//! ## Output
//!
//! One header per top-level type at `include/<Namespace>/<Name>.h`, with nested types
//! emitted inside their declaring type, plus one `include/<Namespace>.hpp` per namespace
//! that includes every unit of that namespace.
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```
#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust,no_run
/// use bnm_sdkgen::prelude::*;
///
/// let result = ProjectLoader::new().input("dumps/Assembly-CSharp.json")?.build()?;
/// println!("{} types", result.project.type_count());
/// # Ok::<(), bnm_sdkgen::Error>(())
/// ```
pub mod prelude;

/// The input model: type, field and method descriptors, type references and the
/// cross-module type registry.
///
/// # Key Components
///
/// - [`metadata::TypeDescriptor`] - one type definition with its members and nested types
/// - [`metadata::TypeReference`] - a possibly unresolved reference to a type
/// - [`metadata::ModuleDump`] - the type definitions of one module
/// - [`metadata::TypeRegistry`] - identity index over all loaded modules
pub mod metadata;

/// Generator settings and the well-known type table.
pub mod config;

/// Header generation: type mapping, member emission, dependency collection and unit
/// assembly.
pub mod codegen;

/// Writing generated units to disk.
pub mod output;

/// Loading module dumps from files and directories.
pub mod project;

/// `bnm-sdkgen` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust,no_run
/// use bnm_sdkgen::{metadata::ModuleDump, Result};
///
/// fn load(path: &str) -> Result<ModuleDump> {
///     ModuleDump::from_file(std::path::Path::new(path))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `bnm-sdkgen` Error type
///
/// The main error type for all operations in this crate. Only module level problems are
/// errors; problems with single members degrade the generated code instead.
///
/// # Examples
///
/// ```rust,no_run
/// use bnm_sdkgen::{metadata::ModuleDump, Error};
///
/// match ModuleDump::from_file(std::path::Path::new("dumps/Assembly-CSharp.json")) {
///     Ok(dump) => println!("{} types", dump.type_count()),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Memory mapped or in-memory input data.
///
/// # Example
///
/// ```rust,no_run
/// use bnm_sdkgen::{metadata::ModuleDump, File};
///
/// let file = File::from_file(std::path::Path::new("dumps/Assembly-CSharp.json"))?;
/// let dump: ModuleDump = file.parse_json()?;
/// # Ok::<(), bnm_sdkgen::Error>(())
/// ```
pub use file::File;
