//! C++ header generation for the ByNameModding runtime.
//!
//! This module turns a populated [`crate::metadata::TypeRegistry`] into one header (a
//! [`Unit`]) per top-level type plus one index header per namespace. Generation is a pure
//! function of the registry and the [`crate::config::GeneratorConfig`]: the same input always
//! yields byte-identical units.
//!
//! # Architecture
//!
//! - [`sanitize`] - metadata names to C++ identifiers
//! - [`mapper`] - type references to C++ spellings and their requirements
//! - [`deps`] - per-unit include and forward declaration collection
//! - [`members`] - field accessors, constructors, method thunks, up-casts
//! - [`signature`] - per declaring type member deduplication
//! - [`assembler`] - unit section ordering and type body rendering
//! - [`runtime`] - names of the BNM runtime API
//! - [`writer`] - indentation aware text buffer
//!
//! # Concurrency
//!
//! Types are rendered in parallel on the `rayon` pool. Workers only read the registry and
//! the configuration; the only shared mutable state is the [`NamespaceIndex`], a concurrent
//! map that every finished unit is inserted into.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bnm_sdkgen::{codegen::Generator, config::GeneratorConfig, project::ProjectLoader};
//!
//! let result = ProjectLoader::new().input("dumps")?.build()?;
//! let config = GeneratorConfig::default();
//! let generator = Generator::new(result.project.registry(), &config);
//!
//! let sdk = generator.generate();
//! for module in &sdk.modules {
//!     println!("{}: {} units", module.name, module.units.len());
//! }
//! # Ok::<(), bnm_sdkgen::Error>(())
//! ```

pub mod assembler;
pub mod deps;
pub mod mapper;
pub mod members;
pub mod runtime;
pub mod sanitize;
pub mod signature;
pub mod writer;

use std::{collections::BTreeSet, sync::Arc};

use dashmap::DashMap;
use log::{info, warn};
use rayon::prelude::*;

use crate::{
    config::GeneratorConfig,
    metadata::{RegisteredType, SymbolTable, TypeRegistry},
    Error, Result,
};

pub use assembler::{UnitAssembler, UnitRenderer, UnitState};
pub use mapper::{Position, Resolution, Spelling, TypeMapper};
pub use sanitize::sanitize;

/// The header generated for one top-level type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Identity of the subject type
    pub identity: String,
    /// Module that declares the subject
    pub module: Arc<str>,
    /// Metadata namespace of the subject
    pub namespace: String,
    /// Path relative to the include root (`Game/Player.h`), also the include token
    pub path: String,
    /// Header text
    pub text: String,
}

/// The header including every unit of one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexUnit {
    /// Metadata namespace
    pub namespace: String,
    /// Path relative to the include root (`Game/Core.hpp`)
    pub path: String,
    /// Header text
    pub text: String,
}

/// Generation result of one module
#[derive(Debug)]
pub struct GeneratedModule {
    /// Module name
    pub name: Arc<str>,
    /// Generated units, sorted by path
    pub units: Vec<Unit>,
    /// Types that failed to render, with the reason
    pub failures: Vec<(String, Error)>,
}

/// Generation result of a whole run
#[derive(Debug)]
pub struct Sdk {
    /// Per module results, in registration order
    pub modules: Vec<GeneratedModule>,
    /// Namespace index units, sorted by path
    pub indices: Vec<IndexUnit>,
}

impl Sdk {
    /// Total number of generated units
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.modules.iter().map(|module| module.units.len()).sum()
    }

    /// Total number of types that failed to render
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.modules.iter().map(|module| module.failures.len()).sum()
    }

    /// Iterate over all units of all modules
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.modules.iter().flat_map(|module| module.units.iter())
    }
}

/// Concurrent collection of unit paths per namespace.
#[derive(Debug, Default)]
pub struct NamespaceIndex {
    entries: DashMap<String, (String, BTreeSet<String>)>,
}

impl NamespaceIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `unit` under the index of its namespace
    pub fn insert(&self, unit: &Unit) {
        let path = index_path(&unit.namespace);
        self.entries
            .entry(path)
            .or_insert_with(|| (unit.namespace.clone(), BTreeSet::new()))
            .1
            .insert(unit.path.clone());
    }

    /// Number of namespaces seen so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no unit was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render one index unit per namespace, sorted by path
    #[must_use]
    pub fn units(&self, banner: &str) -> Vec<IndexUnit> {
        let mut units: Vec<IndexUnit> = self
            .entries
            .iter()
            .map(|entry| {
                let (namespace, paths) = entry.value();
                let mut text = format!("#pragma once\n// {banner}\n");
                for path in paths {
                    text.push_str(&format!("#include <{path}>\n"));
                }

                IndexUnit {
                    namespace: namespace.clone(),
                    path: entry.key().clone(),
                    text,
                }
            })
            .collect();

        units.sort_by(|left, right| left.path.cmp(&right.path));
        units
    }
}

/// Path of the index unit of `namespace` (`Game/Core.hpp`)
#[must_use]
pub fn index_path(namespace: &str) -> String {
    format!("{}.hpp", sanitize::namespace_segments(namespace).join("/"))
}

/// Renders units for every emitted type of a registry.
pub struct Generator<'a> {
    registry: &'a TypeRegistry,
    config: &'a GeneratorConfig,
    symbols: SymbolTable,
    index: NamespaceIndex,
}

impl<'a> Generator<'a> {
    /// Create a generator, fixing every type's emitted identifier under the configured
    /// collision policy
    #[must_use]
    pub fn new(registry: &'a TypeRegistry, config: &'a GeneratorConfig) -> Self {
        Generator {
            registry,
            config,
            symbols: registry.symbols(config.collisions),
            index: NamespaceIndex::new(),
        }
    }

    /// The symbol table used for all spellings
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// A type mapper over this generator's registry, symbols and configuration
    #[must_use]
    pub fn mapper(&self) -> TypeMapper<'_> {
        TypeMapper::new(self.registry, &self.symbols, self.config)
    }

    /// Returns true if `entry` gets its own unit
    #[must_use]
    pub fn emits(&self, entry: &RegisteredType) -> bool {
        !entry.is_nested()
            && !self.config.skips(&entry.descriptor)
            && !self.symbols.is_suppressed(&entry.identity)
    }

    /// Render the unit of the top-level type `identity` and record it in the namespace index
    ///
    /// # Errors
    /// Returns [`Error::Error`] if `identity` is not an emitted top-level type, and
    /// [`Error::InvalidTransition`] if assembling the unit fails.
    pub fn generate_type(&self, identity: &str) -> Result<Unit> {
        let entry = self
            .registry
            .resolve(identity)
            .ok_or_else(|| Error::Error(format!("Unknown type - {identity}")))?;
        if !self.emits(entry) {
            return Err(Error::Error(format!(
                "Type is not emitted as its own unit - {identity}"
            )));
        }

        let mapper = self.mapper();
        let text = UnitRenderer::new(&mapper).render(entry)?;
        let unit = Unit {
            identity: entry.identity.clone(),
            module: entry.module.clone(),
            namespace: entry.namespace().to_string(),
            path: mapper.unit_path(entry),
            text,
        };

        self.index.insert(&unit);
        Ok(unit)
    }

    /// Render every emitted top-level type declared by `module`.
    ///
    /// A type that fails is logged and reported in [`GeneratedModule::failures`]; the
    /// remaining types are unaffected.
    pub fn generate_module(&self, module: &str) -> GeneratedModule {
        let entries: Vec<&Arc<RegisteredType>> = self
            .registry
            .module_types(module)
            .filter(|entry| self.emits(entry))
            .collect();

        let results: Vec<(String, Result<Unit>)> = entries
            .par_iter()
            .map(|entry| (entry.identity.clone(), self.generate_type(&entry.identity)))
            .collect();

        let mut units = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (identity, result) in results {
            match result {
                Ok(unit) => units.push(unit),
                Err(error) => {
                    warn!("Skipping {identity}: {error}");
                    failures.push((identity, error));
                }
            }
        }
        units.sort_by(|left, right| left.path.cmp(&right.path));

        info!("Generated {} units for module {}", units.len(), module);
        GeneratedModule {
            name: Arc::from(module),
            units,
            failures,
        }
    }

    /// Index units for every namespace generated so far
    #[must_use]
    pub fn indices(&self) -> Vec<IndexUnit> {
        self.index.units(&self.config.banner)
    }

    /// Render every module of the registry, then the namespace indices
    #[must_use]
    pub fn generate(&self) -> Sdk {
        let modules = self
            .registry
            .modules()
            .iter()
            .map(|module| self.generate_module(module))
            .collect();

        Sdk {
            modules,
            indices: self.indices(),
        }
    }
}
