//! Loading module dumps into a generation project.
//!
//! An [`SdkProject`] owns the [`TypeRegistry`] that all loaded modules are registered into.
//! Projects are normally built through the [`ProjectLoader`] builder, which discovers dump
//! files, parses them in parallel and reports per-module failures in a [`ProjectResult`]
//! instead of aborting the whole batch.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use bnm_sdkgen::project::ProjectLoader;
//!
//! let result = ProjectLoader::new()
//!     .input("dumps/")?
//!     .build()?;
//!
//! println!(
//!     "Loaded {} modules with {} types",
//!     result.success_count(),
//!     result.project.type_count()
//! );
//! for (path, error) in &result.failed_loads {
//!     eprintln!("{path}: {error}");
//! }
//! # Ok::<(), bnm_sdkgen::Error>(())
//! ```

mod loader;
mod result;

use std::sync::Arc;

use log::info;

use crate::{
    metadata::{ModuleDump, TypeRegistry},
    Error, Result,
};

pub use loader::{ProjectLoader, DUMP_EXTENSION};
pub use result::ProjectResult;

/// A set of loaded modules sharing one type registry.
#[derive(Debug, Default)]
pub struct SdkProject {
    registry: TypeRegistry,
}

impl SdkProject {
    /// Create an empty project
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register all types of `dump`.
    ///
    /// # Errors
    /// Returns [`Error::Error`] if a module with the same name is already loaded.
    pub fn add_module(&mut self, dump: &ModuleDump) -> Result<usize> {
        if self
            .registry
            .modules()
            .iter()
            .any(|module| module.as_ref() == dump.name)
        {
            return Err(Error::Error(format!(
                "Module {} is already loaded",
                dump.name
            )));
        }

        let registered = self.registry.register_module(dump);
        info!("Loaded module {} with {} types", dump.name, registered);
        Ok(registered)
    }

    /// The registry of all loaded types
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Names of the loaded modules, in load order
    #[must_use]
    pub fn modules(&self) -> &[Arc<str>] {
        self.registry.modules()
    }

    /// Number of loaded modules
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.registry.modules().len()
    }

    /// Number of loaded types, nested types included
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if no module is loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.module_count() == 0
    }
}
