//! ProjectLoader builder API for loading module dumps.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use rayon::prelude::*;

use crate::{
    metadata::ModuleDump,
    project::{ProjectResult, SdkProject},
    Error, Result,
};

/// File extension of module dumps picked up from input directories
pub const DUMP_EXTENSION: &str = "json";

/// Builder for loading module dumps into an [`SdkProject`].
///
/// Inputs are either dump files or directories, which are scanned (non-recursively) for
/// `.json` files. Dumps are parsed in parallel and registered in input order, so the
/// resulting registry does not depend on thread scheduling.
///
/// # Usage Examples
///
/// ```rust,no_run
/// use bnm_sdkgen::project::ProjectLoader;
///
/// let result = ProjectLoader::new()
///     .input("dumps/Assembly-CSharp.json")?
///     .input("dumps/plugins")?
///     .strict_mode(false)
///     .build()?;
/// # Ok::<(), bnm_sdkgen::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ProjectLoader {
    /// Dump files to load, in load order
    inputs: Vec<PathBuf>,
    /// Whether to fail on the first broken dump or continue with partial loading
    strict_mode: bool,
}

impl ProjectLoader {
    /// Create a new ProjectLoader builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dump file, or every `.json` file of a directory (sorted by file name).
    ///
    /// # Errors
    /// Returns an error if the path does not exist or a directory can not be read.
    pub fn input<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Error(format!(
                "Input does not exist: {}",
                path.display()
            )));
        }

        if path.is_dir() {
            let mut found = Vec::new();
            for entry in fs::read_dir(path)? {
                let candidate = entry?.path();
                let is_dump = candidate
                    .extension()
                    .is_some_and(|extension| extension.eq_ignore_ascii_case(DUMP_EXTENSION));
                if candidate.is_file() && is_dump {
                    found.push(candidate);
                }
            }

            if found.is_empty() {
                warn!("No module dumps found in {}", path.display());
            }
            found.sort();
            self.inputs.extend(found);
        } else {
            self.inputs.push(path.to_path_buf());
        }

        Ok(self)
    }

    /// Enable or disable strict mode.
    ///
    /// In strict mode, the first dump that fails to load fails the build. In non-strict
    /// mode (default), failures are recorded in [`ProjectResult::failed_loads`] and the
    /// remaining dumps are still loaded.
    #[must_use]
    pub fn strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// The dump files that will be loaded, in load order
    #[must_use]
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Load all inputs into a new project.
    ///
    /// # Errors
    /// Returns an error if no dump file was given, or in strict mode if any dump fails to
    /// load.
    pub fn build(self) -> Result<ProjectResult> {
        if self.inputs.is_empty() {
            return Err(Error::Error(
                "No module dumps specified. Use input() to add dump files or directories."
                    .to_string(),
            ));
        }

        let parsed: Vec<(&PathBuf, Result<ModuleDump>)> = self
            .inputs
            .par_iter()
            .map(|path| (path, ModuleDump::from_file(path)))
            .collect();

        let mut result = ProjectResult::new();
        let mut project = SdkProject::new();
        for (path, dump) in parsed {
            let loaded = dump.and_then(|dump| {
                project.add_module(&dump)?;
                Ok(dump.name)
            });

            match loaded {
                Ok(name) => {
                    debug!("Loaded {} from {}", name, path.display());
                    result.record_success(name);
                }
                Err(error) => {
                    if self.strict_mode {
                        return Err(Error::Error(format!(
                            "Failed to load {} in strict mode: {}",
                            path.display(),
                            error
                        )));
                    }
                    warn!("Failed to load {}: {}", path.display(), error);
                    result.record_failure(path.display().to_string(), error.to_string());
                }
            }
        }

        result.project = project;
        Ok(result)
    }
}
