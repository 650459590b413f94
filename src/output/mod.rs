//! Persisting generated units.
//!
//! Units are written below `<out>/include`, one file per unit at its relative path, plus
//! one index header per namespace. Modules are written independently: a module whose unit
//! can not be written is reported as failed and the remaining modules are still written.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{debug, info, warn};

use crate::{
    codegen::{GeneratedModule, IndexUnit, Sdk},
    Error, Result,
};

/// Name of the include root below the output directory
pub const INCLUDE_DIR: &str = "include";

/// Outcome of writing a complete [`Sdk`]
#[derive(Debug, Default)]
pub struct OutputReport {
    /// Number of unit and index files written
    pub written: usize,
    /// Modules (or `"<index>"` for the namespace indices) that failed, with the reason
    pub failed: Vec<(Arc<str>, Error)>,
}

impl OutputReport {
    /// Returns true if every module was written
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes units below an output directory.
pub struct OutputWriter {
    root: PathBuf,
    include: PathBuf,
}

impl OutputWriter {
    /// Create a writer for the output directory `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let include = root.join(INCLUDE_DIR);
        OutputWriter { root, include }
    }

    /// The output directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The include root units are written to
    #[must_use]
    pub fn include_dir(&self) -> &Path {
        &self.include
    }

    /// Remove the output directory and everything below it
    ///
    /// # Errors
    /// Returns [`Error::OutputError`] if the directory exists but can not be removed.
    pub fn clean(&self) -> Result<()> {
        if !self.root.exists() {
            return Ok(());
        }

        info!("Removing {}", self.root.display());
        fs::remove_dir_all(&self.root).map_err(|source| Error::OutputError {
            path: self.root.clone(),
            source,
        })
    }

    /// Absolute location of a unit given its relative, `/` separated path
    #[must_use]
    pub fn unit_location(&self, relative: &str) -> PathBuf {
        let mut location = self.include.clone();
        for segment in relative.split('/').filter(|segment| !segment.is_empty()) {
            location.push(segment);
        }
        location
    }

    /// Write `text` to the unit at `relative`, creating parent directories
    ///
    /// # Errors
    /// Returns [`Error::OutputError`] if a directory or the file can not be written.
    pub fn write_unit(&self, relative: &str, text: &str) -> Result<PathBuf> {
        let location = self.unit_location(relative);
        if let Some(parent) = location.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::OutputError {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&location, text).map_err(|source| Error::OutputError {
            path: location.clone(),
            source,
        })?;
        debug!("Wrote {}", location.display());
        Ok(location)
    }

    /// Write every unit of `module`, adding each file written to `written`
    ///
    /// # Errors
    /// Returns the first [`Error::OutputError`]; units after it are not written, units
    /// before it stay on disk and are counted.
    pub fn write_module(&self, module: &GeneratedModule, written: &mut usize) -> Result<()> {
        for unit in &module.units {
            self.write_unit(&unit.path, &unit.text)?;
            *written += 1;
        }
        Ok(())
    }

    /// Write the namespace index units, adding each file written to `written`
    ///
    /// # Errors
    /// Returns the first [`Error::OutputError`].
    pub fn write_indices(&self, indices: &[IndexUnit], written: &mut usize) -> Result<()> {
        for index in indices {
            self.write_unit(&index.path, &index.text)?;
            *written += 1;
        }
        Ok(())
    }

    /// Write all modules and indices of `sdk`, continuing past failed modules
    pub fn write_sdk(&self, sdk: &Sdk) -> OutputReport {
        let mut report = OutputReport::default();

        for module in &sdk.modules {
            if let Err(error) = self.write_module(module, &mut report.written) {
                warn!("Failed to write module {}: {}", module.name, error);
                report.failed.push((module.name.clone(), error));
            }
        }

        if let Err(error) = self.write_indices(&sdk.indices, &mut report.written) {
            warn!("Failed to write namespace indices: {error}");
            report.failed.push((Arc::from("<index>"), error));
        }

        info!(
            "Wrote {} files to {}",
            report.written,
            self.include.display()
        );
        report
    }
}
