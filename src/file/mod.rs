//! Input file access for module dumps and configuration files.
//!
//! A [`File`] wraps one of two [`Backend`]s: a memory-mapped file on disk
//! ([`physical::Physical`]) or an owned buffer ([`memory::Memory`]), and decodes its
//! content as JSON.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bnm_sdkgen::{metadata::ModuleDump, File};
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("dumps/Assembly-CSharp.json"))?;
//! let dump: ModuleDump = file.parse_json()?;
//! println!("{} declares {} types", dump.name, dump.types.len());
//! # Ok::<(), bnm_sdkgen::Error>(())
//! ```

mod memory;
mod physical;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::{Error, Result};
use memory::Memory;
use physical::Physical;

/// Read access to the raw bytes of an input.
pub trait Backend: Send + Sync {
    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;

    /// Returns true if the buffer holds no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A loaded input file.
pub struct File {
    /// Where the data came from, `None` for in-memory inputs
    path: Option<PathBuf>,
    /// The data source
    data: Box<dyn Backend>,
}

impl File {
    /// Memory-map a file from disk.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file can not be opened,
    /// [`crate::Error::Empty`] if it has no content.
    pub fn from_file(path: &Path) -> Result<File> {
        let input = Physical::new(path)?;
        if input.is_empty() {
            return Err(Error::Empty);
        }

        Ok(File {
            path: Some(path.to_path_buf()),
            data: Box::new(input),
        })
    }

    /// Wrap an in-memory buffer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] if `data` is empty.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        if data.is_empty() {
            return Err(Error::Empty);
        }

        Ok(File {
            path: None,
            data: Box::new(Memory::new(data)),
        })
    }

    /// The path the file was loaded from.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The raw bytes of the input.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// Length of the input in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the input holds no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode the input as a JSON document.
    ///
    /// # Errors
    /// Returns [`crate::Error::Json`] if the content is not valid JSON for `T`.
    pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(self.data())?)
    }
}
