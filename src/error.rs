use std::path::PathBuf;

use thiserror::Error;

use crate::codegen::UnitState;

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

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Only module-level problems surface as errors. Everything that happens below the module
/// level while emitting code (unresolvable references, unsupported members, duplicate
/// signatures) is handled locally by degrading or skipping, and never produces an `Error`.
///
/// # Error Categories
///
/// ## Input Errors
/// - [`Error::Malformed`] - A module dump is structurally invalid
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::Json`] - A module dump or type-map file is not valid JSON
/// - [`Error::DuplicateType`] - Two types in one module share an identity
///
/// ## I/O Errors
/// - [`Error::FileError`] - Filesystem I/O errors while reading input
/// - [`Error::OutputError`] - Filesystem I/O errors while writing a unit
///
/// ## Generation Errors
/// - [`Error::InvalidTransition`] - The unit assembler was driven out of order
///
/// # Examples
///
/// ```rust,no_run
/// use bnm_sdkgen::{project::ProjectLoader, Error};
///
/// match ProjectLoader::new().input("dumps/Assembly-CSharp.json") {
///     Ok(loader) => println!("input accepted"),
///     Err(Error::FileError(io_err)) => eprintln!("I/O error: {}", io_err),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The module dump is damaged and could not be loaded.
    ///
    /// The error includes the source location where the malformation was detected.
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

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening or mapping input files.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Failed to write a generated unit.
    ///
    /// This is fatal for the module the unit belongs to, but not for the batch.
    #[error("Failed to write {path}: {source}")]
    OutputError {
        /// The path that could not be written
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// JSON decoding error from `serde_json`.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),

    /// A type identity occurs more than once within a single module.
    #[error("Duplicate type identity - {0}")]
    DuplicateType(String),

    /// The unit assembler was asked to skip or repeat a section.
    #[error("Invalid unit transition from {from} to {to}")]
    InvalidTransition {
        /// The state the assembler was in
        from: UnitState,
        /// The state that was requested
        to: UnitState,
    },
}
