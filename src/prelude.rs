//! # bnm-sdkgen Prelude
//!
//! This module provides a convenient prelude for the most commonly used types of the
//! library. Import it to load module dumps, generate headers and write them to disk.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bnm-sdkgen operations
pub use crate::Error;

/// The result type used throughout bnm-sdkgen
pub use crate::Result;

// ================================================================================================
// Loading
// ================================================================================================

/// Module dump loading
pub use crate::project::{ProjectLoader, ProjectResult, SdkProject};

/// Input model
pub use crate::metadata::{
    FieldDescriptor, MethodDescriptor, ModuleDump, TypeDescriptor, TypeKind, TypeReference,
    TypeRegistry,
};

// ================================================================================================
// Generation
// ================================================================================================

/// Generator settings
pub use crate::config::{CollisionPolicy, GeneratorConfig, TypeMap};

/// Generator and its results
pub use crate::codegen::{GeneratedModule, Generator, IndexUnit, Sdk, Unit};

/// Writing units to disk
pub use crate::output::{OutputReport, OutputWriter};
