//! The input model: type definitions as read from module dumps.
//!
//! # Architecture
//!
//! - [`descriptor`] - owned type, field, method and parameter definitions
//! - [`reference`] - type references in member signatures, possibly unresolved
//! - [`attributes`] - ECMA-335 field and method attribute flags
//! - [`module`] - one module dump and its validation rules
//! - [`registry`] - identity index across all loaded modules and the emitted symbol table
//!
//! Everything in this module is immutable once loaded. Descriptors are shared through
//! [`std::sync::Arc`] so the registry and the generator never copy member lists.

pub mod attributes;
pub mod descriptor;
pub mod module;
pub mod reference;
pub mod registry;

pub use attributes::{FieldAttributes, MethodAttributes};
pub use descriptor::{
    ConstantValue, FieldDescriptor, MethodDescriptor, OperatorName, ParamDescriptor,
    TypeDescriptor, TypeKind,
};
pub use module::ModuleDump;
pub use reference::TypeReference;
pub use registry::{
    nested_identity, RegisteredType, SymbolTable, TypeRegistry, NESTED_SEPARATOR,
};
