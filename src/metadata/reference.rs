//! Type references as they appear in field, parameter, return and base-type positions.
//!
//! A [`TypeReference`] mirrors the shape of an ECMA-335 type signature reduced to the cases
//! the code generator distinguishes: a plain named type, the three wrapping modifiers
//! (by-reference, pointer, array), a generic instantiation, and a generic parameter.
//! Named references carry the target's identity string and are resolved against the
//! [`crate::metadata::TypeRegistry`] on demand; failing to resolve is an expected outcome
//! for types that live in modules which were not dumped.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A possibly-unresolved reference to a type.
///
/// # Examples
///
/// ```rust
/// use bnm_sdkgen::metadata::TypeReference;
///
/// // ref List<int>
/// let list = TypeReference::generic_instance(
///     "System.Collections.Generic.List`1",
///     vec![TypeReference::named("System.Int32")],
/// )
/// .by_ref();
/// assert_eq!(list.to_string(), "System.Collections.Generic.List`1<System.Int32>&");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeReference {
    /// A type referenced by its identity (`Namespace.Name` or `Namespace.Outer/Inner`)
    Named {
        /// Identity of the referenced type
        name: String,
    },
    /// Managed reference (`ref`, `out`, `in`) to the element type
    ByRef {
        /// The referenced element
        element: Box<TypeReference>,
    },
    /// Unmanaged pointer to the element type
    Pointer {
        /// The pointed-to element
        element: Box<TypeReference>,
    },
    /// Array of the element type
    Array {
        /// Array element type
        element: Box<TypeReference>,
        /// Number of dimensions, 1 for vectors
        #[serde(default = "default_rank")]
        rank: u32,
    },
    /// Instantiation of a generic type definition
    GenericInstance {
        /// Identity of the generic type definition (with arity marker)
        base: String,
        /// Type arguments, in declaration order
        args: Vec<TypeReference>,
    },
    /// A generic parameter of the enclosing type or method
    GenericParameter {
        /// Parameter name as declared
        name: String,
    },
}

fn default_rank() -> u32 {
    1
}

impl TypeReference {
    /// Reference a type by identity
    pub fn named(name: impl Into<String>) -> Self {
        TypeReference::Named { name: name.into() }
    }

    /// Reference a generic parameter by name
    pub fn generic_parameter(name: impl Into<String>) -> Self {
        TypeReference::GenericParameter { name: name.into() }
    }

    /// Instantiate the generic type `base` with `args`
    pub fn generic_instance(base: impl Into<String>, args: Vec<TypeReference>) -> Self {
        TypeReference::GenericInstance {
            base: base.into(),
            args,
        }
    }

    /// Wrap `self` into a by-reference modifier
    #[must_use]
    pub fn by_ref(self) -> Self {
        TypeReference::ByRef {
            element: Box::new(self),
        }
    }

    /// Wrap `self` into a pointer modifier
    #[must_use]
    pub fn pointer(self) -> Self {
        TypeReference::Pointer {
            element: Box::new(self),
        }
    }

    /// Wrap `self` into a single dimensional array
    #[must_use]
    pub fn array(self) -> Self {
        TypeReference::Array {
            element: Box::new(self),
            rank: 1,
        }
    }

    /// Returns true for managed by-reference types
    #[must_use]
    pub fn is_by_ref(&self) -> bool {
        matches!(self, TypeReference::ByRef { .. })
    }

    /// The identity this reference points at after stripping all modifiers, if any.
    ///
    /// Generic parameters have no identity.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        match self {
            TypeReference::Named { name } => Some(name),
            TypeReference::GenericInstance { base, .. } => Some(base),
            TypeReference::ByRef { element }
            | TypeReference::Pointer { element }
            | TypeReference::Array { element, .. } => element.identity(),
            TypeReference::GenericParameter { .. } => None,
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeReference::Named { name } => write!(f, "{name}"),
            TypeReference::ByRef { element } => write!(f, "{element}&"),
            TypeReference::Pointer { element } => write!(f, "{element}*"),
            TypeReference::Array { element, rank } => {
                write!(f, "{element}[{}]", ",".repeat(rank.saturating_sub(1) as usize))
            }
            TypeReference::GenericInstance { base, args } => {
                write!(f, "{base}<")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")
            }
            TypeReference::GenericParameter { name } => write!(f, "{name}"),
        }
    }
}
